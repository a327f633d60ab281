//! 链接与ID改写
//!
//! 所有页面最终拼接为一个文档，因此页面内的ID需要加上页面前缀，
//! 站内链接改写为文档内的片段引用。

use once_cell::sync::Lazy;
use scraper::Selector;

use crate::booklet::contents::PageRecord;
use crate::booklet::error::Result;
use crate::booklet::rewriter::{PageDom, PageRewriter};

static ID_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("[id]").expect("valid id selector"));
static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("valid link selector"));

/// 将页面路径转换为元素ID
///
/// 去掉开头的 `/`，第一个 `/` 替换为 `__`，第一个 `#` 替换为 `--`。
/// 更深层的路径分隔符保持不变。
pub fn convert_path_to_id(path: &str) -> String {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    trimmed.replacen('/', "__", 1).replacen('#', "--", 1)
}

fn is_external(link: &str) -> bool {
    let lower = link.get(..8).unwrap_or(link).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// 改写站内链接和ID
pub struct LinkRewriter;

impl PageRewriter for LinkRewriter {
    fn description(&self) -> &str {
        "Rewriting internal links"
    }

    fn rewrite(&self, dom: &mut PageDom, page: &PageRecord) -> Result<()> {
        let page_id = convert_path_to_id(&page.path);

        for id in dom.select(&ID_SELECTOR) {
            if let Some(value) = dom.attr(id, "id") {
                dom.set_attr(id, "id", format!("{}--{}", page_id, value));
            }
        }

        if let Some(root) = dom.page_root() {
            dom.set_attr(root, "id", page_id.clone());
        }

        for id in dom.select(&LINK_SELECTOR) {
            let Some(link) = dom.attr(id, "href") else {
                continue;
            };
            if link.is_empty() || is_external(&link) {
                continue;
            }
            let target = if link.starts_with('#') {
                format!("{}{}", page.path, link)
            } else {
                link
            };
            dom.set_attr(id, "href", format!("#{}", convert_path_to_id(&target)));
        }

        Ok(())
    }
}
