//! 封面页与目录页的生成

use std::fs;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use once_cell::sync::Lazy;
use scraper::Selector;

use crate::booklet::config::{CoverOptions, TocOptions};
use crate::booklet::contents::{
    COVER_PAGE_ID, Delimiter, NavigationNode, PAGE_CLASS, PageRecord, SectionAddress, TOC_PAGE_ID,
};
use crate::booklet::error::Result;
use crate::booklet::rewriter::dom::{NodeId, PageDom};
use crate::booklet::rewriter::section_numbering::SECTION_NUMBER_CLASS;

static TOC_TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article > h1").expect("valid toc title selector"));
static TOC_LIST_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("ul.level-1").expect("valid toc list selector"));

/// 生成封面页
///
/// 标题和副标题按HTML插入（允许 `<br>`）；背景图片以base64数据URL内嵌。
pub fn cover_page(cover: &CoverOptions, version: Option<&str>) -> Result<PageRecord> {
    let mut content = format!(r#"<h1 class="title">{}</h1>"#, cover.title);
    if let Some(subtitle) = &cover.subtitle {
        content.push_str(&format!(r#"<h2 class="subtitle">{}</h2>"#, subtitle));
    }

    let mut dom = PageDom::parse(&format!(r#"<div class="{}"></div>"#, PAGE_CLASS));
    if let Some(root) = dom.page_root() {
        if let Some(image) = &cover.background_image {
            dom.set_attr(root, "style", format!("background-image:url('{}')", encode_image(image)?));
        }

        let inserted = dom.append_html(root, &format!(r#"<div class="booklet-cover-content">{}</div>"#, content));
        if let (Some(&content), true, Some(version)) = (inserted.first(), cover.version, version) {
            if let Some(&heading) = dom.append_html(content, r#"<h3 class="version"></h3>"#).first() {
                dom.append_text(heading, version);
            }
        }
    }

    Ok(PageRecord::new(COVER_PAGE_ID, dom.to_html()))
}

/// 将图片文件编码为数据URL，无法识别的类型返回空字符串
fn encode_image(path: &Path) -> Result<String> {
    let Some(mime_type) = image_mime_type(path) else {
        return Ok(String::new());
    };
    let bytes = fs::read(path)?;
    Ok(format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes)))
}

fn image_mime_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime_type = match extension.as_str() {
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        _ => return None,
    };
    Some(mime_type)
}

/// 生成目录页
///
/// `delimiter` 为 `None` 时不显示章节编号。
pub fn toc_page(tree: &[NavigationNode], toc: &TocOptions, delimiter: Option<Delimiter>) -> PageRecord {
    let toc_class = if delimiter.is_some() {
        "booklet-toc autonumbered"
    } else {
        "booklet-toc"
    };

    let mut dom = PageDom::parse(&format!(
        r#"<div class="{}"><article><h1></h1><div class="{}"><ul class="booklet-toc-list level-1"></ul></div></article></div>"#,
        PAGE_CLASS, toc_class
    ));
    if let Some(title) = dom.select_first(&TOC_TITLE_SELECTOR) {
        dom.append_text(title, &toc.title);
    }
    if let Some(list) = dom.select_first(&TOC_LIST_SELECTOR) {
        for (index, node) in tree.iter().enumerate() {
            append_toc_entry(&mut dom, list, node, &SectionAddress::from(vec![index as u32 + 1]), delimiter);
        }
    }

    PageRecord::new(TOC_PAGE_ID, dom.to_html())
}

fn append_toc_entry(
    dom: &mut PageDom,
    list: NodeId,
    node: &NavigationNode,
    address: &SectionAddress,
    delimiter: Option<Delimiter>,
) {
    let Some(&entry) = dom.append_html(list, r#"<li class="booklet-toc-list-entry"></li>"#).first() else {
        return;
    };
    let Some(&anchor) = dom.append_html(entry, "<a></a>").first() else {
        return;
    };
    dom.set_attr(anchor, "href", node.link.as_str());
    if let Some(delimiter) = delimiter {
        dom.append_html(
            anchor,
            &format!(r#"<span class="{}">{}</span>"#, SECTION_NUMBER_CLASS, address.format(delimiter)),
        );
    }
    dom.append_text(anchor, &node.label);

    if !node.is_category() {
        return;
    }
    let child_list = format!(r#"<ul class="booklet-toc-list level-{}"></ul>"#, address.len() + 1);
    if let Some(&child_list) = dom.append_html(entry, &child_list).first() {
        for (index, child) in node.children.iter().enumerate() {
            append_toc_entry(dom, child_list, child, &address.child(index as u32 + 1), delimiter);
        }
    }
}
