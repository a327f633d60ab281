//! 章节编号
//!
//! 根据页面在导航树中的位置为标题加上编号，例如
//! `<h1>Heading</h1>` 改写为 `<h1><span class="booklet-section-number">2.1.</span>Heading</h1>`。

use std::collections::HashMap;

use once_cell::sync::Lazy;
use scraper::Selector;

use crate::booklet::contents::{Delimiter, NavigationNode, PageRecord, SectionAddress, numbered_nodes};
use crate::booklet::error::Result;
use crate::booklet::rewriter::category_title::CATEGORY_TITLE_CLASS;
use crate::booklet::rewriter::{PageDom, PageRewriter};

/// 章节编号元素的CSS类名
pub const SECTION_NUMBER_CLASS: &str = "booklet-section-number";

static TOP_HEADING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1").expect("valid heading selector"));
static SUB_HEADING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2, h3, h4, h5, h6").expect("valid heading selector"));
static CATEGORY_TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(&format!(".{}", CATEGORY_TITLE_CLASS)).expect("valid category selector")
});

/// 叶子页面链接到章节地址的映射
#[derive(Debug, Clone, Default)]
pub struct SectionIndex {
    addresses: HashMap<String, SectionAddress>,
}

impl SectionIndex {
    pub fn from_tree(tree: &[NavigationNode]) -> Self {
        let addresses = numbered_nodes(tree)
            .into_iter()
            .filter(|(_, node)| !node.is_category())
            .map(|(address, node)| (node.link.clone(), address))
            .collect();
        Self { addresses }
    }

    pub fn address_of(&self, link: &str) -> Option<&SectionAddress> {
        self.addresses.get(link)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

/// 为一串子标题（级别2..6，按文档顺序）计算编号
///
/// 状态为当前打开的标题链 `(级别, 地址)`，初始为 `(1, base)`：
/// 更深的标题追加一个分量 `1`；同级标题最后一个分量加一；
/// 更浅的标题先关闭所有不浅于它的标题，再作为同级标题编号。
pub fn number_headings(base: &SectionAddress, levels: &[usize]) -> Vec<SectionAddress> {
    let initial = vec![(1usize, base.clone())];
    levels
        .iter()
        .scan(initial, |open, &level| {
            let (top_level, top_address) = open.last().cloned()?;
            let address = if level > top_level {
                let address = top_address.child(1);
                open.push((level, address.clone()));
                address
            } else {
                while open.len() > 2 && open[open.len() - 2].0 >= level {
                    open.pop();
                }
                let sibling = open.pop().map(|(_, address)| address.next_sibling())?;
                open.push((level, sibling.clone()));
                sibling
            };
            Some(address)
        })
        .collect()
}

/// 为标题加上章节编号的改写器
pub struct SectionNumberingRewriter {
    index: SectionIndex,
    delimiter: Delimiter,
}

impl SectionNumberingRewriter {
    pub fn new(tree: &[NavigationNode], delimiter: Delimiter) -> Self {
        Self {
            index: SectionIndex::from_tree(tree),
            delimiter,
        }
    }

    fn label(&self, address: &SectionAddress) -> String {
        format!(
            r#"<span class="{}">{}</span>"#,
            SECTION_NUMBER_CLASS,
            address.format(self.delimiter)
        )
    }
}

impl PageRewriter for SectionNumberingRewriter {
    fn description(&self) -> &str {
        "Numbering sections"
    }

    fn rewrite(&self, dom: &mut PageDom, page: &PageRecord) -> Result<()> {
        // 不在导航树中的页面保持原样
        let Some(address) = self.index.address_of(&page.path) else {
            return Ok(());
        };

        if address.len() > 1 && address.last() == Some(1) {
            let category_label = self.label(&address.parent());
            for id in dom.select(&CATEGORY_TITLE_SELECTOR) {
                dom.prepend_html(id, &category_label);
            }
        }

        let page_label = self.label(address);
        for id in dom.select(&TOP_HEADING_SELECTOR) {
            dom.prepend_html(id, &page_label);
        }

        let headings: Vec<_> = dom
            .select(&SUB_HEADING_SELECTOR)
            .into_iter()
            .filter_map(|id| {
                let level = dom.tag_name(id)?.get(1..)?.parse::<usize>().ok()?;
                Some((id, level))
            })
            .collect();
        let levels: Vec<usize> = headings.iter().map(|(_, level)| *level).collect();

        for ((id, _), heading_address) in headings.iter().zip(number_headings(address, &levels)) {
            dom.prepend_html(*id, &self.label(&heading_address));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sample_tree() -> Vec<NavigationNode> {
        vec![
            NavigationNode::leaf("Introduction", "/docs/intro"),
            NavigationNode::category(
                "Guide",
                vec![
                    NavigationNode::leaf("Getting Started", "/docs/guides/getting-started"),
                    NavigationNode::category(
                        "Advanced Guide",
                        vec![NavigationNode::leaf("Integration", "/docs/guides/advanced/integration")],
                    ),
                    NavigationNode::leaf("Configuration", "/docs/guides/configuration"),
                ],
            ),
            NavigationNode::category(
                "API",
                vec![
                    NavigationNode::leaf("First Feature", "/docs/api/first-feature"),
                    NavigationNode::leaf("Second Feature", "/docs/api/second-feature"),
                ],
            ),
        ]
    }

    fn addr(components: &[u32]) -> SectionAddress {
        SectionAddress::from(components.to_vec())
    }

    fn rewrite(tree: &[NavigationNode], path: &str, markup: &str) -> String {
        let rewriter = SectionNumberingRewriter::new(tree, Delimiter::Dot);
        let page = PageRecord::new(path, markup);
        let mut dom = PageDom::parse(markup);
        rewriter.rewrite(&mut dom, &page).unwrap();
        dom.to_html()
    }

    #[test]
    fn test_leaf_addresses() {
        let index = SectionIndex::from_tree(&sample_tree());
        assert_eq!(index.len(), 6);
        assert_eq!(index.address_of("/docs/intro"), Some(&addr(&[1])));
        assert_eq!(index.address_of("/docs/guides/getting-started"), Some(&addr(&[2, 1])));
        assert_eq!(index.address_of("/docs/guides/advanced/integration"), Some(&addr(&[2, 2, 1])));
        assert_eq!(index.address_of("/docs/guides/configuration"), Some(&addr(&[2, 3])));
        assert_eq!(index.address_of("/docs/api/first-feature"), Some(&addr(&[3, 1])));
        assert_eq!(index.address_of("/docs/api/second-feature"), Some(&addr(&[3, 2])));
    }

    #[test]
    fn test_leaf_addresses_are_unique() {
        let tree = sample_tree();
        let index = SectionIndex::from_tree(&tree);
        let unique: HashSet<_> = tree
            .iter()
            .flat_map(|node| node.collect_leaf_nodes())
            .filter_map(|leaf| index.address_of(&leaf.link))
            .collect();
        assert_eq!(unique.len(), index.len());
    }

    #[test]
    fn test_number_headings_transitions() {
        let base = addr(&[1]);
        let numbered = number_headings(&base, &[2, 2, 3, 3, 2]);
        assert_eq!(
            numbered,
            vec![
                addr(&[1, 1]),
                addr(&[1, 2]),
                addr(&[1, 2, 1]),
                addr(&[1, 2, 2]),
                addr(&[1, 3]),
            ]
        );
    }

    #[test]
    fn test_number_headings_multi_level_ascent() {
        let base = addr(&[2]);
        let numbered = number_headings(&base, &[2, 3, 4, 2, 4, 3]);
        assert_eq!(
            numbered,
            vec![
                addr(&[2, 1]),
                addr(&[2, 1, 1]),
                addr(&[2, 1, 1, 1]),
                addr(&[2, 2]),
                addr(&[2, 2, 1]),
                addr(&[2, 2, 2]),
            ]
        );
    }

    #[test]
    fn test_number_headings_closes_open_subsections() {
        // h2 之后的 h3 被关闭，第二个 h2 与第一个同级，而不是再去掉两个分量
        let base = addr(&[1]);
        let numbered = number_headings(&base, &[2, 3, 3, 2]);
        assert_eq!(
            numbered,
            vec![addr(&[1, 1]), addr(&[1, 1, 1]), addr(&[1, 1, 2]), addr(&[1, 2])]
        );
    }

    #[test]
    fn test_number_section_headers() {
        let markup = concat!(
            r#"<div class="booklet-page"><article>"#,
            r#"<h1>Introduction</h1><p>This is a sample page</p>"#,
            r#"<h2>Section 1</h2><p>content</p>"#,
            r#"<h2>Section 2</h2><p>content</p>"#,
            r#"<h3>Section 2-1</h3><p>content</p>"#,
            r#"<h3>Section 2-2</h3><p>content</p>"#,
            r#"<h2>Section 3</h2><p>content</p>"#,
            r#"</article></div>"#
        );
        assert_eq!(
            rewrite(&sample_tree(), "/docs/intro", markup),
            concat!(
                r#"<div class="booklet-page"><article>"#,
                r#"<h1><span class="booklet-section-number">1.</span>Introduction</h1><p>This is a sample page</p>"#,
                r#"<h2><span class="booklet-section-number">1.1.</span>Section 1</h2><p>content</p>"#,
                r#"<h2><span class="booklet-section-number">1.2.</span>Section 2</h2><p>content</p>"#,
                r#"<h3><span class="booklet-section-number">1.2.1.</span>Section 2-1</h3><p>content</p>"#,
                r#"<h3><span class="booklet-section-number">1.2.2.</span>Section 2-2</h3><p>content</p>"#,
                r#"<h2><span class="booklet-section-number">1.3.</span>Section 3</h2><p>content</p>"#,
                r#"</article></div>"#
            )
        );
    }

    #[test]
    fn test_number_category_top_section_header() {
        let markup = concat!(
            r#"<div class="booklet-page">"#,
            r#"<div class="booklet-category-title" data-category-level="2">Advanced Guides</div>"#,
            r#"<article><h1>Integration</h1><p>This is a sample content</p>"#,
            r#"<section><h2>Sample Section</h2><p>content</p><h2>Sample Section</h2><p>content</p></section>"#,
            r#"</article></div>"#
        );
        assert_eq!(
            rewrite(&sample_tree(), "/docs/guides/advanced/integration", markup),
            concat!(
                r#"<div class="booklet-page">"#,
                r#"<div class="booklet-category-title" data-category-level="2"><span class="booklet-section-number">2.2.</span>Advanced Guides</div>"#,
                r#"<article><h1><span class="booklet-section-number">2.2.1.</span>Integration</h1><p>This is a sample content</p>"#,
                r#"<section><h2><span class="booklet-section-number">2.2.1.1.</span>Sample Section</h2><p>content</p>"#,
                r#"<h2><span class="booklet-section-number">2.2.1.2.</span>Sample Section</h2><p>content</p></section>"#,
                r#"</article></div>"#
            )
        );
    }

    #[test]
    fn test_hyphen_delimiter() {
        let rewriter = SectionNumberingRewriter::new(&sample_tree(), Delimiter::Hyphen);
        let markup = r#"<div class="booklet-page"><h1>Second</h1></div>"#;
        let page = PageRecord::new("/docs/api/second-feature", markup);
        let mut dom = PageDom::parse(markup);
        rewriter.rewrite(&mut dom, &page).unwrap();
        assert!(dom.to_html().contains(r#"<span class="booklet-section-number">3-2-</span>Second"#));
    }

    #[test]
    fn test_ignore_page_not_contained_in_sidebar() {
        let tree = vec![NavigationNode::leaf("Dummy Page", "/docs/dummy")];
        let markup = concat!(
            r#"<div data-path="/content/not-contained/page" class="booklet-page"><article>"#,
            r#"<h1 title="t" id="top">Not Contained Page</h1><h2>Sub</h2><p>This is a sample page</p>"#,
            "<pre>\nindented</pre>",
            r##"<svg><use xlink:href="#icon"></use></svg></article></div>"##
        );
        assert_eq!(rewrite(&tree, "/content/not-contained/page", markup), markup);
    }
}
