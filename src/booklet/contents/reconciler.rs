//! 侧边栏合并模块
//!
//! 沿着“下一页”链接依次读取页面，收集每个页面的正文内容，
//! 并把每个页面上只部分展开的侧边栏合并为一棵完整的导航树。

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

use crate::booklet::config::SelectorOptions;
use crate::booklet::contents::{NavigationNode, PageRecord, PAGE_CLASS};
use crate::booklet::error::{BookletError, Result};
use crate::booklet::fetcher::PageFetcher;
use crate::booklet::rewriter::dom::PageDom;

/// 合并结果：导航树与按抓取顺序排列的页面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedContents {
    pub tree: Vec<NavigationNode>,
    pub pages: Vec<PageRecord>,
}

/// 编译后的页面结构选择器
pub struct SidebarReconciler {
    main_content: Selector,
    pagination: Selector,
    sidebar: Selector,
    link: Selector,
    list: Selector,
}

/// 解析CSS选择器
pub(crate) fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| BookletError::InvalidSelector {
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}

impl SidebarReconciler {
    pub fn new(selectors: &SelectorOptions) -> Result<Self> {
        Ok(Self {
            main_content: parse_selector(&selectors.main_content)?,
            pagination: parse_selector(&selectors.pagination)?,
            sidebar: parse_selector(&selectors.sidebar)?,
            link: parse_selector("a")?,
            list: parse_selector("ul, ol")?,
        })
    }

    /// 从入口页面开始沿“下一页”链接抓取所有页面
    ///
    /// 任何一个页面不存在都会中止整个过程，不返回部分结果。
    pub fn collect(&self, entry_point: &str, fetcher: &dyn PageFetcher) -> Result<CollectedContents> {
        let mut pages: Vec<PageRecord> = Vec::new();
        let mut tree: Vec<NavigationNode> = Vec::new();
        let mut visited = HashSet::new();

        let entry = normalize_entry_point(entry_point);
        if entry.is_empty() {
            return Err(BookletError::MissingPage(entry_point.to_string()));
        }
        let mut current_path = Some(entry);

        while let Some(path) = current_path.take() {
            if !visited.insert(path.clone()) {
                warn!(path = %path, "next page link points back to a collected page, stopping");
                break;
            }

            info!("collecting page ({}): {}", pages.len() + 1, path);
            let markup = fetcher
                .fetch(&path)?
                .ok_or_else(|| BookletError::MissingPage(path.clone()))?;
            let page = PageDom::parse_document(&markup);

            pages.push(PageRecord::new(
                path.clone(),
                wrap_page_content(&path, &self.extract_main_content(&page)),
            ));

            let snapshot = self.extract_sidebar(page.document());
            debug!(path = %path, top_level = snapshot.len(), "sidebar snapshot extracted");
            tree = merge_snapshots(&tree, &snapshot);

            current_path = self.next_page(page.document());
        }

        info!("{} pages are collected", pages.len());
        Ok(CollectedContents { tree, pages })
    }

    fn extract_main_content(&self, page: &PageDom) -> String {
        page.select(&self.main_content)
            .into_iter()
            .filter_map(|id| page.outer_html(id))
            .collect()
    }

    /// 提取当前页面渲染出的侧边栏（顶层兄弟节点列表）
    pub fn extract_sidebar(&self, document: &Html) -> Vec<NavigationNode> {
        match document.select(&self.sidebar).next() {
            Some(sidebar) => sidebar
                .children()
                .filter_map(ElementRef::wrap)
                .map(|item| self.sidebar_item(item))
                .collect(),
            None => Vec::new(),
        }
    }

    fn sidebar_item(&self, item: ElementRef<'_>) -> NavigationNode {
        let anchor = item.select(&self.link).next();
        let label = anchor
            .map(|a| a.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let children: Vec<NavigationNode> = match item.select(&self.list).next() {
            Some(list) => list
                .children()
                .filter_map(ElementRef::wrap)
                .map(|child| self.sidebar_item(child))
                .collect(),
            None => Vec::new(),
        };

        let link = match children.first() {
            Some(first) => first.link.clone(),
            None => anchor
                .and_then(|a| a.value().attr("href"))
                .unwrap_or("#")
                .to_string(),
        };

        NavigationNode {
            label,
            link,
            children,
        }
    }

    fn next_page(&self, document: &Html) -> Option<String> {
        document
            .select(&self.pagination)
            .next()
            .and_then(|element| element.value().attr("href"))
            .filter(|href| !href.is_empty())
            .map(|href| href.to_string())
    }
}

/// 去掉入口路径中的 `/index.html` 和末尾的 `/`
pub fn normalize_entry_point(entry_point: &str) -> String {
    entry_point
        .replacen("/index.html", "", 1)
        .trim_end_matches('/')
        .to_string()
}

/// 用页面容器包裹正文内容
pub fn wrap_page_content(path: &str, content: &str) -> String {
    let mut dom = PageDom::parse(&format!(r#"<div class="{}">{}</div>"#, PAGE_CLASS, content));
    if let Some(root) = dom.page_root() {
        dom.set_attr(root, "data-path", path);
    }
    dom.to_html()
}

/// 合并已知的导航树与新的侧边栏快照，返回新的树，不修改输入
///
/// 顶层数量相同时逐个合并；否则整体采用顶层节点更多的一方。
pub fn merge_snapshots(tree: &[NavigationNode], snapshot: &[NavigationNode]) -> Vec<NavigationNode> {
    if tree.len() == snapshot.len() {
        tree.iter()
            .zip(snapshot)
            .map(|(destination, source)| merge_nodes(destination, source))
            .collect()
    } else if tree.len() > snapshot.len() {
        tree.to_vec()
    } else {
        snapshot.to_vec()
    }
}

/// 合并同一位置上的两个节点
///
/// 标签和链接总是取 `source`。子节点数量相同时逐个递归合并，
/// 否则直接采用子节点更多的一方。
pub fn merge_nodes(destination: &NavigationNode, source: &NavigationNode) -> NavigationNode {
    let children = if destination.children.len() == source.children.len() {
        destination
            .children
            .iter()
            .zip(&source.children)
            .map(|(dest_child, source_child)| merge_nodes(dest_child, source_child))
            .collect()
    } else if destination.children.len() > source.children.len() {
        destination.children.clone()
    } else {
        source.children.clone()
    };

    NavigationNode {
        label: source.label.clone(),
        link: source.link.clone(),
        children,
    }
}
