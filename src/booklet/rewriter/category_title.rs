//! 分类标题
//!
//! 在每个分类的第一个页面开头插入该分类的标题。

use std::collections::HashMap;

use crate::booklet::contents::{NavigationNode, PageRecord};
use crate::booklet::error::Result;
use crate::booklet::rewriter::{PageDom, PageRewriter};

/// 分类标题元素的CSS类名
pub const CATEGORY_TITLE_CLASS: &str = "booklet-category-title";

/// 分类信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDescriptor {
    pub label: String,
    /// 分类第一个页面的路径
    pub first_page_url: String,
    /// 层级，顶层分类为1
    pub level: usize,
}

/// 从导航树派生的分类索引
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    categories: Vec<CategoryDescriptor>,
    by_first_page: HashMap<String, usize>,
}

impl CategoryIndex {
    /// 深度优先收集所有分类
    ///
    /// 多个分类从同一页面开始时，查找结果为最深的那个分类。
    pub fn from_tree(tree: &[NavigationNode]) -> Self {
        let mut categories = Vec::new();
        collect_categories(tree, 1, &mut categories);

        let by_first_page = categories
            .iter()
            .enumerate()
            .map(|(index, category)| (category.first_page_url.clone(), index))
            .collect();

        Self {
            categories,
            by_first_page,
        }
    }

    /// 所有分类（深度优先顺序）
    pub fn categories(&self) -> &[CategoryDescriptor] {
        &self.categories
    }

    /// 查找从该页面开始的分类
    pub fn lookup(&self, path: &str) -> Option<&CategoryDescriptor> {
        self.by_first_page
            .get(path)
            .map(|index| &self.categories[*index])
    }
}

fn collect_categories(nodes: &[NavigationNode], level: usize, categories: &mut Vec<CategoryDescriptor>) {
    for node in nodes.iter().filter(|node| node.is_category()) {
        categories.push(CategoryDescriptor {
            label: node.label.clone(),
            first_page_url: node.link.clone(),
            level,
        });
        collect_categories(&node.children, level + 1, categories);
    }
}

/// 插入分类标题的改写器
pub struct CategoryTitleRewriter {
    index: CategoryIndex,
}

impl CategoryTitleRewriter {
    pub fn new(tree: &[NavigationNode]) -> Self {
        Self {
            index: CategoryIndex::from_tree(tree),
        }
    }

    pub fn index(&self) -> &CategoryIndex {
        &self.index
    }
}

impl PageRewriter for CategoryTitleRewriter {
    fn description(&self) -> &str {
        "Inserting category title"
    }

    fn rewrite(&self, dom: &mut PageDom, page: &PageRecord) -> Result<()> {
        let Some(category) = self.index.lookup(&page.path) else {
            return Ok(());
        };
        let Some(root) = dom.page_root() else {
            return Ok(());
        };
        let inserted = dom.prepend_html(
            root,
            &format!(
                r#"<div class="{}" data-category-level="{}"></div>"#,
                CATEGORY_TITLE_CLASS, category.level
            ),
        );
        if let Some(title) = inserted.first() {
            dom.append_text(*title, &category.label);
        }
        Ok(())
    }
}
