//! 导航树数据模型
//!
//! 侧边栏节点、页面记录以及章节编号地址，供其它所有组件共享。

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// 所有页面容器共用的CSS类名
pub const PAGE_CLASS: &str = "booklet-page";

/// 封面页的路径（同时也是其元素ID）
pub const COVER_PAGE_ID: &str = "cover";

/// 目录页的路径（同时也是其元素ID）
pub const TOC_PAGE_ID: &str = "table-of-contents";

/// 侧边栏导航节点
///
/// 没有子节点的节点表示一个内容页面；有子节点的节点是分类，
/// 其 `link` 按约定等于第一个（深度优先最左侧）叶子节点的链接。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationNode {
    /// 侧边栏中的显示文本
    pub label: String,
    /// 页面路径
    pub link: String,
    /// 子节点（顺序即渲染顺序）
    pub children: Vec<NavigationNode>,
}

impl NavigationNode {
    /// 创建叶子节点
    pub fn leaf(label: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            link: link.into(),
            children: Vec::new(),
        }
    }

    /// 创建分类节点，链接取第一个子节点的链接
    pub fn category(label: impl Into<String>, children: Vec<NavigationNode>) -> Self {
        let link = children
            .first()
            .map(|child| child.link.clone())
            .unwrap_or_else(|| "#".to_string());
        Self {
            label: label.into(),
            link,
            children,
        }
    }

    /// 是否为分类节点
    pub fn is_category(&self) -> bool {
        !self.children.is_empty()
    }

    /// 获取节点及其所有子节点的数量
    pub fn total_nodes(&self) -> usize {
        1 + self.children.iter().map(|child| child.total_nodes()).sum::<usize>()
    }

    /// 收集所有叶子节点
    pub fn collect_leaf_nodes(&self) -> Vec<&NavigationNode> {
        if self.children.is_empty() {
            vec![self]
        } else {
            self.children
                .iter()
                .flat_map(|child| child.collect_leaf_nodes())
                .collect()
        }
    }
}

/// 按深度优先顺序遍历整棵树，为每个节点（包括分类）附上从1开始的章节地址
///
/// ```rust
/// use booklet::{NavigationNode, numbered_nodes};
///
/// let tree = vec![
///     NavigationNode::leaf("Intro", "/docs/intro"),
///     NavigationNode::category("API", vec![NavigationNode::leaf("First", "/docs/api/first")]),
/// ];
/// let numbered = numbered_nodes(&tree);
/// assert_eq!(numbered[2].0.to_string(), "2.1.");
/// ```
pub fn numbered_nodes(tree: &[NavigationNode]) -> Vec<(SectionAddress, &NavigationNode)> {
    let mut result = Vec::new();
    collect_numbered(tree, &SectionAddress::root(), &mut result);
    result
}

fn collect_numbered<'a>(
    nodes: &'a [NavigationNode],
    base: &SectionAddress,
    result: &mut Vec<(SectionAddress, &'a NavigationNode)>,
) {
    for (index, node) in nodes.iter().enumerate() {
        let address = base.child(index as u32 + 1);
        result.push((address.clone(), node));
        collect_numbered(&node.children, &address, result);
    }
}

/// 页面记录：最终文档中的一段页面内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// 页面路径，在整个序列中唯一
    pub path: String,
    /// 包裹在页面容器中的HTML片段
    pub markup: String,
}

impl PageRecord {
    pub fn new(path: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            markup: markup.into(),
        }
    }
}

/// 章节编号分隔符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    /// `.`
    #[default]
    Dot,
    /// `-`
    Hyphen,
}

impl Delimiter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Delimiter::Dot => ".",
            Delimiter::Hyphen => "-",
        }
    }
}

/// 章节地址，例如 `[2, 2, 1]`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SectionAddress(Vec<u32>);

impl SectionAddress {
    /// 空地址（树根）
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn components(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<u32> {
        self.0.last().copied()
    }

    /// 第 `index` 个子地址（从1开始）
    pub fn child(&self, index: u32) -> Self {
        let mut components = self.0.clone();
        components.push(index);
        Self(components)
    }

    /// 去掉最后一个分量
    pub fn parent(&self) -> Self {
        let mut components = self.0.clone();
        components.pop();
        Self(components)
    }

    /// 最后一个分量加一
    pub fn next_sibling(&self) -> Self {
        let mut components = self.0.clone();
        if let Some(last) = components.last_mut() {
            *last += 1;
        }
        Self(components)
    }

    /// 用分隔符连接各分量，并在末尾追加一个分隔符
    pub fn format(&self, delimiter: Delimiter) -> String {
        let separator = delimiter.as_str();
        let joined = self
            .0
            .iter()
            .map(|component| component.to_string())
            .collect::<Vec<_>>()
            .join(separator);
        format!("{}{}", joined, separator)
    }
}

impl From<Vec<u32>> for SectionAddress {
    fn from(components: Vec<u32>) -> Self {
        Self(components)
    }
}

impl Display for SectionAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.format(Delimiter::Dot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_section_address() {
        let address = SectionAddress::from(vec![2, 2, 1]);
        assert_eq!(address.format(Delimiter::Dot), "2.2.1.");
        assert_eq!(address.format(Delimiter::Hyphen), "2-2-1-");
        assert_eq!(address.to_string(), "2.2.1.");
    }

    #[test]
    fn test_address_navigation() {
        let address = SectionAddress::from(vec![1, 3]);
        assert_eq!(address.child(1), SectionAddress::from(vec![1, 3, 1]));
        assert_eq!(address.next_sibling(), SectionAddress::from(vec![1, 4]));
        assert_eq!(address.parent(), SectionAddress::from(vec![1]));
        assert_eq!(SectionAddress::root().next_sibling(), SectionAddress::root());
    }

    #[test]
    fn test_category_link_follows_first_child() {
        let category = NavigationNode::category(
            "Guide",
            vec![
                NavigationNode::category(
                    "Advanced",
                    vec![NavigationNode::leaf("Integration", "/docs/guides/advanced/integration")],
                ),
                NavigationNode::leaf("Config", "/docs/guides/config"),
            ],
        );
        assert!(category.is_category());
        assert_eq!(category.link, "/docs/guides/advanced/integration");
        assert_eq!(category.total_nodes(), 4);
        assert_eq!(category.collect_leaf_nodes().len(), 2);
    }

    #[test]
    fn test_numbered_nodes_preorder() {
        let tree = vec![
            NavigationNode::leaf("Intro", "/intro"),
            NavigationNode::category(
                "Guide",
                vec![
                    NavigationNode::leaf("A", "/guide/a"),
                    NavigationNode::leaf("B", "/guide/b"),
                ],
            ),
        ];
        let numbered: Vec<(String, &str)> = numbered_nodes(&tree)
            .into_iter()
            .map(|(address, node)| (address.to_string(), node.label.as_str()))
            .collect();
        assert_eq!(
            numbered,
            vec![
                ("1.".to_string(), "Intro"),
                ("2.".to_string(), "Guide"),
                ("2.1.".to_string(), "A"),
                ("2.2.".to_string(), "B"),
            ]
        );
    }
}
