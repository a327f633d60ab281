//! 页面内容收集模块
//!
//! 导航树模型、侧边栏合并，以及封面页和目录页的生成。

pub mod node;
pub mod pages;
pub mod reconciler;

pub use node::{
    COVER_PAGE_ID, Delimiter, NavigationNode, PAGE_CLASS, PageRecord, SectionAddress, TOC_PAGE_ID,
    numbered_nodes,
};
pub use pages::{cover_page, toc_page};
pub use reconciler::{CollectedContents, SidebarReconciler, merge_nodes, merge_snapshots};
