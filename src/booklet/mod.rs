pub mod config;
pub mod contents;
pub mod error;
pub mod fetcher;
pub mod generator;
pub mod render;
pub mod rewriter;

pub use config::{
    BookletConfig, CoverOptions, DEFAULT_CONFIG_PATH, Decoration, FooterText, HeaderText, Margin,
    SelectorOptions, TocOptions,
};
pub use contents::{
    CollectedContents, Delimiter, NavigationNode, PageRecord, SectionAddress, SidebarReconciler,
    cover_page, merge_nodes, merge_snapshots, numbered_nodes, toc_page,
};
pub use error::{BookletError, Result};
pub use fetcher::{FsPageFetcher, MemoryPageFetcher, PageFetcher};
pub use generator::{generate_booklet, prepare_contents};
pub use render::{DocumentRenderer, HtmlBundleRenderer, LayoutOptions};
pub use rewriter::{
    CategoryIndex, CategoryTitleRewriter, ExcludingRewriter, LinkRewriter, PageDom, PageRewriter,
    RewritePipeline, SectionIndex, SectionNumberingRewriter, convert_path_to_id,
};
