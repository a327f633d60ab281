pub mod booklet;

// === 核心API重新导出 ===

/// 生成流程（主要接口）
pub use booklet::{generate_booklet, prepare_contents};

/// 错误处理
pub use booklet::{BookletError, Result};

/// 配置
pub use booklet::{
    BookletConfig, CoverOptions, DEFAULT_CONFIG_PATH, Decoration, FooterText, HeaderText, Margin,
    SelectorOptions, TocOptions,
};

// === 数据结构 ===

/// 导航树与页面
pub use booklet::{CollectedContents, Delimiter, NavigationNode, PageRecord, SectionAddress, numbered_nodes};

// === 组件（高级用法） ===

/// 页面来源
pub use booklet::{FsPageFetcher, MemoryPageFetcher, PageFetcher};

/// 侧边栏合并
pub use booklet::{SidebarReconciler, merge_nodes, merge_snapshots};

/// 页面改写
pub use booklet::{
    CategoryIndex, CategoryTitleRewriter, ExcludingRewriter, LinkRewriter, PageDom, PageRewriter,
    RewritePipeline, SectionIndex, SectionNumberingRewriter, convert_path_to_id,
};

/// 渲染
pub use booklet::{DocumentRenderer, HtmlBundleRenderer, LayoutOptions};

// === 库信息 ===

/// Booklet库的版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Booklet库的描述
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

// === 便捷函数 ===

/// 从本地构建好的站点目录生成单文件HTML文档
///
/// 这是 `generate_booklet` 配合 `FsPageFetcher` 和 `HtmlBundleRenderer` 的便捷包装。
///
/// # 参数
/// * `base_directory` - 站点构建输出目录
/// * `entry_point` - 第一个页面的路径，例如 `/docs/intro`
/// * `config` - 生成配置
///
/// # 示例
///
/// ```no_run
/// let config = booklet::BookletConfig::default_config();
/// let html = booklet::generate("build", "/docs/intro", &config)?;
/// std::fs::write("booklet.html", html)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn generate<P: AsRef<std::path::Path>>(
    base_directory: P,
    entry_point: &str,
    config: &BookletConfig,
) -> Result<Vec<u8>> {
    let fetcher = FsPageFetcher::new(base_directory);
    generate_booklet(config, entry_point, &fetcher, &HtmlBundleRenderer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_description() {
        assert!(!DESCRIPTION.is_empty());
    }

    #[test]
    fn test_generate_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        let page_dir = dir.path().join("docs").join("intro");
        fs::create_dir_all(&page_dir).unwrap();
        fs::write(
            page_dir.join("index.html"),
            r#"<html><body><ul class="theme-doc-sidebar-menu"><li><a href="/docs/intro">Intro</a></li></ul><article><h1>Intro</h1></article></body></html>"#,
        )
        .unwrap();

        let html = generate(dir.path(), "/docs/intro/", &BookletConfig::default_config()).unwrap();
        let html = String::from_utf8(html).unwrap();
        assert!(html.contains(r#"<span class="booklet-section-number">1.</span>Intro</h1>"#));
    }
}
