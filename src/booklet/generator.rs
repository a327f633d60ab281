//! Booklet生成流程
//!
//! 抓取并合并侧边栏 → 插入封面和目录页 → 改写所有页面 → 渲染。

use tracing::info;

use crate::booklet::config::BookletConfig;
use crate::booklet::contents::{CollectedContents, SidebarReconciler, cover_page, toc_page};
use crate::booklet::error::Result;
use crate::booklet::fetcher::PageFetcher;
use crate::booklet::render::{DocumentRenderer, LayoutOptions};
use crate::booklet::rewriter::RewritePipeline;

/// 抓取并改写页面，返回最终的导航树和页面（第一页为封面）
pub fn prepare_contents(
    config: &BookletConfig,
    entry_point: &str,
    fetcher: &dyn PageFetcher,
) -> Result<CollectedContents> {
    let reconciler = SidebarReconciler::new(&config.selectors)?;
    let CollectedContents { tree, pages } = reconciler.collect(entry_point, fetcher)?;

    let mut all_pages = Vec::with_capacity(pages.len() + 2);
    all_pages.push(cover_page(&config.cover, config.version.as_deref())?);
    if let Some(toc) = &config.toc {
        let delimiter = config.autonumber.then_some(config.delimiter);
        all_pages.push(toc_page(&tree, toc, delimiter));
    }
    all_pages.extend(pages);

    let pipeline = RewritePipeline::from_config(config, &tree)?;
    pipeline.rewrite_pages(&mut all_pages)?;

    Ok(CollectedContents {
        tree,
        pages: all_pages,
    })
}

/// 生成Booklet文档
pub fn generate_booklet(
    config: &BookletConfig,
    entry_point: &str,
    fetcher: &dyn PageFetcher,
    renderer: &dyn DocumentRenderer,
) -> Result<Vec<u8>> {
    info!("generating booklet from {}", entry_point);
    let contents = prepare_contents(config, entry_point, fetcher)?;
    let layout = LayoutOptions::from_config(config)?;
    let document = renderer.render(&contents.pages, &layout)?;
    info!("booklet generated ({} bytes)", document.len());
    Ok(document)
}
