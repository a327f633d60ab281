//! 页面改写模块
//!
//! 每个改写器在单个页面独立解析出的DOM上工作，按固定顺序执行：
//! 移除元素、插入分类标题、改写链接与ID、章节编号。

pub mod category_title;
pub mod dom;
pub mod excluding;
pub mod link;
pub mod section_numbering;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::booklet::config::BookletConfig;
use crate::booklet::contents::{NavigationNode, PageRecord};
use crate::booklet::error::Result;

pub use category_title::{CATEGORY_TITLE_CLASS, CategoryDescriptor, CategoryIndex, CategoryTitleRewriter};
pub use dom::PageDom;
pub use excluding::ExcludingRewriter;
pub use link::{LinkRewriter, convert_path_to_id};
pub use section_numbering::{SECTION_NUMBER_CLASS, SectionIndex, SectionNumberingRewriter, number_headings};

/// 页面改写器
pub trait PageRewriter: Send + Sync {
    /// 改写过程的描述（用于日志）
    fn description(&self) -> &str;

    /// 改写页面
    fn rewrite(&self, dom: &mut PageDom, page: &PageRecord) -> Result<()>;
}

/// 按顺序对每个页面执行一组改写器
pub struct RewritePipeline {
    rewriters: Vec<Box<dyn PageRewriter>>,
}

impl RewritePipeline {
    pub fn new(rewriters: Vec<Box<dyn PageRewriter>>) -> Self {
        Self { rewriters }
    }

    /// 根据配置和最终的导航树构建标准改写流程
    ///
    /// 分类索引与章节编号表只在这里构建一次，之后所有页面只读共享。
    pub fn from_config(config: &BookletConfig, tree: &[NavigationNode]) -> Result<Self> {
        let mut rewriters: Vec<Box<dyn PageRewriter>> = vec![
            Box::new(ExcludingRewriter::new(&config.selectors.exclude)?),
            Box::new(CategoryTitleRewriter::new(tree)),
            Box::new(LinkRewriter),
        ];
        if config.autonumber {
            rewriters.push(Box::new(SectionNumberingRewriter::new(tree, config.delimiter)));
        }
        Ok(Self::new(rewriters))
    }

    /// 改写单个页面
    ///
    /// 页面容器被移除（或本来就没有）时页面内容置空，后续改写器不再执行。
    pub fn rewrite_page(&self, page: &mut PageRecord) -> Result<()> {
        for rewriter in &self.rewriters {
            debug!(path = %page.path, "{}", rewriter.description());
            let mut dom = PageDom::parse(&page.markup);
            rewriter.rewrite(&mut dom, page)?;
            let Some(markup) = dom.page_root().and_then(|root| dom.outer_html(root)) else {
                warn!(path = %page.path, "page container is gone, page left empty");
                page.markup.clear();
                return Ok(());
            };
            page.markup = markup;
        }
        Ok(())
    }

    /// 并行改写所有页面，页面顺序保持不变
    pub fn rewrite_pages(&self, pages: &mut [PageRecord]) -> Result<()> {
        pages
            .par_iter_mut()
            .try_for_each(|page| self.rewrite_page(page))?;
        info!("pre-processing of {} pages is completed", pages.len());
        Ok(())
    }
}
