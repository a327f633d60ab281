use scraper::Selector;

use crate::booklet::contents::PageRecord;
use crate::booklet::contents::reconciler::parse_selector;
use crate::booklet::error::Result;
use crate::booklet::rewriter::{PageDom, PageRewriter};

/// 移除不需要的元素（导航栏、页脚等）
pub struct ExcludingRewriter {
    selectors: Vec<Selector>,
}

impl ExcludingRewriter {
    pub fn new(selectors: &[String]) -> Result<Self> {
        let selectors = selectors
            .iter()
            .map(|selector| parse_selector(selector))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { selectors })
    }
}

impl PageRewriter for ExcludingRewriter {
    fn description(&self) -> &str {
        "Excluding elements"
    }

    fn rewrite(&self, dom: &mut PageDom, _page: &PageRecord) -> Result<()> {
        for selector in &self.selectors {
            for id in dom.select(selector) {
                dom.remove(id);
            }
        }
        Ok(())
    }
}
