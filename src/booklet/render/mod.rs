//! 文档渲染模块
//!
//! 将改写后的页面（第一页为封面）交给渲染器生成最终文档。

pub mod html_bundle;
pub mod template;

use std::fs;

use crate::booklet::config::{BookletConfig, Margin, strip_line_breaks};
use crate::booklet::contents::PageRecord;
use crate::booklet::error::Result;

pub use html_bundle::HtmlBundleRenderer;
pub use template::{EMPTY_FOOTER, EMPTY_HEADER, footer_template, header_template};

/// 版面设置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutOptions {
    /// 文档标题
    pub title: String,
    /// 纸张格式，例如 `a4`
    pub format: String,
    pub margin: Margin,
    /// 封面页边距
    pub cover_margin: Margin,
    pub header_template: String,
    pub footer_template: String,
    /// 自定义CSS内容
    pub css: Option<String>,
}

impl LayoutOptions {
    /// 根据配置生成版面设置（读取自定义CSS文件）
    pub fn from_config(config: &BookletConfig) -> Result<Self> {
        let css = match &config.css {
            Some(path) => Some(fs::read_to_string(path)?),
            None => None,
        };

        Ok(Self {
            title: strip_line_breaks(&config.cover.title),
            format: config.format.clone(),
            margin: config.margin.clone(),
            cover_margin: config.cover.margin.clone().unwrap_or_else(|| config.margin.clone()),
            header_template: header_template(
                &config.resolved_header(),
                &config.margin,
                config.version.as_deref(),
            ),
            footer_template: footer_template(&config.resolved_footer(), &config.margin),
            css,
        })
    }
}

/// 文档渲染器
pub trait DocumentRenderer {
    /// 渲染页面，`pages` 的第一个元素为封面
    fn render(&self, pages: &[PageRecord], layout: &LayoutOptions) -> Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booklet::config::Decoration;
    use crate::booklet::error::BookletError;

    #[test]
    fn test_layout_from_default_config() {
        let mut config = BookletConfig::default_config();
        config.cover.title = "Sample<br>Docs".to_string();
        config.version = Some("1.2.3".to_string());
        let layout = LayoutOptions::from_config(&config).unwrap();

        assert_eq!(layout.title, "Sample Docs");
        assert_eq!(layout.format, "a4");
        assert_eq!(layout.cover_margin, Margin::default());
        assert!(layout.header_template.contains("Sample Docs"));
        assert!(layout.header_template.contains("Ver. 1.2.3"));
        assert!(layout.footer_template.contains(r#"<span class="pageNumber"></span>"#));
        assert!(layout.css.is_none());
    }

    #[test]
    fn test_layout_reads_css_and_cover_margin() {
        let dir = tempfile::tempdir().unwrap();
        let css_path = dir.path().join("booklet.css");
        fs::write(&css_path, "h1 { color: teal; }").unwrap();

        let mut config = BookletConfig::default_config();
        config.css = Some(css_path);
        config.header = Some(Decoration::Enabled(false));
        config.cover.margin = Some(Margin {
            top: "0".to_string(),
            right: "0".to_string(),
            bottom: "0".to_string(),
            left: "0".to_string(),
        });
        let layout = LayoutOptions::from_config(&config).unwrap();

        assert_eq!(layout.css.as_deref(), Some("h1 { color: teal; }"));
        assert_eq!(layout.cover_margin.top, "0");
        assert_eq!(layout.margin, Margin::default());
        assert_eq!(layout.header_template, EMPTY_HEADER);
    }

    #[test]
    fn test_layout_missing_css_is_error() {
        let mut config = BookletConfig::default_config();
        config.css = Some("/nonexistent/booklet.css".into());
        assert!(matches!(LayoutOptions::from_config(&config), Err(BookletError::Io(_))));
    }
}
