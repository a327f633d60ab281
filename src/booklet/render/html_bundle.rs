//! 单文件HTML渲染器
//!
//! 输出一个带打印样式表的HTML文档：封面在前，其余页面依次拼接。
//! 页眉和页脚模板以 `<template>` 元素保存在文档中，供打印工具使用。

use tracing::info;

use crate::booklet::config::Margin;
use crate::booklet::contents::PageRecord;
use crate::booklet::error::{BookletError, Result};
use crate::booklet::render::{DocumentRenderer, LayoutOptions};
use crate::booklet::rewriter::dom::element_with_text;

const HEADER_TEMPLATE_ID: &str = "booklet-header-template";
const FOOTER_TEMPLATE_ID: &str = "booklet-footer-template";

/// 将所有页面渲染为单个HTML文档
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlBundleRenderer;

impl HtmlBundleRenderer {
    pub fn new() -> Self {
        Self
    }

    fn stylesheet(layout: &LayoutOptions) -> String {
        let mut css = format!(
            "@page {{ size: {}; margin: {}; }}\n\
             @page cover {{ margin: {}; }}\n\
             .booklet-cover {{ page: cover; }}\n\
             .booklet-page {{ break-before: page; }}\n\
             .booklet-cover .booklet-page {{ break-before: auto; background-size: cover; }}\n",
            layout.format,
            margin_shorthand(&layout.margin),
            margin_shorthand(&layout.cover_margin),
        );
        if let Some(user_css) = &layout.css {
            css.push_str(user_css);
            if !user_css.ends_with('\n') {
                css.push('\n');
            }
        }
        css
    }
}

fn margin_shorthand(margin: &Margin) -> String {
    format!("{} {} {} {}", margin.top, margin.right, margin.bottom, margin.left)
}

impl DocumentRenderer for HtmlBundleRenderer {
    fn render(&self, pages: &[PageRecord], layout: &LayoutOptions) -> Result<Vec<u8>> {
        let Some((cover, contents)) = pages.split_first() else {
            return Err(BookletError::RenderError("没有可渲染的页面".to_string()));
        };

        let mut document = String::new();
        document.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        document.push_str(&element_with_text("title", &layout.title));
        document.push('\n');
        document.push_str(&format!("<style>\n{}</style>\n", Self::stylesheet(layout)));
        document.push_str("</head>\n<body>\n");

        document.push_str(&format!(
            "<template id=\"{}\">{}</template>\n",
            HEADER_TEMPLATE_ID, layout.header_template
        ));
        document.push_str(&format!(
            "<template id=\"{}\">{}</template>\n",
            FOOTER_TEMPLATE_ID, layout.footer_template
        ));

        document.push_str("<section class=\"booklet-cover\">");
        document.push_str(&cover.markup);
        document.push_str("</section>\n<section class=\"booklet-contents\">");
        for page in contents {
            document.push_str(&page.markup);
        }
        document.push_str("</section>\n</body>\n</html>\n");

        info!("rendered {} pages into a single document", pages.len());
        Ok(document.into_bytes())
    }
}
