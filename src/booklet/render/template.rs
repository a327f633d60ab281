//! 页眉与页脚模板

use crate::booklet::config::{Decoration, FooterText, HeaderText, Margin};

/// 禁用页眉时使用的模板
pub const EMPTY_HEADER: &str = "<!-- EMPTY HEADER -->";
/// 禁用页脚时使用的模板
pub const EMPTY_FOOTER: &str = "<!-- EMPTY FOOTER -->";

const PAGE_NUMBER_PLACEHOLDER: &str = r#"<span class="pageNumber"></span>"#;
const TOTAL_PAGES_PLACEHOLDER: &str = r#"<span class="totalPages"></span>"#;

/// 生成页眉模板
pub fn header_template(header: &Decoration<HeaderText>, margin: &Margin, version: Option<&str>) -> String {
    let header = match header {
        Decoration::Enabled(false) => return EMPTY_HEADER.to_string(),
        Decoration::Html { html } => return html.clone(),
        Decoration::Enabled(true) => &HeaderText::default(),
        Decoration::Structured(header) => header,
    };

    let version_text = match version {
        Some(version) if header.version => format!(r#"<div class="version">Ver. {}</div>"#, version),
        _ => String::new(),
    };

    format!(
        r#"<style>
.header {{
  font-family: system-ui;
  font-size: 9px;
  color: #dcdcdc;
  width: calc(100% - {right});
  position: relative;
  margin: 0 auto;
  {style}
}}
.document-title {{ position: absolute; left: 0; text-align: left; }}
.version {{ position: absolute; right: 0; text-align: right; }}
</style>
<div class="header"><div class="document-title">{text}</div>{version}</div>"#,
        right = margin.right,
        style = header.style.as_deref().unwrap_or_default(),
        text = header.text,
        version = version_text,
    )
}

/// 生成页脚模板
pub fn footer_template(footer: &Decoration<FooterText>, margin: &Margin) -> String {
    let footer = match footer {
        Decoration::Enabled(false) => return EMPTY_FOOTER.to_string(),
        Decoration::Html { html } => return html.clone(),
        Decoration::Enabled(true) => &FooterText::default(),
        Decoration::Structured(footer) => footer,
    };

    let page_number_text = match (footer.page_number, footer.total_pages) {
        (false, _) => String::new(),
        (true, false) => format!(r#"<div class="page-number">{}</div>"#, PAGE_NUMBER_PLACEHOLDER),
        (true, true) => format!(
            r#"<div class="page-number">{} / {}</div>"#,
            PAGE_NUMBER_PLACEHOLDER, TOTAL_PAGES_PLACEHOLDER
        ),
    };

    format!(
        r#"<style>
.footer {{
  border-top: 1px solid #dcdcdc;
  font-family: system-ui;
  font-size: 9px;
  color: #dcdcdc;
  width: calc(100% - {right});
  position: relative;
  margin: 0 auto 0.1in auto;
  padding-top: 4px;
  {style}
}}
.copyright {{ position: absolute; left: 0; text-align: left; }}
.page-number {{ position: absolute; right: 0; text-align: right; }}
</style>
<div class="footer"><div class="copyright">{text}</div>{page_number}</div>"#,
        right = margin.right,
        style = footer.style.as_deref().unwrap_or_default(),
        text = footer.text,
        page_number = page_number_text,
    )
}
