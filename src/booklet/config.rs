//! 生成配置模块
//!
//! 提供Booklet生成选项的配置管理功能，支持从YAML文件加载配置。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::booklet::contents::Delimiter;
use crate::booklet::error::{BookletError, Result};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "booklet.yaml";

/// 页边距（CSS长度）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margin {
    pub top: String,
    pub right: String,
    pub bottom: String,
    pub left: String,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: "0.7in".to_string(),
            right: "0.4in".to_string(),
            bottom: "0.7in".to_string(),
            left: "0.4in".to_string(),
        }
    }
}

/// 封面选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverOptions {
    /// 标题（可以包含 `<br>`）
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// 是否在封面显示版本号
    pub version: bool,
    /// 背景图片路径
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<PathBuf>,
    /// 封面专用页边距，缺省时使用全局页边距
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
}

impl Default for CoverOptions {
    fn default() -> Self {
        Self {
            title: "Booklet".to_string(),
            subtitle: None,
            version: false,
            background_image: None,
            margin: None,
        }
    }
}

/// 目录页选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocOptions {
    pub title: String,
}

impl Default for TocOptions {
    fn default() -> Self {
        Self {
            title: "Table of Contents".to_string(),
        }
    }
}

/// 页面结构选择器
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorOptions {
    /// 正文内容
    pub main_content: String,
    /// “下一页”链接
    pub pagination: String,
    /// 侧边栏菜单
    pub sidebar: String,
    /// 需要移除的元素
    pub exclude: Vec<String>,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        Self {
            main_content: "article".to_string(),
            pagination: ".pagination-nav__item--next > a".to_string(),
            sidebar: ".theme-doc-sidebar-menu".to_string(),
            exclude: vec!["nav.navbar,footer.footer,.theme-doc-toc-mobile".to_string()],
        }
    }
}

/// 页眉/页脚设置：开关、直接给出的HTML片段，或结构化文本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Decoration<T> {
    Enabled(bool),
    Html { html: String },
    Structured(T),
}

/// 结构化页眉
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderText {
    pub text: String,
    /// 是否显示版本号
    pub version: bool,
    /// 附加样式（如 `font-size`、`color`）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

/// 结构化页脚
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterText {
    pub text: String,
    /// 是否显示页码
    pub page_number: bool,
    /// 页码后是否显示总页数
    pub total_pages: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

/// Booklet生成配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookletConfig {
    pub cover: CoverOptions,
    /// 为 `None` 时不生成目录页
    pub toc: Option<TocOptions>,
    /// 纸张格式
    pub format: String,
    pub margin: Margin,
    /// 自定义CSS文件路径
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css: Option<PathBuf>,
    /// 是否为标题编号
    pub autonumber: bool,
    pub delimiter: Delimiter,
    pub selectors: SelectorOptions,
    /// 缺省时根据封面标题生成
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Decoration<HeaderText>>,
    /// 缺省时只显示页码
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Decoration<FooterText>>,
    /// 文档版本号（显示在封面和页眉）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Default for BookletConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl BookletConfig {
    /// 获取默认配置
    pub fn default_config() -> Self {
        Self {
            cover: CoverOptions::default(),
            toc: Some(TocOptions::default()),
            format: "a4".to_string(),
            margin: Margin::default(),
            css: None,
            autonumber: true,
            delimiter: Delimiter::Dot,
            selectors: SelectorOptions::default(),
            header: None,
            footer: None,
            version: None,
        }
    }

    /// 从YAML配置文件加载配置，未给出的字段使用默认值
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| BookletError::ConfigError(format!("无法读取配置文件: {}", e)))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yml::from_str(content)
            .map_err(|e| BookletError::ConfigError(format!("配置文件格式错误: {}", e)))
    }

    /// 生成默认配置文件
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let yaml_content = serde_yml::to_string(&Self::default_config())
            .map_err(|e| BookletError::ConfigError(format!("序列化配置失败: {}", e)))?;

        let content_with_header = format!(
            "# Booklet生成配置文件\n# 未列出的字段使用默认值\n\n{}",
            yaml_content
        );

        fs::write(path, content_with_header)
            .map_err(|e| BookletError::ConfigError(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }

    /// 给出路径时从文件加载（文件必须存在），否则使用默认配置
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default_config()),
        }
    }

    /// 实际使用的页眉设置
    ///
    /// 未配置时由封面标题（`<br>` 替换为空格）和副标题拼接而成，并显示版本号。
    pub fn resolved_header(&self) -> Decoration<HeaderText> {
        match &self.header {
            Some(Decoration::Enabled(true)) | None => {
                let title = strip_line_breaks(&self.cover.title);
                let text = match &self.cover.subtitle {
                    Some(subtitle) => format!("{} - {}", title, subtitle),
                    None => title,
                };
                Decoration::Structured(HeaderText {
                    text,
                    version: true,
                    style: None,
                })
            }
            Some(header) => header.clone(),
        }
    }

    /// 实际使用的页脚设置
    pub fn resolved_footer(&self) -> Decoration<FooterText> {
        match &self.footer {
            Some(Decoration::Enabled(true)) | None => Decoration::Structured(FooterText {
                text: String::new(),
                page_number: true,
                total_pages: false,
                style: None,
            }),
            Some(footer) => footer.clone(),
        }
    }
}

/// 将 `<br>`、`<br/>`、`<br />` 替换为空格
pub(crate) fn strip_line_breaks(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("<br") {
        let after = &rest[start + 3..];
        let tail = after.trim_start();
        let tail = tail.strip_prefix('/').unwrap_or(tail);
        match tail.strip_prefix('>') {
            Some(remaining) => {
                result.push_str(&rest[..start]);
                result.push(' ');
                rest = remaining;
            }
            None => {
                result.push_str(&rest[..start + 3]);
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}
