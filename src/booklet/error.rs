use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BookletError>;

/// Booklet生成过程中的错误类型
#[derive(Error, Debug)]
pub enum BookletError {
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),

    #[error("页面 {0} 不存在")]
    MissingPage(String),

    #[error("无效的CSS选择器 '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("配置文件错误: {0}")]
    ConfigError(String),

    #[error("文档渲染失败: {0}")]
    RenderError(String),
}
