//! 工具模块：日志预览、语料库文件格式检查
pub mod preview;
pub mod json_format;

pub use self::preview::{preview_compact, single_line};
pub use self::json_format::{canonical_form, is_canonical};
