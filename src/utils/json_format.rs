//! 语料库文件格式检查
//! 规范格式：2 空格缩进、保持字段顺序、对象与数组换行、结尾换行

use serde_json::Value;

use crate::error::CoreResult;

/// 生成规范格式文本
pub fn canonical_form(text: &str) -> CoreResult<String> {
    let value: Value = serde_json::from_str(text)?;
    let mut pretty = serde_json::to_string_pretty(&value)?;
    pretty.push('\n');
    Ok(pretty)
}

/// 判断文本是否已是规范格式
pub fn is_canonical(text: &str) -> CoreResult<bool> {
    Ok(canonical_form(text)? == text)
}
