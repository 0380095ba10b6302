//! 日志与错误信息中的模式/User-Agent 预览

use std::fmt::{self, Write};

/// 截断标记
const ELLIPSIS: char = '…';

/// 单行预览：空白连续段折叠为一个空格，控制字符转义为 `\u{..}`，超出 `limit` 个可见字符截断
/// 仅在格式化时计算，不复制原文
#[derive(Debug, Clone, Copy)]
pub struct Preview<'a> {
    text: &'a str,
    limit: usize,
}

impl fmt::Display for Preview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut shown = 0usize;
        let mut pending_space = false;

        for ch in self.text.chars() {
            if ch.is_whitespace() {
                pending_space = shown > 0;
                continue;
            }
            // 待输出的空格也计入长度
            let width = usize::from(pending_space) + 1;
            if shown + width > self.limit {
                return f.write_char(ELLIPSIS);
            }
            if pending_space {
                f.write_char(' ')?;
                pending_space = false;
            }
            if ch.is_control() {
                write!(f, "{}", ch.escape_unicode())?;
            } else {
                f.write_char(ch)?;
            }
            shown += width;
        }
        Ok(())
    }
}

/// 构造预览（首尾空白被丢弃）
#[inline]
pub fn preview_compact(text: &str, limit: usize) -> Preview<'_> {
    Preview { text, limit }
}

/// 多行错误信息压缩为单行（regex 的语法错误自带多行图示）
pub fn single_line(message: &str) -> String {
    preview_compact(message, usize::MAX).to_string()
}
