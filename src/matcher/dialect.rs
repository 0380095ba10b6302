//! 正则方言：参考方言（回溯引擎，支持环视/反向引用）与线性时间方言（regex crate）
//! 校验阶段用参考方言解释模式的本意，用线性方言确认部署安全
//! 两种方言与匹配器都编译同一个分组形式 `(?:p)`，保证校验通过即可部署

use regex::{Regex, RegexBuilder};
use tracing::warn;

use super::crawler_matcher::{COMPILED_SIZE_LIMIT, DFA_SIZE_LIMIT};
use crate::utils::preview::preview_compact;

/// 匹配大小写模式（调用方逐次传入，非全局设置）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchMode {
    /// 精确大小写
    CaseSensitive,
    /// 忽略大小写（面向真实 User-Agent 的默认模式）
    #[default]
    CaseInsensitive,
}

impl MatchMode {
    pub fn from_case_sensitive(case_sensitive: bool) -> Self {
        if case_sensitive {
            MatchMode::CaseSensitive
        } else {
            MatchMode::CaseInsensitive
        }
    }

    #[inline(always)]
    pub fn is_case_insensitive(self) -> bool {
        matches!(self, MatchMode::CaseInsensitive)
    }
}

/// 参考方言编译结果
#[derive(Debug, Clone)]
pub struct ReferencePattern {
    regex: fancy_regex::Regex,
}

impl ReferencePattern {
    /// 编译为"任意位置查找"语义
    pub fn compile(pattern: &str, mode: MatchMode) -> Result<Self, fancy_regex::Error> {
        Self::build(grouped(pattern), mode)
    }

    /// 编译为"从开头匹配"语义
    pub fn compile_prefix(pattern: &str, mode: MatchMode) -> Result<Self, fancy_regex::Error> {
        Self::build(format!(r"\A{}", grouped(pattern)), mode)
    }

    fn build(mut source: String, mode: MatchMode) -> Result<Self, fancy_regex::Error> {
        if mode.is_case_insensitive() {
            source.insert_str(0, "(?i)");
        }
        fancy_regex::Regex::new(&source).map(|regex| Self { regex })
    }

    /// 查找匹配；回溯超限等运行期错误视为未命中
    pub fn search(&self, text: &str) -> bool {
        self.regex.is_match(text).unwrap_or_else(|e| {
            warn!(
                "Reference regex runtime failure | Pattern: {} | Input preview: {} | Error: {}",
                preview_compact(self.regex.as_str(), 80),
                preview_compact(text, 80),
                e
            );
            false
        })
    }
}

/// 模式的分组形式，顶层 `|` 与内联标志不会泄漏到拼接后的正则
#[inline]
pub fn grouped(pattern: &str) -> String {
    format!("(?:{})", pattern)
}

/// 判断参考方言能否编译该模式（分组形式）
pub fn reference_accepts(pattern: &str) -> bool {
    fancy_regex::Regex::new(&grouped(pattern)).is_ok()
}

/// 线性时间方言编译（分组形式，与匹配器一致）
pub fn compile_linear(pattern: &str, mode: MatchMode) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&grouped(pattern))
        .case_insensitive(mode.is_case_insensitive())
        .size_limit(COMPILED_SIZE_LIMIT)
        .dfa_size_limit(DFA_SIZE_LIMIT)
        .build()
}
