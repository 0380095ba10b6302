//! 运行时匹配器
//! 仅从已通过校验的语料库构建；两种策略（合并正则 / 逐条目正则集合）行为等价

use std::time::Instant;

use regex::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};
use tracing::debug;

use super::dialect::{grouped, MatchMode};
use crate::corpus::Corpus;
use crate::error::{CoreError, CoreResult};
use crate::validator::ValidatedCorpus;

/// 编译后正则程序的大小上限
/// 按数千条含 Unicode 字符类（`\w`、`\s`、`\d`）的模式估算，默认的 10 MiB 只够两百条左右
pub const COMPILED_SIZE_LIMIT: usize = 512 * (1 << 20);

/// 惰性 DFA 缓存上限（超出后回退到较慢的引擎，不会报错）
pub const DFA_SIZE_LIMIT: usize = 64 * (1 << 20);

/// 单一大小写模式下的编译结果
#[derive(Debug, Clone)]
struct ModeMatcher {
    /// 合并正则：(?:p0)|(?:p1)|...，空语料库时为 None
    combined: Option<Regex>,
    /// 逐条目正则集合，命中下标即语料库下标
    per_entry: RegexSet,
}

impl ModeMatcher {
    fn build(patterns: &[String], mode: MatchMode) -> CoreResult<Self> {
        let case_insensitive = mode.is_case_insensitive();

        let groups: Vec<String> = patterns.iter().map(|p| grouped(p)).collect();

        let combined = if groups.is_empty() {
            None
        } else {
            Some(
                RegexBuilder::new(&groups.join("|"))
                    .case_insensitive(case_insensitive)
                    .size_limit(COMPILED_SIZE_LIMIT)
                    .dfa_size_limit(DFA_SIZE_LIMIT)
                    .build()?,
            )
        };

        let per_entry = RegexSetBuilder::new(&groups)
            .case_insensitive(case_insensitive)
            .size_limit(COMPILED_SIZE_LIMIT)
            .dfa_size_limit(DFA_SIZE_LIMIT)
            .build()?;

        Ok(Self { combined, per_entry })
    }
}

/// 爬虫 User-Agent 匹配器
/// 构建后不可变，可在线程间自由共享（无需加锁）
#[derive(Debug, Clone)]
pub struct CrawlerMatcher {
    patterns: Vec<String>,
    case_sensitive: ModeMatcher,
    case_insensitive: ModeMatcher,
}

impl CrawlerMatcher {
    /// 从已校验语料库构建
    pub fn new(corpus: &ValidatedCorpus) -> CoreResult<Self> {
        Self::from_trusted(corpus)
    }

    /// 从调用方保证合法的语料库构建（不做任何校验）
    pub fn from_trusted(corpus: &Corpus) -> CoreResult<Self> {
        Self::from_patterns(corpus.patterns().map(str::to_string).collect())
    }

    /// 按语料库顺序的模式列表构建（校验阶段也用它确认合并形式可构建）
    pub(crate) fn from_patterns(patterns: Vec<String>) -> CoreResult<Self> {
        let start = Instant::now();

        let case_sensitive = ModeMatcher::build(&patterns, MatchMode::CaseSensitive)
            .map_err(|e| CoreError::MatcherBuildError(format!("case-sensitive: {}", e)))?;
        let case_insensitive = ModeMatcher::build(&patterns, MatchMode::CaseInsensitive)
            .map_err(|e| CoreError::MatcherBuildError(format!("case-insensitive: {}", e)))?;

        debug!(
            "Crawler matcher built | Patterns: {} | Time: {:?}",
            patterns.len(),
            start.elapsed()
        );

        Ok(Self {
            patterns,
            case_sensitive,
            case_insensitive,
        })
    }

    #[inline(always)]
    fn for_mode(&self, mode: MatchMode) -> &ModeMatcher {
        match mode {
            MatchMode::CaseSensitive => &self.case_sensitive,
            MatchMode::CaseInsensitive => &self.case_insensitive,
        }
    }

    /// 文本是否命中任一爬虫模式（合并正则策略）
    pub fn is_crawler(&self, text: &str, mode: MatchMode) -> bool {
        self.for_mode(mode)
            .combined
            .as_ref()
            .is_some_and(|re| re.is_match(text))
    }

    /// 文本是否命中任一爬虫模式（逐条目策略）
    pub fn is_crawler_per_entry(&self, text: &str, mode: MatchMode) -> bool {
        self.for_mode(mode).per_entry.is_match(text)
    }

    /// 命中的条目下标（升序，即语料库顺序）
    pub fn matching_entries(&self, text: &str, mode: MatchMode) -> Vec<usize> {
        self.for_mode(mode).per_entry.matches(text).into_iter().collect()
    }

    /// 命中的模式原文（语料库顺序）
    pub fn matching_patterns(&self, text: &str, mode: MatchMode) -> Vec<&str> {
        self.matching_entries(text, mode)
            .into_iter()
            .map(|idx| self.patterns[idx].as_str())
            .collect()
    }

    /// 指定下标的模式
    pub fn pattern(&self, index: usize) -> Option<&str> {
        self.patterns.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
