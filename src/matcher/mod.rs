//! 匹配模块：正则方言、字面量分析、运行时爬虫匹配器
pub mod dialect;
pub mod literal;
pub mod crawler_matcher;

pub use self::dialect::{compile_linear, reference_accepts, MatchMode, ReferencePattern};
pub use self::literal::{analyze, LiteralAnalysis, MAX_LITERALS};
pub use self::crawler_matcher::CrawlerMatcher;
