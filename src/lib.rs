//! crawler-agents - 爬虫 User-Agent 正则语料库校验与高性能匹配

// 导出全局错误类型
pub use self::error::{
    CoreError, CoreResult, ErrorKind, SchemaRule, ValidationError, ValidationReport,
};

// 导出配置模块
pub use self::config::{
    ConfigManager, CustomConfigBuilder, FailurePolicy, OverlapMode, ValidatorConfig,
};

// 导出语料库模型
pub use self::corpus::{Corpus, Entry, RawCorpus};

// 导出校验模块核心接口
pub use self::validator::{validate, ValidatedCorpus, Validator};

// 导出匹配模块核心接口
pub use self::matcher::{analyze, CrawlerMatcher, LiteralAnalysis, MatchMode};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod corpus;
pub mod validator;
pub mod matcher;
pub mod utils;

/// 解析 JSON 文本并按指定配置校验
pub fn load_corpus(json: &str, config: &ValidatorConfig) -> CoreResult<ValidatedCorpus> {
    let raw = RawCorpus::from_json_str(json)?;
    Ok(Validator::new(config.clone()).validate_into(&raw)?)
}

/// 按默认配置校验并构建匹配器
pub fn build_matcher(json: &str) -> CoreResult<CrawlerMatcher> {
    let corpus = load_corpus(json, &ValidatorConfig::default())?;
    CrawlerMatcher::new(&corpus)
}
