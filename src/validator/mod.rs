//! 语料库校验流水线
//! 顺序：Schema → 重复/重叠 → 实例一致性 → 线性引擎兼容性
//! 任一违规都会使整个语料库不可用于构建匹配器

pub mod schema;
pub mod duplicate;
pub mod instance;
pub mod engine;

use std::ops::Deref;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info};

use crate::config::ValidatorConfig;
use crate::corpus::{Corpus, RawCorpus};
use crate::error::{ValidationError, ValidationReport};

pub use self::schema::SchemaValidator;
pub use self::duplicate::OverlapDetector;
pub use self::instance::InstanceChecker;
pub use self::engine::{find_unescaped_separator, EngineChecker};

/// 违规收集器（兼顾快速失败与全量收集两种策略）
#[derive(Debug)]
pub struct Violations {
    errors: Vec<ValidationError>,
    fail_fast: bool,
}

impl Violations {
    pub fn new(fail_fast: bool) -> Self {
        Self {
            errors: Vec::new(),
            fail_fast,
        }
    }

    pub fn push(&mut self, error: ValidationError) {
        if !self.should_stop() {
            self.errors.push(error);
        }
    }

    /// 快速失败模式下已收集到违规，后续检查应立即返回
    #[inline(always)]
    pub fn should_stop(&self) -> bool {
        self.fail_fast && !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_report(self) -> ValidationReport {
        ValidationReport::new(self.errors)
    }
}

/// 已通过校验的语料库，只能由 [`Validator`] 产生
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCorpus {
    corpus: Corpus,
}

impl ValidatedCorpus {
    pub fn as_corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn into_inner(self) -> Corpus {
        self.corpus
    }
}

impl Deref for ValidatedCorpus {
    type Target = Corpus;

    fn deref(&self) -> &Corpus {
        &self.corpus
    }
}

/// 语料库校验器
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// 校验原始语料库
    pub fn validate(&self, raw: &RawCorpus) -> Result<(), ValidationReport> {
        self.run(raw).map(|_| ())
    }

    /// 校验并返回可用于构建匹配器的语料库
    pub fn validate_into(&self, raw: &RawCorpus) -> Result<ValidatedCorpus, ValidationReport> {
        self.run(raw).map(|corpus| ValidatedCorpus { corpus })
    }

    /// 校验已解析的JSON值（含顶层结构检查）
    pub fn validate_value(&self, value: Value) -> Result<ValidatedCorpus, ValidationReport> {
        let raw = RawCorpus::from_value(value)?;
        self.validate_into(&raw)
    }

    /// 校验宿主程序直接构造的类型化语料库
    pub fn validate_corpus(&self, corpus: &Corpus) -> Result<ValidatedCorpus, ValidationReport> {
        self.validate_into(&RawCorpus::from(corpus))
    }

    fn run(&self, raw: &RawCorpus) -> Result<Corpus, ValidationReport> {
        let start = Instant::now();
        let mut violations = Violations::new(self.config.fail_fast());

        // 1. Schema校验（结构性错误时无法投影，直接终止）
        let stage = Instant::now();
        let projected = SchemaValidator::check(raw, &self.config, &mut violations);
        debug!(
            "Schema stage done | Entries: {} | Violations: {} | Time: {:?}",
            raw.len(),
            violations.len(),
            stage.elapsed()
        );
        let Some(corpus) = projected else {
            return Err(violations.into_report());
        };

        // 2. 重复/重叠检测
        if !violations.should_stop() {
            let stage = Instant::now();
            let before = violations.len();
            OverlapDetector::check(&corpus, &self.config, &mut violations);
            debug!(
                "Overlap stage done | Violations: {} | Time: {:?}",
                violations.len() - before,
                stage.elapsed()
            );
        }

        // 3. 实例一致性
        if !violations.should_stop() {
            let stage = Instant::now();
            let before = violations.len();
            InstanceChecker::check(&corpus, &self.config, &mut violations);
            debug!(
                "Instance stage done | Instances: {} | Violations: {} | Time: {:?}",
                corpus.total_instances(),
                violations.len() - before,
                stage.elapsed()
            );
        }

        // 4. 线性引擎兼容性
        if !violations.should_stop() {
            let stage = Instant::now();
            let before = violations.len();
            EngineChecker::check(&corpus, &self.config, &mut violations);
            debug!(
                "Engine stage done | Violations: {} | Time: {:?}",
                violations.len() - before,
                stage.elapsed()
            );
        }

        if violations.is_empty() {
            info!(
                "Validation passed | Entries: {} | Instances: {} | Time: {:?}",
                corpus.len(),
                corpus.total_instances(),
                start.elapsed()
            );
            Ok(corpus)
        } else {
            info!(
                "Validation failed | Violations: {} | Time: {:?}",
                violations.len(),
                start.elapsed()
            );
            Err(violations.into_report())
        }
    }
}

/// 使用默认（最严格）配置校验
pub fn validate(raw: &RawCorpus) -> Result<(), ValidationReport> {
    Validator::default().validate(raw)
}
