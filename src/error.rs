//! 全局错误类型定义
//! 校验错误（语料库不合法）与核心错误（IO/JSON/匹配器构建）分离，基于thiserror实现

use std::fmt;

use thiserror::Error;
use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;

/// 违反的具体Schema规则
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaRule {
    /// 缺少必填字段
    MissingField(&'static str),
    /// pattern 为空字符串
    EmptyPattern,
    /// instances 为空数组（配置禁止空实例时）
    EmptyInstances,
    /// 字段类型错误
    WrongType {
        field: String,
        expected: &'static str,
    },
    /// 未知字段
    UnknownField(String),
}

impl fmt::Display for SchemaRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaRule::MissingField(name) => write!(f, "missing required field `{}`", name),
            SchemaRule::EmptyPattern => write!(f, "field `pattern` is empty"),
            SchemaRule::EmptyInstances => write!(f, "field `instances` is empty"),
            SchemaRule::WrongType { field, expected } => {
                write!(f, "field `{}` must be {}", field, expected)
            }
            SchemaRule::UnknownField(name) => write!(f, "unknown field `{}`", name),
        }
    }
}

/// 校验错误种类（不带上下文，便于断言和统计）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedInput,
    SchemaViolation,
    DuplicatePattern,
    AmbiguousPattern,
    DuplicateInstance,
    InstanceMismatch,
    InsufficientEvidence,
    EngineIncompatible,
    UnescapedSeparator,
}

/// 语料库校验错误
/// 每个变体都携带足够的上下文（条目下标、模式、实例），无需重新扫描即可定位
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// 顶层不是数组，或无法解析为语料库
    #[error("Malformed input: {reason}")]
    MalformedInput { reason: String },

    /// 单条目结构不符合Schema
    #[error("Entry #{entry_index}: schema violation: {reason}")]
    SchemaViolation { entry_index: usize, reason: SchemaRule },

    /// 忽略大小写后模式完全相同
    #[error("Entry #{second}: pattern duplicates entry #{first} (case-insensitive)")]
    DuplicatePattern { first: usize, second: usize },

    /// 一个模式会在另一个模式的原文中命中，即更通用，会遮蔽后者
    #[error("Entry #{specific}: pattern is a subset of the more general pattern of entry #{general}")]
    AmbiguousPattern { general: usize, specific: usize },

    /// 同一条目内实例重复
    #[error("Entry #{entry_index}: instance {value:?} is declared more than once")]
    DuplicateInstance { entry_index: usize, value: String },

    /// 条目自身模式未命中其声明的实例
    #[error("Entry #{entry_index}: pattern {pattern:?} misses instance {instance:?}")]
    InstanceMismatch {
        entry_index: usize,
        pattern: String,
        instance: String,
    },

    /// 语料库实例总数低于最小证据阈值
    #[error("Only {count} instances in corpus, at least {required} required")]
    InsufficientEvidence { count: usize, required: usize },

    /// 线性时间正则引擎不支持该模式
    #[error("Entry #{entry_index}: pattern {pattern:?} is incompatible with the linear-time engine: {reason}")]
    EngineIncompatible {
        entry_index: usize,
        pattern: String,
        reason: String,
    },

    /// 模式中存在未转义的分隔符
    #[error("Entry #{entry_index}: unescaped separator at byte {position}")]
    UnescapedSeparator { entry_index: usize, position: usize },
}

impl ValidationError {
    /// 错误种类
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::MalformedInput { .. } => ErrorKind::MalformedInput,
            ValidationError::SchemaViolation { .. } => ErrorKind::SchemaViolation,
            ValidationError::DuplicatePattern { .. } => ErrorKind::DuplicatePattern,
            ValidationError::AmbiguousPattern { .. } => ErrorKind::AmbiguousPattern,
            ValidationError::DuplicateInstance { .. } => ErrorKind::DuplicateInstance,
            ValidationError::InstanceMismatch { .. } => ErrorKind::InstanceMismatch,
            ValidationError::InsufficientEvidence { .. } => ErrorKind::InsufficientEvidence,
            ValidationError::EngineIncompatible { .. } => ErrorKind::EngineIncompatible,
            ValidationError::UnescapedSeparator { .. } => ErrorKind::UnescapedSeparator,
        }
    }

    /// 关联的条目下标（语料库级错误返回None）
    pub fn entry_index(&self) -> Option<usize> {
        match self {
            ValidationError::MalformedInput { .. } | ValidationError::InsufficientEvidence { .. } => None,
            ValidationError::SchemaViolation { entry_index, .. }
            | ValidationError::DuplicateInstance { entry_index, .. }
            | ValidationError::InstanceMismatch { entry_index, .. }
            | ValidationError::EngineIncompatible { entry_index, .. }
            | ValidationError::UnescapedSeparator { entry_index, .. } => Some(*entry_index),
            ValidationError::DuplicatePattern { second, .. } => Some(*second),
            ValidationError::AmbiguousPattern { specific, .. } => Some(*specific),
        }
    }
}

/// 一次校验收集到的全部错误（按流水线顺序）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// 是否包含指定种类的错误
    pub fn contains(&self, kind: ErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind() == kind)
    }

    /// 第一条错误（FailFast 模式下也是唯一一条）
    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, error) in self.errors.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

impl From<ValidationError> for ValidationReport {
    fn from(error: ValidationError) -> Self {
        Self { errors: vec![error] }
    }
}

/// 核心错误枚举（非校验类错误）
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================== 输入相关错误 =====================
    /// JSON解析失败
    #[error("JSON parse failed: {0}")]
    Json(#[from] SerdeJsonError),

    /// 无效输入参数
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ===================== 编译相关错误 =====================
    /// 正则表达式编译失败
    #[error("Regex compilation failed: {0}")]
    RegexCompileError(#[from] RegexError),

    /// 匹配器构建失败
    #[error("Matcher build failed: {0}")]
    MatcherBuildError(String),

    // ===================== 校验相关错误 =====================
    /// 语料库未通过校验
    #[error("Corpus validation failed:\n{0}")]
    Validation(#[from] ValidationReport),
}

/// 全局Result类型
pub type CoreResult<T> = Result<T, CoreError>;
