//! 校验策略配置管理，存储所有可配置的校验规则开关

use crate::matcher::MatchMode;

/// 默认最小证据阈值（语料库实例总数）
pub const DEFAULT_MIN_INSTANCES: usize = 10;

/// 默认分隔符（模式被转写为 `/pattern/` 形式时的定界符）
pub const DEFAULT_SEPARATOR: char = '/';

/// 重叠检测语义
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapMode {
    /// 在另一模式原文任意位置查找（更严格）
    #[default]
    Search,
    /// 仅从另一模式原文开头匹配
    Prefix,
}

/// 失败处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// 收集全部违规后统一报告
    #[default]
    CollectAll,
    /// 遇到第一条违规立即返回
    FailFast,
}

/// 校验配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    // 每个条目都必须声明 instances 字段
    pub require_instances: bool,
    // 允许 instances 为空数组（总量阈值仍然生效）
    pub allow_empty_instances: bool,
    // 语料库实例总数下限
    pub min_instances: usize,
    // 模式间重叠检测语义
    pub overlap_mode: OverlapMode,
    // 实例校验使用的大小写模式
    pub instance_mode: MatchMode,
    // 必须转义的分隔符，None 表示不检查
    pub separator: Option<char>,
    // 指示字面量最小长度，None 表示不检查
    pub min_indicator_literal: Option<usize>,
    // 失败处理策略
    pub failure_policy: FailurePolicy,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            require_instances: true,
            allow_empty_instances: true,
            min_instances: DEFAULT_MIN_INSTANCES,
            overlap_mode: OverlapMode::Search,
            instance_mode: MatchMode::CaseSensitive,
            separator: Some(DEFAULT_SEPARATOR),
            min_indicator_literal: None,
            failure_policy: FailurePolicy::CollectAll,
        }
    }
}

impl ValidatorConfig {
    /// 是否为快速失败模式
    pub fn fail_fast(&self) -> bool {
        self.failure_policy == FailurePolicy::FailFast
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置（最严格规则集）
    pub fn get_default() -> ValidatorConfig {
        ValidatorConfig::default()
    }

    /// 宽松配置：instances 字段可选
    pub fn lenient() -> ValidatorConfig {
        ValidatorConfig {
            require_instances: false,
            ..ValidatorConfig::default()
        }
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone)]
pub struct CustomConfigBuilder {
    config: ValidatorConfig,
}

impl Default for CustomConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ValidatorConfig::default(),
        }
    }

    /// 基于已有配置继续定制
    pub fn from_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn require_instances(mut self, require: bool) -> Self {
        self.config.require_instances = require;
        self
    }

    pub fn allow_empty_instances(mut self, allow: bool) -> Self {
        self.config.allow_empty_instances = allow;
        self
    }

    pub fn min_instances(mut self, min: usize) -> Self {
        self.config.min_instances = min;
        self
    }

    pub fn overlap_mode(mut self, mode: OverlapMode) -> Self {
        self.config.overlap_mode = mode;
        self
    }

    pub fn instance_mode(mut self, mode: MatchMode) -> Self {
        self.config.instance_mode = mode;
        self
    }

    pub fn separator(mut self, separator: Option<char>) -> Self {
        self.config.separator = separator;
        self
    }

    pub fn min_indicator_literal(mut self, len: Option<usize>) -> Self {
        self.config.min_indicator_literal = len;
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config.failure_policy = policy;
        self
    }

    pub fn build(self) -> ValidatorConfig {
        self.config
    }
}
