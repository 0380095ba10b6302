//! 语料库数据模型定义
//! 仅存储条目数据，无任何校验逻辑，支持序列化/反序列化

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult, ValidationError};

/// 条目允许出现的全部字段
pub const KNOWN_FIELDS: [&str; 6] = [
    "pattern",
    "instances",
    "url",
    "description",
    "addition_date",
    "depends_on",
];

/// 单条爬虫签名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub pattern: String,
    #[serde(default)]
    pub instances: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addition_date: Option<String>,
    // 豁免重叠检测的条目（按 pattern 引用），缺省归一化为空集合
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub depends_on: BTreeSet<String>,
}

impl Entry {
    /// 从模式快速创建（其余字段为空）
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            instances: Vec::new(),
            url: None,
            description: None,
            addition_date: None,
            depends_on: BTreeSet::new(),
        }
    }

    pub fn with_instances<I, S>(mut self, instances: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.instances = instances.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_depends_on<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// 从原始记录投影为类型化条目
    /// 字段类型不符时返回None（由Schema校验器负责报告具体原因）
    pub fn from_record(record: &Map<String, Value>) -> Option<Self> {
        serde_json::from_value(Value::Object(record.clone())).ok()
    }

    /// 本条目是否声明了对指定模式的重叠豁免
    #[inline]
    pub fn waives(&self, other_pattern: &str) -> bool {
        self.depends_on.contains(other_pattern)
    }
}

/// 原始语料库：已确认顶层为数组且每个元素为对象，字段尚未校验
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCorpus {
    records: Vec<Map<String, Value>>,
}

impl RawCorpus {
    /// 从已解析的JSON值构建
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        let Value::Array(items) = value else {
            return Err(ValidationError::MalformedInput {
                reason: format!("top-level value must be an array, got {}", json_type_name(&value)),
            });
        };

        let mut records = Vec::with_capacity(items.len());
        for (idx, item) in items.into_iter().enumerate() {
            match item {
                Value::Object(map) => records.push(map),
                other => {
                    return Err(ValidationError::MalformedInput {
                        reason: format!(
                            "element #{} must be a record, got {}",
                            idx,
                            json_type_name(&other)
                        ),
                    })
                }
            }
        }

        Ok(Self { records })
    }

    /// 从JSON文本构建
    pub fn from_json_str(text: &str) -> CoreResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value).map_err(|e| CoreError::Validation(e.into()))
    }

    pub fn records(&self) -> &[Map<String, Value>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<&Corpus> for RawCorpus {
    fn from(corpus: &Corpus) -> Self {
        let records = corpus
            .entries
            .iter()
            .filter_map(|entry| match serde_json::to_value(entry) {
                Ok(Value::Object(map)) => Some(map),
                _ => None,
            })
            .collect();
        Self { records }
    }
}

/// 类型化语料库：有序、构建后不可变
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    entries: Vec<Entry>,
}

impl Corpus {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 全部模式（语料库顺序）
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.pattern.as_str())
    }

    /// 声明的实例总数
    pub fn total_instances(&self) -> usize {
        self.entries.iter().map(|e| e.instances.len()).sum()
    }

    /// 条目 i 与条目 j 之间是否存在重叠豁免（任一方向）
    pub fn is_waived(&self, i: usize, j: usize) -> bool {
        match (self.entries.get(i), self.entries.get(j)) {
            (Some(a), Some(b)) => a.waives(&b.pattern) || b.waives(&a.pattern),
            _ => false,
        }
    }
}

impl From<Vec<Entry>> for Corpus {
    fn from(entries: Vec<Entry>) -> Self {
        Self::new(entries)
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// JSON值类型名称（用于错误信息）
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a record",
    }
}
