//! Schema 校验
//! 逐条目检查字段存在性与类型，全部通过（或仅有非结构性违规）时投影为类型化语料库

use serde_json::{Map, Value};
use tracing::debug;

use super::Violations;
use crate::config::ValidatorConfig;
use crate::corpus::model::json_type_name;
use crate::corpus::{Corpus, Entry, RawCorpus, KNOWN_FIELDS};
use crate::error::{SchemaRule, ValidationError};

const METADATA_FIELDS: [&str; 3] = ["url", "description", "addition_date"];

/// 单条记录的检查结果
#[derive(Debug, Default, Clone, Copy)]
struct RecordOutcome {
    /// 存在结构性违规，无法投影为类型化条目
    blocking: bool,
}

pub struct SchemaValidator;

impl SchemaValidator {
    /// 检查全部记录；返回 None 表示存在结构性违规，后续阶段无法执行
    pub fn check(
        raw: &RawCorpus,
        config: &ValidatorConfig,
        violations: &mut Violations,
    ) -> Option<Corpus> {
        let mut blocked = false;

        for (idx, record) in raw.records().iter().enumerate() {
            let outcome = Self::check_record(idx, record, config, violations);
            blocked |= outcome.blocking;
            if violations.should_stop() {
                break;
            }
        }

        if blocked || violations.should_stop() {
            return None;
        }

        let mut entries = Vec::with_capacity(raw.len());
        for (idx, record) in raw.records().iter().enumerate() {
            match Entry::from_record(record) {
                Some(entry) => entries.push(entry),
                None => {
                    debug!("Record #{} passed schema checks but failed projection", idx);
                    violations.push(ValidationError::MalformedInput {
                        reason: format!("element #{} cannot be read as an entry", idx),
                    });
                    return None;
                }
            }
        }

        Some(Corpus::new(entries))
    }

    fn check_record(
        idx: usize,
        record: &Map<String, Value>,
        config: &ValidatorConfig,
        violations: &mut Violations,
    ) -> RecordOutcome {
        let mut outcome = RecordOutcome::default();
        let mut report = |reason: SchemaRule, blocking: bool, out: &mut RecordOutcome| {
            out.blocking |= blocking;
            violations.push(ValidationError::SchemaViolation {
                entry_index: idx,
                reason,
            });
        };

        // pattern：必填非空字符串
        match record.get("pattern") {
            None => report(SchemaRule::MissingField("pattern"), true, &mut outcome),
            Some(Value::String(s)) if s.is_empty() => {
                report(SchemaRule::EmptyPattern, true, &mut outcome)
            }
            Some(Value::String(_)) => {}
            Some(_) => report(wrong_type("pattern", "a string"), true, &mut outcome),
        }

        // instances：字符串数组；缺失按空数组投影
        match record.get("instances") {
            None if config.require_instances => {
                report(SchemaRule::MissingField("instances"), false, &mut outcome)
            }
            None => {}
            Some(value) => match string_array(value) {
                Some(0) if !config.allow_empty_instances => {
                    report(SchemaRule::EmptyInstances, false, &mut outcome)
                }
                Some(_) => {}
                None => report(
                    wrong_type("instances", "an array of strings"),
                    true,
                    &mut outcome,
                ),
            },
        }

        if let Some(value) = record.get("depends_on") {
            if string_array(value).is_none() {
                report(
                    wrong_type("depends_on", "an array of strings"),
                    true,
                    &mut outcome,
                );
            }
        }

        for field in METADATA_FIELDS {
            if let Some(value) = record.get(field) {
                if !value.is_string() {
                    debug!(
                        "Entry #{} field `{}` has type {}",
                        idx,
                        field,
                        json_type_name(value)
                    );
                    report(wrong_type(field, "a string"), true, &mut outcome);
                }
            }
        }

        for key in record.keys() {
            if !KNOWN_FIELDS.contains(&key.as_str()) {
                report(SchemaRule::UnknownField(key.clone()), false, &mut outcome);
            }
        }

        outcome
    }
}

fn wrong_type(field: &str, expected: &'static str) -> SchemaRule {
    SchemaRule::WrongType {
        field: field.to_string(),
        expected,
    }
}

/// 字符串数组返回元素个数，否则返回None
fn string_array(value: &Value) -> Option<usize> {
    let items = value.as_array()?;
    items.iter().all(Value::is_string).then_some(items.len())
}
