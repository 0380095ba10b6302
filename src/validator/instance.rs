//! 实例一致性检查
//! 每个条目的模式必须命中其声明的全部实例；实例不可重复；全库实例数需达到最小证据阈值

use rustc_hash::FxHashSet;
use tracing::debug;

use super::Violations;
use crate::config::ValidatorConfig;
use crate::corpus::Corpus;
use crate::error::ValidationError;
use crate::matcher::ReferencePattern;

pub struct InstanceChecker;

impl InstanceChecker {
    pub fn check(corpus: &Corpus, config: &ValidatorConfig, violations: &mut Violations) {
        for (idx, entry) in corpus.iter().enumerate() {
            // 同一重复值只报告一次
            let mut seen = FxHashSet::default();
            let mut reported = FxHashSet::default();
            for instance in &entry.instances {
                if !seen.insert(instance.as_str()) && reported.insert(instance.as_str()) {
                    violations.push(ValidationError::DuplicateInstance {
                        entry_index: idx,
                        value: instance.clone(),
                    });
                    if violations.should_stop() {
                        return;
                    }
                }
            }

            let regex = match ReferencePattern::compile(&entry.pattern, config.instance_mode) {
                Ok(regex) => regex,
                Err(e) => {
                    debug!("Entry #{} skipped by instance check: {}", idx, e);
                    continue;
                }
            };

            for instance in &entry.instances {
                if !regex.search(instance) {
                    violations.push(ValidationError::InstanceMismatch {
                        entry_index: idx,
                        pattern: entry.pattern.clone(),
                        instance: instance.clone(),
                    });
                    if violations.should_stop() {
                        return;
                    }
                }
            }
        }

        let count = corpus.total_instances();
        if count < config.min_instances {
            violations.push(ValidationError::InsufficientEvidence {
                count,
                required: config.min_instances,
            });
        }
    }
}
