//! 重复与重叠检测
//! 重复：忽略大小写后模式原文相同
//! 重叠：模式 A 在模式 B 的原文中命中，A 比 B 更通用（B 永远不会单独生效）

use rustc_hash::FxHashMap;
use tracing::debug;

use super::Violations;
use crate::config::{OverlapMode, ValidatorConfig};
use crate::corpus::Corpus;
use crate::error::ValidationError;
use crate::matcher::{MatchMode, ReferencePattern};

pub struct OverlapDetector;

impl OverlapDetector {
    pub fn check(corpus: &Corpus, config: &ValidatorConfig, violations: &mut Violations) {
        let duplicates = Self::check_duplicates(corpus, violations);
        if violations.should_stop() {
            return;
        }
        Self::check_overlaps(corpus, config.overlap_mode, &duplicates, violations);
    }

    /// 报告 (first, second) 重复对，返回已报告的无序对，供重叠检测跳过
    fn check_duplicates(corpus: &Corpus, violations: &mut Violations) -> Vec<(usize, usize)> {
        let mut seen: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        let mut pairs = Vec::new();

        for (idx, entry) in corpus.iter().enumerate() {
            let folded = entry.pattern.to_lowercase();
            let earlier = seen.entry(folded).or_default();
            for &first in earlier.iter() {
                if corpus.is_waived(first, idx) {
                    continue;
                }
                violations.push(ValidationError::DuplicatePattern { first, second: idx });
                pairs.push((first, idx));
                if violations.should_stop() {
                    return pairs;
                }
            }
            earlier.push(idx);
        }

        pairs
    }

    fn check_overlaps(
        corpus: &Corpus,
        mode: OverlapMode,
        duplicates: &[(usize, usize)],
        violations: &mut Violations,
    ) {
        // 参考方言无法编译的模式由引擎兼容性阶段报告
        let compiled: Vec<Option<ReferencePattern>> = corpus
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let result = match mode {
                    OverlapMode::Search => {
                        ReferencePattern::compile(&entry.pattern, MatchMode::CaseInsensitive)
                    }
                    OverlapMode::Prefix => {
                        ReferencePattern::compile_prefix(&entry.pattern, MatchMode::CaseInsensitive)
                    }
                };
                result
                    .map_err(|e| debug!("Entry #{} skipped by overlap check: {}", idx, e))
                    .ok()
            })
            .collect();

        let is_duplicate = |a: usize, b: usize| {
            let key = (a.min(b), a.max(b));
            duplicates.contains(&key)
        };

        for (general, regex) in compiled.iter().enumerate() {
            let Some(regex) = regex else { continue };
            for (specific, entry) in corpus.iter().enumerate() {
                if general == specific
                    || corpus.is_waived(general, specific)
                    || is_duplicate(general, specific)
                {
                    continue;
                }
                if regex.search(&entry.pattern) {
                    violations.push(ValidationError::AmbiguousPattern { general, specific });
                    if violations.should_stop() {
                        return;
                    }
                }
            }
        }
    }
}
