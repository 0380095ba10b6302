//! 线性时间引擎兼容性检查
//! 部署到生产的模式必须能被线性引擎编译，且对声明实例的判定与参考方言一致

use regex::Regex;
use tracing::debug;

use super::Violations;
use crate::config::ValidatorConfig;
use crate::corpus::{Corpus, Entry};
use crate::error::ValidationError;
use crate::matcher::{analyze, compile_linear, reference_accepts, CrawlerMatcher, ReferencePattern};
use crate::utils::preview::single_line;

/// 查找第一个未被反斜杠转义的分隔符（字节偏移）
pub fn find_unescaped_separator(pattern: &str, separator: char) -> Option<usize> {
    let mut chars = pattern.char_indices();
    while let Some((pos, ch)) = chars.next() {
        if ch == '\\' {
            chars.next();
        } else if ch == separator {
            return Some(pos);
        }
    }
    None
}

pub struct EngineChecker;

impl EngineChecker {
    pub fn check(corpus: &Corpus, config: &ValidatorConfig, violations: &mut Violations) {
        let mut all_compiled = true;
        for (idx, entry) in corpus.iter().enumerate() {
            all_compiled &= Self::check_entry(idx, entry, config, violations);
            if violations.should_stop() {
                return;
            }
        }

        // 逐条可编译时再确认匹配器的合并形式可构建（程序大小上限）
        if all_compiled {
            if let Some(violation) = Self::check_combined(corpus) {
                violations.push(violation);
            }
        }
    }

    /// 合并形式构建失败时，定位第一个使其超限的条目
    fn check_combined(corpus: &Corpus) -> Option<ValidationError> {
        let patterns: Vec<String> = corpus.patterns().map(str::to_string).collect();
        let error = CrawlerMatcher::from_patterns(patterns.clone()).err()?;

        // 不变量：前 hi 条无法构建
        let (mut lo, mut hi) = (1, patterns.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if CrawlerMatcher::from_patterns(patterns[..mid].to_vec()).is_err() {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }

        let entry_index = hi.saturating_sub(1);
        debug!(
            "Combined matcher build failed | Entries: {} | First failing entry: #{}",
            patterns.len(),
            entry_index
        );
        Some(ValidationError::EngineIncompatible {
            entry_index,
            pattern: patterns.get(entry_index).cloned().unwrap_or_default(),
            reason: format!("combined matcher cannot be built: {}", single_line(&error.to_string())),
        })
    }

    /// 返回该模式能否被两种方言编译
    fn check_entry(
        idx: usize,
        entry: &Entry,
        config: &ValidatorConfig,
        violations: &mut Violations,
    ) -> bool {
        let incompatible = |reason: String| ValidationError::EngineIncompatible {
            entry_index: idx,
            pattern: entry.pattern.clone(),
            reason,
        };

        if let Some(separator) = config.separator {
            if let Some(position) = find_unescaped_separator(&entry.pattern, separator) {
                violations.push(ValidationError::UnescapedSeparator {
                    entry_index: idx,
                    position,
                });
            }
        }

        let linear = match compile_linear(&entry.pattern, config.instance_mode) {
            Ok(linear) => linear,
            Err(e) => {
                let reason = if reference_accepts(&entry.pattern) {
                    format!("unsupported construct: {}", single_line(&e.to_string()))
                } else {
                    format!("syntax error: {}", single_line(&e.to_string()))
                };
                violations.push(incompatible(reason));
                return false;
            }
        };

        // 参考方言拒绝的模式在重叠与实例阶段被跳过，必须在此报告
        let reference = match ReferencePattern::compile(&entry.pattern, config.instance_mode) {
            Ok(reference) => reference,
            Err(e) => {
                violations.push(incompatible(format!(
                    "reference dialect rejects pattern: {}",
                    single_line(&e.to_string())
                )));
                return false;
            }
        };

        if let Some(instance) = Self::first_divergent_instance(entry, &reference, &linear) {
            violations.push(incompatible(format!(
                "linear engine misses instance {:?}",
                instance
            )));
        }

        if let Some(min_len) = config.min_indicator_literal {
            match analyze(&entry.pattern) {
                Ok(analysis) if !analysis.has_indicator(min_len) => {
                    violations.push(incompatible(format!(
                        "no indicator literal of at least {} bytes",
                        min_len
                    )));
                }
                Ok(_) => {}
                Err(e) => debug!("Entry #{} literal analysis failed: {}", idx, e),
            }
        }

        true
    }

    /// 参考方言命中而线性引擎未命中的第一个实例
    fn first_divergent_instance<'a>(
        entry: &'a Entry,
        reference: &ReferencePattern,
        linear: &Regex,
    ) -> Option<&'a str> {
        entry
            .instances
            .iter()
            .map(String::as_str)
            .find(|instance| reference.search(instance) && !linear.is_match(instance))
    }
}
