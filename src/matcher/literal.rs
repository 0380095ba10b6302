//! 模式字面量分析
//! 1. 能完全展开为有限字面量集合（≤ MAX_LITERALS）的模式：返回全部字面量
//! 2. 否则：返回任何匹配文本都必须包含的最长字面量（指示字面量，可能为空）

use regex_syntax::hir::{Class, Hir, HirKind};
use regex_syntax::Parser;

/// 字面量展开上限
pub const MAX_LITERALS: usize = 100;

/// 字面量分析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralAnalysis {
    /// 模式恰好匹配这些字面量之一（查找语义下：文本包含其一即命中）
    Exact(Vec<String>),
    /// 每个匹配都必须包含的最长字面量
    Required(String),
}

impl LiteralAnalysis {
    /// 指示字面量是否足够长（可展开的模式总是满足）
    pub fn has_indicator(&self, min_len: usize) -> bool {
        match self {
            LiteralAnalysis::Exact(_) => true,
            LiteralAnalysis::Required(literal) => literal.len() >= min_len,
        }
    }
}

/// 分析模式（线性方言语法）
pub fn analyze(pattern: &str) -> Result<LiteralAnalysis, regex_syntax::Error> {
    let hir = Parser::new().parse(pattern)?;
    if let Some(literals) = literalize(&hir, MAX_LITERALS) {
        return Ok(LiteralAnalysis::Exact(
            literals.into_iter().map(bytes_to_string).collect(),
        ));
    }
    Ok(LiteralAnalysis::Required(bytes_to_string(longest_required_literal(&hir))))
}

fn bytes_to_string(bytes: Vec<u8>) -> String {
    String::from_utf8_lossy(&bytes).into_owned()
}

/// 将 HIR 展开为字面量集合，超过上限或遇到不支持的结构返回 None
fn literalize(hir: &Hir, max: usize) -> Option<Vec<Vec<u8>>> {
    match hir.kind() {
        HirKind::Empty => Some(vec![Vec::new()]),
        HirKind::Literal(lit) => Some(vec![lit.0.to_vec()]),
        HirKind::Class(class) => expand_class(class, max),
        // 锚点/单词边界无法用纯字面量表达
        HirKind::Look(_) => None,
        HirKind::Capture(cap) => literalize(&cap.sub, max),
        HirKind::Repetition(rep) => {
            let upper = rep.max?;
            if upper as usize > max {
                return None;
            }
            let sub = literalize(&rep.sub, max)?;
            let mut results = Vec::new();
            for count in rep.min..=upper {
                let matrix = vec![sub.clone(); count as usize];
                results.extend(combinations(&matrix, max)?);
                if results.len() > max {
                    return None;
                }
            }
            Some(results)
        }
        HirKind::Concat(subs) => {
            let matrix = subs
                .iter()
                .map(|sub| literalize(sub, max))
                .collect::<Option<Vec<_>>>()?;
            combinations(&matrix, max)
        }
        HirKind::Alternation(subs) => {
            let mut results = Vec::new();
            for sub in subs {
                results.extend(literalize(sub, max)?);
                if results.len() > max {
                    return None;
                }
            }
            Some(results)
        }
    }
}

/// 字符类展开为单字符字面量
fn expand_class(class: &Class, max: usize) -> Option<Vec<Vec<u8>>> {
    match class {
        Class::Unicode(cls) => {
            let count: usize = cls
                .iter()
                .map(|r| r.end() as usize - r.start() as usize + 1)
                .sum();
            if count > max {
                return None;
            }
            let mut results = Vec::with_capacity(count);
            for range in cls.iter() {
                for ch in range.start()..=range.end() {
                    let mut buf = [0u8; 4];
                    results.push(ch.encode_utf8(&mut buf).as_bytes().to_vec());
                }
            }
            Some(results)
        }
        Class::Bytes(cls) => {
            let count: usize = cls
                .iter()
                .map(|r| r.end() as usize - r.start() as usize + 1)
                .sum();
            if count > max {
                return None;
            }
            Some(
                cls.iter()
                    .flat_map(|r| r.start()..=r.end())
                    .map(|b| vec![b])
                    .collect(),
            )
        }
    }
}

/// 笛卡尔积拼接：matrix 每一行贡献结果字符串的一段
/// 结果数量超过上限时返回 None
fn combinations(matrix: &[Vec<Vec<u8>>], max: usize) -> Option<Vec<Vec<u8>>> {
    let mut results: Vec<Vec<u8>> = vec![Vec::new()];
    for row in matrix {
        let size = results.len().checked_mul(row.len())?;
        if size > max {
            return None;
        }
        let mut next = Vec::with_capacity(size);
        for prefix in &results {
            for part in row {
                let mut joined = prefix.clone();
                joined.extend_from_slice(part);
                next.push(joined);
            }
        }
        results = next;
    }
    Some(results)
}

/// 所有匹配都必须包含的最长字面量
fn longest_required_literal(hir: &Hir) -> Vec<u8> {
    match hir.kind() {
        HirKind::Literal(lit) => lit.0.to_vec(),
        HirKind::Capture(cap) => longest_required_literal(&cap.sub),
        HirKind::Repetition(rep) if rep.min >= 1 => longest_required_literal(&rep.sub),
        HirKind::Concat(subs) => subs
            .iter()
            .map(longest_required_literal)
            .fold(Vec::new(), |best, lit| if lit.len() > best.len() { lit } else { best }),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact(pattern: &str) -> Vec<String> {
        match analyze(pattern).unwrap() {
            LiteralAnalysis::Exact(mut literals) => {
                literals.sort();
                literals
            }
            other => panic!("expected exact literals for {pattern:?}, got {other:?}"),
        }
    }

    fn required(pattern: &str) -> String {
        match analyze(pattern).unwrap() {
            LiteralAnalysis::Required(literal) => literal,
            other => panic!("expected required literal for {pattern:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_simple_phrase_is_exact() {
        assert_eq!(exact("simple phrase"), vec!["simple phrase"]);
    }

    #[test]
    fn test_alternation_concatenation_expands() {
        assert_eq!(
            exact("(alter|nation) x (alter|nation)"),
            vec!["alter x alter", "alter x nation", "nation x alter", "nation x nation"]
        );
    }

    #[test]
    fn test_character_classes_expand() {
        assert_eq!(exact("ranges [0-1]x[a-b]"), vec![
            "ranges 0xa", "ranges 0xb", "ranges 1xa", "ranges 1xb"
        ]);
    }

    #[test]
    fn test_optional_suffix_expands() {
        assert_eq!(exact("Quest?"), vec!["Ques", "Quest"]);
    }

    #[test]
    fn test_bounded_repeat_expands() {
        assert_eq!(exact("repeat{3,4}"), vec!["repeattt", "repeatttt"]);
    }

    #[test]
    fn test_too_many_combinations_falls_back_to_required() {
        assert_eq!(required("too many combinations [0-9][a-z]"), "too many combinations ");
    }

    #[test]
    fn test_any_char_falls_back_to_required() {
        assert_eq!(required("any char ."), "any char ");
    }

    #[test]
    fn test_plus_keeps_required_prefix() {
        assert_eq!(required("simple (phrase)+ x*"), "simple ");
    }

    #[test]
    fn test_anchor_is_not_literal() {
        assert_eq!(required("^begin anchor"), "begin anchor");
    }

    #[test]
    fn test_no_indicator_literal() {
        let analysis = analyze("n?o? ?l?o?n?g? ?l?i?t?e?r?a?l?.*").unwrap();
        assert!(!analysis.has_indicator(3));
    }

    #[test]
    fn test_combinations_overflow() {
        let matrix = vec![
            vec![b"A".to_vec(), b"B".to_vec()],
            vec![b"1".to_vec(), b"2".to_vec()],
        ];
        assert!(combinations(&matrix, 3).is_none());
        assert_eq!(combinations(&matrix, 4).unwrap().len(), 4);
    }

    #[test]
    fn test_combinations_empty_row_yields_nothing() {
        let matrix = vec![vec![], vec![b"B".to_vec()]];
        assert!(combinations(&matrix, 100).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        assert!(analyze("broken re[").is_err());
    }
}
