//! 语料库模块：条目与语料库的内存表示
pub mod model;

pub use self::model::{Corpus, Entry, RawCorpus, KNOWN_FIELDS};
