//! CSV-backed answer corpus with value-based lookup.
//!
//! The corpus is a tabular file mapping integer question IDs to question,
//! answer, and category columns. It is loaded once at process start and
//! shared read-only for the rest of the process lifetime; no writer exists
//! after load, so concurrent readers need no locking.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised while loading the corpus.
///
/// Load failures degrade to an empty store at the call site (bootstrap logs
/// the cause); they never abort the process.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Corpus file could not be opened or read.
    #[error("corpus unavailable: {0}")]
    Io(#[from] std::io::Error),

    /// Corpus file could not be parsed as CSV at all (e.g., missing headers).
    #[error("corpus parse: {0}")]
    Csv(#[from] csv::Error),
}

/// One immutable corpus row.
#[derive(Debug, Clone)]
pub struct QuestionRecord {
    pub id: u64,
    pub question: String,
    pub answer: String,
    /// Raw category label as it appears in the corpus file.
    pub category: String,
}

/// Outcome of a per-item answer lookup.
///
/// Lookup misses are values, not errors: assembly substitutes a placeholder
/// per item and continues with the rest of the batch.
#[derive(Debug, PartialEq, Eq)]
pub enum AnswerLookup<'a> {
    /// The answer text for the requested id.
    Found(&'a str),
    /// The id parsed but no record carries it.
    NotFound(u64),
    /// The raw key was not a valid unsigned integer.
    InvalidKey(String),
}

/// In-memory id → record map over the corpus CSV.
#[derive(Debug, Default)]
pub struct AnswerStore {
    records: HashMap<u64, QuestionRecord>,
}

/// Serde view of one CSV row. Column headers follow the corpus file.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "ID")]
    id: u64,
    #[serde(rename = "질문")]
    question: String,
    #[serde(rename = "답변")]
    answer: String,
    #[serde(rename = "카테고리")]
    category: String,
}

impl AnswerStore {
    /// An empty store; used when the corpus failed to load.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads the corpus from a CSV file.
    ///
    /// Rows that fail to deserialize (malformed id, missing column) are
    /// skipped and counted, matching the ingestion style used elsewhere in
    /// the workspace. A duplicate id replaces the earlier row.
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] if the file cannot be opened and
    /// [`StoreError::Csv`] if it is not CSV at all.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let store = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            records = store.len(),
            "answer corpus loaded"
        );
        Ok(store)
    }

    /// Loads the corpus from any reader producing CSV bytes.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StoreError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut records = HashMap::new();
        let mut skipped = 0usize;

        for row in rdr.deserialize::<CsvRow>() {
            match row {
                Ok(r) => {
                    if let Some(prev) = records.insert(
                        r.id,
                        QuestionRecord {
                            id: r.id,
                            question: r.question,
                            answer: r.answer,
                            category: r.category,
                        },
                    ) {
                        warn!(id = prev.id, "duplicate corpus id, keeping last row");
                    }
                }
                Err(e) => {
                    skipped += 1;
                    warn!(error = %e, "skipping malformed corpus row");
                }
            }
        }

        if skipped > 0 {
            warn!(skipped, "corpus rows skipped during load");
        }

        Ok(Self { records })
    }

    /// Number of loaded records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records. Callers check this before lookup:
    /// an empty store means the corpus failed to load.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up an answer by its raw string key.
    ///
    /// Retrieval payloads carry ids as strings; a non-numeric key yields
    /// [`AnswerLookup::InvalidKey`], a numeric key with no record yields
    /// [`AnswerLookup::NotFound`]. Never panics.
    pub fn lookup(&self, raw_id: &str) -> AnswerLookup<'_> {
        match raw_id.trim().parse::<u64>() {
            Ok(id) => match self.records.get(&id) {
                Some(rec) => AnswerLookup::Found(&rec.answer),
                None => AnswerLookup::NotFound(id),
            },
            Err(_) => AnswerLookup::InvalidKey(raw_id.to_string()),
        }
    }

    /// Iterates all records in unspecified order (used by the index builder).
    pub fn records(&self) -> impl Iterator<Item = &QuestionRecord> {
        self.records.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
ID,질문,답변,카테고리
1,회원가입은 어떻게 하나요?,판매자 센터에서 가입 신청을 하시면 됩니다.,1. 계정/판매자 관리
2,상품 등록 방법을 알려주세요,상품 관리 메뉴에서 등록할 수 있습니다.,2. 상품/플랫폼 관리
3,정산은 언제 되나요?,구매 확정 후 영업일 기준 1일 이내 정산됩니다.,기타
";

    fn sample_store() -> AnswerStore {
        AnswerStore::from_reader(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn loads_rows_by_id() {
        let store = sample_store();
        assert_eq!(store.len(), 3);
        assert_eq!(
            store.lookup("1"),
            AnswerLookup::Found("판매자 센터에서 가입 신청을 하시면 됩니다.")
        );
    }

    #[test]
    fn absent_id_is_not_found_not_a_panic() {
        let store = sample_store();
        assert_eq!(store.lookup("9999999"), AnswerLookup::NotFound(9999999));
    }

    #[test]
    fn non_numeric_id_is_invalid_key() {
        let store = sample_store();
        assert_eq!(
            store.lookup("abc"),
            AnswerLookup::InvalidKey("abc".to_string())
        );
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let with_bad_row = "\
ID,질문,답변,카테고리
1,질문,답변,기타
not-a-number,질문,답변,기타
3,질문3,답변3,기타
";
        let store = AnswerStore::from_reader(with_bad_row.as_bytes()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.lookup("3"), AnswerLookup::Found("답변3"));
    }

    #[test]
    fn quoted_multiline_answers_survive() {
        let multiline = "\
ID,질문,답변,카테고리
7,질문,\"첫 줄\n둘째 줄\",기타
";
        let store = AnswerStore::from_reader(multiline.as_bytes()).unwrap();
        assert_eq!(store.lookup("7"), AnswerLookup::Found("첫 줄\n둘째 줄"));
    }

    #[test]
    fn load_from_disk_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faq.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(SAMPLE.as_bytes()).unwrap();

        let store = AnswerStore::load(&path).unwrap();
        assert_eq!(store.len(), 3);

        assert!(AnswerStore::load(dir.path().join("missing.csv")).is_err());
    }

    #[test]
    fn empty_store_reports_empty() {
        assert!(AnswerStore::empty().is_empty());
        assert_eq!(
            AnswerStore::empty().lookup("1"),
            AnswerLookup::NotFound(1)
        );
    }
}
