//! Flattening of the nested books/chapters/verses source document.
//!
//! The raw document has the shape
//! `{"books": [{"name", "chapters": [{"chapter", "verses": [{"verse", "text"}]}]}]}`.
//! A verse is emitted only when its book name, chapter number, verse number,
//! and text are all present and non-empty (text after trimming); anything
//! else is dropped silently.

use std::path::Path;

use serde_json::Value;

use super::{CorpusError, VerseRecord};

/// Read the raw nested document from disk.
pub fn load_raw(path: impl AsRef<Path>) -> Result<Value, CorpusError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CorpusError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Flatten the nested document into `(reference, text)` records.
pub fn flatten(raw: &Value) -> Vec<VerseRecord> {
    let mut records = Vec::new();

    for book in array_field(raw, "books") {
        let book_name = book.get("name");

        for chapter in array_field(book, "chapters") {
            let chapter_num = chapter.get("chapter");

            for verse in array_field(chapter, "verses") {
                let verse_num = verse.get("verse");
                let text = verse.get("text");

                let (Some(book_name), Some(chapter_num), Some(verse_num), Some(text)) = (
                    present(book_name),
                    present(chapter_num),
                    present(verse_num),
                    present(text),
                ) else {
                    continue;
                };
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }

                records.push(VerseRecord {
                    reference: format!("{} {}:{}", book_name, chapter_num, verse_num),
                    text: text.to_string(),
                });
            }
        }
    }

    records
}

/// Write flattened records as pretty-printed UTF-8 JSON.
pub fn save_processed(records: &[VerseRecord], path: impl AsRef<Path>) -> Result<(), CorpusError> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    Ok(())
}

fn array_field<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Render a field for the reference label, treating empty strings, zero,
/// `false`, `null` and empty containers as missing.
fn present(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "books": [
                {
                    "name": "Psalms",
                    "chapters": [
                        {
                            "chapter": 23,
                            "verses": [
                                {"verse": 1, "text": " The Lord is my shepherd; I shall not want. "},
                                {"verse": 2},
                                {"verse": 3, "text": "He restoreth my soul."}
                            ]
                        }
                    ]
                },
                {
                    "name": "Isaiah",
                    "chapters": [
                        {
                            "chapter": "41",
                            "verses": [
                                {"verse": "10", "text": "Fear not, for I am with you"}
                            ]
                        }
                    ]
                }
            ]
        })
    }

    #[test]
    fn test_flatten_drops_verse_missing_text() {
        let records = flatten(&sample());
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].reference, "Psalms 23:1");
        assert_eq!(records[0].text, "The Lord is my shepherd; I shall not want.");
        assert_eq!(records[1].reference, "Psalms 23:3");
        assert_eq!(records[1].text, "He restoreth my soul.");
        assert_eq!(records[2].reference, "Isaiah 41:10");
        assert!(records.iter().all(|r| r.reference != "Psalms 23:2"));
    }

    #[test]
    fn test_flatten_requires_every_level() {
        let raw = json!({
            "books": [
                {"chapters": [{"chapter": 1, "verses": [{"verse": 1, "text": "no book"}]}]},
                {"name": "Ruth", "chapters": [{"verses": [{"verse": 1, "text": "no chapter"}]}]},
                {"name": "Ruth", "chapters": [{"chapter": 1, "verses": [{"text": "no verse"}]}]},
                {"name": "Ruth", "chapters": [{"chapter": 0, "verses": [{"verse": 1, "text": "zero"}]}]},
                {"name": "", "chapters": [{"chapter": 1, "verses": [{"verse": 1, "text": "blank"}]}]}
            ]
        });
        assert!(flatten(&raw).is_empty());
    }

    #[test]
    fn test_flatten_drops_whitespace_only_text() {
        let raw = json!({
            "books": [{
                "name": "Ruth",
                "chapters": [{
                    "chapter": 1,
                    "verses": [
                        {"verse": 1, "text": "   "},
                        {"verse": 2, "text": "\n\t"},
                        {"verse": 16, "text": " Whither thou goest, I will go "}
                    ]
                }]
            }]
        });
        let records = flatten(&raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].reference, "Ruth 1:16");
        assert_eq!(records[0].text, "Whither thou goest, I will go");
    }

    #[test]
    fn test_flatten_tolerates_missing_books() {
        assert!(flatten(&json!({})).is_empty());
        assert!(flatten(&json!({"books": "not a list"})).is_empty());
    }

    #[test]
    fn test_save_then_load_as_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let raw_path = dir.path().join("bible_data.json");
        let out_path = dir.path().join("processed_bible_data.json");
        std::fs::write(&raw_path, sample().to_string()).unwrap();

        let raw = load_raw(&raw_path).unwrap();
        let records = flatten(&raw);
        save_processed(&records, &out_path).unwrap();

        let corpus = crate::corpus::Corpus::load(&out_path).unwrap();
        assert_eq!(corpus.verses(), records.as_slice());
    }

    #[test]
    fn test_load_raw_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_raw(dir.path().join("bible_data.json")),
            Err(CorpusError::NotFound { .. })
        ));
    }
}
