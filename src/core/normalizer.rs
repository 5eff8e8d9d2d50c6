use crate::domain::model::{CourseReference, RawReferenceEntry};
use serde_json::{Map, Value};

/// 將任意格式的課程參照清單轉成標準記錄
///
/// 一對一且保持順序：輸入 N 筆就輸出 N 筆，無法辨識的格式會降級成只有名稱的記錄，
/// 不會被丟棄。
pub fn normalize(raw: Vec<RawReferenceEntry>) -> Vec<CourseReference> {
    let total = raw.len();
    let result: Vec<CourseReference> = raw
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            tracing::debug!(index, shape = entry.shape(), "normalizing course reference");
            into_reference(entry)
        })
        .collect();

    tracing::debug!(
        total,
        with_id = result.iter().filter(|r| r.has_id()).count(),
        "course reference list normalized"
    );
    result
}

/// 單筆轉換，不消耗輸入
pub fn normalize_entry(entry: &RawReferenceEntry) -> CourseReference {
    match entry {
        RawReferenceEntry::Text(name) => CourseReference::by_name(name.as_str()),
        RawReferenceEntry::Record(map) => from_record(map),
        RawReferenceEntry::Canonical(reference) => reference.clone(),
        RawReferenceEntry::Other(value) => CourseReference::by_name(stringify(value)),
    }
}

fn into_reference(entry: RawReferenceEntry) -> CourseReference {
    match entry {
        RawReferenceEntry::Text(name) => CourseReference::by_name(name),
        RawReferenceEntry::Canonical(reference) => reference,
        other => normalize_entry(&other),
    }
}

fn from_record(map: &Map<String, Value>) -> CourseReference {
    let field = |key: &str| map.get(key).map(stringify).unwrap_or_default();
    CourseReference::new(field("name"), field("id"))
}

/// 把任意值轉成文字
///
/// 字串原樣保留；數字與布林值用其文字形式；`null` 視為空字串；
/// 陣列與物件輸出精簡 JSON。
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
