use crate::core::normalizer::normalize_entry;
use crate::domain::model::RawReferenceEntry;
use crate::domain::ports::ReferencePattern;

/// 課程是否出現在設定清單中
///
/// 依序掃描，第一筆命中即回傳 `true`。清單可以是標準記錄、舊格式字串或尚未正規化的項目。
pub fn matches<P: ReferencePattern>(target_name: &str, target_id: &str, list: &[P]) -> bool {
    find_match(target_name, target_id, list).is_some()
}

/// 回傳第一筆命中的索引
pub fn find_match<P: ReferencePattern>(
    target_name: &str,
    target_id: &str,
    list: &[P],
) -> Option<usize> {
    let found = list
        .iter()
        .position(|entry| entry.matches_course(target_name, target_id));

    match found {
        Some(index) => tracing::trace!(target_name, target_id, index, "course matched"),
        None => tracing::trace!(target_name, target_id, len = list.len(), "no matching entry"),
    }
    found
}

impl ReferencePattern for RawReferenceEntry {
    fn matches_course(&self, name: &str, id: &str) -> bool {
        match self {
            RawReferenceEntry::Text(text) => text.matches_course(name, id),
            RawReferenceEntry::Canonical(reference) => reference.matches_course(name, id),
            other => normalize_entry(other).matches_course(name, id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CourseReference;
    use serde_json::json;

    #[test]
    fn test_id_priority() {
        let list = [CourseReference::new("Math", "101")];

        assert!(!matches("Math", "999", &list));
        assert!(matches("Other", "101", &list));
    }

    #[test]
    fn test_name_fallback() {
        let list = [CourseReference::new("Math", "")];

        assert!(matches("Math", "anything", &list));
        assert!(!matches("math", "101", &list));
    }

    #[test]
    fn test_legacy_bare_text() {
        assert!(matches("Physics", "", &["Physics", "Chemistry"]));
        assert!(!matches("Biology", "", &["Physics"]));

        let owned = vec!["Physics".to_string()];
        assert!(matches("Physics", "42", &owned));
    }

    #[test]
    fn test_empty_list_never_matches() {
        let list: [CourseReference; 0] = [];
        assert!(!matches("", "", &list));
        assert!(!matches("Math", "101", &list));
    }

    #[test]
    fn test_first_match_wins() {
        let list = [
            CourseReference::new("Math", "101"),
            CourseReference::by_name("Math"),
            CourseReference::new("", "202"),
        ];

        assert_eq!(find_match("Math", "101", &list), Some(0));
        assert_eq!(find_match("Math", "555", &list), Some(1));
        assert_eq!(find_match("Physics", "202", &list), Some(2));
        assert_eq!(find_match("Physics", "303", &list), None);
    }

    #[test]
    fn test_raw_entries_match_like_their_normalized_form() {
        let list: Vec<RawReferenceEntry> = serde_json::from_value(json!([
            "Physics",
            {"name": "Math", "id": 101},
            7
        ]))
        .unwrap();

        assert!(matches("Physics", "", &list));
        assert!(matches("Anything", "101", &list));
        assert!(!matches("Math", "100", &list));
        assert!(matches("7", "", &list));
    }
}
