use crate::domain::loose::LooseValue;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// 課程參照的標準形式：顯示名稱 + 課程 ID（空字串代表未提供 ID）
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CourseReference {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: String,
}

impl CourseReference {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }

    /// 舊格式：只有名稱
    pub fn by_name(name: impl Into<String>) -> Self {
        Self::new(name, "")
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

/// 尚未正規化的課程參照，可能是任何一種歷史格式
///
/// 反序列化先解成寬鬆的值樹再分類：字串 -> 任意 map（鍵一律轉成文字）-> 其他值。
/// `Canonical` 不會由解碼產生，只給已經持有標準記錄的呼叫端使用。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawReferenceEntry {
    Text(String),
    Record(Map<String, Value>),
    Canonical(CourseReference),
    Other(Value),
}

impl<'de> Deserialize<'de> for RawReferenceEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        LooseValue::deserialize(deserializer).map(|value| value.into_inner().into())
    }
}

impl RawReferenceEntry {
    /// 用於日誌的格式名稱
    pub fn shape(&self) -> &'static str {
        match self {
            RawReferenceEntry::Text(_) => "text",
            RawReferenceEntry::Record(_) => "record",
            RawReferenceEntry::Canonical(_) => "canonical",
            RawReferenceEntry::Other(_) => "other",
        }
    }
}

impl From<&str> for RawReferenceEntry {
    fn from(value: &str) -> Self {
        RawReferenceEntry::Text(value.to_string())
    }
}

impl From<String> for RawReferenceEntry {
    fn from(value: String) -> Self {
        RawReferenceEntry::Text(value)
    }
}

impl From<CourseReference> for RawReferenceEntry {
    fn from(value: CourseReference) -> Self {
        RawReferenceEntry::Canonical(value)
    }
}

impl From<Value> for RawReferenceEntry {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => RawReferenceEntry::Text(s),
            Value::Object(map) => RawReferenceEntry::Record(map),
            other => RawReferenceEntry::Other(other),
        }
    }
}
