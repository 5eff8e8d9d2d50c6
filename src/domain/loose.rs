use serde::de::{
    self, Deserialize, Deserializer, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor,
};
use serde_json::{Map, Number, Value};
use std::fmt;

/// toml 以這個單一鍵的 map 表示日期時間
const TOML_DATETIME_KEY: &str = "$__toml_private_datetime";

/// 寬鬆的值樹：任何自描述格式都能解成 `serde_json::Value`
///
/// map 的鍵不限字串（YAML 允許數字、布林值當鍵），一律轉成文字；
/// toml 日期時間還原成字串；YAML 的 `!tag value` 轉成 `{tag: value}`。
#[derive(Debug, Clone, PartialEq)]
pub struct LooseValue(pub Value);

impl LooseValue {
    pub fn into_inner(self) -> Value {
        self.0
    }
}

/// 把 map 的鍵轉成文字
struct LooseKey(String);

impl<'de> Deserialize<'de> for LooseKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let LooseValue(value) = LooseValue::deserialize(deserializer)?;
        Ok(LooseKey(match value {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        }))
    }
}

impl<'de> Deserialize<'de> for LooseValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LooseVisitor)
    }
}

struct LooseVisitor;

impl<'de> Visitor<'de> for LooseVisitor {
    type Value = LooseValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(LooseValue(Value::Bool(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(LooseValue(Value::Number(v.into())))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(LooseValue(Value::Number(v.into())))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        // NaN / inf 不是合法 JSON 數字，保留文字形式
        Ok(LooseValue(
            Number::from_f64(v)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(v.to_string())),
        ))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(LooseValue(Value::String(v.to_string())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(LooseValue(Value::String(v)))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
        Ok(LooseValue(Value::String(String::from_utf8_lossy(v).into_owned())))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(LooseValue(Value::Null))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(LooseValue(Value::Null))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        LooseValue::deserialize(deserializer)
    }

    fn visit_newtype_struct<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> Result<Self::Value, D::Error> {
        LooseValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(LooseValue(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(LooseValue(Value::Array(items)))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = Map::new();
        while let Some(LooseKey(key)) = access.next_key()? {
            let LooseValue(value) = access.next_value()?;
            map.insert(key, value);
        }

        if map.len() == 1 {
            if let Some(Value::String(datetime)) = map.get(TOML_DATETIME_KEY) {
                return Ok(LooseValue(Value::String(datetime.clone())));
            }
        }
        Ok(LooseValue(Value::Object(map)))
    }

    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<Self::Value, A::Error> {
        let (LooseKey(tag), variant) = data.variant()?;
        let LooseValue(value) = variant.newtype_variant()?;
        let mut map = Map::new();
        map.insert(tag, value);
        Ok(LooseValue(Value::Object(map)))
    }
}

/// 對值樹中每個字串套用轉換（鍵不變）
pub fn map_strings(value: &mut Value, f: &mut impl FnMut(&str) -> Option<String>) {
    match value {
        Value::String(s) => {
            if let Some(replaced) = f(s) {
                *s = replaced;
            }
        }
        Value::Array(items) => {
            for item in items {
                map_strings(item, f);
            }
        }
        Value::Object(map) => {
            for item in map.values_mut() {
                map_strings(item, f);
            }
        }
        _ => {}
    }
}
