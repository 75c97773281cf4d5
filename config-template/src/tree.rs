//! Strict decoding into `serde_json::Value`.
//!
//! `Value` stores NaN and infinities as `null`, which would let `.inf` pass a
//! `null` template and fail a `float` one. YAML and TOML can both spell those
//! floats, so their decoders go through [`DataTree`], which refuses them.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number, Value};

/// A decoded data tree containing only values `Value` can represent faithfully.
#[derive(Debug)]
pub struct DataTree(pub Value);

impl<'de> Deserialize<'de> for DataTree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DataTreeVisitor).map(Self)
    }
}

struct DataTreeVisitor;

impl<'de> Visitor<'de> for DataTreeVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a null, bool, number, string, sequence or mapping")
    }

    fn visit_bool<E>(self, value: bool) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Bool(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Number(value.into()))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Number(value.into()))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Number::from_f64(value)
            .map(Value::Number)
            .ok_or_else(|| E::custom(format!("non-finite float `{value}` is not supported")))
    }

    fn visit_str<E>(self, value: &str) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::String(value.to_owned()))
    }

    fn visit_string<E>(self, value: String) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::String(value))
    }

    fn visit_none<E>(self) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_unit<E>(self) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        DataTree::deserialize(deserializer).map(|tree| tree.0)
    }

    fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        DataTree::deserialize(deserializer).map(|tree| tree.0)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(DataTree(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Map::new();
        while let Some((key, DataTree(value))) = map.next_entry::<String, DataTree>()? {
            entries.insert(key, value);
        }
        Ok(Value::Object(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::IntoDeserializer;
    use serde::de::value::Error as ValueError;
    use serde_json::json;

    fn decode_f64(value: f64) -> Result<Value, ValueError> {
        DataTree::deserialize(value.into_deserializer()).map(|tree| tree.0)
    }

    #[test]
    fn test_finite_float_kept() {
        assert_eq!(decode_f64(0.5).unwrap(), json!(0.5));
    }

    #[test]
    fn test_non_finite_floats_rejected() {
        for value in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let err = decode_f64(value).unwrap_err();
            assert!(err.to_string().contains("non-finite float"), "got: {err}");
        }
    }

    #[test]
    fn test_nested_tree_matches_value() {
        let tree: DataTree =
            serde_json::from_str(r#"{"a": [1, -2, 2.5, "x", null, true], "b": {}}"#).unwrap();
        assert_eq!(
            tree.0,
            json!({"a": [1, -2, 2.5, "x", null, true], "b": {}})
        );
    }
}
