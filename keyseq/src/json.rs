//! Dynamic construction from [`serde_json::Value`].

use serde_json::Value;

use crate::{Error, Key, PairMap, Result, Sequence};

/// Parses an object member name, treating canonical decimals (`"0"`, `"17"`, but not `"01"` or `"+1"`) as indices.
fn object_key(name: String) -> Key {
    let canonical = name == "0" || (!name.starts_with('0') && name.bytes().all(|b| b.is_ascii_digit()));
    match name.parse::<usize>() {
        Ok(index) if canonical => Key::Index(index),
        _ => Key::Name(name),
    }
}

impl Sequence<Value> {
    /// Builds a materialized sequence from a JSON array or object.
    ///
    /// Arrays are keyed positionally. Objects keep their member names as keys, except canonical decimal names,
    /// which become [`Key::Index`]. Any other JSON value fails with [`Error::InvalidInput`].
    #[cfg_attr(docsrs, doc(cfg(feature = "json")))]
    pub fn from_json(value: Value) -> Result<Self> {
        let pairs = match value {
            Value::Array(values) => PairMap::from(values),
            Value::Object(members) => members
                .into_iter()
                .map(|(name, value)| (object_key(name), value))
                .collect(),
            other => {
                let kind = match other {
                    Value::Null => "null",
                    Value::Bool(_) => "a boolean",
                    Value::Number(_) => "a number",
                    _ => "a string",
                };
                tracing::debug!(kind, "Rejected JSON input.");
                return Err(Error::invalid_input(format!(
                    "expected a JSON array or object, found {}",
                    kind
                )));
            }
        };
        Ok(Self::materialized(pairs))
    }
}

impl TryFrom<Value> for Sequence<Value> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_json(value)
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::pairs;

    #[test]
    fn test_from_json_array() {
        let seq = Sequence::from_json(json!([1, null, "x"])).unwrap();
        assert!(seq.is_materialized());
        assert_eq!(
            pairs![0 => json!(1), 1 => json!("x")],
            seq.compact().values().to_array().unwrap()
        );
    }

    #[test]
    fn test_from_json_object() {
        let seq = Sequence::from_json(json!({"a": 1, "3": 2, "03": 3})).unwrap();
        let keys = seq.keys().to_array().unwrap().into_values();
        assert!(keys.contains(&Key::from("a")));
        assert!(keys.contains(&Key::Index(3)));
        assert!(keys.contains(&Key::from("03")));
    }

    #[test]
    fn test_from_json_scalar_is_invalid() {
        for value in [json!(null), json!(true), json!(1.5), json!("s")] {
            assert!(matches!(
                Sequence::from_json(value),
                Err(Error::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn test_serialize_pairs() {
        let seq = Sequence::from(pairs!["a" => 1, 0 => 2]);
        assert_eq!(
            json!({"a": 1, "0": 2}),
            serde_json::to_value(seq.to_array().unwrap()).unwrap()
        );
    }
}
