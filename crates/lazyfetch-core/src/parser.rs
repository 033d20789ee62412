// ── Response parsing ──
//
// Runtime shape validation at the client/server boundary. Every raw
// JSON body goes through a `ResponseParser` before it can touch fetch
// state; a shape mismatch is a fetch failure, never a partial merge.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ParseError;

/// Converts an untyped server JSON body into the typed value a fetcher
/// holds. Must fail on any payload that does not match the expected
/// shape.
pub trait ResponseParser<T>: Send + Sync {
    fn parse(&self, raw: &Value) -> Result<T, ParseError>;
}

/// Closures work directly as parsers.
impl<T, F> ResponseParser<T> for F
where
    F: Fn(&Value) -> Result<T, ParseError> + Send + Sync,
{
    fn parse(&self, raw: &Value) -> Result<T, ParseError> {
        self(raw)
    }
}

/// Deserializes the whole body into `T`.
pub struct JsonParser<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonParser<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonParser<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> ResponseParser<T> for JsonParser<T> {
    fn parse(&self, raw: &Value) -> Result<T, ParseError> {
        serde_json::from_value(raw.clone()).map_err(ParseError::from)
    }
}

/// Extracts a named payload key from an envelope body
/// (`{"items": [...], "pagination": {...}}`) and deserializes it.
pub struct KeyedParser<T> {
    key: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> KeyedParser<T> {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            _marker: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> ResponseParser<T> for KeyedParser<T> {
    fn parse(&self, raw: &Value) -> Result<T, ParseError> {
        let payload = raw
            .get(&self.key)
            .ok_or_else(|| ParseError::new(format!("missing payload key '{}'", self.key)))?;
        serde_json::from_value(payload.clone()).map_err(ParseError::from)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq, serde::Serialize)]
    struct Item {
        id: u64,
        name: String,
    }

    #[test]
    fn json_parser_round_trips_list() {
        let items = vec![
            Item { id: 1, name: "a".into() },
            Item { id: 2, name: "b".into() },
        ];
        let raw = serde_json::to_value(&items).unwrap();

        let parser = JsonParser::<Vec<Item>>::new();
        assert_eq!(parser.parse(&raw).unwrap(), items);
    }

    #[test]
    fn json_parser_round_trips_empty_list() {
        let parser = JsonParser::<Vec<Item>>::new();
        assert_eq!(parser.parse(&json!([])).unwrap(), Vec::<Item>::new());
    }

    #[test]
    fn json_parser_round_trips_singleton() {
        let item = Item { id: 7, name: "solo".into() };
        let raw = serde_json::to_value(&item).unwrap();

        let parser = JsonParser::<Item>::new();
        assert_eq!(parser.parse(&raw).unwrap(), item);
    }

    #[test]
    fn json_parser_rejects_wrong_shape() {
        let parser = JsonParser::<Vec<Item>>::new();
        assert!(parser.parse(&json!({"not": "a list"})).is_err());
    }

    #[test]
    fn keyed_parser_extracts_payload() {
        let raw = json!({
            "items": [{"id": 1, "name": "a"}],
            "pagination": {"next": null}
        });

        let parser = KeyedParser::<Vec<Item>>::new("items");
        let items = parser.parse(&raw).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 1);
    }

    #[test]
    fn keyed_parser_rejects_missing_key() {
        let parser = KeyedParser::<Vec<Item>>::new("items");
        let err = parser.parse(&json!({"records": []})).unwrap_err();
        assert!(err.to_string().contains("items"));
    }

    #[test]
    fn closures_are_parsers() {
        let parser = |raw: &Value| -> Result<u64, ParseError> {
            raw.get("total")
                .and_then(Value::as_u64)
                .ok_or_else(|| ParseError::new("missing total"))
        };
        assert_eq!(parser.parse(&json!({"total": 42})).unwrap(), 42);
        assert!(parser.parse(&json!({})).is_err());
    }
}
