//! Wire shapes of the JSON documents, before reshaping.

use serde::Deserialize;
use serde_json::{Map, Value};

/// `data.json`, a pandas frame in "split" orientation.
#[derive(Debug, Deserialize)]
pub struct RawTweets {
    pub columns: Vec<RawLocation>,
    pub index: Vec<Value>,
    pub data: Vec<Vec<Value>>,
}

/// `[lon, lat, place, country]`
#[derive(Debug, Deserialize)]
pub struct RawLocation(pub f64, pub f64, pub Value, pub Value);

/// `hashtags.json`, indexed `[frame][location]`.
#[derive(Debug, Default, Deserialize)]
pub struct RawHashtags {
    #[serde(default)]
    pub data: Vec<Vec<Value>>,
}

/// One entry of `timeline2.json`.
#[derive(Debug, Deserialize)]
pub struct RawTimelinePoint {
    pub created_at: Value,
    #[serde(default)]
    pub value: Vec<Option<f64>>,
}

pub fn text_of(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// `[favor, against]`, with nulls and missing entries read as zero.
pub fn counts_of(value: &Value) -> (f64, f64) {
    match value {
        Value::Array(items) => {
            let at = |i: usize| items.get(i).and_then(Value::as_f64).unwrap_or(0.0);
            (at(0), at(1))
        }
        Value::Number(number) => (number.as_f64().unwrap_or(0.0), 0.0),
        _ => (0.0, 0.0),
    }
}

/// Hashtag → frequency pairs in document order.
pub fn hashtags_of(value: Option<&Value>) -> Vec<(String, u64)> {
    value
        .and_then(Value::as_object)
        .map(Map::iter)
        .into_iter()
        .flatten()
        .map(|(tag, frequency)| {
            let frequency = frequency.as_u64().unwrap_or_else(|| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let rounded = frequency.as_f64().unwrap_or(0.0).max(0.0).round() as u64;
                rounded
            });
            (tag.clone(), frequency)
        })
        .collect()
}
