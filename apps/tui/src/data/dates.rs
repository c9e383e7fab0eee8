use super::DataError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Accepts epoch milliseconds, RFC 3339, `YYYY-MM-DD HH:MM:SS` or
/// `YYYY-MM-DD`. Naive values are taken as UTC.
pub fn parse_date(value: &Value) -> Result<DateTime<Utc>, DataError> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| {
                #[allow(clippy::cast_possible_truncation)]
                number.as_f64().map(|ms| ms as i64)
            })
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
            .ok_or_else(|| DataError::Date(number.to_string())),
        Value::String(text) => parse_date_str(text),
        other => Err(DataError::Date(other.to_string())),
    }
}

pub fn parse_date_str(text: &str) -> Result<DateTime<Utc>, DataError> {
    let text = text.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Ok(date.with_timezone(&Utc));
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(date) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(date.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
        .ok_or_else(|| DataError::Date(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn expected() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 6, 0, 0, 0)
            .single()
            .unwrap_or_default()
    }

    #[test]
    fn accepts_every_supported_shape() {
        for value in [
            json!(1_578_268_800_000_i64),
            json!("2020-01-06T00:00:00.000Z"),
            json!("2020-01-06 00:00:00"),
            json!("2020-01-06"),
        ] {
            let parsed = parse_date(&value);
            assert!(
                matches!(parsed, Ok(date) if date == expected()),
                "failed on {value}"
            );
        }
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(parse_date(&json!("yesterday")), Err(DataError::Date(_))));
        assert!(matches!(parse_date(&json!(null)), Err(DataError::Date(_))));
    }
}
