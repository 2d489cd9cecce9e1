//! Browser bindings for the weekend engine.
//!
//! Every export returns a JSON string. Failures become JS exceptions the
//! caller can catch; they never abort the module.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use weekend_engine::{
    resolve_weekend_with_options, upcoming_weekends, WeekendAnchor, WeekendOptions,
};

/// Resolve a timestamp to `{"weekendStart", "weekendEnd"}` using a Friday anchor.
#[wasm_bindgen(js_name = resolveWeekend)]
pub fn resolve_weekend(timestamp: &str) -> Result<String, JsError> {
    resolve_json(timestamp, None, None).map_err(|e| JsError::new(&e))
}

/// Like `resolveWeekend`, with an explicit anchor day and/or IANA timezone.
#[wasm_bindgen(js_name = resolveWeekendWith)]
pub fn resolve_weekend_with(
    timestamp: &str,
    anchor: Option<String>,
    timezone: Option<String>,
) -> Result<String, JsError> {
    resolve_json(timestamp, anchor.as_deref(), timezone.as_deref()).map_err(|e| JsError::new(&e))
}

/// The next `count` weekends starting at `from`, as a JSON array.
#[wasm_bindgen(js_name = upcomingWeekends)]
pub fn upcoming(from: &str, count: usize) -> Result<String, JsError> {
    upcoming_json(from, count).map_err(|e| JsError::new(&e))
}

fn options(anchor: Option<&str>, timezone: Option<&str>) -> Result<WeekendOptions, String> {
    let mut options = WeekendOptions::default();
    if let Some(anchor) = anchor {
        options = options.with_anchor(anchor.parse::<WeekendAnchor>().map_err(|e| e.to_string())?);
    }
    if let Some(tz) = timezone {
        options = options.with_timezone(tz).map_err(|e| e.to_string())?;
    }
    Ok(options)
}

fn resolve_json(
    timestamp: &str,
    anchor: Option<&str>,
    timezone: Option<&str>,
) -> Result<String, String> {
    let window = resolve_weekend_with_options(timestamp, &options(anchor, timezone)?)
        .map_err(|e| e.to_string())?;
    to_json(&window)
}

fn upcoming_json(from: &str, count: usize) -> Result<String, String> {
    let windows =
        upcoming_weekends(from, count, &WeekendOptions::default()).map_err(|e| e.to_string())?;
    to_json(&windows)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_json() {
        assert_eq!(
            resolve_json("2025-06-14T19:00:00Z", None, None).unwrap(),
            r#"{"weekendStart":"2025-06-13","weekendEnd":"2025-06-15"}"#
        );
    }

    #[test]
    fn test_resolve_json_with_anchor_and_timezone() {
        let json = resolve_json("2025-06-14T02:00:00Z", Some("saturday"), Some("America/Denver"))
            .unwrap();
        // Friday evening in Denver → Saturday-anchored weekend of Jun 7
        assert_eq!(
            json,
            r#"{"weekendStart":"2025-06-07","weekendEnd":"2025-06-09"}"#
        );
    }

    #[test]
    fn test_resolve_json_invalid() {
        let err = resolve_json("invalid", None, None).unwrap_err();
        assert!(err.contains("Invalid timestamp"), "got: {err}");
    }

    #[test]
    fn test_resolve_json_invalid_anchor() {
        let err = resolve_json("2025-06-14", Some("sunday"), None).unwrap_err();
        assert!(err.contains("Invalid weekend anchor"), "got: {err}");
    }

    #[test]
    fn test_upcoming_json() {
        let json = upcoming_json("2025-06-11", 1).unwrap();
        assert_eq!(
            json,
            r#"[{"weekendStart":"2025-06-13","weekendEnd":"2025-06-15"}]"#
        );
    }
}
