//! Parameter extraction for control-plane calls.

use std::collections::HashMap;

use crate::error::{Result, WardenError};

/// Named parameters of one action or view call.
pub type Params = HashMap<String, String>;

/// Build a [`Params`] map from string pairs. Test and host convenience.
pub fn params<const N: usize>(pairs: [(&str, &str); N]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn required<'a>(params: &'a Params, name: &str) -> Result<&'a str> {
    match params.get(name).map(String::as_str) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(WardenError::MissingParameter(name.into())),
    }
}

pub fn optional<'a>(params: &'a Params, name: &str) -> Option<&'a str> {
    params.get(name).map(String::as_str).filter(|v| !v.is_empty())
}

/// Optional boolean with a default; a present but unparseable value is an
/// illegal parameter, not a silent fallback.
pub fn optional_bool(params: &Params, name: &str, default: bool) -> Result<bool> {
    match optional(params, name) {
        None => Ok(default),
        Some(v) => match v.to_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(WardenError::IllegalParameter(name.into())),
        },
    }
}

/// A required non-negative integer id.
pub fn required_id(params: &Params, name: &str) -> Result<u32> {
    let raw = required(params, name)?;
    raw.trim()
        .parse::<u32>()
        .map_err(|_| WardenError::IllegalParameter(name.into()))
}

/// An optional non-negative integer id.
pub fn optional_id(params: &Params, name: &str) -> Result<Option<u32>> {
    match optional(params, name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| WardenError::IllegalParameter(name.into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_absent_and_empty() {
        let p = params([("present", "x"), ("empty", "")]);
        assert!(required(&p, "present").is_ok());
        assert!(matches!(
            required(&p, "empty"),
            Err(WardenError::MissingParameter(_))
        ));
        assert!(matches!(
            required(&p, "absent"),
            Err(WardenError::MissingParameter(_))
        ));
    }

    #[test]
    fn optional_bool_defaults_and_parses() {
        let p = params([("flag", "TRUE"), ("bad", "maybe")]);
        assert!(optional_bool(&p, "flag", false).unwrap());
        assert!(optional_bool(&p, "missing", true).unwrap());
        assert!(matches!(
            optional_bool(&p, "bad", false),
            Err(WardenError::IllegalParameter(_))
        ));
    }

    #[test]
    fn required_id_rejects_negative_and_garbage() {
        let p = params([("id", "-3"), ("ok", " 7 ")]);
        assert_eq!(required_id(&p, "ok").unwrap(), 7);
        assert!(matches!(
            required_id(&p, "id"),
            Err(WardenError::IllegalParameter(_))
        ));
    }
}
