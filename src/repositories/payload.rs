//! Meal payload encoding at the storage boundary
//!
//! SQLite hands payload columns back as JSON text while PostgreSQL returns
//! already-decoded `jsonb` values. Both funnel through [`decode_payload`].

use serde_json::Value;

use crate::errors::RepositoryResult;
use crate::models::MealPart;

/// A payload column as read from storage
#[derive(Debug, Clone, PartialEq)]
pub enum StoredPayload {
    /// Opaque serialized JSON that still needs decoding
    Text(String),
    /// A structured JSON value produced by the driver
    Structured(Value),
}

/// Decode a stored payload into a [`MealPart`]
///
/// Text is parsed; structured values are mapped directly. A structured value
/// that is a bare JSON string holds serialized text and is parsed as such.
pub fn decode_payload(payload: StoredPayload) -> RepositoryResult<MealPart> {
    let part = match payload {
        StoredPayload::Text(text) | StoredPayload::Structured(Value::String(text)) => {
            serde_json::from_str(&text)?
        }
        StoredPayload::Structured(value) => serde_json::from_value(value)?,
    };
    Ok(part)
}

/// Serialize a [`MealPart`] into the text stored by opaque-text backends
pub fn encode_payload(part: &MealPart) -> RepositoryResult<String> {
    Ok(serde_json::to_string(part)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RepositoryError;
    use serde_json::json;

    #[test]
    fn test_text_and_structured_decode_identically() {
        let text = StoredPayload::Text(r#"{"dish":"Lentils","frozen":false}"#.to_string());
        let structured = StoredPayload::Structured(json!({ "dish": "Lentils", "frozen": false }));

        let expected = MealPart::new("Lentils", false);
        assert_eq!(decode_payload(text).unwrap(), expected);
        assert_eq!(decode_payload(structured).unwrap(), expected);
    }

    #[test]
    fn test_null_dish_survives_decoding() {
        let text = StoredPayload::Text(r#"{"dish":null,"frozen":true}"#.to_string());
        let part = decode_payload(text).unwrap();
        assert_eq!(part.dish, None);
        assert!(part.frozen);
    }

    #[test]
    fn test_structured_string_is_treated_as_text() {
        let nested = StoredPayload::Structured(Value::String(
            r#"{"dish":"Soup","frozen":true}"#.to_string(),
        ));
        assert_eq!(decode_payload(nested).unwrap(), MealPart::new("Soup", true));
    }

    #[test]
    fn test_encoded_payload_decodes_back() {
        let part = MealPart::default();
        let text = encode_payload(&part).unwrap();
        assert_eq!(text, r#"{"dish":null,"frozen":false}"#);
        assert_eq!(decode_payload(StoredPayload::Text(text)).unwrap(), part);
    }

    #[test]
    fn test_garbage_is_an_error_not_a_default() {
        let garbage = StoredPayload::Text("not json".to_string());
        assert!(matches!(
            decode_payload(garbage),
            Err(RepositoryError::SerializationFailed(_))
        ));

        let wrong_shape = StoredPayload::Structured(json!({ "frozen": "sometimes" }));
        assert!(decode_payload(wrong_shape).is_err());
    }
}
