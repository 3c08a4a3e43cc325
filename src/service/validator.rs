use crate::domain::request::ValidationResult;
use serde_json::Value;

/// Success iff the response has a top-level `status` that is exactly `true`.
/// A missing flag is a failed payment, not an error.
pub struct GeneralValidator;

impl GeneralValidator {
    pub fn validate(response: &Value) -> ValidationResult {
        let success = matches!(response.get("status"), Some(Value::Bool(true)));

        let mut raw_messages = Vec::new();
        if let Some(msg) = response.get("message").and_then(Value::as_str) {
            raw_messages.push(msg.to_string());
        }
        if let Some(items) = response.get("messages").and_then(Value::as_array) {
            raw_messages.extend(items.iter().filter_map(Value::as_str).map(str::to_string));
        }
        if !success && raw_messages.is_empty() {
            raw_messages.push(match response.get("status") {
                None => "response did not contain a status flag".to_string(),
                Some(other) => format!("payment not approved (status={other})"),
            });
        }

        ValidationResult {
            success,
            raw_messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn true_flag_is_success() {
        let out = GeneralValidator::validate(&json!({"status": true}));
        assert!(out.success);
        assert!(out.raw_messages.is_empty());
    }

    #[test]
    fn truthy_non_bool_is_not_success() {
        assert!(!GeneralValidator::validate(&json!({"status": "true"})).success);
        assert!(!GeneralValidator::validate(&json!({"status": 1})).success);
    }

    #[test]
    fn missing_flag_is_failure_with_message() {
        let out = GeneralValidator::validate(&json!({"reference": "1"}));
        assert!(!out.success);
        assert_eq!(out.raw_messages, vec!["response did not contain a status flag"]);
    }

    #[test]
    fn collects_api_messages() {
        let out = GeneralValidator::validate(
            &json!({"status": false, "message": "denied", "messages": ["limit", 3]}),
        );
        assert_eq!(out.raw_messages, vec!["denied", "limit"]);
    }
}
