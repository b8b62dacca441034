use serde_json::Value;

use super::ApiError;

/// Envelope code for success
const CODE_OK: i64 = 200;

/// Envelope code for an invalid or expired credential
const CODE_EXPIRED: i64 = 401;

/// What the transport observed for one call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exchange {
    /// No response was received
    Transport(String),
    /// A response arrived, with any status
    Completed {
        status: u16,
        reason: String,
        body: String,
    },
}

/// The `{code, data, message}` wrapper every API response uses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Envelope {
    pub code: Option<Value>,
    pub data: Value,
    pub message: Option<String>,
}

impl Envelope {
    /// Read a body as an envelope. Bodies without `code` or `data` are
    /// treated as bare payloads. A `message` that is not a string is
    /// ignored.
    fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut map) if map.contains_key("code") || map.contains_key("data") => {
                Envelope {
                    code: map.remove("code"),
                    data: map.remove("data").unwrap_or(Value::Null),
                    message: map
                        .remove("message")
                        .and_then(|m| m.as_str().map(str::to_string)),
                }
            }
            value => Envelope {
                code: None,
                data: value,
                message: None,
            },
        }
    }

    /// The numeric code, with `null`, non-numbers and `0` reading as absent.
    /// Integral floats such as `401.0` count as their integer value.
    pub fn code(&self) -> Option<i64> {
        self.code
            .as_ref()
            .and_then(|c| {
                c.as_i64().or_else(|| {
                    c.as_f64()
                        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                        .map(|f| f as i64)
                })
            })
            .filter(|c| *c != 0)
    }
}

/// Classify a finished exchange, unwrapping `data` on success.
pub fn interpret(exchange: Exchange) -> Result<Value, ApiError> {
    let (status, reason, body) = match exchange {
        Exchange::Transport(message) => return Err(ApiError::Transport(message)),
        Exchange::Completed {
            status,
            reason,
            body,
        } => (status, reason, body),
    };

    if status == 401 {
        return Err(ApiError::Expired);
    }

    if !(200..300).contains(&status) {
        let envelope_code = serde_json::from_str::<Value>(&body)
            .ok()
            .map(Envelope::from_value)
            .and_then(|e| e.code());
        if envelope_code == Some(CODE_EXPIRED) {
            return Err(ApiError::Expired);
        }
        return Err(ApiError::Protocol { status, reason });
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    let value: Value = serde_json::from_str(&body).map_err(|e| {
        ApiError::InvalidResponse(format!("{}: {}", e, ApiError::truncate_body(&body)))
    })?;

    let envelope = Envelope::from_value(value);
    match envelope.code() {
        None | Some(CODE_OK) => Ok(envelope.data),
        Some(CODE_EXPIRED) => Err(ApiError::Expired),
        Some(code) => Err(ApiError::Business {
            code,
            message: envelope.message.unwrap_or_default(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn completed(status: u16, body: &str) -> Exchange {
        Exchange::Completed {
            status,
            reason: "Reason".to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_success_unwraps_data() {
        let body = r#"{"code":200,"data":{"total":1},"message":"ok"}"#;
        assert_eq!(interpret(completed(200, body)), Ok(json!({"total": 1})));
    }

    #[test]
    fn test_missing_code_is_success() {
        let body = r#"{"data":[1,2]}"#;
        assert_eq!(interpret(completed(200, body)), Ok(json!([1, 2])));
    }

    #[test]
    fn test_zero_and_null_code_are_success() {
        assert_eq!(interpret(completed(200, r#"{"code":0,"data":1}"#)), Ok(json!(1)));
        assert_eq!(interpret(completed(200, r#"{"code":null,"data":1}"#)), Ok(json!(1)));
    }

    #[test]
    fn test_bare_payload_is_returned_whole() {
        let body = r#"{"domains":[]}"#;
        assert_eq!(interpret(completed(200, body)), Ok(json!({"domains": []})));
    }

    #[test]
    fn test_empty_body_is_null() {
        assert_eq!(interpret(completed(204, "")), Ok(Value::Null));
    }

    #[test]
    fn test_transport_failure() {
        let result = interpret(Exchange::Transport("timed out".to_string()));
        assert_eq!(result, Err(ApiError::Transport("timed out".to_string())));
    }

    #[test]
    fn test_http_401_is_expired() {
        assert_eq!(interpret(completed(401, "")), Err(ApiError::Expired));
    }

    #[test]
    fn test_envelope_401_is_expired() {
        let body = r#"{"code":401,"data":null,"message":"token expired"}"#;
        assert_eq!(interpret(completed(200, body)), Err(ApiError::Expired));
        assert_eq!(interpret(completed(403, body)), Err(ApiError::Expired));
    }

    #[test]
    fn test_non_2xx_is_protocol_error() {
        let result = interpret(completed(500, "<html>oops</html>"));
        assert_eq!(
            result,
            Err(ApiError::Protocol {
                status: 500,
                reason: "Reason".to_string()
            })
        );
    }

    #[test]
    fn test_business_error_keeps_message() {
        let body = r#"{"code":409,"data":null,"message":"domain exists"}"#;
        assert_eq!(
            interpret(completed(200, body)),
            Err(ApiError::Business {
                code: 409,
                message: "domain exists".to_string()
            })
        );
    }

    #[test]
    fn test_non_json_success_is_invalid() {
        let result = interpret(completed(200, "not json"));
        assert!(matches!(result, Err(ApiError::InvalidResponse(_))));
    }

    #[test]
    fn test_envelope_401_with_numeric_message_is_expired() {
        let body = r#"{"code":401,"data":null,"message":123}"#;
        assert_eq!(interpret(completed(200, body)), Err(ApiError::Expired));
    }

    #[test]
    fn test_business_error_with_object_message() {
        let body = r#"{"code":500,"data":null,"message":{"detail":"boom"}}"#;
        assert_eq!(
            interpret(completed(200, body)),
            Err(ApiError::Business {
                code: 500,
                message: String::new()
            })
        );
    }

    #[test]
    fn test_float_code_is_read_as_integer() {
        let body = r#"{"code":401.0,"data":null,"message":"token expired"}"#;
        assert_eq!(interpret(completed(200, body)), Err(ApiError::Expired));
        assert_eq!(interpret(completed(200, r#"{"code":200.0,"data":7}"#)), Ok(json!(7)));
    }
}
