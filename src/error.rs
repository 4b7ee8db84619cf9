// Error type shared by configuration parsing, the lifecycle controller,
// and the browser binding

use std::fmt;
use wasm_bindgen::JsValue;

#[derive(Debug)]
pub enum FieldError {
    /// Config JSON could not be parsed.
    Config(serde_json::Error),
    /// A config value is out of its allowed range.
    InvalidConfig(String),
    /// A palette entry is not a `#rgb` / `#rrggbb` color.
    InvalidColor(String),
    /// A lifecycle operation was requested from a state that does not allow it.
    InvalidTransition {
        operation: &'static str,
        state: &'static str,
    },
    /// The host could not schedule a frame or attach a listener.
    Host(String),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Config(e) => write!(f, "Failed to parse field config: {}", e),
            FieldError::InvalidConfig(msg) => write!(f, "Invalid field config: {}", msg),
            FieldError::InvalidColor(color) => write!(f, "Invalid palette color '{}'", color),
            FieldError::InvalidTransition { operation, state } => {
                write!(f, "Cannot {} a particle field in state {}", operation, state)
            }
            FieldError::Host(msg) => write!(f, "Host error: {}", msg),
        }
    }
}

impl std::error::Error for FieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FieldError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FieldError {
    fn from(e: serde_json::Error) -> Self {
        FieldError::Config(e)
    }
}

impl From<FieldError> for JsValue {
    fn from(e: FieldError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_error_names_operation_and_state() {
        let err = FieldError::InvalidTransition {
            operation: "start",
            state: "Idle",
        };
        assert_eq!(
            err.to_string(),
            "Cannot start a particle field in state Idle"
        );
    }

    #[test]
    fn json_errors_keep_their_source() {
        let err: FieldError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(std::error::Error::source(&err).is_some());
    }
}
