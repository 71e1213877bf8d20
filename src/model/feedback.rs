//! Tagged feedback outcome.

use serde::{Deserialize, Serialize};

/// Outcome of a critique request, normalized at the collaborator boundary.
///
/// Everything downstream of the fetch collaborator sees exactly this type:
/// the parser only ever receives the success message string, and the
/// renderers surface a failure's message verbatim in the placeholder slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum Feedback {
    /// The collaborator returned critique text.
    Success(String),
    /// The collaborator failed; carries the user-facing message.
    Failure(String),
}

impl Feedback {
    /// Create a success outcome.
    pub fn success(message: impl Into<String>) -> Self {
        Feedback::Success(message.into())
    }

    /// Create a failure outcome.
    pub fn failure(message: impl Into<String>) -> Self {
        Feedback::Failure(message.into())
    }

    /// The carried message, success or failure.
    pub fn message(&self) -> &str {
        match self {
            Feedback::Success(m) | Feedback::Failure(m) => m,
        }
    }

    /// Check whether this outcome carries critique text.
    pub fn is_success(&self) -> bool {
        matches!(self, Feedback::Success(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_tagging() {
        let ok = Feedback::success("# Art Style\nRealism");
        assert!(ok.is_success());
        assert!(ok.message().starts_with("# Art Style"));

        let err = Feedback::failure("rate limited");
        assert!(!err.is_success());
        assert_eq!(err.message(), "rate limited");
    }

    #[test]
    fn test_feedback_serde_roundtrip() {
        let err = Feedback::failure("rate limited");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("failure"));
        let back: Feedback = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }
}
