use serde_json::Value;

use super::{CategoryFeedback, FeedbackNormalizer, fields};

/// A parsed analysis callback.
///
/// Only `submissionId`, `score` and `feedback` are read directly; everything
/// else is left to [`FeedbackNormalizer`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackCallback {
    pub submission_id: Option<String>,
    pub score: Option<f64>,
    pub raw_feedback: Option<Value>,
    pub categories: CategoryFeedback,
}

impl FeedbackCallback {
    pub fn from_payload(payload: &Value) -> Self {
        Self {
            submission_id: Self::submission_id(payload),
            score: payload.get("score").and_then(fields::score),
            raw_feedback: payload.get("feedback").filter(|v| !v.is_null()).cloned(),
            categories: FeedbackNormalizer::normalize(payload),
        }
    }

    /// `submissionId` as a trimmed, non-empty string. Numeric ids are accepted.
    pub fn submission_id(payload: &Value) -> Option<String> {
        match payload.get("submissionId")? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}
