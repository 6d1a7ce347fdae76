//! Classification of drawn code tokens.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Interpretation of a code token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CodeClass {
    /// Token parsed as a base-10 integer.
    Numeric(i64),
    /// Token that is not an integer; carried verbatim.
    NonNumeric(String),
}

impl CodeClass {
    pub fn is_numeric(&self) -> bool {
        matches!(self, CodeClass::Numeric(_))
    }
}

impl fmt::Display for CodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeClass::Numeric(code) => write!(f, "{code}"),
            CodeClass::NonNumeric(token) => write!(f, "{token}"),
        }
    }
}

/// Classify a token as numeric or not.
///
/// Accepts an optional leading `+` or `-` followed by ASCII digits, with no
/// surrounding whitespace. Values outside the `i64` range are non-numeric.
pub fn classify(token: &str) -> CodeClass {
    match token.parse::<i64>() {
        Ok(code) => CodeClass::Numeric(code),
        Err(_) => CodeClass::NonNumeric(token.to_string()),
    }
}

/// Result of one draw: the selected token and its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawnCode {
    pub token: String,
    pub class: CodeClass,
}

impl DrawnCode {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        let class = classify(&token);
        Self { token, class }
    }
}
