use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

const SESSION_ID_PREFIX: &str = "session_";

/// Opaque per-session token. Generated once when a session starts and sent
/// with every request of that session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(format!("{SESSION_ID_PREFIX}{}", Uuid::new_v4().simple()))
    }

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last four characters of the token, upper-cased.
    pub fn short_code(&self) -> String {
        let token = self.0.strip_prefix(SESSION_ID_PREFIX).unwrap_or(&self.0);
        let chars: Vec<char> = token.chars().collect();
        let start = chars.len().saturating_sub(4);
        chars[start..].iter().collect::<String>().to_uppercase()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<String>>,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            questions: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            questions: None,
        }
    }

    pub fn clarification(analysis: impl Into<String>, questions: Option<Vec<String>>) -> Self {
        Self {
            role: Role::System,
            content: analysis.into(),
            questions,
        }
    }
}
