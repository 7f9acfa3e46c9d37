use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::{SessionId, Turn},
    error::UnrecognizedResponse,
    plan::Plan,
};

pub const STATUS_CLARIFICATION_NEEDED: &str = "clarification_needed";
pub const STATUS_PLAN_GENERATED: &str = "plan_generated";

/// Body of `POST <base>/process`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRequest {
    pub session_id: SessionId,
    pub user_input: String,
    #[serde(default)]
    pub history: Vec<Turn>,
}

/// Successful reply as it comes off the wire. Every field is optional so
/// that an unknown discriminant is still a parsable body; [`ServerResponse::classify`]
/// decides whether the shape is one the client understands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    ClarificationNeeded {
        analysis: String,
        questions: Option<Vec<String>>,
    },
    PlanGenerated {
        plan: Plan,
    },
}

impl ServerResponse {
    pub fn clarification(analysis: impl Into<String>, questions: Vec<String>) -> Self {
        Self {
            status: Some(STATUS_CLARIFICATION_NEEDED.to_string()),
            analysis: Some(analysis.into()),
            questions: Some(questions),
            ..Self::default()
        }
    }

    pub fn plan_generated(plan: Value) -> Self {
        Self {
            status: Some(STATUS_PLAN_GENERATED.to_string()),
            plan: Some(plan),
            ..Self::default()
        }
    }

    pub fn classify(self) -> Result<Reply, UnrecognizedResponse> {
        let status = self.status.ok_or(UnrecognizedResponse::MissingStatus)?;
        match status.as_str() {
            STATUS_CLARIFICATION_NEEDED => Ok(Reply::ClarificationNeeded {
                analysis: self.analysis.unwrap_or_default(),
                questions: self.questions,
            }),
            STATUS_PLAN_GENERATED => {
                let plan = self
                    .plan
                    .and_then(Plan::from_value)
                    .ok_or(UnrecognizedResponse::MissingPlan)?;
                Ok(Reply::PlanGenerated { plan })
            }
            _ => Err(UnrecognizedResponse::UnknownStatus(status)),
        }
    }
}
