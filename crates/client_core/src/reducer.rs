//! Every path through [`resolve_turn`] clears the busy flag and appends
//! exactly one system turn.

use shared::{
    domain::Turn,
    error::UnrecognizedResponse,
    protocol::{Reply, ServerResponse},
};
use tracing::{debug, info, warn};

use crate::{
    error::{TransportError, TurnError},
    state::ClientState,
};

pub const PLAN_ACKNOWLEDGEMENT: &str = "I have generated a full execution plan for you.";
pub const GENERIC_FAILURE: &str = "Error connecting to the bridge. Please check the backend.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyInput,
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Ignored(IgnoreReason),
    Clarification { questions: Vec<String> },
    PlanReady,
    Failed { kind: &'static str },
}

/// Applies a successful response. Leaves `state` untouched when the response
/// is not one the client understands.
pub fn apply_response(
    state: &mut ClientState,
    response: ServerResponse,
) -> Result<TurnOutcome, UnrecognizedResponse> {
    if let Some(intent) = &response.intent {
        debug!(%intent, "backend classified intent");
    }

    match response.classify()? {
        Reply::ClarificationNeeded {
            analysis,
            questions,
        } => {
            let asked = questions.clone().unwrap_or_default();
            info!(questions = asked.len(), "backend asked for clarification");
            state.append_turn(Turn::clarification(analysis, questions));
            Ok(TurnOutcome::Clarification { questions: asked })
        }
        Reply::PlanGenerated { plan } => {
            info!(sections = plan.len(), "backend generated a plan");
            state.append_turn(Turn::system(PLAN_ACKNOWLEDGEMENT));
            state.set_plan(plan);
            Ok(TurnOutcome::PlanReady)
        }
    }
}

pub fn apply_failure(state: &mut ClientState, err: &TurnError) -> TurnOutcome {
    warn!(kind = err.kind(), error = %err, "turn failed");
    state.append_turn(Turn::system(GENERIC_FAILURE));
    TurnOutcome::Failed { kind: err.kind() }
}

pub fn resolve_turn(
    state: &mut ClientState,
    result: Result<ServerResponse, TransportError>,
) -> TurnOutcome {
    let outcome = match result
        .map_err(TurnError::from)
        .and_then(|response| apply_response(state, response).map_err(TurnError::from))
    {
        Ok(outcome) => outcome,
        Err(err) => apply_failure(state, &err),
    };
    state.set_busy(false);
    outcome
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shared::{domain::Role, plan::Plan};

    use super::*;

    fn busy_state_with_user_turn(text: &str) -> ClientState {
        let mut state = ClientState::new();
        state.append_turn(Turn::user(text));
        state.set_busy(true);
        state
    }

    #[test]
    fn clarification_appends_questions_verbatim_and_keeps_plan() {
        let mut state = busy_state_with_user_turn("Build a CRM");
        let existing = Plan::from_value(json!({ "ProductDefinition": "v1" })).expect("plan");
        state.set_plan(existing.clone());

        let outcome = resolve_turn(
            &mut state,
            Ok(ServerResponse::clarification(
                "Need more detail",
                vec!["Who are the users?".into(), "Which platform?".into()],
            )),
        );

        assert_eq!(
            outcome,
            TurnOutcome::Clarification {
                questions: vec!["Who are the users?".into(), "Which platform?".into()]
            }
        );
        assert_eq!(state.turns().len(), 2);
        let reply = &state.turns()[1];
        assert_eq!(reply.role, Role::System);
        assert_eq!(reply.content, "Need more detail");
        assert_eq!(
            reply.questions.as_deref(),
            Some(&["Who are the users?".to_string(), "Which platform?".to_string()][..])
        );
        assert_eq!(state.plan(), Some(&existing));
        assert!(!state.is_busy());
    }

    #[test]
    fn clarification_without_questions_has_no_question_list() {
        for body in [
            json!({ "status": "clarification_needed", "analysis": "x" }),
            json!({ "status": "clarification_needed", "analysis": "x", "questions": null }),
        ] {
            let mut state = busy_state_with_user_turn("Build a CRM");
            let response: ServerResponse = serde_json::from_value(body).expect("response");

            let outcome = resolve_turn(&mut state, Ok(response));

            assert_eq!(outcome, TurnOutcome::Clarification { questions: vec![] });
            assert_eq!(state.turns()[1], Turn::clarification("x", None));
            assert_eq!(state.turns()[1].questions, None);
            assert!(!state.is_busy());
        }
    }

    #[test]
    fn plan_generated_acknowledges_and_replaces_plan() {
        let mut state = busy_state_with_user_turn("Build a CRM for 10 users");
        state.set_plan(Plan::from_value(json!({ "stale": true })).expect("plan"));
        let raw = json!({
            "ProductDefinition": { "summary": "CRM", "core_features": ["contacts", { "deals": [1, 2] }] },
            "TechnicalArchitecture": { "stack": "web" }
        });

        let outcome = resolve_turn(&mut state, Ok(ServerResponse::plan_generated(raw.clone())));

        assert_eq!(outcome, TurnOutcome::PlanReady);
        assert_eq!(state.turns().len(), 2);
        assert_eq!(state.turns()[1].content, PLAN_ACKNOWLEDGEMENT);
        assert_eq!(state.turns()[1].questions, None);
        assert_eq!(state.plan().cloned().map(Plan::into_value), Some(raw));
        assert!(!state.is_busy());
    }

    #[test]
    fn transport_failure_appends_one_generic_turn() {
        let mut state = busy_state_with_user_turn("Build a CRM");
        let before = state.plan().cloned();

        let outcome = resolve_turn(
            &mut state,
            Err(TransportError::Status {
                status: 500,
                detail: None,
            }),
        );

        assert_eq!(outcome, TurnOutcome::Failed { kind: "status" });
        assert_eq!(state.turns().len(), 2);
        assert_eq!(state.turns()[0], Turn::user("Build a CRM"));
        assert_eq!(state.turns()[1], Turn::system(GENERIC_FAILURE));
        assert_eq!(state.plan().cloned(), before);
        assert!(!state.is_busy());
    }

    #[test]
    fn unknown_status_is_surfaced_as_a_failure_turn() {
        let mut state = busy_state_with_user_turn("Build a CRM");
        state.set_plan(Plan::from_value(json!({ "kept": 1 })).expect("plan"));
        let response = ServerResponse {
            status: Some("queued".to_string()),
            plan: Some(json!({ "ignored": true })),
            ..ServerResponse::default()
        };

        let outcome = resolve_turn(&mut state, Ok(response));

        assert_eq!(
            outcome,
            TurnOutcome::Failed {
                kind: "unrecognized_response"
            }
        );
        assert_eq!(state.turns().last(), Some(&Turn::system(GENERIC_FAILURE)));
        assert_eq!(state.plan().and_then(|plan| plan.get("kept")), Some(&json!(1)));
        assert!(!state.is_busy());
    }

    #[test]
    fn apply_response_does_not_mutate_on_unrecognized_reply() {
        let mut state = busy_state_with_user_turn("hi");
        let snapshot = state.clone();

        let err = apply_response(&mut state, ServerResponse::default()).expect_err("no status");

        assert_eq!(err, UnrecognizedResponse::MissingStatus);
        assert_eq!(state, snapshot);
    }
}
