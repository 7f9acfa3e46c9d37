use shared::{
    domain::{SessionId, Turn},
    protocol::ServerResponse,
};
use tracing::{debug, info, warn};

use crate::{
    error::TransportError,
    reducer::{resolve_turn, IgnoreReason, TurnOutcome},
    state::ClientState,
    transport::PlanTransport,
};

#[derive(Debug, Clone, PartialEq)]
pub struct PendingTurn {
    pub user_input: String,
    /// Ends with the new user turn.
    pub history: Vec<Turn>,
}

pub struct BridgeSession<T: PlanTransport> {
    id: SessionId,
    state: ClientState,
    transport: T,
}

impl<T: PlanTransport> BridgeSession<T> {
    pub fn new(transport: T) -> Self {
        Self::with_id(SessionId::generate(), transport)
    }

    pub fn with_id(id: SessionId, transport: T) -> Self {
        info!(session_id = %id, "session started");
        Self {
            id,
            state: ClientState::new(),
            transport,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.state.set_input(input);
    }

    /// Records the buffered input as a user turn and marks the session busy.
    pub fn begin_turn(&mut self) -> Result<PendingTurn, IgnoreReason> {
        if self.state.is_busy() {
            debug!(session_id = %self.id, "submission ignored while a turn is outstanding");
            return Err(IgnoreReason::Busy);
        }
        if self.state.input().trim().is_empty() {
            return Err(IgnoreReason::EmptyInput);
        }

        let user_input = self.state.take_input();
        self.state.append_turn(Turn::user(user_input.clone()));
        self.state.set_busy(true);
        Ok(PendingTurn {
            user_input,
            history: self.state.turns().to_vec(),
        })
    }

    pub fn begin_turn_with(&mut self, text: impl Into<String>) -> Result<PendingTurn, IgnoreReason> {
        if self.state.is_busy() {
            return Err(IgnoreReason::Busy);
        }
        self.state.set_input(text);
        self.begin_turn()
    }

    pub async fn dispatch(&self, pending: &PendingTurn) -> Result<ServerResponse, TransportError> {
        self.transport
            .send(&self.id, &pending.user_input, &pending.history)
            .await
    }

    pub fn finish_turn(&mut self, result: Result<ServerResponse, TransportError>) -> TurnOutcome {
        let outcome = resolve_turn(&mut self.state, result);
        debug!(
            session_id = %self.id,
            turns = self.state.turns().len(),
            outcome = ?outcome,
            "turn resolved"
        );
        outcome
    }

    pub async fn submit(&mut self) -> TurnOutcome {
        let pending = match self.begin_turn() {
            Ok(pending) => pending,
            Err(reason) => return TurnOutcome::Ignored(reason),
        };
        let Self {
            id,
            state,
            transport,
        } = self;
        let guard = TurnGuard {
            id,
            state,
            armed: true,
        };
        let result = transport
            .send(guard.id, &pending.user_input, &pending.history)
            .await;
        guard.finish(result)
    }

    pub async fn submit_text(&mut self, text: impl Into<String>) -> TurnOutcome {
        if self.state.is_busy() {
            return TurnOutcome::Ignored(IgnoreReason::Busy);
        }
        self.state.set_input(text);
        self.submit().await
    }
}

/// Resolves the outstanding turn as cancelled if `submit` is dropped before
/// the backend answers, so the session never stays busy.
struct TurnGuard<'a> {
    id: &'a SessionId,
    state: &'a mut ClientState,
    armed: bool,
}

impl TurnGuard<'_> {
    fn finish(mut self, result: Result<ServerResponse, TransportError>) -> TurnOutcome {
        self.armed = false;
        let outcome = resolve_turn(self.state, result);
        debug!(
            session_id = %self.id,
            turns = self.state.turns().len(),
            outcome = ?outcome,
            "turn resolved"
        );
        outcome
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!(session_id = %self.id, "turn dropped while waiting on the backend");
            resolve_turn(self.state, Err(TransportError::Cancelled));
        }
    }
}
