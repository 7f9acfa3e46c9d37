pub mod error;
pub mod reducer;
pub mod session;
pub mod state;
pub mod transport;
pub mod view;

pub use error::{TransportError, TurnError};
pub use reducer::{IgnoreReason, TurnOutcome, GENERIC_FAILURE, PLAN_ACKNOWLEDGEMENT};
pub use session::{BridgeSession, PendingTurn};
pub use state::ClientState;
pub use transport::{HttpTransport, PlanTransport, DEFAULT_API_BASE, DEFAULT_REQUEST_TIMEOUT};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
