use shared::{domain::Turn, plan::Plan};

/// Conversation state for one session. Turns can only be appended.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct ClientState {
    turns: Vec<Turn>,
    pending: Option<Plan>,
    busy: bool,
    input: String,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.pending.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    pub fn append_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Replaces any previous plan wholesale.
    pub fn set_plan(&mut self, plan: Plan) {
        self.pending = Some(plan);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shared::domain::Role;

    use super::*;

    #[test]
    fn starts_idle_and_empty() {
        let state = ClientState::new();
        assert!(state.turns().is_empty());
        assert!(state.plan().is_none());
        assert!(!state.is_busy());
        assert_eq!(state.input(), "");
    }

    #[test]
    fn appended_turns_keep_their_order() {
        let mut state = ClientState::new();
        state.append_turn(Turn::user("first"));
        state.append_turn(Turn::system("second"));

        let roles: Vec<Role> = state.turns().iter().map(|turn| turn.role).collect();
        assert_eq!(roles, vec![Role::User, Role::System]);
        assert_eq!(state.turns()[0].content, "first");
    }

    #[test]
    fn set_plan_replaces_previous_plan() {
        let mut state = ClientState::new();
        state.set_plan(Plan::from_value(json!({ "a": 1, "b": 2 })).expect("plan"));
        state.set_plan(Plan::from_value(json!({ "c": 3 })).expect("plan"));

        let plan = state.plan().expect("plan set");
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.get("c"), Some(&json!(3)));
        assert_eq!(plan.get("a"), None);
    }

    #[test]
    fn take_input_clears_the_buffer() {
        let mut state = ClientState::new();
        state.set_input("Build a CRM");
        assert_eq!(state.take_input(), "Build a CRM");
        assert_eq!(state.input(), "");
    }
}
