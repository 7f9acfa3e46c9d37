use std::io::{self, Write};

use client_core::{
    view::{clarity_score, plan_sections, session_stats, stringify_node, QUICK_IDEAS},
    ClientState,
};
use shared::{
    domain::{Role, SessionId, Turn},
    plan::Plan,
};

const EMPTY_HISTORY: &str = "Drop the rough shape of the initiative. The bridge will probe for ambiguity and craft the execution spine.";
const EMPTY_PLAN: &str = "Your plan will appear here...";
pub const SYNTHESIZING: &str = "Bridge is synthesizing your intent...";

fn indent(text: &str, by: usize) -> String {
    let pad = " ".repeat(by);
    text.lines()
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn write_turn(out: &mut impl Write, turn: &Turn) -> io::Result<()> {
    let label = match turn.role {
        Role::User => "YOU",
        Role::System => "AI ",
    };
    writeln!(out, "{label} {}", turn.content)?;
    if let Some(questions) = &turn.questions {
        writeln!(out, "    Clarify:")?;
        for question in questions {
            writeln!(out, "      • {question}")?;
        }
    }
    Ok(())
}

pub fn write_history(out: &mut impl Write, state: &ClientState) -> io::Result<()> {
    if state.turns().is_empty() {
        return writeln!(out, "{EMPTY_HISTORY}");
    }
    for turn in state.turns() {
        write_turn(out, turn)?;
    }
    Ok(())
}

pub fn write_plan(out: &mut impl Write, plan: Option<&Plan>) -> io::Result<()> {
    let Some(plan) = plan else {
        return writeln!(out, "{EMPTY_PLAN}");
    };

    writeln!(out, "== Execution roadmap ==")?;
    for section in plan_sections(plan) {
        writeln!(out, "{}", section.title)?;
        writeln!(out, "{}", indent(&stringify_node(section.content), 2))?;
    }
    Ok(())
}

pub fn write_status(out: &mut impl Write, id: &SessionId, state: &ClientState) -> io::Result<()> {
    for stat in session_stats(id, state) {
        writeln!(out, "{:<13} {:<16} {}", stat.label, stat.value, stat.meta)?;
    }
    writeln!(out, "{:<13} {}%", "Clarity", clarity_score(state))
}

pub fn write_ideas(out: &mut impl Write) -> io::Result<()> {
    for (index, idea) in QUICK_IDEAS.iter().enumerate() {
        writeln!(out, "{}. {}: {}", index + 1, idea.title, idea.prompt)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn rendered(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).expect("write");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn clarification_turn_lists_questions() {
        let turn = Turn::clarification(
            "Need more detail",
            Some(vec!["Who are the users?".into(), "What budget?".into()]),
        );
        assert_eq!(
            rendered(|out| write_turn(out, &turn)),
            "AI  Need more detail\n    Clarify:\n      • Who are the users?\n      • What budget?\n"
        );
    }

    #[test]
    fn empty_history_and_plan_show_placeholders() {
        let state = ClientState::new();
        assert_eq!(rendered(|out| write_history(out, &state)), format!("{EMPTY_HISTORY}\n"));
        assert_eq!(rendered(|out| write_plan(out, None)), format!("{EMPTY_PLAN}\n"));
    }

    #[test]
    fn plan_sections_are_titled_and_indented() {
        let plan = Plan::from_value(json!({
            "functional_requirements": ["Capture inputs", "Generate plan"]
        }))
        .expect("plan");
        assert_eq!(
            rendered(|out| write_plan(out, Some(&plan))),
            "== Execution roadmap ==\nFunctional requirements\n  Capture inputs • Generate plan\n"
        );
    }

    #[test]
    fn status_includes_clarity() {
        let state = ClientState::new();
        let text = rendered(|out| write_status(out, &SessionId::new("session_abcd"), &state));
        assert!(text.contains("ABCD"));
        assert!(text.contains("Listening"));
        assert!(text.ends_with("Clarity       48%\n"));
    }

    #[test]
    fn ideas_are_numbered_from_one() {
        let text = rendered(|out| write_ideas(out));
        assert!(text.starts_with("1. Zero-touch onboarding: "));
        assert_eq!(text.lines().count(), 3);
    }
}
