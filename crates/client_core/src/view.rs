use serde_json::Value;
use shared::{domain::SessionId, plan::Plan};

use crate::state::ClientState;

const EMPTY_NODE: &str = "—";
const LIST_SEPARATOR: &str = " • ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickIdea {
    pub title: &'static str,
    pub prompt: &'static str,
}

pub const QUICK_IDEAS: [QuickIdea; 3] = [
    QuickIdea {
        title: "Zero-touch onboarding",
        prompt: "Design an automated onboarding concierge for SaaS customers with proactive nudges and KPI tracking.",
    },
    QuickIdea {
        title: "AI release radar",
        prompt: "Create a weekly release radar that prioritizes engineering workstreams and surfaces risk signals.",
    },
    QuickIdea {
        title: "Growth experiment lab",
        prompt: "Outline a growth lab that runs multi-channel experiments with resource, timeline, and impact modeling.",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub label: &'static str,
    pub value: String,
    pub meta: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanSectionView<'a> {
    pub key: &'a str,
    pub title: String,
    pub content: &'a Value,
}

/// Turns a plan key such as `technical_architecture` or `ProductDefinition`
/// into a heading. Whitespace runs collapse to one space but are not trimmed.
pub fn friendly_title(key: &str) -> String {
    let mut title = String::with_capacity(key.len() + 4);
    let mut prev: Option<char> = None;
    for ch in key.chars() {
        let boundary = ch.is_ascii_uppercase()
            && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit());
        if boundary {
            title.push(' ');
        }
        prev = Some(ch);

        if ch == '_' || ch.is_whitespace() {
            if !title.ends_with(' ') {
                title.push(' ');
            }
        } else {
            title.push(ch);
        }
    }

    if let Some(first) = title.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    title
}

pub fn stringify_node(node: &Value) -> String {
    match node {
        Value::Null => EMPTY_NODE.to_string(),
        Value::String(text) => text.clone(),
        Value::Number(number) => match number.as_f64() {
            Some(float) if number.is_f64() => float.to_string(),
            _ => number.to_string(),
        },
        Value::Array(items) => items
            .iter()
            .map(stringify_node)
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

pub fn plan_sections(plan: &Plan) -> Vec<PlanSectionView<'_>> {
    plan.iter()
        .map(|(key, content)| PlanSectionView {
            key,
            title: friendly_title(key),
            content,
        })
        .collect()
}

pub fn clarity_score(state: &ClientState) -> u8 {
    if state.plan().is_some() {
        return 92;
    }
    if state.is_busy() {
        return 67;
    }
    let turns = state.turns().len().min(u8::MAX as usize) as u32;
    (48 + turns * 6).min(72) as u8
}

pub fn state_label(state: &ClientState) -> &'static str {
    if state.plan().is_some() {
        "Execution ready"
    } else if state.is_busy() {
        "Synthesizing"
    } else {
        "Listening"
    }
}

pub fn session_stats(id: &SessionId, state: &ClientState) -> [Stat; 3] {
    let turns = state.turns().len();
    [
        Stat {
            label: "Session",
            value: id.short_code(),
            meta: "Live link",
        },
        Stat {
            label: "Dialog turns",
            value: if turns == 0 {
                "00".to_string()
            } else {
                turns.to_string()
            },
            meta: "Context depth",
        },
        Stat {
            label: "State",
            value: state_label(state).to_string(),
            meta: if state.plan().is_some() {
                "Roadmap locked"
            } else {
                "Awaiting clarity"
            },
        },
    ]
}
