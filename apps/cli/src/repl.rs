use std::io::Write;

use anyhow::Result;
use client_core::{
    view::QUICK_IDEAS, BridgeSession, IgnoreReason, PlanTransport, TurnOutcome,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit(String),
    Idea(usize),
    Ideas,
    Plan,
    History,
    Status,
    Help,
    Quit,
    Unknown(String),
}

const HELP: &str = "\
Type a message to send it to the bridge.
  /idea <n>   send quick idea n
  /ideas      list quick ideas
  /plan       show the execution roadmap
  /history    show the conversation
  /status     show session stats
  /quit       exit";

pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Submit(line.to_string());
    };

    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("idea"), Some(n)) => match n.parse::<usize>() {
            Ok(n) if (1..=QUICK_IDEAS.len()).contains(&n) => Command::Idea(n),
            _ => Command::Unknown(trimmed.to_string()),
        },
        (Some("ideas"), None) => Command::Ideas,
        (Some("plan"), None) => Command::Plan,
        (Some("history"), None) => Command::History,
        (Some("status"), None) => Command::Status,
        (Some("help"), None) => Command::Help,
        (Some("quit" | "exit"), None) => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

/// Records, sends and resolves one turn, printing the reply.
pub async fn run_turn<T: PlanTransport>(
    session: &mut BridgeSession<T>,
    text: String,
    out: &mut impl Write,
) -> Result<TurnOutcome> {
    let pending = match session.begin_turn_with(text) {
        Ok(pending) => pending,
        Err(reason) => {
            if reason == IgnoreReason::Busy {
                writeln!(out, "Still waiting on the previous reply.")?;
            }
            return Ok(TurnOutcome::Ignored(reason));
        }
    };
    // The turn must resolve even if the terminal is gone.
    let announced = writeln!(out, "{}", render::SYNTHESIZING).and_then(|()| out.flush());

    let result = session.dispatch(&pending).await;
    let outcome = session.finish_turn(result);
    announced?;

    if let Some(reply) = session.state().turns().last() {
        render::write_turn(out, reply)?;
    }
    if outcome == TurnOutcome::PlanReady {
        render::write_plan(out, session.state().plan())?;
    }
    Ok(outcome)
}

pub async fn run<T: PlanTransport>(session: &mut BridgeSession<T>) -> Result<()> {
    let mut stdout = std::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    writeln!(stdout, "IntentBridge session {}", session.id())?;
    render::write_history(&mut stdout, session.state())?;
    writeln!(stdout, "Type /help for commands.")?;

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Command::Submit(text) => {
                run_turn(session, text, &mut stdout).await?;
            }
            Command::Idea(n) => {
                let idea = QUICK_IDEAS[n - 1];
                writeln!(stdout, "YOU {}", idea.prompt)?;
                run_turn(session, idea.prompt.to_string(), &mut stdout).await?;
            }
            Command::Ideas => render::write_ideas(&mut stdout)?,
            Command::Plan => render::write_plan(&mut stdout, session.state().plan())?,
            Command::History => render::write_history(&mut stdout, session.state())?,
            Command::Status => render::write_status(&mut stdout, session.id(), session.state())?,
            Command::Help => writeln!(stdout, "{HELP}")?,
            Command::Quit => break,
            Command::Unknown(raw) => writeln!(stdout, "Unknown command '{raw}'. Type /help.")?,
        }
    }

    Ok(())
}
