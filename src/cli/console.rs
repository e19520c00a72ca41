//! Terminal rendering of team runs.

use std::io::Write;
use std::sync::Arc;

use crate::scenario::ScenarioSummary;
use crate::team::{TeamEvent, TeamObserver, TeamRunResult};

/// Header line printed above each transcript message.
pub fn message_header(speaker: &str) -> String {
    format!("---------- {speaker} ----------")
}

/// Render one event the way it appears on stdout, if it is shown at all.
pub fn render_event(event: &TeamEvent) -> Option<String> {
    match event {
        TeamEvent::Message { message, .. } => Some(format!(
            "{}\n{}\n",
            message_header(&message.speaker),
            message.text
        )),
        TeamEvent::StageReached { stage, .. } => {
            Some(format!("[stage] {} reached by {}\n", stage.name, stage.agent))
        }
        TeamEvent::Started { .. } | TeamEvent::Finished { .. } => None,
    }
}

/// Observer that prints messages as they are appended.
pub fn console_observer() -> TeamObserver {
    Arc::new(|event: &TeamEvent| {
        if let Some(rendered) = render_event(event) {
            let mut stdout = std::io::stdout().lock();
            let _ = writeln!(stdout, "{rendered}");
            let _ = stdout.flush();
        }
    })
}

pub fn render_summary(result: &TeamRunResult) -> String {
    let mut lines = vec![
        "========== summary ==========".to_string(),
        format!("messages: {}", result.transcript.len()),
        format!("agent turns: {}", result.turns),
        format!("stop reason: {}", result.stop_reason),
    ];
    if let Some(status) = &result.workflow {
        lines.push(format!("workflow: {status}"));
    }
    lines.join("\n")
}

pub fn render_scenarios(scenarios: &[ScenarioSummary]) -> String {
    let width = scenarios.iter().map(|s| s.name.len()).max().unwrap_or(0);
    scenarios
        .iter()
        .map(|s| {
            format!(
                "{:<width$}  {}  [{}]",
                s.name,
                s.description,
                s.source,
                width = width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
