//! Line-oriented input for running the display from a terminal.

use tokio::sync::mpsc::UnboundedSender;

use crate::display::{DisplaySnapshot, InputEvent};

/// Turns one line typed at the terminal into display input.
///
/// A line of only `+` zooms in once per character and a line of only `-`
/// zooms out. A line of only `<` deletes that many characters. Anything else
/// is typed and committed. Blank lines do nothing.
pub fn parse_line(line: &str) -> Vec<InputEvent> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }

    let repeated = |c: char, event: InputEvent| {
        line.chars()
            .all(|x| x == c)
            .then(|| vec![event; line.chars().count()])
    };
    if let Some(events) = repeated('+', InputEvent::Scroll { delta: -1.0 })
        .or_else(|| repeated('-', InputEvent::Scroll { delta: 1.0 }))
        .or_else(|| repeated('<', InputEvent::Backspace))
    {
        return events;
    }

    line.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .map(|value| InputEvent::Char { value })
        .chain(std::iter::once(InputEvent::Commit))
        .collect()
}

/// Sends the events of `line` to the display. Returns `false` once the
/// display has stopped.
pub fn forward_line(line: &str, inputs: &UnboundedSender<InputEvent>) -> bool {
    parse_line(line)
        .into_iter()
        .all(|event| inputs.send(event).is_ok())
}

pub fn status_line(snapshot: &DisplaySnapshot) -> String {
    let airport = if snapshot.airport_valid {
        snapshot.airport.clone()
    } else {
        format!("{} (not found)", snapshot.airport)
    };
    let lit: Vec<String> = snapshot
        .lit
        .iter()
        .map(|b| format!("{} {}° {}NM", b.callsign, b.angle, b.distance))
        .collect();

    format!(
        "{} {}NM sweep {:>3}° | {} lit [{}]",
        airport,
        snapshot.range_nm,
        snapshot.angle,
        lit.len(),
        lit.join(", ")
    )
}
