use serde::Serialize;
use utoipa::ToSchema;

use super::types::AircraftSnapshot;

const SLOTS: usize = 3;

/// Generation an aircraft was painted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Generation {
    Current,
    Last,
}

/// Three aircraft generations kept in a fixed ring.
///
/// `cursor` points at the `current` slot; `next` is the slot after it and
/// `last` the slot before it. Rotating moves the cursor forward and empties
/// the slot that becomes `next`, which held the oldest data.
#[derive(Debug, Default)]
pub struct GenerationBuffer {
    slots: [Vec<AircraftSnapshot>; SLOTS],
    cursor: usize,
    rotations: u64,
}

impl GenerationBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_index(&self) -> usize {
        (self.cursor + 1) % SLOTS
    }

    fn last_index(&self) -> usize {
        (self.cursor + SLOTS - 1) % SLOTS
    }

    /// Replaces the `next` generation. Last write before a rotation wins.
    pub fn stage(&mut self, snapshots: Vec<AircraftSnapshot>) {
        let index = self.next_index();
        self.slots[index] = snapshots;
    }

    /// `last <- current`, `current <- next`, `next <- empty`.
    pub fn rotate(&mut self) -> &[AircraftSnapshot] {
        self.cursor = self.next_index();
        let next = self.next_index();
        self.slots[next].clear();
        self.rotations += 1;
        self.current()
    }

    pub fn next(&self) -> &[AircraftSnapshot] {
        &self.slots[self.next_index()]
    }

    pub fn current(&self) -> &[AircraftSnapshot] {
        &self.slots[self.cursor]
    }

    pub fn last(&self) -> &[AircraftSnapshot] {
        &self.slots[self.last_index()]
    }

    pub fn rotations(&self) -> u64 {
        self.rotations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aircraft(callsign: &str) -> AircraftSnapshot {
        AircraftSnapshot::new(callsign, 10, 5.0)
    }

    fn callsigns(generation: &[AircraftSnapshot]) -> Vec<&str> {
        generation.iter().map(|a| a.callsign.as_str()).collect()
    }

    #[test]
    fn test_starts_empty() {
        let buffer = GenerationBuffer::new();
        assert!(buffer.next().is_empty());
        assert!(buffer.current().is_empty());
        assert!(buffer.last().is_empty());
        assert_eq!(buffer.rotations(), 0);
    }

    #[test]
    fn test_staged_data_moves_through_generations() {
        let mut buffer = GenerationBuffer::new();
        buffer.stage(vec![aircraft("AAL1")]);
        assert_eq!(callsigns(buffer.next()), vec!["AAL1"]);
        assert!(buffer.current().is_empty());

        let current = buffer.rotate();
        assert_eq!(callsigns(current), vec!["AAL1"]);
        assert!(buffer.next().is_empty());

        buffer.stage(vec![aircraft("DAL2")]);
        buffer.rotate();
        assert_eq!(callsigns(buffer.current()), vec!["DAL2"]);
        assert_eq!(callsigns(buffer.last()), vec!["AAL1"]);

        buffer.rotate();
        assert!(buffer.current().is_empty());
        assert_eq!(callsigns(buffer.last()), vec!["DAL2"]);
        assert!(buffer.next().is_empty());
        assert_eq!(buffer.rotations(), 3);
    }

    #[test]
    fn test_last_stage_wins() {
        let mut buffer = GenerationBuffer::new();
        buffer.stage(vec![aircraft("AAL1")]);
        buffer.stage(vec![aircraft("UAL3"), aircraft("JBU4")]);
        buffer.rotate();
        assert_eq!(callsigns(buffer.current()), vec!["UAL3", "JBU4"]);
    }

    #[test]
    fn test_rotation_consumes_empty_next() {
        let mut buffer = GenerationBuffer::new();
        buffer.stage(vec![aircraft("AAL1")]);
        buffer.rotate();
        buffer.rotate();
        assert!(buffer.current().is_empty());
        assert_eq!(callsigns(buffer.last()), vec!["AAL1"]);
    }

    #[test]
    fn test_stale_slot_is_cleared_before_reuse() {
        let mut buffer = GenerationBuffer::new();
        for callsign in ["A", "B", "C"] {
            buffer.stage(vec![aircraft(callsign)]);
            buffer.rotate();
        }
        // The slot holding "A" is now `next` again and must not leak back.
        assert!(buffer.next().is_empty());
        assert_eq!(callsigns(buffer.current()), vec!["C"]);
        assert_eq!(callsigns(buffer.last()), vec!["B"]);
    }
}
