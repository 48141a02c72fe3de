use serde::Serialize;
use utoipa::ToSchema;

use super::types::{AirportInfo, Coordinates};

/// Airport details shown in the overlay while the selection is valid.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DisplayFields {
    pub name: String,
    pub temperature: String,
    pub wind: String,
}

/// A lookup handed out by [`AirportSelection::commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLookup {
    pub ticket: u64,
    pub identifier: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied { valid: bool },
    /// A newer lookup was issued after this one; the result was dropped.
    Stale,
}

pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit()
}

#[derive(Debug, Clone)]
pub struct AirportSelection {
    active_identifier: String,
    pending_input: String,
    valid: bool,
    fields: Option<DisplayFields>,
    coordinates: Option<Coordinates>,
    latest_ticket: u64,
}

impl AirportSelection {
    /// Starts invalid on `identifier` until its lookup resolves.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            active_identifier: identifier.into(),
            pending_input: String::new(),
            valid: false,
            fields: None,
            coordinates: None,
            latest_ticket: 0,
        }
    }

    pub fn active_identifier(&self) -> &str {
        &self.active_identifier
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn display_fields(&self) -> Option<&DisplayFields> {
        self.fields.as_ref()
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    /// Returns `false` when `c` is not an identifier character.
    pub fn append_char(&mut self, c: char) -> bool {
        if !is_identifier_char(c) {
            return false;
        }
        self.pending_input.push(c);
        true
    }

    pub fn backspace(&mut self) {
        self.pending_input.pop();
    }

    /// Takes the pending input as the next identifier to look up.
    pub fn commit(&mut self) -> PendingLookup {
        let identifier = std::mem::take(&mut self.pending_input);
        self.begin_lookup(identifier)
    }

    /// Issues a lookup ticket for `identifier` without touching the input.
    pub fn begin_lookup(&mut self, identifier: String) -> PendingLookup {
        self.latest_ticket += 1;
        PendingLookup {
            ticket: self.latest_ticket,
            identifier,
        }
    }

    /// Applies a finished lookup. A `None` result keeps the attempted
    /// identifier on display and marks the selection invalid.
    pub fn resolve(
        &mut self,
        ticket: u64,
        identifier: String,
        airport: Option<AirportInfo>,
    ) -> Resolution {
        if ticket != self.latest_ticket {
            return Resolution::Stale;
        }

        match airport {
            Some(info) => {
                self.active_identifier = info.identifier;
                self.coordinates = Some(info.coordinates);
                self.fields = Some(DisplayFields {
                    name: info.name,
                    temperature: info.temperature,
                    wind: info.wind,
                });
                self.valid = true;
            }
            None => {
                self.active_identifier = identifier;
                self.coordinates = None;
                self.fields = None;
                self.valid = false;
            }
        }

        Resolution::Applied { valid: self.valid }
    }
}
