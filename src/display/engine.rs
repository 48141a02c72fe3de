use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use utoipa::ToSchema;

use crate::config::DisplayConfig;

use super::airport::{AirportSelection, DisplayFields, Resolution};
use super::canvas::{
    polar_offset, Canvas, Point, BLACK, BLIP_SIZE, INVALID_RED, PENDING_YELLOW, RADAR_GREEN,
};
use super::generations::GenerationBuffer;
use super::range::{RangeController, ZoomDirection};
use super::sweep::SweepClock;
use super::types::{AircraftSnapshot, AirportInfo, Coordinates};
use super::visibility::{lit_aircraft, membership, LitBlip};

const BACKGROUND_DECAY_ALPHA: u8 = 40;
const RANGE_RING_ALPHA: u8 = 4;
const FRAME_INSET: f64 = 10.0;
const RING_INSET: f64 = 80.0;
const ARM_INSET: f64 = 40.0;

const IDENTIFIER_TEXT: f64 = 50.0;
const DETAIL_TEXT: f64 = 20.0;
const WIND_COLUMNS: usize = 12;
const TEMPERATURE_COLUMNS: usize = 8;

/// User input, already reduced to the events the display understands.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Char { value: char },
    Backspace,
    Commit,
    Scroll { delta: f64 },
}

/// Work the engine needs done outside the frame loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    LookupAirport {
        ticket: u64,
        identifier: String,
    },
    FetchAircraft {
        /// Airport the fetch was issued for; echoed back in the patch.
        airport: String,
        coordinates: Coordinates,
        range: u32,
    },
}

/// Completion of a [`Request`], applied at the start of the next frame.
#[derive(Debug, Clone)]
pub enum StatePatch {
    AirportResolved {
        ticket: u64,
        identifier: String,
        airport: Option<AirportInfo>,
    },
    AircraftFetched {
        airport: String,
        aircraft: Vec<AircraftSnapshot>,
    },
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DisplaySnapshot {
    pub angle: u16,
    pub revolutions: u64,
    pub range_nm: u32,
    pub airport: String,
    pub airport_valid: bool,
    pub pending_input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<DisplayFields>,
    pub lit: Vec<LitBlip>,
    pub generated_at: DateTime<Utc>,
}

/// Everything the display shows, owned by the engine.
#[derive(Debug)]
pub struct DisplayState {
    pub clock: SweepClock,
    pub generations: GenerationBuffer,
    pub range: RangeController,
    pub airport: AirportSelection,
}

pub struct DisplayEngine {
    state: DisplayState,
    patch_tx: UnboundedSender<StatePatch>,
    patch_rx: UnboundedReceiver<StatePatch>,
    input_tx: UnboundedSender<InputEvent>,
    input_rx: UnboundedReceiver<InputEvent>,
    outbox: Vec<Request>,
    lit: Vec<LitBlip>,
}

impl DisplayEngine {
    /// Creates the engine with a lookup for the configured airport queued.
    pub fn new(config: &DisplayConfig) -> Self {
        let (patch_tx, patch_rx) = mpsc::unbounded_channel();
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let mut engine = Self {
            state: DisplayState {
                clock: SweepClock::new(),
                generations: GenerationBuffer::new(),
                range: RangeController::from_config(&config.range),
                airport: AirportSelection::new(config.default_airport.clone()),
            },
            patch_tx,
            patch_rx,
            input_tx,
            input_rx,
            outbox: Vec::new(),
            lit: Vec::new(),
        };

        let lookup = engine
            .state
            .airport
            .begin_lookup(config.default_airport.clone());
        engine.outbox.push(Request::LookupAirport {
            ticket: lookup.ticket,
            identifier: lookup.identifier,
        });
        engine
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn lit(&self) -> &[LitBlip] {
        &self.lit
    }

    pub fn patch_sender(&self) -> UnboundedSender<StatePatch> {
        self.patch_tx.clone()
    }

    pub fn input_sender(&self) -> UnboundedSender<InputEvent> {
        self.input_tx.clone()
    }

    /// Requests issued since the last call.
    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.outbox)
    }

    /// Runs one frame. Returns `true` when the sweep completed a revolution.
    pub fn frame<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> bool {
        self.drain_queues();

        let wrapped = self.state.clock.tick();
        if wrapped {
            self.complete_revolution();
        }

        let angle = self.state.clock.angle();
        let lit: Vec<LitBlip> = lit_aircraft(
            angle,
            self.state.range.radius(),
            self.state.generations.current(),
            self.state.generations.last(),
        )
        .iter()
        .map(LitBlip::from)
        .collect();

        let members = membership(&lit);
        if members != membership(&self.lit) {
            log::debug!("Lit at {}°: {:?}", angle, members);
        }
        self.lit = lit;

        self.render(canvas);
        wrapped
    }

    fn drain_queues(&mut self) {
        while let Ok(patch) = self.patch_rx.try_recv() {
            self.apply_patch(patch);
        }
        while let Ok(event) = self.input_rx.try_recv() {
            self.handle_input(event);
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Char { value } => {
                if !self.state.airport.append_char(value) {
                    log::debug!("Ignoring input character {:?}", value);
                }
            }
            InputEvent::Backspace => self.state.airport.backspace(),
            InputEvent::Commit => {
                let lookup = self.state.airport.commit();
                log::info!("Looking up airport {:?}", lookup.identifier);
                self.outbox.push(Request::LookupAirport {
                    ticket: lookup.ticket,
                    identifier: lookup.identifier,
                });
            }
            InputEvent::Scroll { delta } => {
                if let Some(direction) = ZoomDirection::from_scroll(delta) {
                    let radius = self.state.range.zoom(direction);
                    log::debug!("Zoom {} to {}NM", direction, radius);
                }
            }
        }
    }

    pub fn apply_patch(&mut self, patch: StatePatch) {
        match patch {
            StatePatch::AirportResolved {
                ticket,
                identifier,
                airport,
            } => match self.state.airport.resolve(ticket, identifier.clone(), airport) {
                Resolution::Stale => {
                    log::debug!("Discarding superseded lookup for {:?}", identifier);
                }
                Resolution::Applied { valid: true } => {
                    log::info!("Tracking airport {}", self.state.airport.active_identifier());
                    self.request_aircraft();
                }
                Resolution::Applied { valid: false } => {
                    log::warn!("Airport {:?} not found", identifier);
                }
            },
            StatePatch::AircraftFetched { airport, aircraft } => {
                let selection = &self.state.airport;
                if !selection.is_valid() || selection.active_identifier() != airport {
                    log::debug!(
                        "Discarding {} aircraft fetched for {:?}",
                        aircraft.len(),
                        airport
                    );
                    return;
                }
                log::debug!("Staging {} aircraft for {}", aircraft.len(), airport);
                self.state.generations.stage(aircraft);
            }
        }
    }

    fn complete_revolution(&mut self) {
        let current = self.state.generations.rotate().len();
        log::debug!(
            "Revolution {} complete, {} aircraft now current",
            self.state.clock.revolutions(),
            current
        );
        self.request_aircraft();
    }

    fn request_aircraft(&mut self) {
        let selection = &self.state.airport;
        if !selection.is_valid() {
            return;
        }
        if let Some(coordinates) = selection.coordinates() {
            self.outbox.push(Request::FetchAircraft {
                airport: selection.active_identifier().to_string(),
                coordinates,
                range: self.state.range.radius(),
            });
        }
    }

    fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let width = canvas.width();
        let height = canvas.height();
        let center = Point::new(width / 2.0, height / 2.0);
        let arm_length = height / 2.0 - ARM_INSET;

        canvas.fade(BLACK.with_alpha(BACKGROUND_DECAY_ALPHA));
        canvas.rect(
            center,
            width / 2.0 - FRAME_INSET,
            height / 2.0 - FRAME_INSET,
            RADAR_GREEN,
        );
        canvas.ellipse(
            center,
            width - RING_INSET,
            height - RING_INSET,
            RADAR_GREEN.with_alpha(RANGE_RING_ALPHA),
            RADAR_GREEN,
        );

        self.render_overlay(canvas, width, height);

        let range = f64::from(self.state.range.radius().max(1));
        let scale = (arm_length - BLIP_SIZE) / range;
        for blip in &self.lit {
            canvas.blip(polar_offset(
                center,
                f64::from(blip.angle),
                blip.distance * scale,
            ));
        }

        let arm_tip = polar_offset(center, f64::from(self.state.clock.angle()), arm_length);
        canvas.line(center, arm_tip, RADAR_GREEN);
    }

    fn render_overlay<C: Canvas + ?Sized>(&self, canvas: &mut C, width: f64, height: f64) {
        let airport = &self.state.airport;
        let color = if airport.is_valid() {
            RADAR_GREEN
        } else {
            INVALID_RED
        };

        canvas.text(
            Point::new(25.0, 80.0),
            IDENTIFIER_TEXT,
            color,
            airport.active_identifier(),
        );
        canvas.text(
            Point::new(25.0, 110.0),
            DETAIL_TEXT,
            color,
            &format!("{}NM", self.state.range.radius()),
        );

        if let Some(fields) = airport.display_fields().filter(|_| airport.is_valid()) {
            canvas.text(
                Point::new(width - 170.0, 40.0),
                DETAIL_TEXT,
                color,
                &format!("{:>width$}", fields.wind, width = WIND_COLUMNS),
            );
            canvas.text(
                Point::new(width - 120.0, 70.0),
                DETAIL_TEXT,
                color,
                &format!(
                    "{:>width$}",
                    fields.temperature,
                    width = TEMPERATURE_COLUMNS
                ),
            );
            canvas.text(Point::new(25.0, 30.0), DETAIL_TEXT, color, &fields.name);
        }

        canvas.text(
            Point::new(25.0, height - 25.0),
            DETAIL_TEXT,
            PENDING_YELLOW,
            airport.pending_input(),
        );
    }

    pub fn snapshot(&self) -> DisplaySnapshot {
        let airport = &self.state.airport;
        DisplaySnapshot {
            angle: self.state.clock.angle(),
            revolutions: self.state.clock.revolutions(),
            range_nm: self.state.range.radius(),
            airport: airport.active_identifier().to_string(),
            airport_valid: airport.is_valid(),
            pending_input: airport.pending_input().to_string(),
            details: airport.display_fields().cloned(),
            lit: self.lit.clone(),
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::canvas::RecordingCanvas;
    use crate::display::generations::Generation;

    fn buffalo() -> AirportInfo {
        AirportInfo {
            identifier: "KBUF".into(),
            name: "Buffalo Niagara Intl".into(),
            coordinates: Coordinates::new(42.94, -78.73),
            temperature: "M02".into(),
            wind: "27012KT".into(),
        }
    }

    fn canvas() -> RecordingCanvas {
        RecordingCanvas::new(815.0, 815.0)
    }

    /// Engine with the startup lookup resolved to KBUF and requests drained.
    fn tracking_engine() -> DisplayEngine {
        let mut engine = DisplayEngine::new(&DisplayConfig::default());
        let requests = engine.take_requests();
        let Some(Request::LookupAirport { ticket, identifier }) = requests.first().cloned() else {
            panic!("expected startup lookup, got {requests:?}");
        };
        engine.apply_patch(StatePatch::AirportResolved {
            ticket,
            identifier,
            airport: Some(buffalo()),
        });
        engine.take_requests();
        engine
    }

    fn stage(engine: &DisplayEngine, aircraft: Vec<AircraftSnapshot>) {
        engine
            .patch_sender()
            .send(StatePatch::AircraftFetched {
                airport: "KBUF".into(),
                aircraft,
            })
            .unwrap();
    }

    #[test]
    fn test_startup_lookup_is_queued() {
        let mut engine = DisplayEngine::new(&DisplayConfig::default());
        let requests = engine.take_requests();
        assert_eq!(
            requests,
            vec![Request::LookupAirport {
                ticket: 1,
                identifier: "KBUF".into()
            }]
        );
        assert!(!engine.state().airport.is_valid());
        assert!(engine.take_requests().is_empty());
    }

    #[test]
    fn test_valid_airport_triggers_aircraft_fetch() {
        let mut engine = DisplayEngine::new(&DisplayConfig::default());
        engine.take_requests();
        engine.apply_patch(StatePatch::AirportResolved {
            ticket: 1,
            identifier: "KBUF".into(),
            airport: Some(buffalo()),
        });
        assert_eq!(
            engine.take_requests(),
            vec![Request::FetchAircraft {
                airport: "KBUF".into(),
                coordinates: Coordinates::new(42.94, -78.73),
                range: 100,
            }]
        );
    }

    #[test]
    fn test_rotates_once_per_revolution_and_refreshes() {
        let mut engine = tracking_engine();
        let mut canvas = canvas();
        let wraps = (0..720).filter(|_| engine.frame(&mut canvas)).count();

        assert_eq!(wraps, 2);
        assert_eq!(engine.state().generations.rotations(), 2);
        let fetches = engine
            .take_requests()
            .into_iter()
            .filter(|r| matches!(r, Request::FetchAircraft { .. }))
            .count();
        assert_eq!(fetches, 2);
    }

    #[test]
    fn test_single_aircraft_arc_has_no_gap() {
        let mut engine = tracking_engine();
        let mut canvas = canvas();
        stage(&engine, vec![AircraftSnapshot::new("EAST", 90, 50.0)]);

        // First revolution: the aircraft sits in `next` and is never shown.
        for _ in 0..359 {
            engine.frame(&mut canvas);
            assert!(engine.lit().is_empty());
        }

        let mut lit_frames = Vec::new();
        let mut lit_angles = Vec::new();
        for frame in 0..900 {
            engine.frame(&mut canvas);
            if let Some(blip) = engine.lit().first() {
                lit_frames.push(frame);
                lit_angles.push((engine.state().clock.angle(), blip.generation));
            }
        }

        let expected: Vec<(u16, Generation)> = (90..360)
            .map(|a| (a, Generation::Current))
            .chain((0..=90).map(|a| (a, Generation::Last)))
            .collect();
        assert_eq!(lit_angles, expected);
        assert!(lit_frames.windows(2).all(|w| w[1] == w[0] + 1));
    }

    #[test]
    fn test_lit_set_is_continuous_across_rotation() {
        let mut engine = tracking_engine();
        let mut canvas = canvas();
        stage(
            &engine,
            vec![
                AircraftSnapshot::new("A", 0, 10.0),
                AircraftSnapshot::new("B", 180, 60.0),
                AircraftSnapshot::new("C", 359, 99.0),
                AircraftSnapshot::new("FAR", 200, 400.0),
            ],
        );

        // Run to angle 359 of the revolution in which the data is current.
        for _ in 0..(360 + 359) {
            engine.frame(&mut canvas);
        }
        assert_eq!(engine.state().clock.angle(), 359);
        let before = membership(engine.lit());
        assert!(engine
            .lit()
            .iter()
            .all(|b| b.generation == Generation::Current));

        assert!(engine.frame(&mut canvas));
        let after = membership(engine.lit());
        assert!(engine.lit().iter().all(|b| b.generation == Generation::Last));

        assert_eq!(before, after);
        assert_eq!(before.len(), 3);
    }

    #[test]
    fn test_out_of_range_aircraft_never_painted() {
        let mut engine = tracking_engine();
        let mut canvas = canvas();
        stage(&engine, vec![AircraftSnapshot::new("FAR", 90, 150.0)]);
        for _ in 0..1080 {
            engine.frame(&mut canvas);
            assert!(engine.lit().is_empty());
        }
        assert!(canvas.blips().is_empty());
    }

    #[test]
    fn test_typed_identifier_is_committed() {
        let mut engine = tracking_engine();
        let mut canvas = canvas();
        let input = engine.input_sender();
        for value in ['5', '#', 'B'] {
            input.send(InputEvent::Char { value }).unwrap();
        }
        engine.frame(&mut canvas);
        assert_eq!(engine.state().airport.pending_input(), "5B");

        input.send(InputEvent::Commit).unwrap();
        engine.frame(&mut canvas);
        assert_eq!(engine.state().airport.pending_input(), "");
        assert_eq!(
            engine.take_requests(),
            vec![Request::LookupAirport {
                ticket: 2,
                identifier: "5B".into()
            }]
        );
    }

    #[test]
    fn test_invalid_airport_stops_refreshes_and_turns_red() {
        let mut engine = tracking_engine();
        let mut canvas = canvas();
        engine.handle_input(InputEvent::Char { value: 'X' });
        engine.handle_input(InputEvent::Commit);
        let Some(Request::LookupAirport { ticket, identifier }) =
            engine.take_requests().pop()
        else {
            panic!("expected lookup");
        };
        engine.apply_patch(StatePatch::AirportResolved {
            ticket,
            identifier,
            airport: None,
        });

        for _ in 0..360 {
            engine.frame(&mut canvas);
        }
        assert!(engine.take_requests().is_empty());
        assert_eq!(engine.state().generations.rotations(), 1);

        canvas.take_commands();
        engine.frame(&mut canvas);
        let texts = canvas.texts();
        assert!(texts.contains(&("X", INVALID_RED)));
        assert!(texts.contains(&("100NM", INVALID_RED)));
        assert!(!texts.iter().any(|(t, _)| t.contains("Buffalo")));
    }

    #[test]
    fn test_aircraft_for_other_airport_is_discarded() {
        let mut engine = tracking_engine();
        engine.apply_patch(StatePatch::AircraftFetched {
            airport: "KJFK".into(),
            aircraft: vec![AircraftSnapshot::new("LATE", 10, 5.0)],
        });
        assert!(engine.state().generations.next().is_empty());

        engine.apply_patch(StatePatch::AircraftFetched {
            airport: "KBUF".into(),
            aircraft: vec![AircraftSnapshot::new("OK", 10, 5.0)],
        });
        assert_eq!(engine.state().generations.next().len(), 1);
    }

    #[test]
    fn test_aircraft_for_invalid_airport_is_discarded() {
        let mut engine = DisplayEngine::new(&DisplayConfig::default());
        engine.take_requests();
        engine.apply_patch(StatePatch::AirportResolved {
            ticket: 1,
            identifier: "KBUF".into(),
            airport: None,
        });
        assert!(!engine.state().airport.is_valid());
        assert_eq!(engine.state().airport.active_identifier(), "KBUF");

        engine.apply_patch(StatePatch::AircraftFetched {
            airport: "KBUF".into(),
            aircraft: vec![AircraftSnapshot::new("LATE", 10, 5.0)],
        });
        assert!(engine.state().generations.next().is_empty());
    }

    #[test]
    fn test_superseded_lookup_does_not_replace_airport() {
        let mut engine = tracking_engine();
        for value in ['K', 'J', 'F', 'K'] {
            engine.handle_input(InputEvent::Char { value });
        }
        engine.handle_input(InputEvent::Commit);
        for value in ['K', 'B', 'O', 'S'] {
            engine.handle_input(InputEvent::Char { value });
        }
        engine.handle_input(InputEvent::Commit);
        let requests = engine.take_requests();
        assert_eq!(requests.len(), 2);

        let Request::LookupAirport { ticket, identifier } = requests[0].clone() else {
            panic!("expected lookup");
        };
        engine.apply_patch(StatePatch::AirportResolved {
            ticket,
            identifier,
            airport: None,
        });
        assert!(engine.state().airport.is_valid());
        assert_eq!(engine.state().airport.active_identifier(), "KBUF");
        assert!(engine.take_requests().is_empty());
    }

    #[test]
    fn test_scroll_zooms_range() {
        let mut engine = tracking_engine();
        let mut canvas = canvas();
        engine.handle_input(InputEvent::Scroll { delta: 1.0 });
        engine.handle_input(InputEvent::Scroll { delta: 0.0 });
        engine.frame(&mut canvas);
        assert_eq!(engine.state().range.radius(), 105);
        assert!(canvas.texts().contains(&("105NM", RADAR_GREEN)));

        engine.handle_input(InputEvent::Scroll { delta: -4.0 });
        assert_eq!(engine.state().range.radius(), 100);
    }

    #[test]
    fn test_overlay_and_blip_placement() {
        let mut engine = tracking_engine();
        let mut canvas = canvas();
        stage(&engine, vec![AircraftSnapshot::new("EAST", 90, 50.0)]);
        for _ in 0..(360 + 90) {
            engine.frame(&mut canvas);
        }
        canvas.take_commands();
        engine.frame(&mut canvas);

        let texts = canvas.texts();
        assert!(texts.contains(&("KBUF", RADAR_GREEN)));
        assert!(texts.contains(&("100NM", RADAR_GREEN)));
        assert!(texts.contains(&("     27012KT", RADAR_GREEN)));
        assert!(texts.contains(&("     M02", RADAR_GREEN)));
        assert!(texts.contains(&("Buffalo Niagara Intl", RADAR_GREEN)));
        assert!(texts.contains(&("", PENDING_YELLOW)));

        // Centre 407.5, arm 367.5, blip travel (367.5 - 8) * 50 / 100.
        let blips = canvas.blips();
        assert_eq!(blips.len(), 1);
        assert!((blips[0].x - 587.25).abs() < 1e-9);
        assert!((blips[0].y - 407.5).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut engine = tracking_engine();
        let mut canvas = canvas();
        engine.handle_input(InputEvent::Char { value: 'K' });
        engine.frame(&mut canvas);

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.angle, 1);
        assert_eq!(snapshot.range_nm, 100);
        assert_eq!(snapshot.airport, "KBUF");
        assert!(snapshot.airport_valid);
        assert_eq!(snapshot.pending_input, "K");
        assert_eq!(
            snapshot.details.map(|d| d.temperature),
            Some("M02".to_string())
        );
    }

    #[test]
    fn test_input_event_json() {
        let event: InputEvent = serde_json::from_str(r#"{"type":"char","value":"K"}"#).unwrap();
        assert_eq!(event, InputEvent::Char { value: 'K' });
        let event: InputEvent =
            serde_json::from_str(r#"{"type":"scroll","delta":-2.5}"#).unwrap();
        assert_eq!(event, InputEvent::Scroll { delta: -2.5 });
        let event: InputEvent = serde_json::from_str(r#"{"type":"commit"}"#).unwrap();
        assert_eq!(event, InputEvent::Commit);
    }
}
