mod airport;
mod canvas;
mod engine;
mod generations;
mod range;
mod sweep;
mod types;
mod visibility;

pub use airport::DisplayFields;
pub use canvas::{Color, DrawCommand, Point, RecordingCanvas};
pub use engine::{DisplayEngine, DisplaySnapshot, InputEvent, Request, StatePatch};
pub use generations::Generation;
pub use types::{AircraftSnapshot, AirportInfo, Coordinates};
pub use visibility::LitBlip;
