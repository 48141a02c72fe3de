use std::collections::BTreeSet;

use serde::Serialize;
use utoipa::ToSchema;

use super::generations::Generation;
use super::types::AircraftSnapshot;

/// An aircraft lit by the sweep, borrowed from its generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LitAircraft<'a> {
    pub generation: Generation,
    pub aircraft: &'a AircraftSnapshot,
}

/// Owned form of [`LitAircraft`], kept between frames and published.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LitBlip {
    pub callsign: String,
    pub angle: u16,
    pub distance: f64,
    pub generation: Generation,
}

impl From<&LitAircraft<'_>> for LitBlip {
    fn from(lit: &LitAircraft<'_>) -> Self {
        LitBlip {
            callsign: lit.aircraft.callsign.clone(),
            angle: lit.aircraft.angle,
            distance: lit.aircraft.distance,
            generation: lit.generation,
        }
    }
}

/// Aircraft painted at `sweep_angle`.
///
/// `current` aircraft appear once the arm has reached their bearing, `last`
/// aircraft stay until the arm reaches their bearing again. Both bounds are
/// inclusive, so an aircraft exactly under the arm is lit from either
/// generation. Anything farther than `range` nautical miles is never lit.
pub fn lit_aircraft<'a>(
    sweep_angle: u16,
    range: u32,
    current: &'a [AircraftSnapshot],
    last: &'a [AircraftSnapshot],
) -> Vec<LitAircraft<'a>> {
    let range = f64::from(range);
    let in_range = move |a: &&AircraftSnapshot| a.distance <= range;

    let fresh = current
        .iter()
        .filter(in_range)
        .filter(|a| a.angle <= sweep_angle)
        .map(|aircraft| LitAircraft {
            generation: Generation::Current,
            aircraft,
        });

    let fading = last
        .iter()
        .filter(in_range)
        .filter(|a| a.angle >= sweep_angle)
        .map(|aircraft| LitAircraft {
            generation: Generation::Last,
            aircraft,
        });

    fresh.chain(fading).collect()
}

/// Order-independent membership key of a lit set, used for change detection.
pub fn membership(blips: &[LitBlip]) -> BTreeSet<String> {
    blips
        .iter()
        .map(|b| format!("{} {} {}", b.callsign, b.angle, b.distance))
        .collect()
}
