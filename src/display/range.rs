use serde::{Deserialize, Serialize};

use crate::config::RangeConfig;

/// Radius thresholds (NM) and the zoom step used at or above each one.
const ZOOM_TIERS: [(u32, u32); 4] = [(4500, 25), (1500, 20), (500, 10), (10, 5)];
const FINE_STEP: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Scrolling down (positive delta) zooms out.
    pub fn from_scroll(delta: f64) -> Option<Self> {
        if delta > 0.0 {
            Some(ZoomDirection::Out)
        } else if delta < 0.0 {
            Some(ZoomDirection::In)
        } else {
            None
        }
    }
}

/// Display radius in nautical miles, bounded to `[minimum, maximum]`.
#[derive(Debug, Clone)]
pub struct RangeController {
    radius: u32,
    minimum: u32,
    maximum: u32,
}

impl RangeController {
    pub fn new(initial: u32, minimum: u32, maximum: u32) -> Self {
        let (minimum, maximum) = if minimum <= maximum {
            (minimum, maximum)
        } else {
            (maximum, minimum)
        };
        Self {
            radius: initial.clamp(minimum, maximum),
            minimum,
            maximum,
        }
    }

    pub fn from_config(config: &RangeConfig) -> Self {
        Self::new(config.initial, config.minimum, config.maximum)
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn minimum(&self) -> u32 {
        self.minimum
    }

    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    /// Step applied by the next zoom, coarser at larger radii.
    pub fn step(&self) -> u32 {
        ZOOM_TIERS
            .iter()
            .find(|(threshold, _)| self.radius >= *threshold)
            .map(|(_, step)| *step)
            .unwrap_or(FINE_STEP)
    }

    pub fn zoom(&mut self, direction: ZoomDirection) -> u32 {
        let step = self.step();
        self.radius = match direction {
            ZoomDirection::Out => self.radius.saturating_add(step).min(self.maximum),
            ZoomDirection::In => self.radius.saturating_sub(step).max(self.minimum),
        };
        self.radius
    }
}

impl Default for RangeController {
    fn default() -> Self {
        Self::from_config(&RangeConfig::default())
    }
}
