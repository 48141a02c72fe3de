use serde::Serialize;
use utoipa::ToSchema;

/// Side length of the square blip sprite, in pixels.
pub const BLIP_SIZE: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

pub const RADAR_GREEN: Color = Color::rgb(81, 255, 13);
pub const INVALID_RED: Color = Color::rgb(255, 0, 0);
pub const PENDING_YELLOW: Color = Color::rgb(255, 255, 0);
pub const BLACK: Color = Color::rgb(0, 0, 0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Point `radius` pixels from `center` along `bearing_deg`, measured
/// clockwise from screen-up. Screen y grows downwards.
pub fn polar_offset(center: Point, bearing_deg: f64, radius: f64) -> Point {
    let theta = bearing_deg.to_radians();
    Point::new(
        center.x + radius * theta.sin(),
        center.y - radius * theta.cos(),
    )
}

/// Drawing primitives the display renders through.
pub trait Canvas {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    /// Paints a translucent layer over the whole surface.
    fn fade(&mut self, color: Color);
    fn rect(&mut self, center: Point, half_width: f64, half_height: f64, stroke: Color);
    fn ellipse(&mut self, center: Point, width: f64, height: f64, fill: Color, stroke: Color);
    fn line(&mut self, from: Point, to: Point, stroke: Color);
    fn text(&mut self, at: Point, size: f64, fill: Color, text: &str);
    /// Draws the fixed-size blip sprite with its top-left corner at `at`.
    fn blip(&mut self, at: Point);
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Fade {
        color: Color,
    },
    Rect {
        center: Point,
        half_width: f64,
        half_height: f64,
        stroke: Color,
    },
    Ellipse {
        center: Point,
        width: f64,
        height: f64,
        fill: Color,
        stroke: Color,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Color,
    },
    Text {
        at: Point,
        size: f64,
        fill: Color,
        text: String,
    },
    Blip {
        at: Point,
    },
}

/// Canvas that keeps the draw calls of a frame as data. The runtime
/// publishes them for remote clients; tests inspect them.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn blips(&self) -> Vec<Point> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Blip { at } => Some(*at),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<(&str, Color)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, fill, .. } => Some((text.as_str(), *fill)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn fade(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fade { color });
    }

    fn rect(&mut self, center: Point, half_width: f64, half_height: f64, stroke: Color) {
        self.commands.push(DrawCommand::Rect {
            center,
            half_width,
            half_height,
            stroke,
        });
    }

    fn ellipse(&mut self, center: Point, width: f64, height: f64, fill: Color, stroke: Color) {
        self.commands.push(DrawCommand::Ellipse {
            center,
            width,
            height,
            fill,
            stroke,
        });
    }

    fn line(&mut self, from: Point, to: Point, stroke: Color) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }

    fn text(&mut self, at: Point, size: f64, fill: Color, text: &str) {
        self.commands.push(DrawCommand::Text {
            at,
            size,
            fill,
            text: text.to_string(),
        });
    }

    fn blip(&mut self, at: Point) {
        self.commands.push(DrawCommand::Blip { at });
    }
}
