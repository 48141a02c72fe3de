use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::watch;

use crate::display::{DisplaySnapshot, DrawCommand, InputEvent};
use crate::provider::Providers;
use crate::runtime::DisplayHandle;

#[derive(Clone)]
pub struct AppState {
    pub providers: Providers,
    pub inputs: UnboundedSender<InputEvent>,
    pub snapshots: watch::Receiver<DisplaySnapshot>,
    pub frames: watch::Receiver<Vec<DrawCommand>>,
    /// Edge length of the display canvas, in pixels.
    pub canvas_size: f64,
}

impl AppState {
    pub fn new(providers: Providers, display: &DisplayHandle, canvas_size: f64) -> Self {
        Self {
            providers,
            inputs: display.inputs(),
            snapshots: display.snapshots(),
            frames: display.frames(),
            canvas_size,
        }
    }
}
