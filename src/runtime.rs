use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::config::DisplayConfig;
use crate::display::{
    DisplayEngine, DisplaySnapshot, DrawCommand, InputEvent, RecordingCanvas, Request, StatePatch,
};
use crate::provider::Providers;

/// Handle to a display engine running in its own task.
pub struct DisplayHandle {
    inputs: UnboundedSender<InputEvent>,
    snapshots: watch::Receiver<DisplaySnapshot>,
    frames: watch::Receiver<Vec<DrawCommand>>,
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

impl DisplayHandle {
    pub fn inputs(&self) -> UnboundedSender<InputEvent> {
        self.inputs.clone()
    }

    pub fn snapshots(&self) -> watch::Receiver<DisplaySnapshot> {
        self.snapshots.clone()
    }

    pub fn frames(&self) -> watch::Receiver<Vec<DrawCommand>> {
        self.frames.clone()
    }

    pub async fn stop(self) {
        let _ = self.stop_tx.send(());
        let _ = self.join.await;
    }
}

const MAX_FPS: u32 = 1000;

/// Time between frames. `fps` is clamped to `1..=1000`.
pub fn frame_period(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(fps.clamp(1, MAX_FPS)))
}

/// Starts the frame loop. Must be called from within a tokio runtime.
pub fn spawn_display(config: &DisplayConfig, providers: Providers) -> DisplayHandle {
    let engine = DisplayEngine::new(config);
    let inputs = engine.input_sender();
    let (snapshot_tx, snapshots) = watch::channel(engine.snapshot());
    let (frame_tx, frames) = watch::channel(Vec::new());
    let (stop_tx, stop_rx) = oneshot::channel();
    let canvas = RecordingCanvas::new(config.canvas_size, config.canvas_size);
    let period = frame_period(config.fps);

    let join = tokio::spawn(run_display_loop(
        engine,
        canvas,
        providers,
        period,
        snapshot_tx,
        frame_tx,
        stop_rx,
    ));

    DisplayHandle {
        inputs,
        snapshots,
        frames,
        stop_tx,
        join,
    }
}

async fn run_display_loop(
    mut engine: DisplayEngine,
    mut canvas: RecordingCanvas,
    providers: Providers,
    period: Duration,
    snapshot_tx: watch::Sender<DisplaySnapshot>,
    frame_tx: watch::Sender<Vec<DrawCommand>>,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let patches = engine.patch_sender();
    log::info!("Display running, {:?} per frame", period);

    loop {
        let should_stop = tokio::select! {
            _ = ticker.tick() => false,
            _ = &mut stop_rx => true,
        };
        if should_stop {
            log::info!("Display stopped");
            return;
        }

        engine.frame(&mut canvas);
        for request in engine.take_requests() {
            dispatch(request, &providers, &patches);
        }

        snapshot_tx.send_replace(engine.snapshot());
        frame_tx.send_replace(canvas.take_commands());
    }
}

/// Runs `request` on its own task; the result comes back as a patch.
///
/// A failed airport lookup still produces a patch (an invalid airport). A
/// failed aircraft fetch produces none, which leaves `next` empty.
pub fn dispatch(request: Request, providers: &Providers, patches: &UnboundedSender<StatePatch>) {
    let patches = patches.clone();
    match request {
        Request::LookupAirport { ticket, identifier } => {
            let airports = providers.airports.clone();
            tokio::spawn(async move {
                let airport = match airports.lookup(&identifier).await {
                    Ok(info) => Some(info),
                    Err(e) => {
                        log::warn!("Airport lookup for {:?} failed: {}", identifier, e);
                        None
                    }
                };
                let _ = patches.send(StatePatch::AirportResolved {
                    ticket,
                    identifier,
                    airport,
                });
            });
        }
        Request::FetchAircraft {
            airport,
            coordinates,
            range,
        } => {
            let source = providers.aircraft.clone();
            tokio::spawn(async move {
                match source.nearby(coordinates, range).await {
                    Ok(aircraft) => {
                        let _ = patches.send(StatePatch::AircraftFetched { airport, aircraft });
                    }
                    Err(e) => log::warn!("Aircraft fetch for {} failed: {}", airport, e),
                }
            });
        }
    }
}
