//! Top-level application loop.
//!
//! `App` owns the frame source, the orchestrator and the optional recorder.
//! One `tick` takes a fresh frame, runs detection and routing on it, and
//! composes video, panel and status into the image that is shown and
//! recorded.  `run` wires `App` to a detector and the window.

use std::path::PathBuf;
use std::sync::mpsc;

use crate::config::AppConfig;
use crate::detector::{LandmarkDetector, SimInput};
use crate::orchestrator::{FrameOrchestrator, FrameReport};
use crate::panel;
use crate::raster::Frame;
use crate::recorder::{self, Recorder};
use crate::source::FrameSource;
use crate::visualizer::{compose, Visualizer};

// ════════════════════════════════════════════════════════════════════════════
// App
// ════════════════════════════════════════════════════════════════════════════

pub struct App {
    source:       FrameSource,
    orchestrator: FrameOrchestrator,
    recorder:     Option<Recorder>,
    snapshot_dir: PathBuf,
}

impl App {
    pub fn new(cfg: &AppConfig) -> Result<Self, String> {
        let (w, h) = (cfg.frame_width, cfg.frame_height);
        let source = match &cfg.image {
            Some(path) => FrameSource::from_path(path, w, h, cfg.mirror)?,
            None => {
                log::info!("no picture configured, using test pattern");
                FrameSource::pattern(w, h, cfg.mirror)
            }
        };
        let recorder = match &cfg.record_dir {
            Some(dir) => Some(Recorder::new(dir, cfg.record_every)?),
            None      => None,
        };
        let snapshot_dir = cfg.record_dir.clone().unwrap_or_else(|| PathBuf::from("."));

        Ok(App {
            source,
            orchestrator: FrameOrchestrator::new(cfg.controller()),
            recorder,
            snapshot_dir,
        })
    }

    /// Process one frame and return the composed image with its report.
    pub fn tick(&mut self, detector: &mut dyn LandmarkDetector) -> (Frame, FrameReport) {
        let mut frame = self.source.next_frame();
        let report = self.orchestrator.tick(detector, &mut frame);
        log::trace!("{}", report.status());

        let side = panel::render(frame.width(), frame.height(), &report);
        let composed = compose(&frame, &side, &report.status());
        if let Some(rec) = self.recorder.as_mut() {
            rec.offer(&composed);
        }
        (composed, report)
    }

    /// Save `composed` as a numbered snapshot; failures are logged.
    pub fn snapshot(&self, composed: &Frame) {
        if let Err(e) = recorder::snapshot(composed, &self.snapshot_dir) {
            log::warn!("{}", e);
        }
    }

    pub fn recorder(&self) -> Option<&Recorder> { self.recorder.as_ref() }
}

// ════════════════════════════════════════════════════════════════════════════
// Detector selection
// ════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "leap")]
fn make_detector(_sim_rx: mpsc::Receiver<SimInput>) -> Result<Box<dyn LandmarkDetector>, String> {
    Ok(Box::new(crate::detector::LeapDetector::open()?))
}

#[cfg(not(feature = "leap"))]
fn make_detector(sim_rx: mpsc::Receiver<SimInput>) -> Result<Box<dyn LandmarkDetector>, String> {
    Ok(Box::new(crate::detector::SimDetector::new(sim_rx)))
}

// ════════════════════════════════════════════════════════════════════════════
// Main loop
// ════════════════════════════════════════════════════════════════════════════

pub fn run(cfg: AppConfig) -> Result<(), String> {
    let mut app = App::new(&cfg)?;

    // ── Sim input channel (window → detector) ─────────────────────────────
    let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();
    let mut detector = make_detector(sim_rx)?;

    let mut vis = Visualizer::new(cfg.frame_width, cfg.frame_height, cfg.frame_interval_ms, sim_tx)?;
    log::info!("window open, {}x{} video", cfg.frame_width, cfg.frame_height);

    while vis.is_open() {
        // 1. Window input → SimInput
        let polled = vis.poll_input();
        if polled.quit { break; }

        // 2. Detect, route, transform, compose
        let (composed, _report) = app.tick(detector.as_mut());

        if polled.snapshot {
            app.snapshot(&composed);
        }

        // 3. Present
        vis.show(&composed)?;
    }

    if let Some(rec) = app.recorder() {
        log::info!("wrote {} frame(s) to {}", rec.written(), rec.dir().display());
    }
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
