//! Per-frame routing.
//!
//! `FrameOrchestrator` owns the edit lock and the transform controller.  Each
//! frame it takes the detector's hands, sends the left hand to the lock and
//! the right hand to the controller, and applies the resulting command to
//! the frame.

use hand_pose::{
    classify, ControllerConfig, EditLock, Gesture, Handedness, LandmarkSnapshot,
    Raster, TransformCommand, TransformController,
};

use crate::detector::LandmarkDetector;
use crate::raster::Frame;

// ════════════════════════════════════════════════════════════════════════════
// FrameReport — what happened this frame
// ════════════════════════════════════════════════════════════════════════════

/// Summary of one processed frame, for the panel, status bar and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub left:       Option<Gesture>,
    pub right:      Option<Gesture>,
    pub editable:   bool,
    pub command:    TransformCommand,
    pub zoom_level: f64,
    pub path_len:   usize,
    /// The hands that were routed (at most one per side), left first.
    pub hands:      Vec<LandmarkSnapshot>,
}

impl FrameReport {
    /// One-line status text.
    pub fn status(&self) -> String {
        let label = |g: Option<Gesture>| g.map(|g| g.label()).unwrap_or("-");
        let command = match self.command {
            TransformCommand::Idle                 => "idle".to_string(),
            TransformCommand::Zoom { delta }       => format!("zoom {:+.1}", delta),
            TransformCommand::Rotate { degrees }   => format!("rotate {:+}", degrees),
            TransformCommand::AppendPoint { x, y } => format!("draw {},{}", x, y),
        };
        format!(
            "{}  L:{}  R:{}  {}  zoom {:.0}%  path {}",
            if self.editable { "EDIT" } else { "LOCKED" },
            label(self.left),
            label(self.right),
            command,
            self.zoom_level,
            self.path_len,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Hand slots
// ════════════════════════════════════════════════════════════════════════════

/// First left and first right hand among the detections.  Extra hands of
/// the same side are ignored.
pub fn hand_slots(
    detections: &[LandmarkSnapshot],
) -> (Option<&LandmarkSnapshot>, Option<&LandmarkSnapshot>) {
    let left  = detections.iter().find(|h| h.handedness == Handedness::Left);
    let right = detections.iter().find(|h| h.handedness == Handedness::Right);
    (left, right)
}

// ════════════════════════════════════════════════════════════════════════════
// FrameOrchestrator
// ════════════════════════════════════════════════════════════════════════════

pub struct FrameOrchestrator {
    lock:       EditLock,
    controller: TransformController,
}

impl FrameOrchestrator {
    pub fn new(config: ControllerConfig) -> Self {
        FrameOrchestrator {
            lock:       EditLock::new(),
            controller: TransformController::new(config),
        }
    }

    /// Detect hands in `frame`, then process them.
    pub fn tick(&mut self, detector: &mut dyn LandmarkDetector, frame: &mut Frame) -> FrameReport {
        let detections = detector.detect(frame);
        self.process(frame, &detections)
    }

    /// Route one frame's detections and mutate `frame` accordingly.
    pub fn process(&mut self, frame: &mut Frame, detections: &[LandmarkSnapshot]) -> FrameReport {
        let (left, right) = hand_slots(detections);

        let left_gesture = left.map(classify);
        let editable = self.lock.update(left_gesture);

        let (right_gesture, command) = match right {
            Some(hand) => (Some(classify(hand)), self.controller.step(hand, editable, frame.size())),
            None => {
                self.controller.release();
                (None, TransformCommand::Idle)
            }
        };

        self.controller.apply(frame, command);

        FrameReport {
            left:       left_gesture,
            right:      right_gesture,
            editable,
            command,
            zoom_level: self.controller.zoom_level(),
            path_len:   self.controller.draw_path().len(),
            hands:      left.into_iter().chain(right).cloned().collect(),
        }
    }

    pub fn controller(&self) -> &TransformController { &self.controller }
    pub fn is_editable(&self) -> bool { self.lock.is_editable() }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
