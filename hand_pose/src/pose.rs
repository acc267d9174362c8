//! Synthetic hand poses.
//!
//! [`HandPose`] builds a full 21-point snapshot for any [`Gesture`] so that
//! the keyboard simulator (and the tests) can drive the pipeline without a
//! camera.  The template hand stands upright with the thumb out to the left;
//! every segment is close to axis-aligned, so any roll in ±45° keeps the
//! joint orderings the classifier looks at and the snapshot classifies back
//! to the gesture it was built from.
//!
//! The classifier ignores handedness, so both hands share one template.

use crate::classifier::Gesture;
use crate::landmark::{Handedness, Landmark, LandmarkPoint, LandmarkSnapshot, LANDMARK_COUNT};

/// Largest roll, either way, that preserves classification.
pub const MAX_ROLL_DEG: f64 = 45.0;

// Template geometry in hand units: wrist at the origin, y grows downward.
const PALM_CENTER: (f64, f64) = (0.0, -0.25);
const THUMB_CMC:   (f64, f64) = (-0.10, -0.08);
const THUMB_MCP:   (f64, f64) = (-0.20, -0.14);
const THUMB_OPEN:   [(f64, f64); 2] = [(-0.10, -0.04), (-0.10, -0.04)];
const THUMB_CLOSED: [(f64, f64); 2] = [( 0.08, -0.06), ( 0.08, -0.02)];
/// MCP position of index, middle, ring, pinky.
const FINGER_MCP: [(f64, f64); 4] = [(-0.12, -0.42), (-0.02, -0.45), (0.08, -0.43), (0.17, -0.38)];
const FINGER_OPEN:   [f64; 3] = [-0.18, -0.12, -0.10];
const FINGER_CLOSED: [f64; 3] = [-0.12,  0.06,  0.06];

// ════════════════════════════════════════════════════════════════════════════
// HandPose builder
// ════════════════════════════════════════════════════════════════════════════

/// Builder for a synthetic hand in a given pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandPose {
    handedness: Handedness,
    gesture:    Gesture,
    center:     (f64, f64),
    scale:      f64,
    roll_deg:   f64,
    spread:     f64,
}

impl HandPose {
    pub fn new(handedness: Handedness, gesture: Gesture) -> Self {
        HandPose {
            handedness,
            gesture,
            center:   (0.5, 0.55),
            scale:    0.3,
            roll_deg: 0.0,
            spread:   1.0,
        }
    }

    /// Place the palm centre at normalized `(x, y)`.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.center = (x, y);
        self
    }

    /// Hand height as a fraction of the frame (clamped to 0.05–1.0).
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale.clamp(0.05, 1.0);
        self
    }

    /// Rotate the whole hand about the wrist (clamped to ±[`MAX_ROLL_DEG`]).
    pub fn roll(mut self, degrees: f64) -> Self {
        self.roll_deg = degrees.clamp(-MAX_ROLL_DEG, MAX_ROLL_DEG);
        self
    }

    /// Length multiplier for the extended thumb and index segments
    /// (clamped to 0.1–2.0).  Small values bring the tips together.
    pub fn spread(mut self, spread: f64) -> Self {
        self.spread = spread.clamp(0.1, 2.0);
        self
    }

    pub fn gesture(&self) -> Gesture { self.gesture }

    /// Produce the snapshot.
    pub fn snapshot(&self) -> LandmarkSnapshot {
        let open = open_digits(self.gesture);
        let mut local = [(0.0, 0.0); LANDMARK_COUNT];

        // ── thumb ─────────────────────────────────────────────────────────
        local[Landmark::ThumbCmc.index()] = THUMB_CMC;
        local[Landmark::ThumbMcp.index()] = THUMB_MCP;
        let segs = if open[0] {
            THUMB_OPEN.map(|(x, y)| (x * self.spread, y * self.spread))
        } else {
            THUMB_CLOSED
        };
        let mut joint = THUMB_MCP;
        for (i, (dx, dy)) in segs.iter().enumerate() {
            joint = (joint.0 + dx, joint.1 + dy);
            local[Landmark::ThumbIp.index() + i] = joint;
        }

        // ── fingers ───────────────────────────────────────────────────────
        for (f, &mcp) in FINGER_MCP.iter().enumerate() {
            let first = Landmark::IndexMcp.index() + f * 4;
            local[first] = mcp;
            let mut joint = mcp;
            for (i, step) in finger_steps(open[f + 1], f == 0, self.spread).iter().enumerate() {
                joint = (joint.0, joint.1 + step);
                local[first + 1 + i] = joint;
            }
        }

        // ── roll about the wrist, then scale and place ────────────────────
        let (sin, cos) = self.roll_deg.to_radians().sin_cos();
        let rot = |(x, y): (f64, f64)| (x * cos - y * sin, x * sin + y * cos);
        let palm = rot(PALM_CENTER);

        let points = local.map(|p| {
            let (x, y) = rot(p);
            LandmarkPoint::new(
                self.center.0 + (x - palm.0) * self.scale,
                self.center.1 + (y - palm.1) * self.scale,
            )
        });
        LandmarkSnapshot::new(self.handedness, points)
    }
}

/// Which digits are extended for a gesture, thumb first.
fn open_digits(gesture: Gesture) -> [bool; 5] {
    match gesture {
        Gesture::Open   => [true,  true,  true,  true,  true ],
        Gesture::Close  => [false, false, false, false, false],
        Gesture::Zoom   => [true,  true,  false, false, false],
        Gesture::Rotate => [true,  true,  true,  false, false],
        Gesture::Draw   => [false, true,  false, false, false],
    }
}

fn finger_steps(open: bool, is_index: bool, spread: f64) -> [f64; 3] {
    match (open, is_index) {
        (true, true)  => FINGER_OPEN.map(|s| s * spread),
        (true, false) => FINGER_OPEN,
        (false, _)    => FINGER_CLOSED,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
