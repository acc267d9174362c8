//! Landmark detection from LeapMotion hardware or keyboard/mouse simulation.
//!
//! The public interface is the [`LandmarkDetector`] trait.  The orchestrator
//! doesn't need to know whether hands came from real hardware or from the
//! simulator; both hand back plain [`LandmarkSnapshot`]s once per frame.

use std::sync::mpsc::{Receiver, TryRecvError};

use hand_pose::{Gesture, HandPose, Handedness, LandmarkSnapshot, MAX_ROLL_DEG};

use crate::raster::Frame;

// ════════════════════════════════════════════════════════════════════════════
// LandmarkDetector trait — unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can report the hands visible in a frame.
///
/// Returns zero, one or two snapshots.  Hand identity is not stable across
/// calls; callers only rely on each snapshot's handedness.
pub trait LandmarkDetector {
    fn detect(&mut self, frame: &Frame) -> Vec<LandmarkSnapshot>;
}

// ════════════════════════════════════════════════════════════════════════════
// LeapDetector — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Detector backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
///
/// # Projection
///
/// The Leap skeleton is 3-D in millimetres above the device.  Each joint is
/// dropped onto the x/y plane and normalized: x from ±`HALF_WIDTH_MM` to
/// [0, 1], height from `FLOOR_MM`..`CEILING_MM` to [1, 0] (image y grows
/// downward).  The thumb's Leap metacarpal has zero length, so its
/// proximal/intermediate/distal bones stand in for CMC→MCP→IP→TIP.
#[cfg(feature = "leap")]
pub struct LeapDetector {
    connection: leaprs::Connection,
}

#[cfg(feature = "leap")]
impl LeapDetector {
    const POLL_MS:       u32 = 10;
    const HALF_WIDTH_MM: f32 = 200.0;
    const FLOOR_MM:      f32 = 50.0;
    const CEILING_MM:    f32 = 500.0;

    pub fn open() -> Result<Self, String> {
        use leaprs::*;

        let mut connection = Connection::create(ConnectionConfig::default())
            .map_err(|e| format!("failed to create LeapC connection: {:?}", e))?;
        connection.open()
            .map_err(|e| format!("failed to open LeapMotion device: {:?}", e))?;
        log::info!("LeapMotion connection open");
        Ok(LeapDetector { connection })
    }

    fn project(x: f32, y: f32) -> hand_pose::LandmarkPoint {
        hand_pose::LandmarkPoint::new(
            ((x + Self::HALF_WIDTH_MM) / (2.0 * Self::HALF_WIDTH_MM)) as f64,
            (1.0 - (y - Self::FLOOR_MM) / (Self::CEILING_MM - Self::FLOOR_MM)) as f64,
        )
    }

    fn snapshot(hand: &leaprs::Hand) -> Option<LandmarkSnapshot> {
        use leaprs::HandType;

        let digits: Vec<_> = hand.digits().collect();
        if digits.len() < 5 { return None; }

        let mut points = Vec::with_capacity(hand_pose::LANDMARK_COUNT);
        let wrist = digits[2].metacarpal().prev_joint();
        points.push(Self::project(wrist.x, wrist.y));
        // Thumb yields CMC, MCP, IP, TIP; fingers MCP, PIP, DIP, TIP.
        for d in digits.iter().take(5) {
            let joints = [
                d.proximal().prev_joint(),
                d.intermediate().prev_joint(),
                d.distal().prev_joint(),
                d.distal().next_joint(),
            ];
            for j in &joints {
                points.push(Self::project(j.x, j.y));
            }
        }

        let handedness = if hand.hand_type() == HandType::Left {
            Handedness::Left
        } else {
            Handedness::Right
        };
        LandmarkSnapshot::from_slice(handedness, &points)
    }
}

#[cfg(feature = "leap")]
impl LandmarkDetector for LeapDetector {
    fn detect(&mut self, _frame: &Frame) -> Vec<LandmarkSnapshot> {
        use leaprs::Event;

        let msg = match self.connection.poll(Self::POLL_MS) {
            Ok(m)  => m,
            Err(_) => return Vec::new(),
        };
        match msg.event() {
            Event::Tracking(frame) => {
                let hands: Vec<_> = frame.hands().collect();
                hands.iter().filter_map(Self::snapshot).take(2).collect()
            }
            _ => Vec::new(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimDetector — keyboard/mouse simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Debug, PartialEq)]
pub enum SimInput {
    KeyDown(SimKey),
    /// Cursor position, normalized to the video area.
    Cursor { x: f64, y: f64 },
    /// Scroll wheel movement, positive away from the user.
    Scroll(f32),
}

/// Simulated key codes (mapped from minifb Key).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimKey {
    RightPose(Gesture), // 1–5
    ToggleLeftFist,     // L
    ToggleLeftHand,     // H
    ToggleRightHand,    // J
}

/// Scroll step for pinch spread and roll.
const SPREAD_PER_NOTCH: f64 = 0.05;
const ROLL_PER_NOTCH:   f64 = 3.0;

/// Current state of the two simulated hands.
#[derive(Debug, Clone, PartialEq)]
pub struct SimHands {
    pub left_visible:  bool,
    pub left_fist:     bool,
    pub right_visible: bool,
    pub right_pose:    Gesture,
    pub cursor:        (f64, f64),
    pub spread:        f64,
    pub roll:          f64,
}

impl Default for SimHands {
    fn default() -> Self {
        SimHands {
            left_visible:  true,
            left_fist:     false,
            right_visible: true,
            right_pose:    Gesture::Open,
            cursor:        (0.65, 0.55),
            spread:        1.0,
            roll:          0.0,
        }
    }
}

impl SimHands {
    pub fn apply(&mut self, input: SimInput) {
        match input {
            SimInput::KeyDown(SimKey::RightPose(g))    => self.right_pose = g,
            SimInput::KeyDown(SimKey::ToggleLeftFist)  => self.left_fist = !self.left_fist,
            SimInput::KeyDown(SimKey::ToggleLeftHand)  => self.left_visible = !self.left_visible,
            SimInput::KeyDown(SimKey::ToggleRightHand) => self.right_visible = !self.right_visible,
            SimInput::Cursor { x, y } => self.cursor = (x.clamp(0.0, 1.0), y.clamp(0.0, 1.0)),
            SimInput::Scroll(notches) => match self.right_pose {
                Gesture::Zoom => {
                    self.spread = (self.spread + notches as f64 * SPREAD_PER_NOTCH).clamp(0.1, 2.0);
                }
                Gesture::Rotate => {
                    self.roll = (self.roll + notches as f64 * ROLL_PER_NOTCH)
                        .clamp(-MAX_ROLL_DEG, MAX_ROLL_DEG);
                }
                _ => {}
            },
        }
    }

    /// The hands as a detector would report them, left first.
    pub fn snapshots(&self) -> Vec<LandmarkSnapshot> {
        let mut hands = Vec::with_capacity(2);
        if self.left_visible {
            let g = if self.left_fist { Gesture::Close } else { Gesture::Open };
            hands.push(HandPose::new(Handedness::Left, g).at(0.2, 0.6).scale(0.28).snapshot());
        }
        if self.right_visible {
            hands.push(
                HandPose::new(Handedness::Right, self.right_pose)
                    .at(self.cursor.0, self.cursor.1)
                    .scale(0.28)
                    .spread(self.spread)
                    .roll(self.roll)
                    .snapshot(),
            );
        }
        hands
    }
}

/// Detector driven by [`SimInput`] events from the visualizer's window.
///
/// Input is queued on a channel and drained at the start of every `detect`
/// call, on the caller's thread.
pub struct SimDetector {
    rx:    Receiver<SimInput>,
    hands: SimHands,
}

impl SimDetector {
    pub fn new(rx: Receiver<SimInput>) -> Self {
        SimDetector { rx, hands: SimHands::default() }
    }

    pub fn hands(&self) -> &SimHands { &self.hands }
}

impl LandmarkDetector for SimDetector {
    fn detect(&mut self, _frame: &Frame) -> Vec<LandmarkSnapshot> {
        loop {
            match self.rx.try_recv() {
                Ok(input) => self.hands.apply(input),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        self.hands.snapshots()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_pose::{classify, Landmark};
    use std::sync::mpsc;

    fn blank() -> Frame { Frame::new(8, 8, 0xFF000000) }

    #[test]
    fn default_sim_reports_two_open_hands() {
        let (_tx, rx) = mpsc::channel();
        let mut det = SimDetector::new(rx);
        let hands = det.detect(&blank());
        assert_eq!(hands.len(), 2);
        assert_eq!(hands[0].handedness, Handedness::Left);
        assert_eq!(hands[1].handedness, Handedness::Right);
        assert!(hands.iter().all(|h| classify(h) == Gesture::Open));
    }

    #[test]
    fn keys_drive_poses() {
        let (tx, rx) = mpsc::channel();
        let mut det = SimDetector::new(rx);
        tx.send(SimInput::KeyDown(SimKey::ToggleLeftFist)).unwrap();
        tx.send(SimInput::KeyDown(SimKey::RightPose(Gesture::Draw))).unwrap();
        let hands = det.detect(&blank());
        assert_eq!(classify(&hands[0]), Gesture::Close);
        assert_eq!(classify(&hands[1]), Gesture::Draw);
    }

    #[test]
    fn hiding_hands() {
        let (tx, rx) = mpsc::channel();
        let mut det = SimDetector::new(rx);
        tx.send(SimInput::KeyDown(SimKey::ToggleLeftHand)).unwrap();
        let hands = det.detect(&blank());
        assert_eq!(hands.len(), 1);
        assert_eq!(hands[0].handedness, Handedness::Right);
        tx.send(SimInput::KeyDown(SimKey::ToggleRightHand)).unwrap();
        assert!(det.detect(&blank()).is_empty());
    }

    #[test]
    fn cursor_moves_right_hand() {
        let (tx, rx) = mpsc::channel();
        let mut det = SimDetector::new(rx);
        let before = det.detect(&blank())[1].point(Landmark::Wrist);
        tx.send(SimInput::Cursor { x: 0.3, y: 0.4 }).unwrap();
        let after = det.detect(&blank())[1].point(Landmark::Wrist);
        assert!(after.x < before.x);
        assert!(after.y < before.y);
    }

    #[test]
    fn scroll_adjusts_active_pose_only() {
        let mut hands = SimHands::default();
        hands.apply(SimInput::Scroll(4.0));
        assert_eq!(hands.spread, 1.0);
        assert_eq!(hands.roll, 0.0);

        hands.apply(SimInput::KeyDown(SimKey::RightPose(Gesture::Zoom)));
        hands.apply(SimInput::Scroll(-4.0));
        assert!((hands.spread - 0.8).abs() < 1e-9);

        hands.apply(SimInput::KeyDown(SimKey::RightPose(Gesture::Rotate)));
        for _ in 0..100 { hands.apply(SimInput::Scroll(1.0)); }
        assert_eq!(hands.roll, MAX_ROLL_DEG);
    }

    #[test]
    fn sim_survives_closed_channel() {
        let (tx, rx) = mpsc::channel::<SimInput>();
        drop(tx);
        let mut det = SimDetector::new(rx);
        assert_eq!(det.detect(&blank()).len(), 2);
        assert!(det.hands().left_visible);
    }
}
