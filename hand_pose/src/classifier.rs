//! Gesture classification from a single hand snapshot.
//!
//! Each digit is judged open or closed from the ordering of three joints
//! along one image axis: the thumb folds sideways (x), the four fingers fold
//! downward (y).  The five open/closed flags are then matched against a
//! fixed precedence table.  Everything here is pure.

use crate::landmark::{Landmark, LandmarkSnapshot};

// ════════════════════════════════════════════════════════════════════════════
// Gesture
// ════════════════════════════════════════════════════════════════════════════

/// The pose taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// Anything not matched by the other four.
    Open,
    /// Fist, every digit closed.  On the left hand this unlocks editing.
    Close,
    /// Thumb and index extended (pinch).
    Zoom,
    /// Thumb, index and middle extended.
    Rotate,
    /// Only the index extended.
    Draw,
}

impl Gesture {
    pub const ALL: [Gesture; 5] = [
        Gesture::Open,
        Gesture::Close,
        Gesture::Zoom,
        Gesture::Rotate,
        Gesture::Draw,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Gesture::Open   => "open",
            Gesture::Close  => "close",
            Gesture::Zoom   => "zoom",
            Gesture::Rotate => "rotate",
            Gesture::Draw   => "draw",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Finger state
// ════════════════════════════════════════════════════════════════════════════

/// Closed-ness of one digit from three joint coordinates on its tracked axis.
///
/// Open only when the coordinates strictly decrease from `proximal` to
/// `distal`.  Every other ordering, ties included, counts as closed.
pub fn is_finger_closed(proximal: f64, middle: f64, distal: f64) -> bool {
    !(middle < proximal && distal < middle)
}

/// Closed flag for each digit of one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerStates {
    pub thumb:  bool,
    pub index:  bool,
    pub middle: bool,
    pub ring:   bool,
    pub pinky:  bool,
}

impl FingerStates {
    pub fn of(snapshot: &LandmarkSnapshot) -> Self {
        let x = |l: Landmark| snapshot.point(l).x;
        let y = |l: Landmark| snapshot.point(l).y;

        FingerStates {
            thumb:  is_finger_closed(x(Landmark::ThumbMcp),  x(Landmark::ThumbIp),   x(Landmark::ThumbTip)),
            index:  is_finger_closed(y(Landmark::IndexPip),  y(Landmark::IndexDip),  y(Landmark::IndexTip)),
            middle: is_finger_closed(y(Landmark::MiddlePip), y(Landmark::MiddleDip), y(Landmark::MiddleTip)),
            ring:   is_finger_closed(y(Landmark::RingPip),   y(Landmark::RingDip),   y(Landmark::RingTip)),
            pinky:  is_finger_closed(y(Landmark::PinkyPip),  y(Landmark::PinkyDip),  y(Landmark::PinkyTip)),
        }
    }

    /// Apply the precedence table; the first matching row wins.
    pub fn gesture(&self) -> Gesture {
        let FingerStates { thumb, index, middle, ring, pinky } = *self;
        match (thumb, index, middle, ring, pinky) {
            (true,  true,  true,  true,  true) => Gesture::Close,
            (false, false, true,  true,  true) => Gesture::Zoom,
            (false, false, false, true,  true) => Gesture::Rotate,
            (true,  false, true,  true,  true) => Gesture::Draw,
            // Intentional default: any other combination is an open hand.
            _ => Gesture::Open,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Public operations
// ════════════════════════════════════════════════════════════════════════════

/// Classify one hand.  Never fails; unmatched poses are [`Gesture::Open`].
pub fn classify(snapshot: &LandmarkSnapshot) -> Gesture {
    FingerStates::of(snapshot).gesture()
}

/// Angle in degrees, in (−180, 180], of the vector from the middle fingertip
/// to the thumb IP joint, in normalized image coordinates.
pub fn angle(snapshot: &LandmarkSnapshot) -> f64 {
    let thumb  = snapshot.point(Landmark::ThumbIp);
    let middle = snapshot.point(Landmark::MiddleTip);
    (thumb.y - middle.y).atan2(thumb.x - middle.x).to_degrees()
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
