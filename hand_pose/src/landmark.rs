//! Hand landmark model.
//!
//! A detector reports each hand as 21 image-relative points in a fixed order
//! (wrist, then four joints per digit from the palm outward) plus a
//! handedness label.  Coordinates are fractions of the frame: `(0, 0)` is the
//! top-left corner, `(1, 1)` the bottom-right.

// ════════════════════════════════════════════════════════════════════════════
// Landmark — the 21 named skeletal points
// ════════════════════════════════════════════════════════════════════════════

/// Number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

/// The 21 hand landmarks, in detector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Landmark {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

impl Landmark {
    /// Every landmark, in detector order.
    pub const ALL: [Landmark; LANDMARK_COUNT] = [
        Landmark::Wrist,
        Landmark::ThumbCmc,  Landmark::ThumbMcp,  Landmark::ThumbIp,   Landmark::ThumbTip,
        Landmark::IndexMcp,  Landmark::IndexPip,  Landmark::IndexDip,  Landmark::IndexTip,
        Landmark::MiddleMcp, Landmark::MiddlePip, Landmark::MiddleDip, Landmark::MiddleTip,
        Landmark::RingMcp,   Landmark::RingPip,   Landmark::RingDip,   Landmark::RingTip,
        Landmark::PinkyMcp,  Landmark::PinkyPip,  Landmark::PinkyDip,  Landmark::PinkyTip,
    ];

    /// Position of this landmark in a snapshot (0–20).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Fingertips, thumb first.
    pub fn fingertips() -> [Landmark; 5] {
        [
            Landmark::ThumbTip,
            Landmark::IndexTip,
            Landmark::MiddleTip,
            Landmark::RingTip,
            Landmark::PinkyTip,
        ]
    }
}

/// Bone connections used to draw a hand skeleton.
pub const HAND_CONNECTIONS: [(Landmark, Landmark); 21] = [
    // thumb
    (Landmark::Wrist,     Landmark::ThumbCmc),
    (Landmark::ThumbCmc,  Landmark::ThumbMcp),
    (Landmark::ThumbMcp,  Landmark::ThumbIp),
    (Landmark::ThumbIp,   Landmark::ThumbTip),
    // index
    (Landmark::Wrist,     Landmark::IndexMcp),
    (Landmark::IndexMcp,  Landmark::IndexPip),
    (Landmark::IndexPip,  Landmark::IndexDip),
    (Landmark::IndexDip,  Landmark::IndexTip),
    // middle
    (Landmark::IndexMcp,  Landmark::MiddleMcp),
    (Landmark::MiddleMcp, Landmark::MiddlePip),
    (Landmark::MiddlePip, Landmark::MiddleDip),
    (Landmark::MiddleDip, Landmark::MiddleTip),
    // ring
    (Landmark::MiddleMcp, Landmark::RingMcp),
    (Landmark::RingMcp,   Landmark::RingPip),
    (Landmark::RingPip,   Landmark::RingDip),
    (Landmark::RingDip,   Landmark::RingTip),
    // pinky + palm edge
    (Landmark::RingMcp,   Landmark::PinkyMcp),
    (Landmark::PinkyMcp,  Landmark::PinkyPip),
    (Landmark::PinkyPip,  Landmark::PinkyDip),
    (Landmark::PinkyDip,  Landmark::PinkyTip),
    (Landmark::Wrist,     Landmark::PinkyMcp),
];

// ════════════════════════════════════════════════════════════════════════════
// Handedness
// ════════════════════════════════════════════════════════════════════════════

/// Which hand the detector says a snapshot belongs to.
///
/// A hand that was not detected this frame is `Option::<LandmarkSnapshot>::None`
/// at the call site, never a third variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Handedness::Left  => "left",
            Handedness::Right => "right",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkPoint
// ════════════════════════════════════════════════════════════════════════════

/// A normalized image-relative position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LandmarkPoint {
    pub x: f64,
    pub y: f64,
}

impl LandmarkPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        LandmarkPoint { x, y }
    }

    /// Scale into pixel space for a frame of the given size.
    pub fn to_pixels(self, size: FrameSize) -> (f64, f64) {
        (self.x * size.width as f64, self.y * size.height as f64)
    }
}

/// Width and height of the frame landmarks are projected onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width:  u32,
    pub height: u32,
}

impl FrameSize {
    pub const fn new(width: u32, height: u32) -> Self {
        FrameSize { width, height }
    }

    /// Centre of the frame in pixels.
    pub fn center(self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSnapshot — one hand, one frame
// ════════════════════════════════════════════════════════════════════════════

/// One detected hand: 21 points and its handedness.
///
/// Snapshots live for a single frame.  The detector re-identifies hands every
/// frame, so nothing here carries identity across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSnapshot {
    pub handedness: Handedness,
    points: [LandmarkPoint; LANDMARK_COUNT],
}

impl LandmarkSnapshot {
    pub fn new(handedness: Handedness, points: [LandmarkPoint; LANDMARK_COUNT]) -> Self {
        LandmarkSnapshot { handedness, points }
    }

    /// Build from a slice in detector order.  Returns `None` unless the slice
    /// holds exactly 21 points.
    pub fn from_slice(handedness: Handedness, points: &[LandmarkPoint]) -> Option<Self> {
        let points: [LandmarkPoint; LANDMARK_COUNT] = points.try_into().ok()?;
        Some(LandmarkSnapshot { handedness, points })
    }

    pub fn point(&self, landmark: Landmark) -> LandmarkPoint {
        self.points[landmark.index()]
    }

    pub fn points(&self) -> &[LandmarkPoint; LANDMARK_COUNT] {
        &self.points
    }

    /// Replace a single landmark.
    pub fn with_point(mut self, landmark: Landmark, point: LandmarkPoint) -> Self {
        self.points[landmark.index()] = point;
        self
    }

    /// Landmark position in pixels for a frame of `size`.
    pub fn pixel(&self, landmark: Landmark, size: FrameSize) -> (f64, f64) {
        self.point(landmark).to_pixels(size)
    }

    /// Euclidean pixel distance between two landmarks.
    pub fn pixel_distance(&self, a: Landmark, b: Landmark, size: FrameSize) -> f64 {
        let (ax, ay) = self.pixel(a, size);
        let (bx, by) = self.pixel(b, size);
        (bx - ax).hypot(by - ay)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landmark_order_matches_detector() {
        assert_eq!(Landmark::Wrist.index(), 0);
        assert_eq!(Landmark::ThumbTip.index(), 4);
        assert_eq!(Landmark::IndexTip.index(), 8);
        assert_eq!(Landmark::MiddleTip.index(), 12);
        assert_eq!(Landmark::PinkyTip.index(), 20);
        for (i, l) in Landmark::ALL.iter().enumerate() {
            assert_eq!(l.index(), i);
        }
    }

    #[test]
    fn from_slice_requires_21_points() {
        let pts = vec![LandmarkPoint::default(); 20];
        assert!(LandmarkSnapshot::from_slice(Handedness::Left, &pts).is_none());
        let pts = vec![LandmarkPoint::default(); 21];
        assert!(LandmarkSnapshot::from_slice(Handedness::Left, &pts).is_some());
    }

    #[test]
    fn pixel_distance_scales_each_axis() {
        let snap = LandmarkSnapshot::new(Handedness::Right, [LandmarkPoint::default(); LANDMARK_COUNT])
            .with_point(Landmark::ThumbTip, LandmarkPoint::new(0.0, 0.0))
            .with_point(Landmark::IndexTip, LandmarkPoint::new(0.5, 0.5));
        let size = FrameSize::new(60, 80);
        // (30, 40) → 50 px
        let d = snap.pixel_distance(Landmark::ThumbTip, Landmark::IndexTip, size);
        assert!((d - 50.0).abs() < 1e-9);
    }

    #[test]
    fn connections_reference_every_landmark() {
        for l in Landmark::ALL {
            assert!(
                HAND_CONNECTIONS.iter().any(|(a, b)| *a == l || *b == l),
                "{:?} is not connected", l
            );
        }
    }
}
