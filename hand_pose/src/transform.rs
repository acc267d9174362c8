//! The transform controller.
//!
//! `TransformController` turns successive right-hand readings into
//! incremental image transforms.  Continuous gestures (pinch-zoom, rotate)
//! work on deltas against the previous frame's *baseline*; the first frame of
//! a gesture only records the baseline.  Drawing appends to a path that is
//! replayed onto every frame.
//!
//! The controller never touches pixels itself: it drives a [`Raster`], so the
//! same logic runs against the real frame buffer and against test doubles.

use crate::classifier::{angle, classify, Gesture};
use crate::landmark::{FrameSize, Landmark, LandmarkSnapshot};

/// Upper bound of the zoom level (percent inset per side).
pub const MAX_ZOOM: f64 = 49.0;

// ════════════════════════════════════════════════════════════════════════════
// Raster — what the controller needs from a frame buffer
// ════════════════════════════════════════════════════════════════════════════

/// Pixel operations the controller issues.  Implementations clip anything
/// out of bounds and never fail.
pub trait Raster {
    fn size(&self) -> FrameSize;

    /// Crop `inset_pct` percent off every side around the centre, then
    /// resize back to the original size.  `0.0` leaves the frame untouched.
    fn crop_and_resize(&mut self, inset_pct: f64);

    /// Rotate about `center` (pixels) by `degrees`, counter-clockwise as
    /// seen on screen.  Output keeps the input size; corners clip.
    fn rotate(&mut self, center: (f64, f64), degrees: f64);

    /// Filled disc, ARGB color.
    fn fill_circle(&mut self, center: (i32, i32), radius: u32, color: u32);
}

// ════════════════════════════════════════════════════════════════════════════
// TransformCommand
// ════════════════════════════════════════════════════════════════════════════

/// What one frame's right-hand reading asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformCommand {
    /// No visible change this frame.
    Idle,
    /// Change the zoom level by `delta` (positive zooms in).
    Zoom { delta: f64 },
    /// Rotate by whole degrees.
    Rotate { degrees: i32 },
    /// A point was appended to the draw path.
    AppendPoint { x: i32, y: i32 },
}

// ════════════════════════════════════════════════════════════════════════════
// ControllerConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    /// Pinch distance (px) is divided by this to get the zoom factor.
    pub pinch_divisor: f64,
    /// Zoom ceiling; clamped into `[0, MAX_ZOOM]`.
    pub max_zoom:      f64,
    pub marker_radius: u32,
    pub marker_color:  u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        ControllerConfig {
            pinch_divisor: 5.0,
            max_zoom:      MAX_ZOOM,
            marker_radius: 8,
            marker_color:  0xFFFF00FF,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TransformController
// ════════════════════════════════════════════════════════════════════════════

/// Owns all transform state for one session.
#[derive(Debug, Clone)]
pub struct TransformController {
    config:     ControllerConfig,
    zoom_level: f64,
    last_pinch: Option<f64>,
    last_angle: Option<f64>,
    draw_path:  Vec<(i32, i32)>,
}

impl Default for TransformController {
    fn default() -> Self {
        TransformController::new(ControllerConfig::default())
    }
}

impl TransformController {
    pub fn new(mut config: ControllerConfig) -> Self {
        if !config.max_zoom.is_finite() {
            log::warn!("max zoom {} is not finite, using {}", config.max_zoom, MAX_ZOOM);
            config.max_zoom = MAX_ZOOM;
        }
        config.max_zoom = config.max_zoom.clamp(0.0, MAX_ZOOM);
        if !(config.pinch_divisor > 0.0) {
            log::warn!("pinch divisor {} is not positive, using 5", config.pinch_divisor);
            config.pinch_divisor = 5.0;
        }
        TransformController {
            config,
            zoom_level: 0.0,
            last_pinch: None,
            last_angle: None,
            draw_path:  Vec::new(),
        }
    }

    // ── per-frame decision ────────────────────────────────────────────────

    /// Decide this frame's command from the right hand.
    ///
    /// `editable` is this frame's edit-lock state.  Baselines are dropped
    /// whenever the lock is closed or the gesture they belong to is not held.
    pub fn step(
        &mut self,
        right:    &LandmarkSnapshot,
        editable: bool,
        size:     FrameSize,
    ) -> TransformCommand {
        if !editable {
            self.reset_baselines();
            return TransformCommand::Idle;
        }

        let command = match classify(right) {
            Gesture::Zoom => {
                self.last_angle = None;
                self.step_zoom(right, size)
            }
            Gesture::Rotate => {
                self.last_pinch = None;
                self.step_rotate(right)
            }
            Gesture::Draw => {
                self.reset_baselines();
                let (x, y) = right.pixel(Landmark::IndexTip, size);
                let (x, y) = (x as i32, y as i32);
                self.draw_path.push((x, y));
                TransformCommand::AppendPoint { x, y }
            }
            Gesture::Open | Gesture::Close => {
                self.reset_baselines();
                TransformCommand::Idle
            }
        };
        log::trace!("transform step → {:?}", command);
        command
    }

    /// The right hand was not detected this frame.
    pub fn release(&mut self) {
        self.reset_baselines();
    }

    fn step_zoom(&mut self, right: &LandmarkSnapshot, size: FrameSize) -> TransformCommand {
        let dist   = right.pixel_distance(Landmark::ThumbTip, Landmark::IndexTip, size);
        let factor = dist / self.config.pinch_divisor;
        let command = match self.last_pinch {
            None => {
                log::debug!("pinch baseline set at {:.2}", factor);
                TransformCommand::Idle
            }
            Some(last) => TransformCommand::Zoom { delta: last - factor },
        };
        self.last_pinch = Some(factor);
        command
    }

    fn step_rotate(&mut self, right: &LandmarkSnapshot) -> TransformCommand {
        let current = angle(right);
        let command = match self.last_angle {
            None => {
                log::debug!("rotation baseline set at {:.1}°", current);
                TransformCommand::Idle
            }
            // Whole-degree steps: both angles are truncated before subtracting.
            Some(last) => TransformCommand::Rotate {
                degrees: last.trunc() as i32 - current.trunc() as i32,
            },
        };
        self.last_angle = Some(current);
        command
    }

    fn reset_baselines(&mut self) {
        if self.last_pinch.is_some() || self.last_angle.is_some() {
            log::debug!("baselines reset");
        }
        self.last_pinch = None;
        self.last_angle = None;
    }

    // ── applying to a frame ───────────────────────────────────────────────

    /// Execute `command` on `frame`, then replay the draw path.
    pub fn apply<R: Raster + ?Sized>(&mut self, frame: &mut R, command: TransformCommand) {
        match command {
            TransformCommand::Zoom { delta }     => self.apply_zoom(frame, delta),
            TransformCommand::Rotate { degrees } => self.apply_rotate(frame, degrees as f64),
            TransformCommand::AppendPoint { .. } | TransformCommand::Idle => {}
        }
        self.apply_draw(frame);
    }

    /// Move the zoom level by `delta` (clamped) and crop to it.
    pub fn apply_zoom<R: Raster + ?Sized>(&mut self, frame: &mut R, delta: f64) {
        self.zoom_level = (self.zoom_level + delta).clamp(0.0, self.config.max_zoom);
        frame.crop_and_resize(self.zoom_level);
    }

    /// Rotate about the frame centre.
    pub fn apply_rotate<R: Raster + ?Sized>(&self, frame: &mut R, degrees: f64) {
        let center = frame.size().center();
        frame.rotate(center, degrees);
    }

    /// Stamp a marker at every path point, oldest first.
    pub fn apply_draw<R: Raster + ?Sized>(&self, frame: &mut R) {
        for &point in &self.draw_path {
            frame.fill_circle(point, self.config.marker_radius, self.config.marker_color);
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    /// Accumulated zoom in `[0, max_zoom]`.  Pinch deltas are fractional and
    /// the level keeps the fraction; only the crop radius is truncated.
    pub fn zoom_level(&self)  -> f64               { self.zoom_level }
    pub fn last_pinch(&self)  -> Option<f64>       { self.last_pinch }
    pub fn last_angle(&self)  -> Option<f64>       { self.last_angle }
    pub fn draw_path(&self)   -> &[(i32, i32)]     { &self.draw_path }
    pub fn config(&self)      -> &ControllerConfig { &self.config }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{Handedness, LandmarkPoint};
    use crate::pose::HandPose;

    const SIZE: FrameSize = FrameSize::new(1000, 1000);

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Crop(f64),
        Rotate((f64, f64), f64),
        Circle((i32, i32)),
    }

    struct RecordingRaster {
        size:  FrameSize,
        calls: Vec<Call>,
    }

    impl RecordingRaster {
        fn new(size: FrameSize) -> Self { RecordingRaster { size, calls: Vec::new() } }
    }

    impl Raster for RecordingRaster {
        fn size(&self) -> FrameSize { self.size }
        fn crop_and_resize(&mut self, inset_pct: f64) { self.calls.push(Call::Crop(inset_pct)); }
        fn rotate(&mut self, center: (f64, f64), degrees: f64) {
            self.calls.push(Call::Rotate(center, degrees));
        }
        fn fill_circle(&mut self, center: (i32, i32), _radius: u32, _color: u32) {
            self.calls.push(Call::Circle(center));
        }
    }

    fn hand(g: Gesture) -> LandmarkSnapshot {
        HandPose::new(Handedness::Right, g).snapshot()
    }

    /// Zoom pose whose thumb-to-index distance is `px` on a 1000×1000 frame.
    fn pinch(px: f64) -> LandmarkSnapshot {
        hand(Gesture::Zoom)
            .with_point(Landmark::ThumbMcp, LandmarkPoint::new(0.60, 0.45))
            .with_point(Landmark::ThumbIp,  LandmarkPoint::new(0.55, 0.42))
            .with_point(Landmark::ThumbTip, LandmarkPoint::new(0.50, 0.40))
            .with_point(Landmark::IndexPip, LandmarkPoint::new(0.50, 0.50))
            .with_point(Landmark::IndexDip, LandmarkPoint::new(0.50, 0.45))
            .with_point(Landmark::IndexTip, LandmarkPoint::new(0.50, 0.40 - px / 1000.0))
    }

    /// Rotate pose whose thumb-IP / middle-tip angle is `deg`.
    fn twist(deg: f64) -> LandmarkSnapshot {
        let base = hand(Gesture::Rotate);
        let mid  = base.point(Landmark::MiddleTip);
        let (s, c) = deg.to_radians().sin_cos();
        let ip = LandmarkPoint::new(mid.x + 0.2 * c, mid.y + 0.2 * s);
        base.with_point(Landmark::ThumbMcp, LandmarkPoint::new(ip.x + 0.05, ip.y))
            .with_point(Landmark::ThumbIp,  ip)
            .with_point(Landmark::ThumbTip, LandmarkPoint::new(ip.x - 0.05, ip.y))
    }

    fn approx(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

    #[test]
    fn helpers_classify() {
        assert_eq!(classify(&pinch(100.0)), Gesture::Zoom);
        assert_eq!(classify(&twist(10.5)), Gesture::Rotate);
        assert!((angle(&twist(10.5)) - 10.5).abs() < 1e-9);
    }

    #[test]
    fn zoom_level_clamps() {
        let mut ctl = TransformController::default();
        let mut frame = RecordingRaster::new(SIZE);
        ctl.apply_zoom(&mut frame, 1000.0);
        assert_eq!(ctl.zoom_level(), 49.0);
        ctl.apply_zoom(&mut frame, -1000.0);
        assert_eq!(ctl.zoom_level(), 0.0);
        for delta in [3.5, -10.0, 20.0, 40.0, -7.25, 100.0, -0.5] {
            ctl.apply_zoom(&mut frame, delta);
            assert!((0.0..=49.0).contains(&ctl.zoom_level()));
        }
        assert_eq!(frame.calls.len(), 9);
    }

    #[test]
    fn first_pinch_frame_only_sets_baseline() {
        let mut ctl = TransformController::default();
        assert_eq!(ctl.step(&pinch(100.0), true, SIZE), TransformCommand::Idle);
        assert!(ctl.last_pinch().is_some());
        match ctl.step(&pinch(100.0), true, SIZE) {
            TransformCommand::Zoom { delta } => assert!(approx(delta, 0.0)),
            other => panic!("expected zoom, got {:?}", other),
        }
    }

    #[test]
    fn closing_the_lock_drops_baselines() {
        let mut ctl = TransformController::default();
        ctl.step(&pinch(100.0), true, SIZE);
        ctl.step(&pinch(90.0), true, SIZE);
        assert_eq!(ctl.step(&pinch(80.0), false, SIZE), TransformCommand::Idle);
        assert_eq!(ctl.last_pinch(), None);
        assert_eq!(ctl.last_angle(), None);
        // Re-entering needs a fresh baseline frame.
        assert_eq!(ctl.step(&pinch(50.0), true, SIZE), TransformCommand::Idle);
        assert!(matches!(ctl.step(&pinch(40.0), true, SIZE), TransformCommand::Zoom { .. }));
    }

    #[test]
    fn other_gestures_drop_baselines() {
        let mut ctl = TransformController::default();
        ctl.step(&twist(10.5), true, SIZE);
        assert!(ctl.last_angle().is_some());
        ctl.step(&pinch(100.0), true, SIZE);
        assert_eq!(ctl.last_angle(), None);
        assert!(ctl.last_pinch().is_some());
        ctl.step(&twist(10.5), true, SIZE);
        assert_eq!(ctl.last_pinch(), None);
        ctl.step(&hand(Gesture::Draw), true, SIZE);
        assert_eq!(ctl.last_angle(), None);

        ctl.step(&pinch(100.0), true, SIZE);
        ctl.release();
        assert_eq!(ctl.last_pinch(), None);
    }

    #[test]
    fn draw_path_only_grows_on_draw() {
        let mut ctl = TransformController::default();
        let seq = [
            Gesture::Draw, Gesture::Zoom, Gesture::Draw, Gesture::Rotate,
            Gesture::Open, Gesture::Close, Gesture::Draw,
        ];
        let mut expected = 0;
        for g in seq {
            let before = ctl.draw_path().len();
            let cmd = ctl.step(&hand(g), true, SIZE);
            if g == Gesture::Draw {
                expected += 1;
                assert!(matches!(cmd, TransformCommand::AppendPoint { .. }));
            }
            assert!(ctl.draw_path().len() >= before);
            assert_eq!(ctl.draw_path().len(), expected);
        }
        // Locked frames never draw.
        ctl.step(&hand(Gesture::Draw), false, SIZE);
        assert_eq!(ctl.draw_path().len(), expected);
    }

    #[test]
    fn draw_point_is_index_tip_in_pixels() {
        let mut ctl = TransformController::default();
        let snap = hand(Gesture::Draw);
        let tip = snap.point(Landmark::IndexTip);
        let cmd = ctl.step(&snap, true, FrameSize::new(640, 480));
        let (x, y) = ((tip.x * 640.0) as i32, (tip.y * 480.0) as i32);
        assert_eq!(cmd, TransformCommand::AppendPoint { x, y });
        assert_eq!(ctl.draw_path(), &[(x, y)]);
    }

    #[test]
    fn pinch_scenario_zooms_to_eight() {
        let mut ctl = TransformController::default();
        let mut frame = RecordingRaster::new(SIZE);
        let mut deltas = Vec::new();
        for px in [100.0, 80.0, 60.0] {
            let cmd = ctl.step(&pinch(px), true, SIZE);
            if let TransformCommand::Zoom { delta } = cmd { deltas.push(delta); }
            ctl.apply(&mut frame, cmd);
        }
        assert_eq!(deltas.len(), 2);
        assert!(approx(deltas[0], 4.0));
        assert!(approx(deltas[1], 4.0));
        assert!(approx(ctl.zoom_level(), 8.0));
        assert!(approx(ctl.last_pinch().unwrap_or_default(), 12.0));
    }

    #[test]
    fn spreading_zooms_out() {
        let mut ctl = TransformController::default();
        ctl.step(&pinch(60.0), true, SIZE);
        match ctl.step(&pinch(110.0), true, SIZE) {
            TransformCommand::Zoom { delta } => assert!(approx(delta, -10.0)),
            other => panic!("expected zoom, got {:?}", other),
        }
    }

    #[test]
    fn rotate_scenario() {
        let mut ctl = TransformController::default();
        assert_eq!(ctl.step(&twist(10.5), true, SIZE), TransformCommand::Idle);
        assert_eq!(ctl.step(&twist(25.5), true, SIZE), TransformCommand::Rotate { degrees: -15 });
        assert_eq!(ctl.step(&hand(Gesture::Open), true, SIZE), TransformCommand::Idle);
        assert_eq!(ctl.last_angle(), None);
    }

    #[test]
    fn rotation_truncates_before_subtracting() {
        let mut ctl = TransformController::default();
        ctl.step(&twist(10.9), true, SIZE);
        // trunc(10.9) − trunc(11.1) = 10 − 11
        assert_eq!(ctl.step(&twist(11.1), true, SIZE), TransformCommand::Rotate { degrees: -1 });
        // trunc(11.1) − trunc(11.8) = 0 even though the hand moved
        assert_eq!(ctl.step(&twist(11.8), true, SIZE), TransformCommand::Rotate { degrees: 0 });
    }

    #[test]
    fn apply_dispatches_then_replays_path() {
        let mut ctl = TransformController::default();
        let mut frame = RecordingRaster::new(FrameSize::new(640, 480));
        ctl.step(&hand(Gesture::Draw), true, SIZE);
        ctl.step(&hand(Gesture::Draw).with_point(Landmark::IndexTip, LandmarkPoint::new(0.1, 0.1)), true, SIZE);

        ctl.apply(&mut frame, TransformCommand::Rotate { degrees: 7 });
        let first  = Call::Circle(ctl.draw_path()[0]);
        let second = Call::Circle(ctl.draw_path()[1]);
        assert_eq!(frame.calls, vec![Call::Rotate((320.0, 240.0), 7.0), first.clone(), second.clone()]);

        // The whole history is redrawn on idle frames too.
        frame.calls.clear();
        ctl.apply(&mut frame, TransformCommand::Idle);
        assert_eq!(frame.calls, vec![first, second]);
    }

    #[test]
    fn config_is_sanitised() {
        let ctl = TransformController::new(ControllerConfig {
            pinch_divisor: 0.0,
            max_zoom:      80.0,
            ..ControllerConfig::default()
        });
        assert_eq!(ctl.config().pinch_divisor, 5.0);
        assert_eq!(ctl.config().max_zoom, MAX_ZOOM);
    }

    #[test]
    fn non_finite_max_zoom_falls_back_and_zoom_still_works() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut ctl = TransformController::new(ControllerConfig {
                max_zoom: bad,
                ..ControllerConfig::default()
            });
            assert_eq!(ctl.config().max_zoom, MAX_ZOOM);

            let mut frame = RecordingRaster::new(SIZE);
            for px in [100.0, 80.0] {
                let cmd = ctl.step(&pinch(px), true, SIZE);
                ctl.apply(&mut frame, cmd);
            }
            assert!(approx(ctl.zoom_level(), 4.0));
        }
    }
}
