//! Companion panel drawn beside the video.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ HAND CANVAS                  │
//! │ [ EDIT / LOCKED ]            │
//! │ L: close                     │
//! │ R: zoom                      │
//! │                              │
//! │      hand skeletons          │
//! │      thumb ── index line     │
//! │                              │
//! │ [zoom bar ██████░░░░░░░░░░░] │
//! └──────────────────────────────┘
//! ```
//!
//! Landmarks are normalized, so the skeletons land on the panel at the same
//! relative position they have in the video.

use hand_pose::{
    FrameSize, Gesture, Handedness, Landmark, LandmarkSnapshot, TransformCommand,
    HAND_CONNECTIONS, MAX_ZOOM,
};

use crate::font::{text_width, GLYPH_H};
use crate::orchestrator::FrameReport;
use crate::raster::Frame;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

const PANEL_BG:     u32 = 0xFF16213E;
const TITLE_COLOR:  u32 = 0xFFFFD700;  // gold
const TEXT_COLOR:   u32 = 0xFFEEEEEE;
const EDIT_COLOR:   u32 = 0xFF2ECC71;  // green
const LOCKED_COLOR: u32 = 0xFFE74C3C;  // red
const LEFT_BONE:    u32 = 0xFFAADDFF;
const RIGHT_BONE:   u32 = 0xFFFFBBAA;
const JOINT_COLOR:  u32 = 0xFFFFFFFF;
const PINCH_COLOR:  u32 = 0xFFFF00FF;
const BAR_BG:       u32 = 0xFF0F3460;
const BAR_FILL:     u32 = 0xFF00BFFF;

const MARGIN:       i32 = 10;
const LOCK_Y:       i32 = 34;
const LOCK_W:       u32 = 110;
const LOCK_H:       u32 = 26;
const LABEL_Y:      i32 = 70;
const BAR_H:        u32 = 12;
const JOINT_R:      u32 = 3;
const PINCH_R:      u32 = 10;

// ════════════════════════════════════════════════════════════════════════════
// Rendering
// ════════════════════════════════════════════════════════════════════════════

/// Draw the panel for one frame.
pub fn render(width: u32, height: u32, report: &FrameReport) -> Frame {
    let mut panel = Frame::new(width, height, PANEL_BG);
    let size = FrameSize::new(width, height);

    // ── Hands ─────────────────────────────────────────────────────────────
    for hand in &report.hands {
        draw_skeleton(&mut panel, hand, size);
    }
    if matches!(report.command, TransformCommand::Zoom { .. } | TransformCommand::Rotate { .. }) {
        if let Some(right) = report.hands.iter().find(|h| h.handedness == Handedness::Right) {
            draw_pinch_reference(&mut panel, right, size);
        }
    }

    // ── Indicators ────────────────────────────────────────────────────────
    panel.draw_text("HAND CANVAS", MARGIN, MARGIN, TITLE_COLOR, 2);

    let (lock_color, lock_text) = if report.editable {
        (EDIT_COLOR, "EDIT")
    } else {
        (LOCKED_COLOR, "LOCKED")
    };
    panel.fill_rect(MARGIN, LOCK_Y, LOCK_W, LOCK_H, lock_color);
    let text_x = MARGIN + (LOCK_W.saturating_sub(text_width(lock_text, 2)) / 2) as i32;
    let text_y = LOCK_Y + (LOCK_H.saturating_sub(GLYPH_H * 2) / 2) as i32;
    panel.draw_text(lock_text, text_x, text_y, 0xFF000000, 2);

    let label = |g: Option<Gesture>| g.map(|g| g.label()).unwrap_or("-");
    panel.draw_text(&format!("L: {}", label(report.left)),  MARGIN, LABEL_Y,      TEXT_COLOR, 2);
    panel.draw_text(&format!("R: {}", label(report.right)), MARGIN, LABEL_Y + 18, TEXT_COLOR, 2);

    draw_zoom_bar(&mut panel, report.zoom_level);
    panel
}

fn to_px(hand: &LandmarkSnapshot, landmark: Landmark, size: FrameSize) -> (i32, i32) {
    let (x, y) = hand.pixel(landmark, size);
    (x as i32, y as i32)
}

fn draw_skeleton(panel: &mut Frame, hand: &LandmarkSnapshot, size: FrameSize) {
    let bone = if hand.handedness == Handedness::Left { LEFT_BONE } else { RIGHT_BONE };
    for &(a, b) in HAND_CONNECTIONS.iter() {
        panel.draw_line(to_px(hand, a, size), to_px(hand, b, size), bone, 2);
    }
    for &landmark in Landmark::ALL.iter() {
        let (x, y) = to_px(hand, landmark, size);
        panel.fill_circle(x, y, JOINT_R, JOINT_COLOR);
    }
}

/// Thumb tip and index tip ringed, with the line whose length drives zoom.
fn draw_pinch_reference(panel: &mut Frame, hand: &LandmarkSnapshot, size: FrameSize) {
    let thumb = to_px(hand, Landmark::ThumbTip, size);
    let index = to_px(hand, Landmark::IndexTip, size);
    panel.draw_line(thumb, index, PINCH_COLOR, 3);
    panel.fill_circle(thumb.0, thumb.1, PINCH_R, PINCH_COLOR);
    panel.fill_circle(index.0, index.1, PINCH_R, PINCH_COLOR);
}

fn draw_zoom_bar(panel: &mut Frame, zoom_level: f64) {
    let w = panel.width().saturating_sub(2 * MARGIN as u32);
    let y = panel.height() as i32 - MARGIN - BAR_H as i32;
    panel.fill_rect(MARGIN, y, w, BAR_H, BAR_BG);

    let fraction = (zoom_level / MAX_ZOOM).clamp(0.0, 1.0);
    let filled = (w as f64 * fraction) as u32;
    if filled > 0 {
        panel.fill_rect(MARGIN, y, filled, BAR_H, BAR_FILL);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_pose::HandPose;

    const W: u32 = 400;
    const H: u32 = 300;

    fn report(editable: bool) -> FrameReport {
        FrameReport {
            left:       None,
            right:      None,
            editable,
            command:    TransformCommand::Idle,
            zoom_level: 0.0,
            path_len:   0,
            hands:      Vec::new(),
        }
    }

    #[test]
    fn panel_matches_requested_size() {
        let p = render(W, H, &report(false));
        assert_eq!((p.width(), p.height()), (W, H));
    }

    #[test]
    fn lock_indicator_color_follows_state() {
        let locked = render(W, H, &report(false));
        let open   = render(W, H, &report(true));
        assert_eq!(locked.pixel(12, LOCK_Y as u32 + 2), Some(LOCKED_COLOR));
        assert_eq!(open.pixel(12, LOCK_Y as u32 + 2),   Some(EDIT_COLOR));
    }

    #[test]
    fn lock_label_is_centred_in_its_box() {
        let p = render(W, H, &report(true));
        let text_x = MARGIN as u32 + (LOCK_W - text_width("EDIT", 2)) / 2;
        let text_y = LOCK_Y as u32 + (LOCK_H - GLYPH_H * 2) / 2;
        // 'E' has its top-left pixel set.
        assert_eq!(p.pixel(text_x, text_y), Some(0xFF000000));
        assert_eq!(p.pixel(text_x - 1, text_y), Some(EDIT_COLOR));
    }

    #[test]
    fn zoom_bar_fills_with_level() {
        let bar_y = H - MARGIN as u32 - BAR_H / 2;
        let empty = render(W, H, &report(true));
        assert_eq!(empty.pixel(MARGIN as u32 + 1, bar_y), Some(BAR_BG));

        let full = render(W, H, &FrameReport { zoom_level: MAX_ZOOM, ..report(true) });
        assert_eq!(full.pixel(MARGIN as u32 + 1, bar_y), Some(BAR_FILL));
        assert_eq!(full.pixel(W - MARGIN as u32 - 2, bar_y), Some(BAR_FILL));
    }

    #[test]
    fn pinch_reference_only_when_zoom_or_rotate_applied() {
        let hand = HandPose::new(Handedness::Right, Gesture::Zoom).at(0.75, 0.6).snapshot();
        let (tx, ty) = to_px(&hand, Landmark::ThumbTip, FrameSize::new(W, H));

        let zoom = FrameReport {
            right:   Some(Gesture::Zoom),
            command: TransformCommand::Zoom { delta: 1.0 },
            hands:   vec![hand],
            ..report(true)
        };
        assert_eq!(render(W, H, &zoom).pixel(tx as u32, ty as u32), Some(PINCH_COLOR));

        // Baseline frame: the pose is held but nothing was applied yet.
        let baseline = FrameReport { command: TransformCommand::Idle, ..zoom.clone() };
        assert_eq!(render(W, H, &baseline).pixel(tx as u32, ty as u32), Some(JOINT_COLOR));

        let rotate = FrameReport { command: TransformCommand::Rotate { degrees: 3 }, ..zoom };
        assert_eq!(render(W, H, &rotate).pixel(tx as u32, ty as u32), Some(PINCH_COLOR));
    }

    #[test]
    fn wrist_joint_is_drawn() {
        let hand = HandPose::new(Handedness::Left, Gesture::Open).at(0.7, 0.6).snapshot();
        let (wx, wy) = to_px(&hand, Landmark::Wrist, FrameSize::new(W, H));
        let p = render(W, H, &FrameReport { hands: vec![hand], ..report(false) });
        assert_eq!(p.pixel(wx as u32, wy as u32), Some(JOINT_COLOR));
    }
}
