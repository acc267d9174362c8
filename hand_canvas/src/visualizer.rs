//! Software-rendered window using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────┬──────────────────────────────┐
//! │                              │  HAND CANVAS                 │
//! │   transformed video frame    │  [lock] L: …  R: …           │
//! │   (zoom / rotate / drawing)  │  hand skeletons              │
//! │                              │  [zoom bar]                  │
//! ├──────────────────────────────┴──────────────────────────────┤
//! │  status line                                                │
//! │  key legend                                                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use std::sync::mpsc::Sender;
use std::time::Duration;

use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use hand_pose::Gesture;

use crate::detector::{SimInput, SimKey};
use crate::raster::Frame;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const STATUS_H: u32 = 36;
const STATUS_BG:    u32 = 0xFF0F3460;
const STATUS_TEXT:  u32 = 0xFFEEEEEE;
const LEGEND_TEXT:  u32 = 0xFF888888;

pub const LEGEND: &str =
    "1-5=right pose  mouse=move  wheel=spread/roll  L=left fist  H/J=hide  P=snap  Q=quit";

// ════════════════════════════════════════════════════════════════════════════
// Composition
// ════════════════════════════════════════════════════════════════════════════

/// Video on the left, panel on the right, status bar underneath.
pub fn compose(video: &Frame, panel: &Frame, status: &str) -> Frame {
    let (w, h) = (video.width(), video.height());
    let mut out = Frame::new(w + panel.width(), h.max(panel.height()) + STATUS_H, STATUS_BG);
    out.overlay(video, 0, 0);
    out.overlay(panel, w as i32, 0);

    let y = h as i32;
    out.draw_text(status, 10, y + 8,  STATUS_TEXT, 1);
    out.draw_text(LEGEND, 10, y + 22, LEGEND_TEXT, 1);
    out
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

/// What the keyboard asked for this frame, beyond simulated hands.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Polled {
    pub quit:     bool,
    pub snapshot: bool,
}

pub struct Visualizer {
    window:     Window,
    buf:        Vec<u32>,
    win_w:      usize,
    win_h:      usize,
    video_w:    u32,
    video_h:    u32,
    sim_tx:     Sender<SimInput>,
    last_mouse: Option<(f32, f32)>,
}

impl Visualizer {
    /// Open a window for a `video_w`×`video_h` video with a same-size panel.
    pub fn new(
        video_w:     u32,
        video_h:     u32,
        interval_ms: u64,
        sim_tx:      Sender<SimInput>,
    ) -> Result<Self, String> {
        let win_w = 2 * video_w as usize;
        let win_h = (video_h + STATUS_H) as usize;
        let mut window = Window::new(
            "Hand Canvas — zoom, rotate and draw by gesture",
            win_w, win_h,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(Duration::from_millis(interval_ms)));

        Ok(Visualizer {
            window,
            buf: vec![STATUS_BG; win_w * win_h],
            win_w,
            win_h,
            video_w,
            video_h,
            sim_tx,
            last_mouse: None,
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Poll keyboard and mouse, forwarding hand input as `SimInput` events.
    pub fn poll_input(&mut self) -> Polled {
        let mut polled = Polled::default();
        if !self.window.is_open() {
            polled.quit = true;
            return polled;
        }

        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);

        if one_shot(Key::Q) || one_shot(Key::Escape) {
            polled.quit = true;
            return polled;
        }
        polled.snapshot = one_shot(Key::P);

        let mut keys = Vec::new();
        for (key, gesture) in [
            (Key::Key1, Gesture::Open),
            (Key::Key2, Gesture::Close),
            (Key::Key3, Gesture::Zoom),
            (Key::Key4, Gesture::Rotate),
            (Key::Key5, Gesture::Draw),
        ] {
            if one_shot(key) { keys.push(SimKey::RightPose(gesture)); }
        }
        if one_shot(Key::L) { keys.push(SimKey::ToggleLeftFist); }
        if one_shot(Key::H) { keys.push(SimKey::ToggleLeftHand); }
        if one_shot(Key::J) { keys.push(SimKey::ToggleRightHand); }
        for key in keys {
            let _ = self.sim_tx.send(SimInput::KeyDown(key));
        }

        // Mouse inside the video area moves the right hand.
        if let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Discard) {
            if (mx as u32) < self.video_w && self.last_mouse != Some((mx, my)) {
                self.last_mouse = Some((mx, my));
                let _ = self.sim_tx.send(SimInput::Cursor {
                    x: mx as f64 / self.video_w as f64,
                    y: my as f64 / self.video_h as f64,
                });
            }
        }

        if let Some((_, dy)) = self.window.get_scroll_wheel() {
            if dy != 0.0 {
                let _ = self.sim_tx.send(SimInput::Scroll(dy.signum()));
            }
        }

        polled
    }

    /// Show a composed frame.
    pub fn show(&mut self, composed: &Frame) -> Result<(), String> {
        composed.blit_into(&mut self.buf, self.win_w, 0, 0);
        self.window
            .update_with_buffer(&self.buf, self.win_w, self.win_h)
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{BLACK, WHITE};

    #[test]
    fn compose_places_video_and_panel_side_by_side() {
        let video = Frame::new(40, 30, WHITE);
        let panel = Frame::new(40, 30, BLACK);
        let out = compose(&video, &panel, "status");
        assert_eq!((out.width(), out.height()), (80, 30 + STATUS_H));
        assert_eq!(out.pixel(5, 5),  Some(WHITE));
        assert_eq!(out.pixel(45, 5), Some(BLACK));
        assert_eq!(out.pixel(0, 30 + STATUS_H - 1), Some(STATUS_BG));
    }
}
