//! The frame buffer and its drawing primitives.
//!
//! `Frame` wraps an `image::RgbaImage`.  Colors cross the API as packed ARGB
//! `u32` (`0xAARRGGBB`), the same format `minifb` expects, so the visualizer
//! can blit without another conversion table.  Every primitive clips to the
//! frame; none of them fail.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use hand_pose::{FrameSize, Raster};

use crate::font::{char_glyph, ADVANCE, GLYPH_W};

pub const BLACK: u32 = 0xFF000000;
pub const WHITE: u32 = 0xFFFFFFFF;

// ════════════════════════════════════════════════════════════════════════════
// Color helpers
// ════════════════════════════════════════════════════════════════════════════

pub fn argb_to_rgba(c: u32) -> Rgba<u8> {
    Rgba([(c >> 16) as u8, (c >> 8) as u8, c as u8, (c >> 24) as u8])
}

pub fn rgba_to_argb(p: Rgba<u8>) -> u32 {
    let [r, g, b, a] = p.0;
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Composite `src` over an opaque `dst`, weighted by `src`'s alpha.
pub fn blend(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let a = src.0[3] as u16;
    let mix = |d: u8, s: u8| ((d as u16 * (255 - a) + s as u16 * a + 127) / 255) as u8;
    let [dr, dg, db, _] = dst.0;
    let [sr, sg, sb, _] = src.0;
    Rgba([mix(dr, sr), mix(dg, sg), mix(db, sb), 0xFF])
}

// ════════════════════════════════════════════════════════════════════════════
// Frame
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    img: RgbaImage,
}

impl Frame {
    /// A frame filled with one color.
    pub fn new(width: u32, height: u32, color: u32) -> Self {
        Frame { img: RgbaImage::from_pixel(width, height, argb_to_rgba(color)) }
    }

    pub fn from_image(img: RgbaImage) -> Self {
        Frame { img }
    }

    pub fn width(&self)  -> u32 { self.img.width() }
    pub fn height(&self) -> u32 { self.img.height() }
    pub fn image(&self)  -> &RgbaImage { &self.img }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width() && y < self.height() {
            Some(rgba_to_argb(*self.img.get_pixel(x, y)))
        } else {
            None
        }
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height() {
            self.img.put_pixel(x as u32, y as u32, argb_to_rgba(color));
        }
    }

    pub fn fill(&mut self, color: u32) {
        let c = argb_to_rgba(color);
        for p in self.img.pixels_mut() { *p = c; }
    }

    // ── shapes ────────────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: u32) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w as i32).min(self.width() as i32);
        let y1 = (y + h as i32).min(self.height() as i32);
        for row in y0..y1 {
            for col in x0..x1 {
                self.set_pixel(col, row, color);
            }
        }
    }

    /// Rectangle outline, `thickness` pixels inward.
    pub fn draw_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: u32, thickness: u32) {
        let t = thickness.max(1).min(w.min(h).max(1));
        self.fill_rect(x, y, w, t, color);
        self.fill_rect(x, y + h as i32 - t as i32, w, t, color);
        self.fill_rect(x, y, t, h, color);
        self.fill_rect(x + w as i32 - t as i32, y, t, h, color);
    }

    /// Filled disc.  Only the part of its bounding box inside the frame is
    /// visited, so any radius is safe.
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: u32, color: u32) {
        let (cx, cy, r) = (cx as i64, cy as i64, radius as i64);
        let x0 = (cx - r).max(0);
        let y0 = (cy - r).max(0);
        let x1 = (cx + r).min(self.width() as i64 - 1);
        let y1 = (cy + r).min(self.height() as i64 - 1);
        let r2 = (r as i128) * (r as i128);
        let c  = argb_to_rgba(color);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let (dx, dy) = ((x - cx) as i128, (y - cy) as i128);
                if dx * dx + dy * dy <= r2 {
                    self.img.put_pixel(x as u32, y as u32, c);
                }
            }
        }
    }

    /// Bresenham line; thicker lines stamp a disc at every step.
    pub fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: u32, thickness: u32) {
        let (mut x, mut y) = from;
        let dx =  (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        let r = thickness / 2;

        loop {
            if r == 0 { self.set_pixel(x, y, color); } else { self.fill_circle(x, y, r, color); }
            if x == to.0 && y == to.1 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x += sx; }
            if e2 <= dx { err += dx; y += sy; }
        }
    }

    /// Paste `other` with its top-left corner at `(x, y)`, honouring its alpha.
    pub fn overlay(&mut self, other: &Frame, x: i32, y: i32) {
        let (w, h) = (self.width() as i64, self.height() as i64);
        for (ox, oy, src) in other.img.enumerate_pixels() {
            let (tx, ty) = (x as i64 + ox as i64, y as i64 + oy as i64);
            if tx < 0 || ty < 0 || tx >= w || ty >= h { continue; }
            let dst = self.img.get_pixel_mut(tx as u32, ty as u32);
            match src.0[3] {
                0    => {}
                0xFF => *dst = *src,
                _    => *dst = blend(*dst, *src),
            }
        }
    }

    pub fn flip_horizontal(&mut self) {
        imageops::flip_horizontal_in_place(&mut self.img);
    }

    // ── text ──────────────────────────────────────────────────────────────

    /// 3×5 bitmap text, each font pixel drawn as a `scale`×`scale` block.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, color: u32, scale: u32) {
        let s = scale.max(1) as i32;
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..GLYPH_W as i32 {
                    if bits & (1 << (GLYPH_W as i32 - 1 - col)) != 0 {
                        self.fill_rect(cx + col * s, y + row as i32 * s, s as u32, s as u32, color);
                    }
                }
            }
            cx += ADVANCE as i32 * s;
            if cx >= self.width() as i32 { break; }
        }
    }

    // ── output ────────────────────────────────────────────────────────────

    /// Copy into an ARGB window buffer of row length `stride`, at `(ox, oy)`.
    pub fn blit_into(&self, dst: &mut [u32], stride: usize, ox: usize, oy: usize) {
        for (x, y, p) in self.img.enumerate_pixels() {
            let (tx, ty) = (ox + x as usize, oy + y as usize);
            if tx >= stride { continue; }
            if let Some(slot) = dst.get_mut(ty * stride + tx) {
                *slot = rgba_to_argb(*p);
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Raster — transforms driven by the controller
// ════════════════════════════════════════════════════════════════════════════

impl Raster for Frame {
    fn size(&self) -> FrameSize {
        FrameSize::new(self.width(), self.height())
    }

    fn crop_and_resize(&mut self, inset_pct: f64) {
        if inset_pct <= 0.0 { return; }
        let (w, h) = (self.width(), self.height());

        let half_w = ((w as f64 - 2.0 * inset_pct * w as f64 / 100.0) / 2.0) as u32;
        let half_h = ((h as f64 - 2.0 * inset_pct * h as f64 / 100.0) / 2.0) as u32;
        if half_w == 0 || half_h == 0 { return; }

        let x0 = (w / 2).saturating_sub(half_w);
        let y0 = (h / 2).saturating_sub(half_h);
        let crop_w = (2 * half_w).min(w - x0);
        let crop_h = (2 * half_h).min(h - y0);

        let cropped = imageops::crop_imm(&self.img, x0, y0, crop_w, crop_h).to_image();
        self.img = imageops::resize(&cropped, w, h, FilterType::Triangle);
    }

    fn rotate(&mut self, center: (f64, f64), degrees: f64) {
        if degrees == 0.0 { return; }
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (cx, cy) = center;
        let src = self.img.clone();

        for (x, y, p) in self.img.enumerate_pixels_mut() {
            // Inverse map: where in the source does this output pixel come from?
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            let sx = cos * dx - sin * dy + cx;
            let sy = sin * dx + cos * dy + cy;
            *p = sample_bilinear(&src, sx, sy);
        }
    }

    fn fill_circle(&mut self, center: (i32, i32), radius: u32, color: u32) {
        Frame::fill_circle(self, center.0, center.1, radius, color);
    }
}

/// Bilinear sample; anything outside the image reads as opaque black.
fn sample_bilinear(img: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let at = |px: i64, py: i64| -> [f64; 4] {
        if px < 0 || py < 0 || px >= img.width() as i64 || py >= img.height() as i64 {
            [0.0, 0.0, 0.0, 255.0]
        } else {
            img.get_pixel(px as u32, py as u32).0.map(|c| c as f64)
        }
    };

    let (p00, p10, p01, p11) = (at(x0, y0), at(x0 + 1, y0), at(x0, y0 + 1), at(x0 + 1, y0 + 1));
    let mut out = [0u8; 4];
    for i in 0..4 {
        let top    = p00[i] * (1.0 - fx) + p10[i] * fx;
        let bottom = p01[i] * (1.0 - fx) + p11[i] * fx;
        out[i] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    Rgba(out)
}

// ════════════════════════════════════════════════════════════════════════════
// Test pattern
// ════════════════════════════════════════════════════════════════════════════

/// Gradient with a grid, a centre target and a red corner tab, so zoom and
/// rotation are easy to see without a picture.
pub fn test_pattern(width: u32, height: u32) -> Frame {
    let mut img = RgbaImage::new(width, height);
    for (x, y, p) in img.enumerate_pixels_mut() {
        let r = (x * 200 / width.max(1)) as u8 + 30;
        let g = (y * 200 / height.max(1)) as u8 + 30;
        *p = Rgba([r, g, 140, 255]);
    }
    let mut frame = Frame::from_image(img);

    let step = (width.min(height) / 8).max(1) as usize;
    for x in (0..width as i32).step_by(step) {
        frame.draw_line((x, 0), (x, height as i32 - 1), 0xFF303040, 1);
    }
    for y in (0..height as i32).step_by(step) {
        frame.draw_line((0, y), (width as i32 - 1, y), 0xFF303040, 1);
    }

    let (cx, cy) = (width as i32 / 2, height as i32 / 2);
    let r = width.min(height) / 6;
    frame.fill_circle(cx, cy, r, WHITE);
    frame.fill_circle(cx, cy, r * 2 / 3, 0xFF1A1A2E);
    frame.fill_circle(cx, cy, r / 3, WHITE);
    frame.fill_rect(8, 8, width / 10, height / 10, 0xFFE04040);
    frame
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
