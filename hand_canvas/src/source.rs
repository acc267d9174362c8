//! Frame source: hands out a fresh copy of the base picture every tick.
//!
//! Each frame starts clean, so a transform shows up only on the frames whose
//! command asked for it, while the draw path is replayed on top every time.

use std::path::Path;

use image::imageops::{self, FilterType};

use crate::raster::{test_pattern, Frame};

pub struct FrameSource {
    base: Frame,
}

impl FrameSource {
    /// Load a picture and fit it to `width`×`height`.
    pub fn from_path(path: &Path, width: u32, height: u32, mirror: bool) -> Result<Self, String> {
        let img = image::open(path)
            .map_err(|e| format!("cannot load image {}: {}", path.display(), e))?
            .to_rgba8();
        log::info!(
            "loaded {} ({}x{}) → {}x{}",
            path.display(), img.width(), img.height(), width, height
        );
        let img = imageops::resize(&img, width, height, FilterType::Triangle);
        Ok(Self::from_frame(Frame::from_image(img), mirror))
    }

    /// Generated test pattern.
    pub fn pattern(width: u32, height: u32, mirror: bool) -> Self {
        Self::from_frame(test_pattern(width, height), mirror)
    }

    pub fn from_frame(mut base: Frame, mirror: bool) -> Self {
        if mirror { base.flip_horizontal(); }
        FrameSource { base }
    }

    pub fn next_frame(&self) -> Frame {
        self.base.clone()
    }

    pub fn width(&self)  -> u32 { self.base.width() }
    pub fn height(&self) -> u32 { self.base.height() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{BLACK, WHITE};

    #[test]
    fn frames_are_independent_copies() {
        let src = FrameSource::pattern(32, 24, false);
        let mut a = src.next_frame();
        a.fill(BLACK);
        assert_ne!(a, src.next_frame());
        assert_eq!((src.width(), src.height()), (32, 24));
    }

    #[test]
    fn mirror_flips_once() {
        let mut f = Frame::new(4, 1, BLACK);
        f.set_pixel(0, 0, WHITE);
        let src = FrameSource::from_frame(f, true);
        let out = src.next_frame();
        assert_eq!(out.pixel(3, 0), Some(WHITE));
        assert_eq!(out.pixel(0, 0), Some(BLACK));
    }

    #[test]
    fn missing_picture_is_an_error() {
        let err = FrameSource::from_path(Path::new("/definitely/not/here.png"), 64, 48, false);
        assert!(err.is_err());
    }
}
