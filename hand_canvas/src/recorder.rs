//! PNG capture of composed frames.
//!
//! A `Recorder` writes every n-th frame to a directory as
//! `frame_000001.png`, `frame_000002.png`, …  Snapshots go to the same
//! directory (or the working directory when not recording) as
//! `snapshot_<n>.png`.  Write failures are logged and never stop the loop.

use std::fs;
use std::path::{Path, PathBuf};

use crate::raster::Frame;

pub struct Recorder {
    dir:     PathBuf,
    every:   u32,
    seen:    u64,
    written: u64,
}

impl Recorder {
    /// Create `dir` if needed.
    pub fn new(dir: &Path, every: u32) -> Result<Self, String> {
        fs::create_dir_all(dir)
            .map_err(|e| format!("cannot create record dir {}: {}", dir.display(), e))?;
        log::info!("recording every {} frame(s) to {}", every.max(1), dir.display());
        Ok(Recorder { dir: dir.to_path_buf(), every: every.max(1), seen: 0, written: 0 })
    }

    /// Count a frame and write it if it falls on the interval.
    pub fn offer(&mut self, frame: &Frame) {
        self.seen += 1;
        if (self.seen - 1) % self.every as u64 != 0 { return; }

        let path = self.dir.join(format!("frame_{:06}.png", self.written + 1));
        match save_png(frame, &path) {
            Ok(())  => self.written += 1,
            Err(e)  => log::warn!("{}", e),
        }
    }

    pub fn dir(&self)     -> &Path { &self.dir }
    pub fn written(&self) -> u64   { self.written }
}

pub fn save_png(frame: &Frame, path: &Path) -> Result<(), String> {
    frame.image()
        .save(path)
        .map_err(|e| format!("cannot write {}: {}", path.display(), e))
}

/// Write `frame` as the first free `snapshot_<n>.png` in `dir`.
pub fn snapshot(frame: &Frame, dir: &Path) -> Result<PathBuf, String> {
    let path = (1u32..)
        .map(|n| dir.join(format!("snapshot_{}.png", n)))
        .find(|p| !p.exists())
        .ok_or_else(|| "no free snapshot name".to_string())?;
    save_png(frame, &path)?;
    log::info!("snapshot saved to {}", path.display());
    Ok(path)
}
