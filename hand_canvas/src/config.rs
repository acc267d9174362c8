//! Application configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes.  Command-line flags are applied on top of the file.
//!
//! ```toml
//! frame_width   = 800
//! frame_height  = 600
//! image         = "pictures/harbour.jpg"
//! mirror        = false
//! pinch_divisor = 4.0
//! marker_color  = 0xFF00FFAA
//! record_dir    = "captures"
//! record_every  = 5
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use hand_pose::{ControllerConfig, MAX_ZOOM};

/// Largest accepted draw marker, in pixels.
pub const MAX_MARKER_RADIUS: u32 = 256;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub frame_width:       u32,
    pub frame_height:      u32,
    /// Picture used as the video frame.  `None` → generated test pattern.
    pub image:             Option<PathBuf>,
    /// Flip the source horizontally (selfie view).
    pub mirror:            bool,
    pub pinch_divisor:     f64,
    pub max_zoom:          f64,
    pub marker_radius:     u32,
    pub marker_color:      u32,
    /// Minimum time between frames.
    pub frame_interval_ms: u64,
    /// Write composed frames here as numbered PNGs.
    pub record_dir:        Option<PathBuf>,
    /// Record every n-th frame (values below 1 count as 1).
    pub record_every:      u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        let ctl = ControllerConfig::default();
        AppConfig {
            frame_width:       640,
            frame_height:      480,
            image:             None,
            mirror:            true,
            pinch_divisor:     ctl.pinch_divisor,
            max_zoom:          ctl.max_zoom,
            marker_radius:     ctl.marker_radius,
            marker_color:      ctl.marker_color,
            frame_interval_ms: 33,
            record_dir:        None,
            record_every:      1,
        }
    }
}

impl AppConfig {
    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("cannot read config {}: {}", path.display(), e))?;
        Self::from_toml(&content)
            .map_err(|e| format!("invalid config {}: {}", path.display(), e))
    }

    pub fn from_toml(content: &str) -> Result<Self, String> {
        let cfg: AppConfig = toml::from_str(content).map_err(|e| e.to_string())?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), String> {
        if self.frame_width < 16 || self.frame_height < 16 {
            return Err(format!(
                "frame size {}x{} is too small (minimum 16x16)",
                self.frame_width, self.frame_height
            ));
        }
        if !(self.pinch_divisor > 0.0) {
            return Err(format!("pinch_divisor must be positive, got {}", self.pinch_divisor));
        }
        if !(0.0..=MAX_ZOOM).contains(&self.max_zoom) {
            return Err(format!("max_zoom must be within 0..={}, got {}", MAX_ZOOM, self.max_zoom));
        }
        if self.marker_radius > MAX_MARKER_RADIUS {
            return Err(format!(
                "marker_radius {} is too large (maximum {})",
                self.marker_radius, MAX_MARKER_RADIUS
            ));
        }
        Ok(())
    }

    /// Settings handed to the transform controller.
    pub fn controller(&self) -> ControllerConfig {
        ControllerConfig {
            pinch_divisor: self.pinch_divisor,
            max_zoom:      self.max_zoom,
            marker_radius: self.marker_radius,
            marker_color:  self.marker_color,
        }
    }

    /// Apply command-line flags on top of this config.
    ///
    /// `--config` is consumed by the caller; `--quick` is accepted and ignored
    /// here.  Unknown flags are an error.
    pub fn apply_args<I: IntoIterator<Item = String>>(&mut self, args: I) -> Result<(), String> {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--image"     => self.image      = Some(PathBuf::from(value(&arg, args.next())?)),
                "--record"    => self.record_dir = Some(PathBuf::from(value(&arg, args.next())?)),
                "--no-mirror" => self.mirror     = false,
                "--config"    => { value(&arg, args.next())?; }
                "--quick"     => {}
                other         => return Err(format!("unknown argument: {}", other)),
            }
        }
        Ok(())
    }
}

fn value(flag: &str, next: Option<String>) -> Result<String, String> {
    next.ok_or_else(|| format!("{} needs a value", flag))
}

/// Find `--config <path>` in the raw argument list.
pub fn config_path(args: &[String]) -> Option<PathBuf> {
    args.iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = AppConfig::from_toml("frame_width = 800\nmirror = false\nmarker_color = 0xFF00FF00\n").unwrap();
        assert_eq!(cfg.frame_width, 800);
        assert_eq!(cfg.frame_height, 480);
        assert!(!cfg.mirror);
        assert_eq!(cfg.marker_color, 0xFF00FF00);
        assert_eq!(cfg.pinch_divisor, 5.0);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(AppConfig::from_toml("frame_width = 4").is_err());
        assert!(AppConfig::from_toml("pinch_divisor = 0.0").is_err());
        assert!(AppConfig::from_toml("frame_width = \"wide\"").is_err());
    }

    #[test]
    fn max_zoom_must_be_finite_and_in_range() {
        assert!(AppConfig::from_toml("max_zoom = nan").is_err());
        assert!(AppConfig::from_toml("max_zoom = inf").is_err());
        assert!(AppConfig::from_toml("max_zoom = -1.0").is_err());
        assert!(AppConfig::from_toml("max_zoom = 50.0").is_err());
        assert_eq!(AppConfig::from_toml("max_zoom = 20.0").unwrap().max_zoom, 20.0);
    }

    #[test]
    fn huge_marker_radius_is_rejected() {
        assert!(AppConfig::from_toml("marker_radius = 60000").is_err());
        let cfg = AppConfig::from_toml(&format!("marker_radius = {}", MAX_MARKER_RADIUS)).unwrap();
        assert_eq!(cfg.marker_radius, MAX_MARKER_RADIUS);
    }

    #[test]
    fn args_override_file_values() {
        let mut cfg = AppConfig::default();
        cfg.apply_args(args(&["--quick", "--image", "a.png", "--record", "out", "--no-mirror"])).unwrap();
        assert_eq!(cfg.image, Some(PathBuf::from("a.png")));
        assert_eq!(cfg.record_dir, Some(PathBuf::from("out")));
        assert!(!cfg.mirror);
    }

    #[test]
    fn args_errors() {
        let mut cfg = AppConfig::default();
        assert!(cfg.apply_args(args(&["--image"])).is_err());
        assert!(cfg.apply_args(args(&["--bogus"])).is_err());
    }

    #[test]
    fn config_path_is_found() {
        assert_eq!(config_path(&args(&["--quick", "--config", "c.toml"])), Some(PathBuf::from("c.toml")));
        assert_eq!(config_path(&args(&["--config"])), None);
    }

    #[test]
    fn controller_settings_carry_over() {
        let cfg = AppConfig { pinch_divisor: 2.5, marker_radius: 3, ..AppConfig::default() };
        let ctl = cfg.controller();
        assert_eq!(ctl.pinch_divisor, 2.5);
        assert_eq!(ctl.marker_radius, 3);
    }
}
