//! # hand_canvas
//!
//! Gesture-driven image editing on a live frame.  The left hand holds an
//! edit lock open with a fist; while it is open the right hand pinches to
//! zoom, turns its thumb to rotate and points its index finger to draw.
//! Next to the video a companion panel shows both skeletons and the lock.
//!
//! ## Gesture → Action mapping
//!
//! | Hand | Gesture | Action |
//! |---|---|---|
//! | Left | Close (fist) | Editing unlocked for this frame |
//! | Left | anything else, or absent | Editing locked |
//! | Right | Zoom (thumb + index) | Pinch wider → zoom out, narrower → zoom in |
//! | Right | Rotate (thumb + index + middle) | Rotate by the change in thumb angle |
//! | Right | Draw (index only) | Append the index tip to the drawing |
//! | Right | Open / Close | Nothing; baselines reset |
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: keyboard and mouse drive both hands.
//! * `leap` — **Hardware mode**: polls a real LeapMotion controller via LeapC.
//!
//! ### Simulation controls
//!
//! | Input | Effect |
//! |---|---|
//! | `1`–`5` | Right hand pose: open, close, zoom, rotate, draw |
//! | Mouse | Move the right hand |
//! | Wheel | Pinch spread (zoom pose) or thumb roll (rotate pose) |
//! | `L` | Toggle left fist |
//! | `H` / `J` | Hide/show left / right hand |
//! | `P` | Save a PNG snapshot |
//! | `Q` / `Esc` | Quit |

pub mod font;
pub mod raster;
pub mod config;
pub mod source;
pub mod detector;
pub mod orchestrator;
pub mod panel;
pub mod recorder;
pub mod visualizer;
pub mod app;
