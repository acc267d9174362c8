//! # hand_pose
//!
//! Gesture classification from 21-point hand landmarks, and the stateful
//! controller that turns right-hand gestures into zoom / rotate / draw
//! transforms while a left-hand fist holds the edit lock open.
//!
//! ## Gesture table
//!
//! | Gesture | Thumb | Index | Middle | Ring | Pinky | Effect (right hand) |
//! |---|---|---|---|---|---|---|
//! | `Close`  | closed | closed | closed | closed | closed | — (left hand: unlock editing) |
//! | `Zoom`   | open   | open   | closed | closed | closed | pinch in → zoom in, spread → zoom out |
//! | `Rotate` | open   | open   | open   | closed | closed | turn the hand → rotate |
//! | `Draw`   | closed | open   | closed | closed | closed | index tip paints |
//! | `Open`   | anything else | | | | | — |
//!
//! ## Quick start
//!
//! ```rust
//! use hand_pose::{classify, EditLock, FrameSize, Gesture, HandPose, Handedness, TransformController};
//!
//! let left  = HandPose::new(Handedness::Left,  Gesture::Close).snapshot();
//! let right = HandPose::new(Handedness::Right, Gesture::Draw).snapshot();
//!
//! let mut lock = EditLock::new();
//! let mut ctl  = TransformController::default();
//!
//! let editable = lock.update(Some(classify(&left)));
//! let command  = ctl.step(&right, editable, FrameSize::new(640, 480));
//! assert!(editable);
//! assert_eq!(ctl.draw_path().len(), 1);
//! # let _ = command;
//! ```

pub mod landmark;
pub mod classifier;
pub mod edit_lock;
pub mod transform;
pub mod pose;

pub use landmark::{
    FrameSize, Handedness, Landmark, LandmarkPoint, LandmarkSnapshot,
    HAND_CONNECTIONS, LANDMARK_COUNT,
};
pub use classifier::{angle, classify, is_finger_closed, FingerStates, Gesture};
pub use edit_lock::EditLock;
pub use transform::{ControllerConfig, Raster, TransformCommand, TransformController, MAX_ZOOM};
pub use pose::{HandPose, MAX_ROLL_DEG};
