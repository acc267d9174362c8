//! The edit lock: a left-hand fist enables editing.

use crate::classifier::Gesture;

/// Gate deciding whether right-hand gestures may touch the image.
///
/// Re-evaluated from scratch every frame: there is no hysteresis, so one
/// frame without a left-hand fist closes the gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditLock {
    editable: bool,
}

impl EditLock {
    pub fn new() -> Self {
        EditLock::default()
    }

    /// Feed this frame's left-hand gesture (`None` when no left hand was
    /// detected) and return whether editing is allowed.
    pub fn update(&mut self, left: Option<Gesture>) -> bool {
        let editable = left == Some(Gesture::Close);
        if editable != self.editable {
            log::debug!("edit lock {}", if editable { "opened" } else { "closed" });
        }
        self.editable = editable;
        editable
    }

    pub fn is_editable(&self) -> bool { self.editable }
}
