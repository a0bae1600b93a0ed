//! Camera offset provider.
//!
//! The core only tracks the pixel offset the render collaborator applies to
//! every draw; panning arrives as input intents.

use crate::constants::CAMERA_PAN_STEP;

#[derive(Debug, Clone, Copy, Default)]
pub struct Camera {
    pub offset_x: i32,
    pub offset_y: i32,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pan by whole steps (one step per pan intent).
    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.offset_x += dx * CAMERA_PAN_STEP;
        self.offset_y += dy * CAMERA_PAN_STEP;
    }

    pub fn offset(&self) -> (i32, i32) {
        (self.offset_x, self.offset_y)
    }
}
