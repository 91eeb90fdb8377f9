use glam::Vec2;

use crate::api::error::ParticleError;

/// Touch action kinds the host can report.
/// Closed set; numeric codes follow declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum TouchAction {
    Entered = 0,
    Pressed = 1,
    Moved = 2,
    /// Finger lifted: treated as a tap.
    Released = 3,
    Cancelled = 4,
    Exited = 5,
    /// Mouse wheel; ignored.
    WheelChanged = 6,
}

impl TryFrom<u32> for TouchAction {
    type Error = ParticleError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Self::Entered,
            1 => Self::Pressed,
            2 => Self::Moved,
            3 => Self::Released,
            4 => Self::Cancelled,
            5 => Self::Exited,
            6 => Self::WheelChanged,
            other => return Err(ParticleError::UnknownTouchAction(other)),
        })
    }
}

/// A touch event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub action: TouchAction,
    pub location: Vec2,
}

impl TouchEvent {
    pub fn new(action: TouchAction, location: Vec2) -> Self {
        Self { action, location }
    }

    /// Decode a raw host event.
    pub fn from_raw(code: u32, x: f32, y: f32) -> Result<Self, ParticleError> {
        Ok(Self::new(TouchAction::try_from(code)?, Vec2::new(x, y)))
    }
}
