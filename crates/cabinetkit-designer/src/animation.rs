//! Door animation.
//!
//! Each cabinet owns a [`DoorAnimator`]. Once per display tick the animator
//! eases the door angle toward its target by a fixed fraction of the
//! remaining gap, then snaps onto the target once the gap is negligible.
//! The animated angle is display state only and is never persisted.

use std::f64::consts::PI;

/// Door angle when fully open (radians, about the hinge's Y axis)
pub const DOOR_OPEN_ANGLE: f64 = -PI * 0.66;

/// Door angle when closed
pub const DOOR_CLOSED_ANGLE: f64 = 0.0;

/// Fraction of the remaining gap closed per tick
pub const DOOR_DAMPING: f64 = 0.1;

/// Gap below which the door snaps onto its target
pub const DOOR_SNAP_EPSILON: f64 = 0.001;

/// Target angle for a door state.
pub fn door_target(open: bool) -> f64 {
    if open {
        DOOR_OPEN_ANGLE
    } else {
        DOOR_CLOSED_ANGLE
    }
}

/// One easing step from `current` toward `target`.
pub fn ease_toward(current: f64, target: f64) -> f64 {
    let next = current + (target - current) * DOOR_DAMPING;
    if (target - next).abs() > DOOR_SNAP_EPSILON {
        next
    } else {
        target
    }
}

/// Per-cabinet door state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DoorAnimator {
    open: bool,
    angle: f64,
}

impl DoorAnimator {
    /// Creates an animator resting in the given state.
    pub fn new(open: bool) -> Self {
        Self {
            open,
            angle: door_target(open),
        }
    }

    /// Whether the door is open (or opening).
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Current animated angle.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Angle the door is converging toward.
    pub fn target(&self) -> f64 {
        door_target(self.open)
    }

    /// Whether the door has reached its target.
    pub fn is_settled(&self) -> bool {
        self.angle == self.target()
    }

    /// Retargets the door. The current angle is kept, so flipping state
    /// mid-swing continues smoothly from wherever the door is.
    pub fn set_open(&mut self, open: bool) {
        if self.open != open {
            tracing::debug!(
                "Door retargeted to {} at angle {:.4}",
                if open { "open" } else { "closed" },
                self.angle
            );
        }
        self.open = open;
    }

    /// Flips the door state and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.set_open(!self.open);
        self.open
    }

    /// Jumps straight to the target, skipping the animation.
    pub fn settle(&mut self) {
        self.angle = self.target();
    }

    /// Advances one tick. Returns true when the angle changed.
    pub fn step(&mut self) -> bool {
        if self.is_settled() {
            return false;
        }
        self.angle = ease_toward(self.angle, self.target());
        true
    }

    /// Sets the raw angle. Used to resume from an arbitrary pose.
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }
}
