//! Euler rotation deltas and accumulated orientation.
//!
//! Rotations are expressed as `(pitch, yaw, roll)` in degrees and applied
//! additively per axis. Accumulated values are never wrapped so that applying
//! the same delta `n` times is exactly `n` additions.

use glam::{EulerRot, Quat};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul};

/// One-time rotation applied when the orientation updater initializes.
pub const INITIAL_SPIN: EulerDegrees = EulerDegrees::new(34.0, 45.0, 1.0);

/// Rotation applied by the orientation updater on every tick.
pub const TICK_SPIN: EulerDegrees = EulerDegrees::new(0.0, 42.1, 1.0);

/// A `(pitch, yaw, roll)` triple in degrees. Omitted axes deserialize as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EulerDegrees {
    /// Rotation about the X axis.
    pub pitch: f32,
    /// Rotation about the Y axis.
    pub yaw: f32,
    /// Rotation about the Z axis.
    pub roll: f32,
}

impl EulerDegrees {
    /// No rotation.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Build a triple from its three axes.
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }
}

impl Add for EulerDegrees {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.pitch + rhs.pitch, self.yaw + rhs.yaw, self.roll + rhs.roll)
    }
}

impl AddAssign for EulerDegrees {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul<f32> for EulerDegrees {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.pitch * rhs, self.yaw * rhs, self.roll * rhs)
    }
}

/// Accumulated orientation of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    euler: EulerDegrees,
}

impl Orientation {
    /// Identity orientation.
    pub const IDENTITY: Self = Self { euler: EulerDegrees::ZERO };

    /// Orientation starting at `euler`.
    pub const fn from_euler(euler: EulerDegrees) -> Self {
        Self { euler }
    }

    /// Accumulated degrees per axis.
    pub fn euler(&self) -> EulerDegrees {
        self.euler
    }

    /// Add `delta` to every axis.
    pub fn rotate(&mut self, delta: EulerDegrees) {
        self.euler += delta;
    }

    /// Copy with each axis folded into `[0, 360)`.
    pub fn wrapped(&self) -> Self {
        let fold = |deg: f32| {
            let folded = deg.rem_euclid(360.0);
            // rem_euclid can round up to exactly 360 for tiny negative inputs
            if folded >= 360.0 {
                0.0
            } else {
                folded
            }
        };
        Self::from_euler(EulerDegrees::new(
            fold(self.euler.pitch),
            fold(self.euler.yaw),
            fold(self.euler.roll),
        ))
    }

    /// Quaternion for the accumulated angles, X then Y then Z.
    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.euler.pitch.to_radians(),
            self.euler.yaw.to_radians(),
            self.euler.roll.to_radians(),
        )
    }
}
