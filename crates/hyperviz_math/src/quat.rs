//! Unit quaternion for 3D orientation
//!
//! Struts are canonical cylinders aligned to +Y; orienting one along an
//! arbitrary edge means rotating +Y onto the normalized endpoint delta.
//! [`Quat::from_rotation_arc`] is that operation, expressed independent of
//! any scene-graph API.

use bytemuck::{Pod, Zeroable};
use crate::Vec3;

/// Unit quaternion (x, y, z imaginary parts + w scalar)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Create a quaternion rotating by `angle` radians around `axis`
    ///
    /// The axis does not need to be normalized.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let half = angle * 0.5;
        let (sin_h, cos_h) = half.sin_cos();
        let a = axis.normalized();
        Self {
            x: a.x * sin_h,
            y: a.y * sin_h,
            z: a.z * sin_h,
            w: cos_h,
        }
    }

    /// Create the shortest-arc rotation taking `from` onto `to`
    ///
    /// Both vectors are normalized internally. Antiparallel inputs rotate
    /// 180 degrees around an arbitrary perpendicular axis, and degenerate
    /// (zero) inputs yield the identity.
    pub fn from_rotation_arc(from: Vec3, to: Vec3) -> Self {
        let f = from.normalized();
        let t = to.normalized();
        if f == Vec3::ZERO || t == Vec3::ZERO {
            return Self::IDENTITY;
        }

        let d = f.dot(t);
        if d >= 1.0 - 1e-6 {
            return Self::IDENTITY;
        }
        if d <= -1.0 + 1e-6 {
            // Antiparallel: any perpendicular axis works
            return Self::from_axis_angle(f.any_perpendicular(), std::f32::consts::PI);
        }

        // Half-angle construction: q = [cross(f,t), 1 + dot(f,t)] normalized
        let c = f.cross(t);
        Self {
            x: c.x,
            y: c.y,
            z: c.z,
            w: 1.0 + d,
        }
        .normalize()
    }

    /// Squared magnitude
    #[inline]
    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Magnitude
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Normalize to unit magnitude
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            let inv = 1.0 / mag;
            Self {
                x: self.x * inv,
                y: self.y * inv,
                z: self.z * inv,
                w: self.w * inv,
            }
        } else {
            Self::IDENTITY
        }
    }

    /// Conjugate; for unit quaternions this is the inverse rotation
    pub fn conjugate(&self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: self.w,
        }
    }

    /// Compose two rotations: result applies `other` first, then `self`
    pub fn compose(&self, other: &Self) -> Self {
        let a = self;
        let b = other;
        Self {
            x: a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            y: a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            z: a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            w: a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        }
    }

    /// Rotate a vector: v' = q * v * q†
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        // Optimized sandwich product: t = 2 * (im x v); v' = v + w*t + im x t
        let im = Vec3::new(self.x, self.y, self.z);
        let t = im.cross(v) * 2.0;
        v + t * self.w + im.cross(t)
    }
}
