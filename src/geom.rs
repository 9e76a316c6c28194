//! Small 3-D vector and quaternion types used by the placement stages

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A point or direction in 3-D space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    pub const Y: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    pub const Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    pub fn cross(self, rhs: Self) -> Self {
        Self {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction, or zero for a zero-length input
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 || !len.is_finite() {
            Self::ZERO
        } else {
            self * (1.0 / len)
        }
    }

    /// Same direction, length clamped to at most `max`
    pub fn clamp_length(self, max: f64) -> Self {
        let len = self.length();
        if len > max && len > 0.0 {
            self * (max / len)
        } else {
            self
        }
    }

    pub fn distance(self, other: Self) -> f64 {
        (other - self).length()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Self::Output {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Self::Output {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Vec3) {
        *self = *self - rhs;
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Self::Output {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Self::Output {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

/// A unit quaternion describing an orientation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quat {
    pub const IDENTITY: Quat = Quat {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// 180° rotation about the Z axis
    pub const HALF_TURN_Z: Quat = Quat {
        w: 0.0,
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    pub fn length(self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 || !len.is_finite() {
            return Self::IDENTITY;
        }
        Self::new(self.w / len, self.x / len, self.y / len, self.z / len)
    }

    /// Build the rotation that maps the world axes onto an orthonormal frame.
    ///
    /// The columns of the rotation matrix are `x_axis`, `y_axis` and `z_axis`.
    pub fn from_frame(x_axis: Vec3, y_axis: Vec3, z_axis: Vec3) -> Self {
        let (m11, m12, m13) = (x_axis.x, y_axis.x, z_axis.x);
        let (m21, m22, m23) = (x_axis.y, y_axis.y, z_axis.y);
        let (m31, m32, m33) = (x_axis.z, y_axis.z, z_axis.z);
        let trace = m11 + m22 + m33;

        let q = if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            Quat::new(0.25 / s, (m32 - m23) * s, (m13 - m31) * s, (m21 - m12) * s)
        } else if m11 > m22 && m11 > m33 {
            let s = 2.0 * (1.0 + m11 - m22 - m33).sqrt();
            Quat::new((m32 - m23) / s, 0.25 * s, (m12 + m21) / s, (m13 + m31) / s)
        } else if m22 > m33 {
            let s = 2.0 * (1.0 + m22 - m11 - m33).sqrt();
            Quat::new((m13 - m31) / s, (m12 + m21) / s, 0.25 * s, (m23 + m32) / s)
        } else {
            let s = 2.0 * (1.0 + m33 - m11 - m22).sqrt();
            Quat::new((m21 - m12) / s, (m13 + m31) / s, (m23 + m32) / s, 0.25 * s)
        };
        q.normalize()
    }

    /// Rotate a vector by this quaternion
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let axis = Vec3::new(self.x, self.y, self.z);
        let t = axis.cross(v) * 2.0;
        v + t * self.w + axis.cross(t)
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn test_cross_follows_right_hand_rule() {
        assert!(approx(Vec3::X.cross(Vec3::Y), Vec3::Z));
        assert!(approx(Vec3::Y.cross(Vec3::Z), Vec3::X));
        assert!(approx(Vec3::Z.cross(Vec3::X), Vec3::Y));
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
        assert!((Vec3::new(3.0, 4.0, 0.0).normalize().length() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_clamp_length() {
        let v = Vec3::new(3.0, 4.0, 0.0).clamp_length(1.0);
        assert!((v.length() - 1.0).abs() < EPS);
        let short = Vec3::new(0.1, 0.0, 0.0);
        assert_eq!(short.clamp_length(1.0), short);
    }

    #[test]
    fn test_identity_frame_is_identity() {
        let q = Quat::from_frame(Vec3::X, Vec3::Y, Vec3::Z);
        assert!(approx(q.rotate(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_half_turn_z_flips_x_and_y() {
        let q = Quat::HALF_TURN_Z;
        assert!(approx(q.rotate(Vec3::X), -Vec3::X));
        assert!(approx(q.rotate(Vec3::Y), -Vec3::Y));
        assert!(approx(q.rotate(Vec3::Z), Vec3::Z));
    }

    #[test]
    fn test_from_frame_maps_axes() {
        // Quarter turn about Z: X -> Y, Y -> -X
        let q = Quat::from_frame(Vec3::Y, -Vec3::X, Vec3::Z);
        assert!(approx(q.rotate(Vec3::X), Vec3::Y));
        assert!(approx(q.rotate(Vec3::Y), -Vec3::X));
        assert!((q.length() - 1.0).abs() < EPS);

        // Half turn about Y exercises the non-positive trace branch
        let q = Quat::from_frame(-Vec3::X, Vec3::Y, -Vec3::Z);
        assert!(approx(q.rotate(Vec3::X), -Vec3::X));
        assert!(approx(q.rotate(Vec3::Y), Vec3::Y));
    }
}
