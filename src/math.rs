//! Vector and quaternion math for the software renderer.
//!
//! Everything here is a plain value type with no state. The quaternion
//! rotation uses the direct vector form rather than a matrix conjugation;
//! the rasterizer's vertex transform depends on this exact formulation.

use std::ops::{Add, Div, Mul, Sub};

/// A 3-component float vector. Doubles as a point and a direction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Uniform vector with the same value in every component.
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn magnitude(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or zero for a zero vector.
    pub fn normalized(self) -> Vec3 {
        let len = self.magnitude();
        if len == 0.0 {
            Vec3::ZERO
        } else {
            self / len
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vec3> for f32 {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs * self
    }
}

/// Component-wise product, used for non-uniform scaling.
impl Mul<Vec3> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;
    fn div(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

/// Component-wise division.
impl Div<Vec3> for Vec3 {
    type Output = Vec3;
    fn div(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
    }
}

/// A rotation quaternion `w + xi + yj + zk`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quat {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Builds a quaternion from yaw/pitch/roll via the standard half-angle
    /// composition.
    pub fn from_euler(yaw: f32, pitch: f32, roll: f32) -> Self {
        let (sy, cy) = (yaw * 0.5).sin_cos();
        let (sp, cp) = (pitch * 0.5).sin_cos();
        let (sr, cr) = (roll * 0.5).sin_cos();

        Quat {
            x: sr * cp * cy - cr * sp * sy,
            y: cr * sp * cy + sr * cp * sy,
            z: cr * cp * sy - sr * sp * cy,
            w: cr * cp * cy + sr * sp * sy,
        }
    }

    /// Rotates a vector by this quaternion using the direct form
    /// `2(u.v)u + (s^2 - u.u)v + 2s(u x v)` with `u` the vector part and
    /// `s` the scalar part.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let u = Vec3::new(self.x, self.y, self.z);
        let s = self.w;
        2.0 * u.dot(v) * u + (s * s - u.dot(u)) * v + 2.0 * s * u.cross(v)
    }
}

/// Hamilton product. Non-commutative: accumulating incremental view input
/// uses the `delta * old` convention.
impl Mul for Quat {
    type Output = Quat;
    fn mul(self, b: Quat) -> Quat {
        let a = self;
        Quat {
            x: a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            y: a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            z: a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            w: a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!(
            (a - b).magnitude() < 1e-5,
            "vectors differ: {a:?} vs {b:?}"
        );
    }

    #[test]
    fn test_cross_follows_right_hand_rule() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_close(x.cross(y), Vec3::new(0.0, 0.0, 1.0));
        assert_close(y.cross(x), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_normalized_has_unit_length() {
        let v = Vec3::new(3.0, 4.0, 12.0).normalized();
        assert!((v.magnitude() - 1.0).abs() < 1e-6);
        assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
    }

    #[test]
    fn test_identity_rotation_is_noop() {
        let v = Vec3::new(1.5, -2.0, 0.25);
        assert_close(Quat::IDENTITY.rotate(v), v);
    }

    #[test]
    fn test_quarter_yaw_rotates_x_to_y() {
        // yaw is rotation about z in the euler convention used here
        let q = Quat::from_euler(PI / 2.0, 0.0, 0.0);
        assert_close(q.rotate(Vec3::new(1.0, 0.0, 0.0)), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_hamilton_product_composes_rotations() {
        let a = Quat::from_euler(PI / 3.0, 0.0, 0.0);
        let b = Quat::from_euler(0.0, PI / 5.0, 0.0);
        let v = Vec3::new(0.3, -1.1, 2.2);
        // rotating by (a * b) matches rotating by b then by a
        assert_close((a * b).rotate(v), a.rotate(b.rotate(v)));
    }

    #[test]
    fn test_full_turn_returns_to_start() {
        let q = Quat::from_euler(PI, 0.0, 0.0);
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_close(q.rotate(q.rotate(v)), v);
    }
}
