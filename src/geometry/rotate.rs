//! Explicit coordinate-space rotations.
//!
//! Every rotation here maps coordinates to coordinates. Callers compose them as plain
//! functions; there is no transform stack that could compound or flip direction.

use crate::foundation::core::{Point, Vec2};

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn scale(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    pub fn xy(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Vec4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Vec4 {
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }
}

/// Counter-clockwise (in y-up terms) rotation of `v` by `angle` radians.
pub fn rotate_vec(v: Vec2, angle: f64) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(v.x * c - v.y * s, v.x * s + v.y * c)
}

/// Rotate `p` around `center` by `angle` radians.
pub fn rotate_about(p: Point, center: Point, angle: f64) -> Point {
    center + rotate_vec(p - center, angle)
}

pub fn rotate_x(v: Vec3, angle: f64) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(v.x, v.y * c - v.z * s, v.y * s + v.z * c)
}

pub fn rotate_y(v: Vec3, angle: f64) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(v.x * c + v.z * s, v.y, -v.x * s + v.z * c)
}

pub fn rotate_z(v: Vec3, angle: f64) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(v.x * c - v.y * s, v.x * s + v.y * c, v.z)
}

/// X, then Y, then Z.
pub fn rotate_xyz(v: Vec3, ax: f64, ay: f64, az: f64) -> Vec3 {
    rotate_z(rotate_y(rotate_x(v, ax), ay), az)
}

pub fn rotate_xw(v: Vec4, angle: f64) -> Vec4 {
    let (s, c) = angle.sin_cos();
    Vec4::new(v.x * c - v.w * s, v.y, v.z, v.x * s + v.w * c)
}

pub fn rotate_yw(v: Vec4, angle: f64) -> Vec4 {
    let (s, c) = angle.sin_cos();
    Vec4::new(v.x, v.y * c - v.w * s, v.z, v.y * s + v.w * c)
}

pub fn rotate_zw(v: Vec4, angle: f64) -> Vec4 {
    let (s, c) = angle.sin_cos();
    Vec4::new(v.x, v.y, v.z * c - v.w * s, v.z * s + v.w * c)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/rotate.rs"]
mod tests;
