use std::f64::consts::PI;

use crate::{
    field::points::FieldPoint,
    foundation::core::Vec2,
    geometry::rotate::{Vec3, Vec4, rotate_xw, rotate_xyz, rotate_yw, rotate_zw},
    params::bundle::{ParameterBundle, ProjectionKind},
    params::features::EngineFeatures,
};

/// Camera distance for the 3D perspective step.
pub const VIEW_DISTANCE: f64 = 4.0;
/// Camera distance along `w` for the 4D → 3D step.
pub const W_DISTANCE: f64 = 2.0;
/// Guard for the cylindrical `tan` and the perspective denominators.
pub const EPSILON: f64 = 1e-3;

const STEREO_MAX_PLANAR: f64 = 1.6;
const CYLINDRICAL_MAX_Y: f64 = 1.5;
const MIN_PERSPECTIVE_DENOM: f64 = 0.5;

/// Rotation accumulators advanced by the animation driver, in radians (hue in degrees).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct RotationState {
    /// Continuous Z spin, the parallax base rotation.
    pub spin: f64,
    /// Phase accumulators for the sine-driven X/Y tilt.
    pub tilt_x: f64,
    pub tilt_y: f64,
    pub xw: f64,
    pub yw: f64,
    pub zw: f64,
    /// Time-advancing hue rotation in degrees.
    pub hue: f64,
}

impl RotationState {
    /// Advance every accumulator by its configured speed times `multiplier`.
    pub fn advance(&mut self, params: &ParameterBundle, multiplier: f64) {
        self.spin += params.spin_speed * multiplier;
        self.tilt_x += params.tilt[0].speed * multiplier;
        self.tilt_y += params.tilt[1].speed * multiplier;
        self.xw += params.fold_speeds[0] * multiplier;
        self.yw += params.fold_speeds[1] * multiplier;
        self.zw += params.fold_speeds[2] * multiplier;
        self.hue = (self.hue + params.hue_drift * multiplier).rem_euclid(360.0);
    }

    /// Current bounded X/Y tilt angles.
    pub fn tilt_angles(&self, params: &ParameterBundle) -> (f64, f64) {
        let [ax, ay] = params.tilt;
        (
            ax.amplitude * (self.tilt_x + ax.phase).sin(),
            ay.amplitude * (self.tilt_y + ay.phase).sin(),
        )
    }
}

/// Inputs shared by every [`project`] call within one frame.
#[derive(Clone, Copy, Debug)]
pub struct ProjectionContext<'a> {
    pub params: &'a ParameterBundle,
    pub features: &'a EngineFeatures,
    pub rotation: &'a RotationState,
    pub ring_count: usize,
}

impl ProjectionContext<'_> {
    pub fn projection(&self) -> ProjectionKind {
        self.features
            .projection_override
            .unwrap_or(self.params.projection)
    }
}

/// Unit-plane position (before ring radius scaling) plus perspective scale and depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub pos: Vec2,
    pub scale: f64,
    pub depth: f64,
}

/// Per-ring parallax multiplier: `0.3` for the outermost ring (index 0) up to `1.8` for the
/// innermost (index `ring_count - 1`).
pub fn depth_factor(ring: usize, ring_count: usize) -> f64 {
    if ring_count < 2 {
        return 1.0;
    }
    let t = ring.min(ring_count - 1) as f64 / (ring_count - 1) as f64;
    0.3 + 1.5 * t
}

/// Effective rotation of `ring`: every ring turns the same direction, inner rings faster.
pub fn ring_angle(base: f64, ring: usize, ring_count: usize, parallax: bool) -> f64 {
    if parallax {
        base * depth_factor(ring, ring_count)
    } else {
        base
    }
}

/// Map a field point to plane coordinates `(x, y)` with depth `z`.
pub fn sphere_to_plane(kind: ProjectionKind, p: &FieldPoint) -> Vec3 {
    let phi = p.polar_rad();
    let theta = p.azimuth_rad();
    let r = p.radius;
    let depth = r * phi.cos();

    match kind {
        ProjectionKind::Orthographic => Vec3::new(
            r * phi.sin() * theta.cos(),
            r * phi.sin() * theta.sin(),
            depth,
        ),
        ProjectionKind::Stereographic => {
            let k = 2.0 / (1.0 + phi.cos()).max(EPSILON);
            let planar = (0.5 * k * phi.sin()).min(STEREO_MAX_PLANAR);
            Vec3::new(r * planar * theta.cos(), r * planar * theta.sin(), depth)
        }
        ProjectionKind::Cylindrical => {
            let theta = if theta > PI { theta - 2.0 * PI } else { theta };
            let half = (phi / 2.0 + EPSILON).min(PI / 2.0 - EPSILON);
            let y = (half.tan().ln() * 0.3).clamp(-CYLINDRICAL_MAX_Y, CYLINDRICAL_MAX_Y);
            Vec3::new(theta / PI, y, depth)
        }
    }
}

/// Rotate through the XW, YW, ZW planes and collapse back to 3D by perspective on `w`.
pub fn fold_4d(v: Vec3, p: &FieldPoint, w_scale: f64, rot: &RotationState) -> Vec3 {
    let w = p.polar_rad().cos() * p.radius * w_scale;
    let v4 = rotate_zw(
        rotate_yw(rotate_xw(Vec4::new(v.x, v.y, v.z, w), rot.xw), rot.yw),
        rot.zw,
    );
    let f = W_DISTANCE / (W_DISTANCE - v4.w).max(MIN_PERSPECTIVE_DENOM);
    Vec3::new(v4.x, v4.y, v4.z).scale(f)
}

/// Project one field point for `ring` under the current rotation state.
///
/// Composition order: sphere → plane, optional 4D fold, optional X/Y tilt, Z rotation by the
/// ring's parallax angle, then perspective when any depth rotation is active.
pub fn project(p: &FieldPoint, ring: usize, ctx: &ProjectionContext<'_>) -> Projected {
    let features = ctx.features;
    let mut v = sphere_to_plane(ctx.projection(), p);

    if features.fold_4d {
        v = fold_4d(v, p, ctx.params.w_scale, ctx.rotation);
    }
    let (ax, ay) = if features.tilt_3d {
        ctx.rotation.tilt_angles(ctx.params)
    } else {
        (0.0, 0.0)
    };
    let az = ring_angle(ctx.rotation.spin, ring, ctx.ring_count, features.parallax);
    v = rotate_xyz(v, ax, ay, az);

    let scale = if features.tilt_3d || features.fold_4d {
        VIEW_DISTANCE / (VIEW_DISTANCE + v.z).max(MIN_PERSPECTIVE_DENOM)
    } else {
        1.0
    };

    Projected {
        pos: v.xy() * scale,
        scale,
        depth: v.z,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/project.rs"]
mod tests;
