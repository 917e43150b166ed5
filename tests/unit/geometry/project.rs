use super::*;
use crate::{field::points::build_points, hash::digest::Digest};

fn sample_points() -> Vec<FieldPoint> {
    let mut out = Vec::new();
    for i in 0..32 {
        out.extend(build_points(&Digest::of_text(&format!("projection {i}")), 15));
    }
    out
}

fn point(lon: f64, lat: f64, radius: f64) -> FieldPoint {
    FieldPoint {
        longitude: lon,
        latitude: lat,
        radius,
        color_shift: 0.0,
        size_variance: 1.0,
        glow: 0.5,
    }
}

#[test]
fn parallax_inner_ring_turns_six_times_outer() {
    for n in 2..=7 {
        let ratio = depth_factor(n - 1, n) / depth_factor(0, n);
        assert!((5.0..=7.0).contains(&ratio), "ratio {ratio} for {n} rings");
        assert!((ratio - 6.0).abs() < 1e-12);
    }
    assert_eq!(depth_factor(0, 1), 1.0);
}

#[test]
fn parallax_keeps_direction_and_orders_speeds() {
    let base = 0.25;
    let angles: Vec<f64> = (0..5).map(|k| ring_angle(base, k, 5, true)).collect();
    assert!(angles.iter().all(|a| *a > 0.0));
    assert!(angles.windows(2).all(|w| w[1] > w[0]));
    assert_eq!(ring_angle(base, 3, 5, false), base);
}

#[test]
fn orthographic_silhouette_is_circular() {
    for p in sample_points() {
        let v = sphere_to_plane(ProjectionKind::Orthographic, &p);
        assert!(v.xy().hypot() <= p.radius + 1e-9);
    }
}

#[test]
fn stereographic_equator_is_unit_scale() {
    let v = sphere_to_plane(ProjectionKind::Stereographic, &point(0.0, 0.0, 1.0));
    assert!((v.x - 1.0).abs() < 1e-9 && v.y.abs() < 1e-9);
    // Near the south pole the planar magnitude is clamped.
    let far = sphere_to_plane(ProjectionKind::Stereographic, &point(45.0, -89.9, 1.0));
    assert!(far.xy().hypot() <= 1.6 + 1e-9);
}

#[test]
fn every_projection_is_finite_at_the_poles() {
    for kind in [
        ProjectionKind::Orthographic,
        ProjectionKind::Stereographic,
        ProjectionKind::Cylindrical,
    ] {
        for lat in [-90.0, 90.0] {
            for lon in [0.0, 180.0, 359.9] {
                let v = sphere_to_plane(kind, &point(lon, lat, 1.4));
                assert!(v.x.is_finite() && v.y.is_finite() && v.z.is_finite(), "{kind:?}");
            }
        }
    }
}

#[test]
fn project_is_finite_with_every_feature() {
    let digest = Digest::of_text("fold me");
    let params = ParameterBundle::extract(&digest);
    let features = EngineFeatures::cosmic();
    let mut rotation = RotationState::default();
    for _ in 0..500 {
        rotation.advance(&params, 1.0);
    }
    for kind in [
        ProjectionKind::Orthographic,
        ProjectionKind::Stereographic,
        ProjectionKind::Cylindrical,
    ] {
        let features = EngineFeatures {
            projection_override: Some(kind),
            ..features
        };
        let ctx = ProjectionContext {
            params: &params,
            features: &features,
            rotation: &rotation,
            ring_count: params.ring_count,
        };
        for p in sample_points() {
            for ring in 0..params.ring_count {
                let out = project(&p, ring, &ctx);
                assert!(out.pos.x.is_finite() && out.pos.y.is_finite());
                assert!(out.scale > 0.0 && out.scale.is_finite());
            }
        }
    }
}

#[test]
fn flat_projection_has_unit_scale() {
    let params = ParameterBundle::extract(&Digest::of_text("flat"));
    let features = EngineFeatures::flat();
    let rotation = RotationState::default();
    let ctx = ProjectionContext {
        params: &params,
        features: &features,
        rotation: &rotation,
        ring_count: params.ring_count,
    };
    let out = project(&point(30.0, 10.0, 1.0), 0, &ctx);
    assert_eq!(out.scale, 1.0);
}

#[test]
fn tilt_stays_within_amplitude() {
    let params = ParameterBundle::extract(&Digest::of_text("tilt"));
    let mut rotation = RotationState::default();
    for _ in 0..2000 {
        rotation.advance(&params, 1.0);
        let (ax, ay) = rotation.tilt_angles(&params);
        assert!(ax.abs() <= params.tilt[0].amplitude + 1e-12);
        assert!(ay.abs() <= params.tilt[1].amplitude + 1e-12);
        assert!(ax.abs() < std::f64::consts::FRAC_PI_2);
    }
}

#[test]
fn hue_accumulator_wraps() {
    let params = ParameterBundle::extract(&Digest::of_text("hue"));
    let mut rotation = RotationState::default();
    rotation.advance(&params, 10_000.0);
    assert!((0.0..360.0).contains(&rotation.hue));
}

#[test]
fn cylindrical_x_is_azimuth_over_pi_for_any_radius() {
    for radius in [0.5, 1.0, 1.4] {
        let east = sphere_to_plane(ProjectionKind::Cylindrical, &point(90.0, 0.0, radius));
        assert!((east.x - 0.5).abs() < 1e-12, "{}", east.x);
        let west = sphere_to_plane(ProjectionKind::Cylindrical, &point(270.0, 0.0, radius));
        assert!((west.x + 0.5).abs() < 1e-12, "{}", west.x);

        let half = std::f64::consts::FRAC_PI_4 + EPSILON;
        assert!((east.y - half.tan().ln() * 0.3).abs() < 1e-12);
    }
}

#[test]
fn without_depth_rotation_projection_is_a_plain_ring_turn() {
    let params = ParameterBundle::extract(&Digest::of_text("turn"));
    let features = EngineFeatures::default();
    let rotation = RotationState {
        spin: 0.7,
        ..RotationState::default()
    };
    let ctx = ProjectionContext {
        params: &params,
        features: &features,
        rotation: &rotation,
        ring_count: 4,
    };
    let p = point(40.0, 25.0, 1.2);
    let flat = sphere_to_plane(ctx.projection(), &p);
    for ring in 0..4 {
        let angle = ring_angle(0.7, ring, 4, true);
        let expected = crate::geometry::rotate::rotate_vec(flat.xy(), angle);
        let out = project(&p, ring, &ctx);
        assert!((out.pos - expected).hypot() < 1e-12);
        assert!((out.depth - flat.z).abs() < 1e-12);
    }
}
