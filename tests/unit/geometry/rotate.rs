use std::f64::consts::FRAC_PI_2;

use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn rotate_about_quarter_turn() {
    let c = Point::new(10.0, 10.0);
    let p = rotate_about(Point::new(11.0, 10.0), c, FRAC_PI_2);
    assert!(close(p.x, 10.0) && close(p.y, 11.0), "{p:?}");
}

#[test]
fn repeated_small_rotations_keep_direction() {
    // Accumulating many positive steps must keep turning the same way (no compounding flips).
    let c = Point::new(0.0, 0.0);
    let mut p = Point::new(1.0, 0.0);
    let mut prev = 0.0f64;
    for _ in 0..100 {
        p = rotate_about(p, c, 0.01);
        let a = p.y.atan2(p.x);
        assert!(a > prev);
        prev = a;
    }
    assert!(close(prev, 1.0));
}

#[test]
fn rotations_preserve_length() {
    let v = Vec3::new(0.3, -0.7, 0.2);
    let len = |v: Vec3| (v.x * v.x + v.y * v.y + v.z * v.z).sqrt();
    let r = rotate_xyz(v, 0.4, -1.1, 2.5);
    assert!(close(len(v), len(r)));

    let w = Vec4::new(0.1, 0.2, 0.3, 0.4);
    let len4 = |v: Vec4| (v.x * v.x + v.y * v.y + v.z * v.z + v.w * v.w).sqrt();
    let r4 = rotate_zw(rotate_yw(rotate_xw(w, 0.3), 0.2), 0.1);
    assert!(close(len4(w), len4(r4)));
}

#[test]
fn axis_rotations_fix_their_axis() {
    let v = Vec3::new(1.0, 2.0, 3.0);
    assert!(close(rotate_x(v, 1.0).x, 1.0));
    assert!(close(rotate_y(v, 1.0).y, 2.0));
    assert!(close(rotate_z(v, 1.0).z, 3.0));
    let w = rotate_xw(Vec4::new(1.0, 2.0, 3.0, 0.0), FRAC_PI_2);
    assert!(close(w.x, 0.0) && close(w.w, 1.0) && close(w.y, 2.0) && close(w.z, 3.0));
}
