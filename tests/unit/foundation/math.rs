use super::*;

#[test]
fn byte_units_cover_expected_intervals() {
    assert_eq!(unit_half_open(0), 0.0);
    assert!(unit_half_open(255) < 1.0);
    assert_eq!(unit_closed(0), 0.0);
    assert_eq!(unit_closed(255), 1.0);
}

#[test]
fn be_u16_orders_bytes() {
    assert_eq!(be_u16(0x12, 0x34), 0x1234);
    assert_eq!(be_u16(0xFF, 0xFF), u16::MAX);
}

#[test]
fn golden_angle_matches_phi() {
    let phi = (1.0 + 5f64.sqrt()) / 2.0;
    assert!((GOLDEN_ANGLE_DEG - 360.0 * (2.0 - phi)).abs() < 1e-9);
}

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
    assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
}
