use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
    assert!(over_in_place(&mut [0u8; 6], &[0u8; 6], 1.0).is_err());
}

#[test]
fn full_veil_clears_to_black() {
    let mut buf = [200u8, 100, 50, 255].repeat(4);
    veil_in_place(&mut buf, 1.0).unwrap();
    assert!(buf.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn partial_veil_fades_trail() {
    let mut buf = [200u8, 200, 200, 255].repeat(2);
    veil_in_place(&mut buf, 0.5).unwrap();
    let first = buf[0];
    assert!(first > 0 && first < 200, "{first}");
    veil_in_place(&mut buf, 0.5).unwrap();
    assert!(buf[0] < first);
    assert_eq!(buf[3], 255);
}

#[test]
fn fill_overwrites_every_pixel() {
    let mut buf = vec![7u8; 16];
    fill_in_place(&mut buf, [0, 0, 0, 255]).unwrap();
    assert!(buf.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}
