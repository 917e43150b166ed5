use super::*;

#[test]
fn canvas_rejects_zero_and_oversized_surfaces() {
    assert!(Canvas::square(64).to_u16().is_ok());
    assert!(matches!(
        Canvas::square(0).to_u16(),
        Err(MandalaError::RenderSurfaceUnavailable(_))
    ));
    assert!(matches!(
        Canvas {
            width: 70_000,
            height: 10
        }
        .to_u16(),
        Err(MandalaError::RenderSurfaceUnavailable(_))
    ));
}

#[test]
fn canvas_center_and_radius() {
    let c = Canvas {
        width: 200,
        height: 100,
    };
    assert_eq!(c.center(), Point::new(100.0, 50.0));
    assert_eq!(c.inner_radius(), 50.0);
}

#[test]
fn fps_rejects_zero() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_floor(2.0), 60);
}

#[test]
fn hsla_primaries() {
    assert_eq!(Rgba8::from_hsla(0.0, 1.0, 0.5, 1.0), Rgba8::opaque(255, 0, 0));
    assert_eq!(Rgba8::from_hsla(120.0, 1.0, 0.5, 1.0), Rgba8::opaque(0, 255, 0));
    assert_eq!(Rgba8::from_hsla(240.0, 1.0, 0.5, 1.0), Rgba8::opaque(0, 0, 255));
    // Hue wraps.
    assert_eq!(
        Rgba8::from_hsla(360.0 + 120.0, 1.0, 0.5, 1.0),
        Rgba8::from_hsla(120.0, 1.0, 0.5, 1.0)
    );
    assert_eq!(Rgba8::from_hsla(33.0, 0.0, 0.0, 1.0), Rgba8::BLACK);
}

#[test]
fn premul_scales_channels() {
    assert_eq!(Rgba8::opaque(10, 20, 30).to_premul(), [10, 20, 30, 255]);
    assert_eq!(Rgba8::opaque(255, 255, 255).with_alpha(0.0).to_premul(), [0, 0, 0, 0]);
    let half = Rgba8::opaque(200, 100, 0).with_alpha(0.5).to_premul();
    assert_eq!(half[3], 128);
    assert_eq!(half[0], 100);
}
