use super::*;
use crate::{
    params::features::EngineFeatures,
    pattern::Pattern,
    render::scene::{FrameInput, SceneConfig, render_frame},
};

fn small_config() -> SceneConfig {
    SceneConfig {
        canvas: Canvas::square(96),
        ..SceneConfig::default()
    }
}

#[test]
fn rejects_unusable_canvas_sizes() {
    assert!(matches!(
        CpuRasterizer::new(Canvas::square(0)),
        Err(MandalaError::RenderSurfaceUnavailable(_))
    ));
    assert!(matches!(
        CpuRasterizer::new(Canvas {
            width: 70_000,
            height: 10
        }),
        Err(MandalaError::RenderSurfaceUnavailable(_))
    ));
}

#[test]
fn fresh_surface_is_black() {
    let mut r = CpuRasterizer::new(Canvas::square(8)).unwrap();
    let frame = r.render(&FrameScene::black(Canvas::square(8))).unwrap();
    assert!(frame.is_black());
    assert_eq!(frame.data.len(), 8 * 8 * 4);
}

#[test]
fn breathing_frame_draws_visible_pixels() {
    let p = Pattern::generate("I am at peace", EngineFeatures::default()).unwrap();
    let cfg = small_config();
    let mut r = CpuRasterizer::new(cfg.canvas).unwrap();
    let frame = r
        .render(&render_frame(&p, &FrameInput::at_rest(0.9), &cfg))
        .unwrap();
    assert!(!frame.is_black());
    let center = frame.pixel(48, 48).unwrap();
    assert!(center[0] > 0 || center[1] > 0 || center[2] > 0, "{center:?}");
}

#[test]
fn rendering_is_deterministic() {
    let p = Pattern::generate("steady", EngineFeatures::cosmic()).unwrap();
    let cfg = small_config();
    let scene = render_frame(&p, &FrameInput::at_rest(0.9), &cfg);
    let a = CpuRasterizer::new(cfg.canvas).unwrap().render(&scene).unwrap();
    let b = CpuRasterizer::new(cfg.canvas).unwrap().render(&scene).unwrap();
    assert_eq!(a, b);
}

#[test]
fn fill_overwrites_the_trail() {
    let p = Pattern::generate("fade", EngineFeatures::default()).unwrap();
    let cfg = small_config();
    let mut r = CpuRasterizer::new(cfg.canvas).unwrap();
    r.render(&render_frame(&p, &FrameInput::at_rest(0.9), &cfg))
        .unwrap();
    let frame = r.render(&FrameScene::black(cfg.canvas)).unwrap();
    assert!(frame.is_black());
}

#[test]
fn low_veil_keeps_a_trail() {
    let cfg = small_config();
    let mut r = CpuRasterizer::new(cfg.canvas).unwrap();
    let dot = FrameScene {
        canvas: cfg.canvas,
        ops: vec![DrawOp::Dot {
            center: Point::new(48.0, 48.0),
            radius: 10.0,
            color: Rgba8::opaque(255, 255, 255),
            glow: 0.0,
        }],
    };
    r.render(&dot).unwrap();
    let veiled = r
        .render(&FrameScene {
            canvas: cfg.canvas,
            ops: vec![DrawOp::Veil { opacity: 0.3 }],
        })
        .unwrap();
    let px = veiled.pixel(48, 48).unwrap();
    assert!(px[0] > 100 && px[0] < 255, "{px:?}");
}

#[test]
fn canvas_change_resizes_surface() {
    let mut r = CpuRasterizer::new(Canvas::square(8)).unwrap();
    let frame = r.render(&FrameScene::black(Canvas::square(16))).unwrap();
    assert_eq!((frame.width, frame.height), (16, 16));
    assert_eq!(r.canvas(), Canvas::square(16));
}

#[test]
fn signature_is_rasterized_without_a_font() {
    let cfg = SceneConfig {
        canvas: Canvas::square(200),
        ..SceneConfig::default()
    };
    let mut r = CpuRasterizer::new(cfg.canvas).unwrap();
    let scene = FrameScene {
        canvas: cfg.canvas,
        ops: vec![DrawOp::Signature {
            hex: "8".repeat(64),
            origin: Point::new(20.0, 20.0),
            size: 12.0,
            color: Rgba8::opaque(255, 255, 255),
        }],
    };
    let frame = r.render(&scene).unwrap();
    assert!(!frame.is_black());
}

#[test]
fn straight_alpha_unpremultiplies() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 0, 0, 128],
        premultiplied: true,
    };
    assert_eq!(frame.to_straight(), vec![128, 0, 0, 128]);
    assert_eq!(frame.pixel(1, 0), None);
}

#[test]
fn missing_font_is_reported_once() {
    let p = Pattern::generate("I am at peace", EngineFeatures::default()).unwrap();
    let cfg = small_config();
    assert!(cfg.intention_overlay);
    let scene = render_frame(&p, &FrameInput::at_rest(0.9), &cfg);
    assert!(scene.ops.iter().any(|op| matches!(op, DrawOp::Text { .. })));

    let mut r = CpuRasterizer::new(cfg.canvas).unwrap();
    assert!(!r.warned_missing_font);
    r.render(&scene).unwrap();
    assert!(r.warned_missing_font);
    // Still renders; the flag stays set instead of logging per frame.
    assert!(!r.render(&scene).unwrap().is_black());
    assert!(r.warned_missing_font);
}

#[test]
fn no_font_warning_without_an_intention_overlay() {
    let p = Pattern::generate("I am at peace", EngineFeatures::default()).unwrap();
    let cfg = SceneConfig {
        intention_overlay: false,
        ..small_config()
    };
    let mut r = CpuRasterizer::new(cfg.canvas).unwrap();
    r.render(&render_frame(&p, &FrameInput::at_rest(0.9), &cfg))
        .unwrap();
    assert!(!r.warned_missing_font);
}
