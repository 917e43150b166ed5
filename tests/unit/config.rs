use super::*;
use crate::foundation::core::Canvas;

#[test]
fn empty_object_is_the_default_config() {
    let cfg = MandalaConfig::from_json("{}").unwrap();
    assert_eq!(cfg, MandalaConfig::default());
    assert_eq!(cfg.word_limit, 50);
    assert_eq!(cfg.audio.entrainment_hz, 7.83);
    assert_eq!(cfg.session_frames(), 3600);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let cfg = MandalaConfig::from_json(
        r#"{
            "scene": { "canvas": { "width": 400, "height": 400 } },
            "features": { "fold_4d": true, "style": "evolving" },
            "animation": { "dissolve": { "duration_ms": 1500 } }
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.scene.canvas, Canvas::square(400));
    assert!(cfg.scene.signature);
    assert!(cfg.features.fold_4d && cfg.features.parallax);
    assert_eq!(cfg.animation.dissolve.duration_ms, 1500);
    assert_eq!(cfg.animation.dissolve.steps, 60);
}

#[test]
fn json_round_trip() {
    let cfg = MandalaConfig {
        word_limit: 12,
        overlay_font: Some("fonts/a.ttf".into()),
        ..MandalaConfig::default()
    };
    let back = MandalaConfig::from_json(&cfg.to_json_pretty().unwrap()).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn invalid_values_are_rejected() {
    for bad in [
        r#"{ "fps": { "num": 60, "den": 0 } }"#,
        r#"{ "scene": { "canvas": { "width": 0, "height": 10 } } }"#,
        r#"{ "word_limit": 0 }"#,
        r#"{ "session_secs": -1.0 }"#,
        r#"{ "animation": { "trail_veil": 2.0 } }"#,
        r#"{ "audio": { "sample_rate": 0 } }"#,
    ] {
        assert!(
            matches!(MandalaConfig::from_json(bad), Err(MandalaError::Validation(_))),
            "{bad}"
        );
    }
    assert!(matches!(
        MandalaConfig::from_json("[1, 2]"),
        Err(MandalaError::Serde(_))
    ));
}
