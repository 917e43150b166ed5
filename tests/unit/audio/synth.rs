use super::*;
use crate::hash::digest::Digest;

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "mandala_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn params() -> AudioParams {
    AudioParams::extract(&Digest::of_text("I am at peace"))
}

fn small_cfg() -> AudioConfig {
    AudioConfig {
        sample_rate: 8_000,
        ..AudioConfig::default()
    }
}

#[test]
fn schedule_is_deterministic_and_periodic() {
    let p = params();
    let cfg = AudioConfig::default();
    let a = schedule_bursts(&p, &cfg, 20.0);
    assert_eq!(a, schedule_bursts(&p, &cfg, 20.0));
    assert!(a.windows(2).all(|w| w[0].start_secs <= w[1].start_secs));

    let root: Vec<&Burst> = a.iter().filter(|b| b.voice == 0).collect();
    assert_eq!(root.len(), 5);
    assert!((root[0].start_secs - p.rhythm_offsets_ms[0] / 1000.0).abs() < 1e-12);
    for w in root.windows(2) {
        assert!((w[1].start_secs - w[0].start_secs - cfg.burst_period_secs).abs() < 1e-9);
    }
    assert!(a.iter().all(|b| b.start_secs < 20.0));
}

#[test]
fn final_burst_is_truncated_at_the_end() {
    let p = AudioParams {
        root_hz: 220.0,
        interval: 1.5,
        rhythm_offsets_ms: [0.0, 0.0],
        brightness: 0.5,
    };
    let bursts = schedule_bursts(&p, &AudioConfig::default(), 4.5);
    let last = bursts.last().unwrap();
    assert_eq!(last.start_secs, 4.0);
    assert!((last.duration_secs - 0.5).abs() < 1e-12);
    assert!(schedule_bursts(&p, &AudioConfig::default(), 0.0).is_empty());
}

#[test]
fn synthesized_audio_is_stereo_and_clamped() {
    let cfg = AudioConfig {
        gain: 10.0,
        ..small_cfg()
    };
    let pcm = synthesize(&params(), &cfg, 2.0).unwrap();
    assert_eq!(pcm.channels, 2);
    assert_eq!(pcm.frames(), 16_000);
    assert!((pcm.duration_secs() - 2.0).abs() < 1e-9);
    assert!(pcm.samples.iter().all(|s| (-1.0..=1.0).contains(s)));
}

#[test]
fn channels_differ_by_the_entrainment_offset() {
    let pcm = synthesize(&params(), &small_cfg(), 1.0).unwrap();
    let differs = pcm
        .samples
        .chunks_exact(2)
        .any(|f| (f[0] - f[1]).abs() > 1e-3);
    assert!(differs);

    let mono = AudioConfig {
        entrainment_hz: 0.0,
        ..small_cfg()
    };
    let pcm = synthesize(&params(), &mono, 1.0).unwrap();
    assert!(pcm.samples.chunks_exact(2).all(|f| f[0] == f[1]));
}

#[test]
fn synthesis_is_deterministic() {
    let a = synthesize(&params(), &small_cfg(), 1.0).unwrap();
    let b = synthesize(&params(), &small_cfg(), 1.0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn rejects_bad_duration() {
    assert!(synthesize(&params(), &small_cfg(), f64::NAN).is_err());
    assert!(synthesize(&params(), &small_cfg(), -1.0).is_err());
}

#[test]
fn wav_header_describes_stereo_16_bit() {
    let pcm = Pcm {
        sample_rate: 48_000,
        channels: 2,
        samples: vec![0.0, 1.0, -1.0, 0.5],
    };
    let bytes = wav_bytes(&pcm).unwrap();
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(&bytes[8..12], b"WAVE");
    assert_eq!(u16::from_le_bytes([bytes[22], bytes[23]]), 2);
    assert_eq!(u32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]), 48_000);
    assert_eq!(u32::from_le_bytes([bytes[40], bytes[41], bytes[42], bytes[43]]), 8);
    assert_eq!(bytes.len(), 44 + 8);
    assert_eq!(i16::from_le_bytes([bytes[46], bytes[47]]), i16::MAX);
}

#[test]
fn writers_create_files() {
    let dir = temp_dir("audio_writers");
    let pcm = synthesize(&params(), &small_cfg(), 0.25).unwrap();

    let wav = dir.join("nested/out.wav");
    write_wav(&pcm, &wav).unwrap();
    assert_eq!(
        std::fs::metadata(&wav).unwrap().len() as usize,
        44 + pcm.samples.len() * 2
    );

    let raw = dir.join("out.f32le");
    write_f32le(&pcm.samples, &raw).unwrap();
    assert_eq!(
        std::fs::metadata(&raw).unwrap().len() as usize,
        pcm.samples.len() * 4
    );
    std::fs::remove_dir_all(&dir).unwrap();
}
