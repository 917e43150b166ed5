use std::f64::consts::{PI, TAU};
use std::io::Write;
use std::path::Path;

use crate::{
    audio::params::{AudioConfig, AudioParams},
    foundation::error::{MandalaError, MandalaResult},
};

const DRONE_LEVEL: f64 = 0.5;
const BURST_LEVEL: f64 = 0.6;

/// One enveloped oscillator burst.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Burst {
    /// 0 for the root voice, 1 for the interval voice.
    pub voice: usize,
    pub start_secs: f64,
    pub duration_secs: f64,
    pub hz: f64,
}

/// Interleaved stereo PCM.
#[derive(Clone, Debug, PartialEq)]
pub struct Pcm {
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<f32>,
}

impl Pcm {
    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(self.channels.max(1))
    }

    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / f64::from(self.sample_rate.max(1))
    }
}

/// Fixed-rate burst timers for both voices over `[0, duration_secs)`, ordered by start time.
pub fn schedule_bursts(params: &AudioParams, cfg: &AudioConfig, duration_secs: f64) -> Vec<Burst> {
    let mut out = Vec::new();
    if !duration_secs.is_finite() || duration_secs <= 0.0 || cfg.burst_period_secs <= 0.0 {
        return out;
    }
    let hz = params.burst_hz();
    for voice in 0..2 {
        let offset = params.rhythm_offsets_ms[voice] / 1000.0;
        for k in 0u32.. {
            let start = offset + f64::from(k) * cfg.burst_period_secs;
            if start >= duration_secs {
                break;
            }
            out.push(Burst {
                voice,
                start_secs: start,
                duration_secs: cfg.burst_secs.min(duration_secs - start),
                hz: hz[voice],
            });
        }
    }
    out.sort_by(|a, b| {
        a.start_secs
            .total_cmp(&b.start_secs)
            .then(a.voice.cmp(&b.voice))
    });
    out
}

/// Render the texture: a binaural drone plus the scheduled bursts, clamped to `[-1, 1]`.
#[tracing::instrument(skip(params, cfg), fields(root_hz = params.root_hz))]
pub fn synthesize(
    params: &AudioParams,
    cfg: &AudioConfig,
    duration_secs: f64,
) -> MandalaResult<Pcm> {
    cfg.validate()?;
    if !duration_secs.is_finite() || duration_secs < 0.0 {
        return Err(MandalaError::validation(
            "audio duration must be finite and >= 0",
        ));
    }

    let sr = f64::from(cfg.sample_rate);
    let frames = (duration_secs * sr).round() as usize;
    let mut out = vec![0.0f32; frames * 2];

    let left_hz = params.root_hz;
    let right_hz = params.root_hz + cfg.entrainment_hz;
    for (i, frame) in out.chunks_exact_mut(2).enumerate() {
        let t = i as f64 / sr;
        frame[0] += (DRONE_LEVEL * (TAU * left_hz * t).sin()) as f32;
        frame[1] += (DRONE_LEVEL * (TAU * right_hz * t).sin()) as f32;
    }

    let bright = params.brightness;
    let norm = 1.0 + 0.5 * bright + 0.25 * bright * bright;
    for burst in schedule_bursts(params, cfg, duration_secs) {
        let first = (burst.start_secs * sr).round() as usize;
        let len = (burst.duration_secs * sr).round() as usize;
        for n in 0..len {
            let Some(frame) = out.get_mut((first + n) * 2..(first + n) * 2 + 2) else {
                break;
            };
            let u = n as f64 / len.max(1) as f64;
            let env = (PI * u).sin();
            let t = n as f64 / sr;
            let phase = TAU * burst.hz * t;
            let tone = phase.sin()
                + 0.5 * bright * (2.0 * phase).sin()
                + 0.25 * bright * bright * (3.0 * phase).sin();
            let v = (BURST_LEVEL * env * tone / norm) as f32;
            frame[0] += v;
            frame[1] += v;
        }
    }

    for s in &mut out {
        *s = (*s * cfg.gain).clamp(-1.0, 1.0);
    }
    tracing::debug!(frames, "synthesized audio texture");
    Ok(Pcm {
        sample_rate: cfg.sample_rate,
        channels: 2,
        samples: out,
    })
}

/// 16-bit PCM WAV encoding of `pcm`.
pub fn wav_bytes(pcm: &Pcm) -> MandalaResult<Vec<u8>> {
    let channels = pcm.channels;
    let bits_per_sample: u16 = 16;
    let byte_rate = pcm.sample_rate * u32::from(channels) * u32::from(bits_per_sample) / 8;
    let block_align = channels * bits_per_sample / 8;
    let data_bytes = u32::try_from(pcm.samples.len() * std::mem::size_of::<i16>())
        .map_err(|_| MandalaError::validation("audio too long for a WAV file"))?;
    let riff_size = 4 + 8 + 16 + 8 + data_bytes;

    let mut w = Vec::with_capacity(44 + data_bytes as usize);
    w.extend_from_slice(b"RIFF");
    w.extend_from_slice(&riff_size.to_le_bytes());
    w.extend_from_slice(b"WAVE");

    w.extend_from_slice(b"fmt ");
    w.extend_from_slice(&16u32.to_le_bytes());
    w.extend_from_slice(&1u16.to_le_bytes()); // PCM
    w.extend_from_slice(&channels.to_le_bytes());
    w.extend_from_slice(&pcm.sample_rate.to_le_bytes());
    w.extend_from_slice(&byte_rate.to_le_bytes());
    w.extend_from_slice(&block_align.to_le_bytes());
    w.extend_from_slice(&bits_per_sample.to_le_bytes());

    w.extend_from_slice(b"data");
    w.extend_from_slice(&data_bytes.to_le_bytes());
    for &s in &pcm.samples {
        let v = (s.clamp(-1.0, 1.0) * f32::from(i16::MAX)).round() as i16;
        w.extend_from_slice(&v.to_le_bytes());
    }
    Ok(w)
}

pub fn write_wav(pcm: &Pcm, out_path: &Path) -> MandalaResult<()> {
    let bytes = wav_bytes(pcm)?;
    write_bytes(&bytes, out_path, "wav")
}

/// Interleaved samples as raw little-endian `f32`.
pub fn write_f32le(samples: &[f32], out_path: &Path) -> MandalaResult<()> {
    let mut bytes = Vec::<u8>::with_capacity(samples.len() * 4);
    for &sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    write_bytes(&bytes, out_path, "f32le")
}

fn write_bytes(bytes: &[u8], out_path: &Path, what: &str) -> MandalaResult<()> {
    if let Some(parent) = out_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "failed to create {what} output directory '{}': {e}",
                parent.display()
            )
        })?;
    }
    let mut file = std::io::BufWriter::new(std::fs::File::create(out_path).map_err(|e| {
        anyhow::anyhow!("failed to create {what} file '{}': {e}", out_path.display())
    })?);
    file.write_all(bytes)
        .and_then(|()| file.flush())
        .map_err(|e| {
            anyhow::anyhow!("failed to write {what} file '{}': {e}", out_path.display())
        })?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/audio/synth.rs"]
mod tests;
