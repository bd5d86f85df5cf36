//! Offline rendering of a WAV file through the equalizer.

use clap::ArgMatches;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::{debug, info, warn};
use trieq_lib::params::{ParameterSource, ParameterStore};
use trieq_lib::EqualizerEngine;

use super::settings;
use crate::error::RunError;

/// Decoded audio, one buffer per channel.
pub struct PlanarAudio {
    pub sample_rate: u32,
    pub channels: Vec<Vec<f32>>,
}

impl PlanarAudio {
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }
}

pub fn run(args: &ArgMatches) -> Result<i32, RunError> {
    let input = args
        .get_one::<String>("INPUT")
        .ok_or(RunError::MissingArgument("INPUT"))?;
    let output = args
        .get_one::<String>("OUTPUT")
        .ok_or(RunError::MissingArgument("OUTPUT"))?;
    let block_size = args
        .get_one::<usize>("block-size")
        .copied()
        .ok_or(RunError::MissingArgument("block-size"))?;

    let store = ParameterStore::new();
    store.apply(&settings::resolve(args)?)?;

    let mut audio = read_wav(input)?;
    let mut engine = EqualizerEngine::new();
    engine.prepare(
        f64::from(audio.sample_rate),
        block_size,
        audio.channels.len(),
    )?;
    debug!("rendering with {:?}", store.snapshot());

    render(&mut engine, &store, &mut audio, block_size);
    write_wav(output, &audio)?;

    info!(
        "rendered {} frame(s) of {} channel audio at {} Hz to {}",
        audio.frames(),
        audio.channels.len(),
        audio.sample_rate,
        output
    );
    Ok(0)
}

/// Run every frame through `engine` in blocks of at most `block_size`.
pub fn render(
    engine: &mut EqualizerEngine,
    store: &ParameterStore,
    audio: &mut PlanarAudio,
    block_size: usize,
) {
    let frames = audio.frames();
    let mut clamped = false;
    let mut start = 0;
    while start < frames {
        let end = (start + block_size).min(frames);
        let mut block: Vec<&mut [f32]> = audio
            .channels
            .iter_mut()
            .map(|channel| &mut channel[start..end])
            .collect();
        engine.process_from(&mut block, store);
        if engine.is_clamped() && !clamped {
            warn!(
                "parameters out of range at {} Hz, clamped from frame {}",
                engine.sample_rate(),
                start
            );
        }
        clamped = engine.is_clamped();
        start = end;
    }
}

/// Read a WAV file into planar `f32` samples in `-1.0..1.0`.
pub fn read_wav(path: &str) -> Result<PlanarAudio, RunError> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channel_count = usize::from(spec.channels).max(1);

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = 1.0 / (1_u64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .samples::<i32>()
                .map(|sample| sample.map(|value| value as f32 * scale))
                .collect::<Result<_, _>>()?
        }
    };

    let frames = interleaved.len() / channel_count;
    let mut channels = vec![Vec::with_capacity(frames); channel_count];
    for frame in interleaved.chunks_exact(channel_count) {
        for (channel, sample) in channels.iter_mut().zip(frame) {
            channel.push(*sample);
        }
    }

    Ok(PlanarAudio {
        sample_rate: spec.sample_rate,
        channels,
    })
}

/// Write planar samples as an interleaved 32-bit float WAV.
pub fn write_wav(path: &str, audio: &PlanarAudio) -> Result<(), RunError> {
    let spec = WavSpec {
        channels: audio.channels.len() as u16,
        sample_rate: audio.sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for frame in 0..audio.frames() {
        for channel in &audio.channels {
            writer.write_sample(channel[frame])?;
        }
    }
    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trieq_lib::params::ParameterId;

    fn sine(freq: f32, sample_rate: u32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|n| (2.0 * std::f32::consts::PI * freq * n as f32 / sample_rate as f32).sin())
            .collect()
    }

    #[test]
    fn int_wav_is_read_as_planar_float() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("in.wav");
        let spec = WavSpec {
            channels: 2,
            sample_rate: 44_100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).expect("create");
        for _ in 0..8 {
            writer.write_sample(i16::MAX).expect("left");
            writer.write_sample(i16::MIN).expect("right");
        }
        writer.finalize().expect("finalize");

        let audio = read_wav(path.to_str().expect("utf-8 path")).expect("read");
        assert_eq!(audio.sample_rate, 44_100);
        assert_eq!(audio.channels.len(), 2);
        assert_eq!(audio.frames(), 8);
        assert!(audio.channels[0].iter().all(|s| (*s - 1.0).abs() < 1e-3));
        assert!(audio.channels[1].iter().all(|s| *s == -1.0));
    }

    #[test]
    fn render_follows_the_store() {
        let store = ParameterStore::new();
        store.set(ParameterId::PeakFreq, 2_000.0).expect("freq");
        store.set(ParameterId::PeakGain, 6.0).expect("gain");

        let input = sine(2_000.0, 48_000, 24_000);
        let mut audio = PlanarAudio {
            sample_rate: 48_000,
            channels: vec![input.clone()],
        };
        let mut engine = EqualizerEngine::new();
        engine.prepare(48_000.0, 300, 1).expect("prepare");
        render(&mut engine, &store, &mut audio, 300);

        let peak_in = input[12_000..].iter().fold(0.0_f32, |acc, s| acc.max(s.abs()));
        let peak_out = audio.channels[0][12_000..]
            .iter()
            .fold(0.0_f32, |acc, s| acc.max(s.abs()));
        let gain_db = 20.0 * (peak_out / peak_in).log10();
        assert!((gain_db - 6.0).abs() < 0.5, "gain {} dB", gain_db);
    }
}
