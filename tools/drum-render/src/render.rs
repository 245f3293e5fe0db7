//! Offline pattern rendering and WAV output
//!
//! Time is driven by the number of samples produced: the engine runs on a
//! [`ManualClock`] that is set from the sample count before every render
//! call, so renders are reproducible and the idle timer sees pattern time.

use std::path::Path;

use anyhow::{Context, Result};
use drum_synth::{AUDIO_BLOCK_SIZE, DrumSynth, ManualClock, PcgNoise, SAMPLE_RATE};
use ringbuf::HeapRb;
use ringbuf::traits::Consumer;
use tracing::{debug, info, warn};

use crate::config::RenderConfig;

/// Beats per bar
const BEATS_PER_BAR: u64 = 4;

/// Rendered audio plus the matching cutoff bus, one byte each per sample
#[derive(Debug, Default)]
pub struct RenderOutput {
    pub audio: Vec<u8>,
    pub cutoff: Vec<u8>,
}

/// Sample index at which `step` starts
pub fn step_start(step: u64, tempo: u32, steps_per_beat: u32) -> u64 {
    step * SAMPLE_RATE as u64 * 60 / (tempo as u64 * steps_per_beat as u64)
}

fn sample_time_ms(samples: usize) -> u32 {
    (samples as u64 * 1000 / SAMPLE_RATE as u64) as u32
}

struct OfflineRenderer {
    synth: DrumSynth<ManualClock, PcgNoise>,
    clock: ManualClock,
    block: HeapRb<u8>,
    cutoff: u8,
    instruments: u8,
    output: RenderOutput,
}

impl OfflineRenderer {
    fn new(config: &RenderConfig) -> Result<Self> {
        let clock = ManualClock::new();
        let mut synth = DrumSynth::with_sources(
            &config.synth,
            clock.clone(),
            PcgNoise::new(config.synth.noise_seed),
        )
        .context("Failed to create drum synth")?;

        let pattern = &config.pattern;
        for (instrument, &preset) in pattern.presets.iter().flatten().enumerate() {
            synth.load_patch(instrument, preset)?;
        }
        for (instrument, &value) in pattern.morph.iter().flatten().enumerate() {
            synth.morph_patch(instrument, value)?;
        }
        // Presets and morphing reset levels; the balance control goes last
        if let Some(balance) = config.synth.balance {
            synth.set_balance(balance);
        }

        Ok(Self {
            synth,
            clock,
            block: HeapRb::new(AUDIO_BLOCK_SIZE),
            cutoff: pattern.cutoff,
            instruments: pattern.instruments,
            output: RenderOutput::default(),
        })
    }

    /// Render whole blocks until at least `target` samples exist
    fn render_until(&mut self, target: usize) {
        while self.output.audio.len() < target {
            self.clock.set(sample_time_ms(self.output.audio.len()));
            self.synth
                .render(self.cutoff, &mut self.block, self.instruments);
            self.output.audio.extend(self.block.pop_iter());
            self.output
                .cutoff
                .extend(self.synth.cutoff_buffer_mut().pop_iter());
        }
    }
}

/// Play `bars` bars of the configured pattern
pub fn render_pattern(config: &RenderConfig, bars: u32) -> Result<RenderOutput> {
    let pattern = config.pattern.steps()?;
    if pattern.is_empty() {
        warn!("Pattern has no steps, rendering silence");
    }
    let tempo = config.pattern.tempo;
    let steps_per_beat = config.pattern.steps_per_beat;
    let total_steps = bars as u64 * BEATS_PER_BAR * steps_per_beat as u64;
    let total_samples = step_start(total_steps, tempo, steps_per_beat) as usize;

    let mut renderer = OfflineRenderer::new(config)?;
    for step in 0..total_steps {
        renderer.render_until(step_start(step, tempo, steps_per_beat) as usize);
        renderer
            .clock
            .set(sample_time_ms(renderer.output.audio.len()));
        for (instrument, velocity) in pattern.hits_at(step as usize) {
            renderer.synth.trigger(instrument, velocity)?;
        }
    }
    renderer.render_until(total_samples);

    let mut output = renderer.output;
    output.audio.truncate(total_samples);
    output.cutoff.truncate(total_samples);
    debug!(
        "Rendered {} steps into {} samples",
        total_steps,
        output.audio.len()
    );
    Ok(output)
}

/// Write unsigned 8-bit samples as a mono WAV file
pub fn write_wav(path: &Path, samples: &[u8]) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 8,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create WAV file: {}", path.display()))?;

    // hound takes signed 8-bit samples and stores them offset by 128
    for &sample in samples {
        writer.write_sample((sample as i16 - 128) as i8)?;
    }
    writer
        .finalize()
        .with_context(|| format!("Failed to finalize WAV file: {}", path.display()))?;

    info!("Wrote {} samples to {}", samples.len(), path.display());
    Ok(())
}
