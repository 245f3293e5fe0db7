//! Block render loop

use ringbuf::traits::RingBuffer;
use tracing::debug;

use super::DrumSynth;
use crate::clock::Clock;
use crate::noise::NoiseSource;
use crate::sink::SampleSink;
use crate::{AUDIO_BLOCK_SIZE, IDLE_SAMPLE};

impl<C: Clock, N: NoiseSource> DrumSynth<C, N> {
    /// Milliseconds since the last trigger (or `init`)
    pub fn idle_time_ms(&self) -> u32 {
        self.clock.milliseconds().wrapping_sub(self.last_event_time)
    }

    /// Fill `buffer` with whole blocks while it has room for one
    ///
    /// Each sample pushed to `buffer` is matched by one byte pushed to the
    /// cutoff bus. `instruments` is a bit mask of the voices to mix (bit 0 =
    /// bass drum); masked voices keep running silently.
    ///
    /// After `idle_timeout_ms` without a trigger, a single
    /// [`IDLE_SAMPLE`] is written instead and no state advances.
    pub fn render<S: SampleSink + ?Sized>(&mut self, cutoff: u8, buffer: &mut S, instruments: u8) {
        if self.idle_time_ms() > self.idle_timeout_ms {
            if !self.idle {
                debug!(
                    "No triggers for {} ms, muting drum output",
                    self.idle_time_ms()
                );
                self.idle = true;
            }
            buffer.overwrite(IDLE_SAMPLE);
            return;
        }

        let mut sample = self.sample;
        let mut sample_counter = self.sample_counter;
        while buffer.writable() >= AUDIO_BLOCK_SIZE {
            self.update_modulations();
            let mut noise = self.noise.state_msb();

            for _ in 0..AUDIO_BLOCK_SIZE {
                sample_counter = sample_counter.wrapping_add(1);
                let mut cf = cutoff as i16;
                let mut mix: i16 = 128;
                noise = noise.wrapping_mul(73).wrapping_add(1);

                for (j, (voice, patch)) in self.voices.iter_mut().zip(&self.patches).enumerate() {
                    let contribution = voice.next_sample(patch.synth_kind(), noise);
                    if instruments & (1 << j) != 0 {
                        mix += contribution;
                        cf += voice.amp_level() as i16;
                    }
                }

                if sample_counter > self.decimation {
                    sample = mix.clamp(0, 255) as u8;
                    sample_counter = 0;
                }

                let _ = self.cutoff_bus.push_overwrite(cf.clamp(0, 255) as u8);
                buffer.overwrite(sample);
            }
        }
        self.sample = sample;
        self.sample_counter = sample_counter;
    }

    /// Block-rate envelope and pitch update for every voice
    fn update_modulations(&mut self) {
        for (instrument, (voice, patch)) in self.voices.iter_mut().zip(&self.patches).enumerate() {
            // Only the first voice draws from the generator
            let pitch_noise = (instrument == 0).then(|| self.noise.next_byte());
            voice.update_modulation(patch, pitch_noise);
        }
    }
}
