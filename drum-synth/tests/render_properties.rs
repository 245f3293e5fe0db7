//! Render properties exercised through the public API only.

use drum_synth::patch::{NUM_PRESETS, PRESETS};
use drum_synth::{
    ALL_INSTRUMENTS, AUDIO_BLOCK_SIZE, DrumSynth, DrumSynthConfig, DrumSynthError, IDLE_SAMPLE,
    ManualClock, NUM_INSTRUMENTS, PcgNoise, SynthKind,
};
use ringbuf::HeapRb;
use ringbuf::traits::{Consumer, Observer};

fn offline_synth(config: &DrumSynthConfig) -> (DrumSynth<ManualClock, PcgNoise>, ManualClock) {
    let clock = ManualClock::new();
    let synth = DrumSynth::with_sources(config, clock.clone(), PcgNoise::new(config.noise_seed))
        .expect("default config is valid");
    (synth, clock)
}

/// Render `blocks` blocks one at a time, collecting audio and cutoff bytes
fn render_blocks(
    synth: &mut DrumSynth<ManualClock, PcgNoise>,
    cutoff: u8,
    blocks: usize,
) -> (Vec<u8>, Vec<u8>) {
    let mut audio_rb = HeapRb::<u8>::new(AUDIO_BLOCK_SIZE);
    let mut audio = Vec::new();
    let mut cf = Vec::new();
    for _ in 0..blocks {
        synth.render(cutoff, &mut audio_rb, ALL_INSTRUMENTS);
        audio.extend(audio_rb.pop_iter());
        cf.extend(synth.cutoff_buffer_mut().pop_iter());
    }
    (audio, cf)
}

#[test]
fn test_every_preset_plays_and_fades_out() {
    for preset in 0..NUM_PRESETS {
        let (mut synth, _) = offline_synth(&DrumSynthConfig::default());
        let instrument = PRESETS[preset].synth_kind() as usize;
        synth.load_patch(instrument, preset).unwrap();
        synth.trigger(instrument, 255).unwrap();

        let (attack, _) = render_blocks(&mut synth, 0, 64);
        assert!(
            attack.iter().any(|&s| s != 128),
            "preset {preset} produced no sound"
        );

        // Several seconds later every envelope has run out
        render_blocks(&mut synth, 0, 4_000);
        let (tail, cf) = render_blocks(&mut synth, 0, 4);
        assert!(tail.iter().all(|&s| s == 128), "preset {preset} still ringing");
        assert!(cf.iter().all(|&c| c == 0));
    }
}

#[test]
fn test_cutoff_bus_tracks_audio_one_to_one() {
    let (mut synth, _) = offline_synth(&DrumSynthConfig::default());
    synth.trigger(0, 255).unwrap();
    synth.trigger(2, 255).unwrap();
    let (audio, cf) = render_blocks(&mut synth, 100, 16);
    assert_eq!(audio.len(), 16 * AUDIO_BLOCK_SIZE);
    assert_eq!(cf.len(), audio.len());
    assert!(cf.iter().all(|&c| c >= 100));
}

#[test]
fn test_idle_engine_mutes_until_next_trigger() {
    let config = DrumSynthConfig {
        idle_timeout_ms: 500,
        ..Default::default()
    };
    let (mut synth, clock) = offline_synth(&config);
    synth.trigger(1, 255).unwrap();
    render_blocks(&mut synth, 0, 2);

    clock.advance(501);
    let (audio, cf) = render_blocks(&mut synth, 0, 3);
    assert_eq!(audio, vec![IDLE_SAMPLE; 3]);
    assert!(cf.is_empty());

    synth.trigger(1, 255).unwrap();
    let (audio, _) = render_blocks(&mut synth, 0, 1);
    assert_eq!(audio.len(), AUDIO_BLOCK_SIZE);
}

#[test]
fn test_morph_sweep_keeps_voice_types() {
    let (mut synth, _) = offline_synth(&DrumSynthConfig::default());
    let kinds = [SynthKind::BassDrum, SynthKind::Snare, SynthKind::HiHat];
    for value in (0..=255u8).step_by(5) {
        for (instrument, kind) in kinds.iter().enumerate() {
            synth.morph_patch(instrument, value).unwrap();
            assert_eq!(synth.patch(instrument).unwrap().synth_kind(), *kind);
        }
        synth.trigger(0, 255).unwrap();
        render_blocks(&mut synth, 0, 1);
    }
}

#[test]
fn test_out_of_range_requests_are_errors() {
    let (mut synth, _) = offline_synth(&DrumSynthConfig::default());
    assert_eq!(
        synth.trigger(NUM_INSTRUMENTS, 255),
        Err(DrumSynthError::InvalidInstrument(NUM_INSTRUMENTS))
    );
    assert_eq!(
        synth.load_patch(0, NUM_PRESETS),
        Err(DrumSynthError::InvalidPreset(NUM_PRESETS))
    );
    assert!(synth.morph_patch(NUM_INSTRUMENTS, 0).is_err());
}

#[test]
fn test_config_from_toml() {
    let config: DrumSynthConfig = toml::from_str(
        r#"
        buffer_capacity = 32
        bandwidth = 0
        noise_seed = 99
        "#,
    )
    .unwrap();
    let (synth, _) = offline_synth(&config);
    assert_eq!(synth.decimation(), 31);
    assert_eq!(synth.cutoff_buffer().capacity().get(), 32);
}
