//! End-to-end engine behavior against the recording mock backend.

use pretty_assertions::assert_eq;
use test_case::test_case;

use silentium::audio::{MockBackend, Waveform};
use silentium::engine::{format_time, gain_for_volume, ToneEngine, ToneVariant};

fn engine() -> ToneEngine<MockBackend> {
    ToneEngine::new(MockBackend::new())
}

#[test]
fn full_session_scenario() {
    // All shapes enabled, sine selected.
    let mut engine = engine();

    engine.select_tone(ToneVariant::Hz528);
    assert_eq!(engine.tone(), ToneVariant::Hz528);
    {
        let voice = engine.backend().live_voice().expect("voice should be live");
        assert_eq!(voice.waveform, Waveform::Sine);
        assert_eq!(voice.frequency_hz, 528.0);
    }

    // Disabling the selected shape reselects square and, because a tone is
    // sounding on the now-disabled shape, silences it immediately.
    engine.toggle_waveform(Waveform::Sine);
    assert_eq!(engine.waveform(), Some(Waveform::Square));
    assert_eq!(engine.tone(), ToneVariant::None);
    assert!(engine.backend().live_voices().is_empty());

    // The square shape is selectable again and plays normally.
    engine.select_tone(ToneVariant::Hz528);
    assert_eq!(engine.tone(), ToneVariant::Hz528);
    assert_eq!(
        engine.backend().live_voice().unwrap().waveform,
        Waveform::Square
    );
}

#[test]
fn at_most_one_voice_over_arbitrary_sequences() {
    let mut engine = engine();
    let sequence = [
        ToneVariant::Hz432,
        ToneVariant::Hz432,
        ToneVariant::None,
        ToneVariant::Hz639,
        ToneVariant::Hz528,
        ToneVariant::None,
        ToneVariant::None,
        ToneVariant::Hz432,
    ];

    for variant in sequence {
        engine.select_tone(variant);
        assert!(
            engine.backend().live_voices().len() <= 1,
            "more than one live voice after selecting {variant}"
        );
    }

    // Every started voice except the last was stopped.
    assert_eq!(
        engine.backend().started_count() - 1,
        engine.backend().stopped_count()
    );
}

#[test]
fn select_none_always_results_in_silence() {
    let mut engine = engine();
    engine.select_tone(ToneVariant::Hz639);
    engine.select_tone(ToneVariant::None);

    assert_eq!(engine.tone(), ToneVariant::None);
    assert!(!engine.is_playing());
    assert!(engine.backend().live_voices().is_empty());
}

#[test]
fn volume_changes_reach_idle_and_live_gain() {
    let mut engine = engine();

    // Idle: the shared gain follows the volume with no voice live.
    engine.set_volume(0.5);
    assert_eq!(engine.backend().shared_gain(), gain_for_volume(0.5));

    // Live: the playing voice's gain updates in place.
    engine.select_tone(ToneVariant::Hz432);
    engine.set_volume(1.0);
    assert_eq!(engine.backend().shared_gain(), gain_for_volume(1.0));
    assert_eq!(
        engine.backend().live_voice().unwrap().gain,
        gain_for_volume(1.0)
    );
}

#[test]
fn timer_start_pause_reset_cycle() {
    let mut engine = engine();

    engine.start_timer();
    engine.tick();
    engine.tick();
    engine.tick();
    assert_eq!(engine.elapsed_seconds(), 3);

    engine.pause_timer();
    engine.tick();
    engine.tick();
    assert_eq!(engine.elapsed_seconds(), 3);

    engine.reset_timer();
    assert_eq!(engine.elapsed_seconds(), 0);
    assert!(!engine.is_timer_active());
}

#[test_case(0, "0:00")]
#[test_case(5, "0:05")]
#[test_case(65, "1:05")]
#[test_case(600, "10:00")]
#[test_case(3725, "62:05")]
fn format_time_renders_minutes_and_padded_seconds(seconds: u64, expected: &str) {
    assert_eq!(format_time(seconds), expected);
}

#[test]
fn snapshot_round_trips_through_json() {
    let mut engine = engine();
    engine.select_waveform(Waveform::Sawtooth);
    engine.select_tone(ToneVariant::Hz639);
    engine.set_volume(0.5);
    engine.start_timer();
    for _ in 0..65 {
        engine.tick();
    }

    let snap = engine.snapshot();
    assert_eq!(snap.formatted_time, "1:05");

    let json = snap.to_json().unwrap();
    let restored: silentium::EngineSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snap, restored);
}

#[test]
fn disabling_and_reenabling_is_an_involution() {
    let mut engine = engine();
    let before: Vec<Waveform> = engine.enabled_waveforms().iter().collect();

    engine.toggle_waveform(Waveform::Sawtooth);
    assert_eq!(engine.enabled_waveforms().len(), 3);
    engine.toggle_waveform(Waveform::Sawtooth);

    let after: Vec<Waveform> = engine.enabled_waveforms().iter().collect();
    assert_eq!(before, after);
}

#[test]
fn fallback_walks_canonical_order_until_exhausted() {
    let mut engine = engine();

    engine.toggle_waveform(Waveform::Sine);
    assert_eq!(engine.waveform(), Some(Waveform::Square));
    engine.toggle_waveform(Waveform::Square);
    assert_eq!(engine.waveform(), Some(Waveform::Triangle));
    engine.toggle_waveform(Waveform::Triangle);
    assert_eq!(engine.waveform(), Some(Waveform::Sawtooth));
    engine.toggle_waveform(Waveform::Sawtooth);
    assert_eq!(engine.waveform(), None);

    // With nothing enabled every tone selection falls into the silent guard.
    engine.select_tone(ToneVariant::Hz432);
    assert_eq!(engine.tone(), ToneVariant::None);
    assert!(!engine.is_playing());
}
