//! Browser sound effects: Web Audio tones plus speech synthesis.
//!
//! The `AudioContext` is created lazily on first use, since browsers refuse
//! to start audio before a user gesture. Every failure is logged and
//! swallowed; a missing sound never interrupts a spin.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AudioContext, OscillatorType, SpeechSynthesisUtterance, SpeechSynthesisVoice};

use crate::sound::SoundBoard;

const TICK_FREQUENCY_HZ: f32 = 600.0;
const TICK_DETUNE_CENTS: f64 = 100.0;
const TICK_GAIN: f32 = 0.15;
const TICK_LENGTH_SECS: f64 = 0.08;

const WIN_GAIN: f32 = 0.1;
/// Major arpeggio: (frequency, start offset, stop offset).
const WIN_NOTES: [(f32, f64, f64); 4] = [(523.25, 0.0, 0.5), (659.25, 0.1, 0.6), (783.99, 0.2, 0.8), (1046.5, 0.3, 1.2)];

/// Exponential ramps cannot reach zero.
const SILENT_GAIN: f32 = 0.001;
const SPEECH_RATE: f32 = 1.1;

#[derive(Default)]
pub struct WebAudio {
    context: Option<AudioContext>,
}

impl WebAudio {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn context(&mut self) -> Result<&AudioContext, JsValue> {
        if self.context.is_none() {
            self.context = Some(AudioContext::new()?);
            log::debug!("audio context created");
        }
        self.context.as_ref().ok_or_else(|| JsValue::from_str("audio context unavailable"))
    }

    /// One oscillator through its own gain envelope, from `start` to `stop`
    /// seconds on the context clock.
    fn tone(
        ctx: &AudioContext,
        kind: OscillatorType,
        frequency: f32,
        detune: f32,
        gain: f32,
        start: f64,
        stop: f64,
    ) -> Result<(), JsValue> {
        let osc = ctx.create_oscillator()?;
        let envelope = ctx.create_gain()?;
        osc.connect_with_audio_node(&envelope)?;
        envelope.connect_with_audio_node(&ctx.destination())?;

        osc.set_type(kind);
        osc.frequency().set_value_at_time(frequency, start)?;
        osc.detune().set_value_at_time(detune, start)?;
        envelope.gain().set_value_at_time(gain, start)?;
        envelope.gain().exponential_ramp_to_value_at_time(SILENT_GAIN, stop)?;

        osc.start_with_when(start)?;
        osc.stop_with_when(stop)?;
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn try_tick(&mut self) -> Result<(), JsValue> {
        let ctx = self.context()?;
        let now = ctx.current_time();
        let detune = (js_sys::Math::random() * 2.0 - 1.0) * TICK_DETUNE_CENTS;
        Self::tone(ctx, OscillatorType::Triangle, TICK_FREQUENCY_HZ, detune as f32, TICK_GAIN, now, now + TICK_LENGTH_SECS)
    }

    fn try_win(&mut self) -> Result<(), JsValue> {
        let ctx = self.context()?;
        let now = ctx.current_time();
        for (frequency, start, stop) in WIN_NOTES {
            Self::tone(ctx, OscillatorType::Sine, frequency, 0.0, WIN_GAIN, now + start, now + stop)?;
        }
        Ok(())
    }

    fn try_announce(text: &str) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let synth = window.speech_synthesis()?;
        synth.cancel();

        let utterance = SpeechSynthesisUtterance::new_with_text(text)?;
        utterance.set_rate(SPEECH_RATE);

        let voices: Vec<SpeechSynthesisVoice> =
            synth.get_voices().iter().filter_map(|v| v.dyn_ref::<SpeechSynthesisVoice>().cloned()).collect();
        let preferred = voices
            .iter()
            .find(|v| v.lang().starts_with("en") && v.name().contains("Google"))
            .or_else(|| voices.first());
        if let Some(voice) = preferred {
            utterance.set_voice(Some(voice));
        }

        synth.speak(&utterance);
        Ok(())
    }
}

impl SoundBoard for WebAudio {
    fn play_tick(&mut self) {
        if let Err(err) = self.try_tick() {
            log::trace!("tick sound failed: {err:?}");
        }
    }

    fn play_win(&mut self) {
        if let Err(err) = self.try_win() {
            log::warn!("win sound failed: {err:?}");
        }
    }

    fn announce(&mut self, text: &str) {
        if let Err(err) = Self::try_announce(text) {
            log::warn!("speech failed: {err:?}");
        }
    }
}
