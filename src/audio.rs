//! Audio cue rendering using the Web Audio API
//!
//! Procedurally generated oscillator tones - no external files needed.
//! Implements [`CueSink`] so a session can be wired straight to the speakers.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::cues::{Cue, CueSink};

/// Renders session cues as synthesized tones.
pub struct WebAudioCues {
    ctx: Option<AudioContext>,
    volume: f32,
    enabled: bool,
}

impl Default for WebAudioCues {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudioCues {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, volume: 0.8, enabled: true }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn context(&self) -> Option<&AudioContext> {
        if !self.enabled {
            return None;
        }
        let ctx = self.ctx.as_ref()?;
        // Browsers suspend the context until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Some(ctx)
    }

    /// UI button click. Not a session cue; the shell calls it directly.
    pub fn click(&self) {
        let Some(ctx) = self.context() else { return };
        self.play_tone(ctx, 800.0, 0.1, OscillatorType::Square, 0.0, 0.05);
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// One enveloped tone: attack at `vol`, exponential decay over `dur`.
    fn play_tone(
        &self,
        ctx: &AudioContext,
        freq: f32,
        dur: f64,
        osc_type: OscillatorType,
        delay: f64,
        vol: f32,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
            return;
        };
        let t = ctx.current_time() + delay;

        gain.gain().set_value_at_time(self.volume * vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + dur)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + dur).ok();
    }

    /// Countdown tick - short beep
    fn play_countdown_tick(&self, ctx: &AudioContext) {
        self.play_tone(ctx, 440.0, 0.15, OscillatorType::Square, 0.0, 0.1);
    }

    /// Low-time warning - the same beep an octave up
    fn play_low_time(&self, ctx: &AudioContext) {
        self.play_tone(ctx, 880.0, 0.15, OscillatorType::Square, 0.0, 0.1);
    }

    /// Session start - rising arpeggio
    fn play_start(&self, ctx: &AudioContext) {
        for (i, freq) in [440.0, 554.37, 659.25, 880.0].iter().enumerate() {
            self.play_tone(ctx, *freq, 0.1, OscillatorType::Square, i as f64 * 0.09, 0.1);
        }
    }

    /// Hit - falling zap plus a bass thump
    fn play_hit(&self, ctx: &AudioContext) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(self.volume * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.frequency().set_value_at_time(400.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(50.0, t + 0.15)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        self.play_tone(ctx, 100.0, 0.1, OscillatorType::Square, 0.0, 0.2);
    }

    /// Session won - triumphant arpeggio
    fn play_win(&self, ctx: &AudioContext) {
        for (i, freq) in [523.25, 659.25, 783.99, 1046.5].iter().enumerate() {
            self.play_tone(ctx, *freq, 0.15, OscillatorType::Triangle, i as f64 * 0.12, 0.12);
        }
    }

    /// Session lost - sad downward slide
    fn play_lose(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(self.volume * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.8)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(110.0, t + 0.8)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.8).ok();
    }
}

impl CueSink for WebAudioCues {
    fn cue(&mut self, cue: Cue) {
        let Some(ctx) = self.context() else { return };
        match cue {
            Cue::CountdownTick => self.play_countdown_tick(ctx),
            Cue::SessionStart => self.play_start(ctx),
            Cue::Hit { .. } => self.play_hit(ctx),
            Cue::LowTimeWarning => self.play_low_time(ctx),
            Cue::SessionEnd { won: true } => self.play_win(ctx),
            Cue::SessionEnd { won: false } => self.play_lose(ctx),
        }
    }
}
