#![forbid(unsafe_code)]

//! `{TRIGGER=event;all}`: a click inside the span forwards `event` to the
//! host once, with the span's text as payload. With `all`, a click anywhere
//! on the label counts.

use typist_core::Glyph;

use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct TriggerEffect {
    core: EffectCore,
    event: String,
    all: bool,
}

impl TriggerEffect {
    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::default(),
            event: params.get(0).unwrap_or_default().to_string(),
            all: params.bool(1, false),
        }
    }
}

impl Effect for TriggerEffect {
    fn name(&self) -> &'static str {
        "TRIGGER"
    }

    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn begin_frame(&mut self, target: &mut dyn EffectTarget) {
        let hit_range = if self.all {
            0..usize::MAX
        } else {
            self.core.revealed_range(target.visible_count())
        };
        if target.take_touch_in(hit_range).is_some() {
            let payload = target.text(self.core.range());
            tracing::debug!(event = %self.event, "trigger clicked");
            target.trigger_event(&self.event, &payload);
        }
    }

    fn on_apply(
        &mut self,
        _glyph: Glyph,
        _local: usize,
        _global: usize,
        _delta: f32,
        _target: &mut dyn EffectTarget,
    ) {
    }

    fn tracks_input(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingTarget, Recorded};
    use typist_core::{PackedRgba, TypingConfig};

    #[test]
    fn click_in_range_fires_with_span_text() {
        let config = TypingConfig::default();
        let mut fx = TriggerEffect::new(&Params::new(&["open_door"], &config));
        fx.core_mut().index_start = 2;
        fx.core_mut().index_end = 5;
        let mut target = RecordingTarget::new("a door!", PackedRgba::WHITE);
        target.touched = Some(3);
        target.step(&mut fx, 0.1);
        target.step(&mut fx, 0.1);
        assert_eq!(
            target.recorded,
            vec![Recorded::Event {
                name: "open_door".into(),
                payload: "doo".into()
            }]
        );
    }

    #[test]
    fn click_outside_range_is_left_alone() {
        let config = TypingConfig::default();
        let mut fx = TriggerEffect::new(&Params::new(&["x"], &config));
        fx.core_mut().index_end = 2;
        let mut target = RecordingTarget::new("abcd", PackedRgba::WHITE);
        target.touched = Some(3);
        target.step(&mut fx, 0.1);
        assert!(target.recorded.is_empty());
        assert_eq!(target.touched, Some(3));
    }

    #[test]
    fn click_past_the_cursor_waits_for_the_reveal() {
        let config = TypingConfig::default();
        let mut fx = TriggerEffect::new(&Params::new(&["x"], &config));
        let mut target = RecordingTarget::new("abcd", PackedRgba::WHITE);
        target.visible = 1;
        target.touched = Some(2);
        target.step(&mut fx, 0.1);
        assert!(target.recorded.is_empty());

        let mut everywhere = TriggerEffect::new(&Params::new(&["x", "yes"], &config));
        target.step(&mut everywhere, 0.1);
        assert_eq!(target.recorded.len(), 1);
    }
}
