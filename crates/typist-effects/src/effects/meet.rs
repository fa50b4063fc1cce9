#![forbid(unsafe_code)]

//! `{MEET=distance;speed;elastic;inside}`: each glyph flies in from its own
//! random starting point. With `inside`, glyphs also start collapsed and
//! scatter only within a line height.

use std::f32::consts::TAU;

use typist_core::{Glyph, Interpolation};

use super::{GlyphSlots, Tween};
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct MeetEffect {
    core: EffectCore,
    distance: f32,
    inside: bool,
    tween: Tween,
    starts: GlyphSlots<(f32, f32)>,
}

impl MeetEffect {
    pub const DEFAULT_DISTANCE: f32 = 2.0;
    pub const DEFAULT_SECONDS: f32 = 0.5;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::default(),
            distance: params.float(0, 1.0),
            inside: params.bool(3, false),
            tween: Tween::new(
                Self::DEFAULT_SECONDS,
                params.float(1, 1.0),
                params.bool(2, false),
                Interpolation::Pow2Out,
            ),
            starts: GlyphSlots::default(),
        }
    }
}

impl Effect for MeetEffect {
    fn name(&self) -> &'static str {
        "MEET"
    }

    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn on_apply(
        &mut self,
        _glyph: Glyph,
        local: usize,
        global: usize,
        delta: f32,
        target: &mut dyn EffectTarget,
    ) {
        let (dx, dy) = self.starts.get_or_insert_with(local, || {
            let angle = target.random() * TAU;
            let reach = target.random();
            (angle.cos() * reach, angle.sin() * reach)
        });
        let left = self.tween.remaining(local, delta);
        let lh = target.line_height(global);
        let scale = if self.inside {
            lh
        } else {
            lh * self.distance * Self::DEFAULT_DISTANCE
        };
        target.add_offset(global, dx * scale * left, dy * scale * left);
        if self.inside {
            target.add_size(global, -lh * left, -lh * left);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTarget;
    use typist_core::{PackedRgba, TypingConfig};

    #[test]
    fn each_glyph_keeps_its_start() {
        let config = TypingConfig::default();
        let mut fx = MeetEffect::new(&Params::new(&[], &config));
        let mut target = RecordingTarget::new("abc", PackedRgba::WHITE);
        target.step(&mut fx, 0.0);
        let first = target.offsets.clone();
        target.step(&mut fx, 0.0);
        assert_eq!(target.offsets, first);
        target.step(&mut fx, 10.0);
        assert!(target.offsets.iter().all(|&(x, y)| x == 0.0 && y == 0.0));
    }
}
