#![forbid(unsafe_code)]

//! `{SPUTTER=widen;heighten;duration;frequency}`: glyphs flicker between
//! random sizes several times a second.

use typist_core::Glyph;

use super::GlyphSlots;
use crate::effect::{Effect, EffectCore, EffectTarget};
use crate::params::Params;

#[derive(Debug, Clone)]
pub struct SputterEffect {
    core: EffectCore,
    widen: f32,
    heighten: f32,
    frequency: f32,
    generation: u32,
    since_roll: f32,
    sizes: GlyphSlots<(u32, f32, f32)>,
}

impl SputterEffect {
    pub const DEFAULT_WIDEN: f32 = 0.25;
    pub const DEFAULT_HEIGHTEN: f32 = 0.25;
    /// New sizes per second at `frequency = 1`.
    pub const DEFAULT_FREQUENCY: f32 = 12.0;

    pub fn new(params: &Params<'_>) -> Self {
        Self {
            core: EffectCore::new(params.duration(2)),
            widen: params.float(0, Self::DEFAULT_WIDEN),
            heighten: params.float(1, Self::DEFAULT_HEIGHTEN),
            frequency: params.float(3, 1.0),
            generation: 0,
            since_roll: 0.0,
            sizes: GlyphSlots::default(),
        }
    }
}

impl Effect for SputterEffect {
    fn name(&self) -> &'static str {
        "SPUTTER"
    }

    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn update(&mut self, delta: f32) {
        self.core.total_time += delta;
        self.since_roll += delta;
        let interval = 1.0 / (self.frequency * Self::DEFAULT_FREQUENCY).max(f32::EPSILON);
        if self.since_roll >= interval {
            self.since_roll %= interval;
            self.generation = self.generation.wrapping_add(1);
        }
    }

    fn on_apply(
        &mut self,
        _glyph: Glyph,
        local: usize,
        global: usize,
        _delta: f32,
        target: &mut dyn EffectTarget,
    ) {
        let (width, height) = match self.sizes.get(local) {
            Some((generation, w, h)) if generation == self.generation => (w, h),
            _ => {
                let w = target.random() * 2.0 - 1.0;
                let h = target.random() * 2.0 - 1.0;
                self.sizes.set(local, (self.generation, w, h));
                (w, h)
            }
        };
        let lh = target.line_height(global) * self.core.calculate_fadeout();
        target.add_size(global, lh * self.widen * width, lh * self.heighten * height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTarget;
    use typist_core::{PackedRgba, TypingConfig};

    #[test]
    fn holds_size_between_rolls() {
        let config = TypingConfig::default();
        let mut fx = SputterEffect::new(&Params::new(&[], &config));
        let mut target = RecordingTarget::new("ab", PackedRgba::WHITE);
        target.step(&mut fx, 0.001);
        let first = target.sizes.clone();
        target.step(&mut fx, 0.001);
        assert_eq!(target.sizes, first);
        target.step(&mut fx, 1.0);
        assert_ne!(target.sizes, first);
    }
}
