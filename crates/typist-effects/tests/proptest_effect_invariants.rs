//! Property-based invariant tests for the effect library.
//!
//! 1. Color effects only write the color half of a glyph.
//! 2. Applying a color effect twice with the same inputs equals applying it
//!    once.
//! 3. Periodic progress always lands in `[0, 1]`.
//! 4. Malformed parameters never panic a constructor or a frame.

use proptest::prelude::*;
use typist_core::{Glyph, PackedRgba, TypingConfig};
use typist_effects::testing::RecordingTarget;
use typist_effects::{Effect, EffectCore, EffectRegistry, Params};

const COLOR_EFFECTS: [&str; 5] = ["RAINBOW", "OCEAN", "GRADIENT", "BLINK", "FADE"];

// ── Helpers ─────────────────────────────────────────────────────────────

fn color_effect_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(COLOR_EFFECTS.to_vec())
}

fn build(name: &str, args: &[&str]) -> Box<dyn Effect> {
    let config = TypingConfig::default();
    EffectRegistry::with_defaults()
        .create(name, &Params::new(args, &config))
        .unwrap_or_else(|e| panic!("{name}: {e}"))
}

fn apply_once(fx: &mut dyn Effect, target: &mut RecordingTarget, glyph: Glyph) -> Glyph {
    target.glyphs[0] = glyph;
    fx.on_apply(glyph, 0, 0, 0.0, &mut *target);
    target.glyphs[0]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Color writes are masked
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn color_effects_keep_low_half(
        name in color_effect_strategy(),
        bits in any::<u64>(),
        time in 0.0f32..50.0,
    ) {
        let mut fx = build(name, &[]);
        let mut target = RecordingTarget::new("x", PackedRgba::WHITE);
        fx.update(time);
        let out = apply_once(fx.as_mut(), &mut target, Glyph(bits));
        prop_assert_eq!(
            out.bits() & 0xFFFF_FFFF,
            bits & 0xFFFF_FFFF,
            "{} touched the low half of {:#x}",
            name,
            bits
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Idempotent color application
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn color_effects_are_idempotent(
        name in color_effect_strategy(),
        bits in any::<u64>(),
        time in 0.0f32..50.0,
    ) {
        let mut fx = build(name, &[]);
        let mut target = RecordingTarget::new("x", PackedRgba::WHITE);
        fx.update(time);
        let once = apply_once(fx.as_mut(), &mut target, Glyph(bits));
        let twice = apply_once(fx.as_mut(), &mut target, once);
        prop_assert_eq!(once, twice, "{} at t={}", name, time);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Progress range
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn progress_stays_in_unit_range(
        time in 0.0f32..1.0e4,
        modifier in -10.0f32..10.0,
        offset in -100.0f32..100.0,
        pingpong in any::<bool>(),
    ) {
        let mut core = EffectCore::default();
        core.total_time = time;
        let p = core.calculate_progress(modifier, offset, pingpong);
        prop_assert!((0.0..=1.0).contains(&p), "p = {}", p);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Malformed parameters are harmless
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn any_params_any_effect(
        args in prop::collection::vec("[-a-z0-9.#]{0,8}", 0..8),
        deltas in prop::collection::vec(0.0f32..0.5, 1..8),
    ) {
        let registry = EffectRegistry::with_defaults();
        let config = TypingConfig::default();
        let refs: Vec<&str> = args.iter().map(String::as_str).collect();
        for name in registry.names() {
            let mut fx = registry.create(name, &Params::new(&refs, &config)).unwrap_or_else(|e| panic!("{e}"));
            let mut target = RecordingTarget::new("abc", PackedRgba::WHITE);
            target.over = Some(1);
            target.touched = Some(0);
            for &delta in &deltas {
                target.step(fx.as_mut(), delta);
            }
            prop_assert_eq!(target.glyphs.len(), 3);
        }
    }
}
