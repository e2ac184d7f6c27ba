//! Ambient muttering, cycled every tick regardless of combat state.

use crate::env::{BossEnv, RollContext};
use crate::state::{Mutter, MutterLine};

/// Counts the mutter timer down, toggling between a shown line and a gap.
pub(super) fn tick_mutter(mutter: &mut Mutter, tick: u64, env: &BossEnv<'_>) {
    if mutter.timer > 0 {
        mutter.timer -= 1;
        return;
    }

    let ambience = &env.tuning().ambience;
    if mutter.line.take().is_some() {
        mutter.timer = env.range(tick, RollContext::MutterGap, ambience.gap_min, ambience.gap_max);
    } else {
        let index = env.range(tick, RollContext::MutterLine, 0, MutterLine::AMBIENT_COUNT - 1);
        mutter.line = Some(MutterLine::Ambient(index as u8));
        mutter.timer = ambience.show_duration;
    }
}

/// Rolls whether an interrupting hit makes the boss cry out, replacing the
/// current line if so.
pub(super) fn maybe_cry_out(mutter: &mut Mutter, tick: u64, env: &BossEnv<'_>) {
    let damage = &env.tuning().damage;
    if !env.chance(tick, RollContext::PainChance, damage.pain_line_chance) {
        return;
    }

    let index = env.range(tick, RollContext::PainLine, 0, MutterLine::PAIN_COUNT - 1);
    mutter.line = Some(MutterLine::Pain(index as u8));
    mutter.timer = damage.pain_line_duration;
}
