//! Running score state tracked by the engine.

use starhand_core::constants::{BOSS_WAVE_BONUS_MULTIPLIER, WAVE_CLEAR_BONUS};
use starhand_core::enums::EnemyKind;
use starhand_core::state::ScoreView;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub score: u32,
    pub kills: u32,
    pub vanguard_kills: u32,
    pub hunter_kills: u32,
    pub coward_kills: u32,
    pub waves_cleared: u32,
    pub shots_fired: u32,
}

impl ScoreState {
    pub fn record_kill(&mut self, kind: EnemyKind, value: u32) {
        self.kills += 1;
        self.score = self.score.saturating_add(value);
        match kind {
            EnemyKind::Vanguard => self.vanguard_kills += 1,
            EnemyKind::Hunter => self.hunter_kills += 1,
            EnemyKind::Coward => self.coward_kills += 1,
        }
    }

    /// Credit a cleared wave and return the bonus awarded.
    pub fn record_wave_clear(&mut self, wave: u32, is_boss: bool) -> u32 {
        let mut bonus = WAVE_CLEAR_BONUS.saturating_mul(wave);
        if is_boss {
            bonus = bonus.saturating_mul(BOSS_WAVE_BONUS_MULTIPLIER);
        }
        self.waves_cleared += 1;
        self.score = self.score.saturating_add(bonus);
        bonus
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            score: self.score,
            kills: self.kills,
            vanguard_kills: self.vanguard_kills,
            hunter_kills: self.hunter_kills,
            coward_kills: self.coward_kills,
            waves_cleared: self.waves_cleared,
            shots_fired: self.shots_fired,
        }
    }
}
