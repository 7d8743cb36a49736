//! Level curve derived from XP
//!
//! `level(xp) = 1 + floor((xp / 100) ^ 0.8)`: 100 XP reaches level 2, and each
//! following level costs a little more than the previous one.

const XP_SCALE: f64 = 100.0;
const CURVE_EXPONENT: f64 = 0.8;

/// Width of the profile progress bar, in cells.
pub const PROGRESS_BAR_CELLS: usize = 20;

/// Highest representable level. XP beyond its threshold stays at this level.
pub const MAX_LEVEL: u32 = u32::MAX;

/// Level reached with `xp` experience points. Negative XP counts as zero.
pub fn level_for_xp(xp: i64) -> u32 {
    if xp <= 0 {
        return 1;
    }
    let steps = (xp as f64 / XP_SCALE).powf(CURVE_EXPONENT).floor();
    // Float-to-int casts saturate, so only the +1 can overflow.
    (steps as u32).saturating_add(1)
}

/// Smallest XP total at which `level` is reached.
pub fn xp_for_level(level: u32) -> i64 {
    if level <= 1 {
        return 0;
    }
    let steps = f64::from(level - 1);
    let mut xp = (XP_SCALE * steps.powf(1.0 / CURVE_EXPONENT)).ceil() as i64;
    // Float rounding can land one off in either direction.
    while xp > 0 && level_for_xp(xp - 1) >= level {
        xp -= 1;
    }
    while level_for_xp(xp) < level {
        xp += 1;
    }
    xp
}

/// Where a fan stands between the current and the next level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub xp: i64,
    pub level: u32,
    /// XP at which the current level started
    pub level_floor: i64,
    /// XP at which the next level starts
    pub next_level_at: i64,
}

impl LevelProgress {
    pub fn from_xp(xp: i64) -> Self {
        let xp = xp.max(0);
        let level = level_for_xp(xp);
        let level_floor = xp_for_level(level);
        // At MAX_LEVEL there is no next level; the bar then shows as full.
        let next_level_at = if level == MAX_LEVEL {
            level_floor
        } else {
            xp_for_level(level + 1)
        };
        Self {
            xp,
            level,
            level_floor,
            next_level_at,
        }
    }

    /// XP still missing for the next level.
    pub fn remaining(&self) -> i64 {
        (self.next_level_at - self.xp).max(0)
    }

    /// Completion of the current level, 0..=100.
    pub fn percent(&self) -> u8 {
        if self.next_level_at <= self.level_floor {
            return 100;
        }
        let span = self.next_level_at - self.level_floor;
        let done = (self.xp - self.level_floor).clamp(0, span);
        (done * 100 / span) as u8
    }

    /// `▓▓▓░░░…` bar of [`PROGRESS_BAR_CELLS`] cells.
    pub fn bar(&self) -> String {
        let filled = usize::from(self.percent()) * PROGRESS_BAR_CELLS / 100;
        let mut bar = "▓".repeat(filled);
        bar.push_str(&"░".repeat(PROGRESS_BAR_CELLS - filled));
        bar
    }
}
