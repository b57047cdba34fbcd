use soroban_sdk::contracttype;

use crate::config::PoolConfig;

/// Fixed-point scaling factor for `acc_reward_per_share`.
///
/// 10^12 keeps the truncation bias of `reward * PRECISION / total_staked`
/// below one base unit per accrual step for any pool up to 10^12 staked units.
pub const PRECISION: i128 = 1_000_000_000_000;

// ── Global accrual state ────────────────────────────────────────────────────

/// Pool-wide accumulator, stored once in instance storage.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PoolState {
    /// Cumulative reward per staked unit since inception, scaled by `PRECISION`.
    pub acc_reward_per_share: i128,
    /// Last tick whose emission has been folded into the accumulator.
    pub last_reward_tick: u32,
    /// Sum of every account's staked amount.
    pub total_staked: i128,
    /// Reward folded into the accumulator that is neither paid nor forfeited yet.
    pub reward_owed: i128,
    /// Lifetime reward folded into the accumulator.
    pub total_accrued: i128,
    /// Lifetime reward transferred to stakers.
    pub total_paid: i128,
}

/// Outcome of a single accrual step.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Accrual {
    /// Emission-window ticks covered by this step.
    pub elapsed: u32,
    /// `elapsed * reward_per_tick` before any cap.
    pub tentative: i128,
    /// Reward left after the reserve and lifetime caps.
    pub capped: i128,
    /// Reward reserved for the accumulator increase, rounded up to whole
    /// units so the liability never trails what positions can claim.
    pub folded: i128,
}

impl PoolState {
    pub fn new(tick: u32) -> Self {
        Self {
            last_reward_tick: tick,
            ..Self::default()
        }
    }

    /// True when `tick` has emission that has not been folded in yet.
    pub fn is_stale(&self, tick: u32) -> bool {
        tick > self.last_reward_tick
    }

    /// Advance the accumulator to `tick`.
    ///
    /// `reserve` is the reward-asset amount the pool can still promise; it is
    /// only consulted when there is stake to distribute into. Returns `None`
    /// when `tick` was already folded, which makes same-tick calls no-ops.
    ///
    /// ```text
    /// Δacc = min(elapsed × rate, reserve, limit − accrued) × PRECISION / total_staked
    /// ```
    pub fn accrue(&mut self, config: &PoolConfig, tick: u32, reserve: i128) -> Option<Accrual> {
        if !self.is_stale(tick) {
            return None;
        }
        if self.total_staked <= 0 {
            // Nobody to distribute into: the interval is skipped, not banked.
            self.last_reward_tick = tick;
            return Some(Accrual::default());
        }

        let elapsed = emission_ticks(config, self.last_reward_tick, tick);
        let tentative = config.reward_per_tick.saturating_mul(i128::from(elapsed));
        let capped = cap_reward(tentative, reserve, config.limit_amount, self.total_accrued);

        let delta = capped.saturating_mul(PRECISION) / self.total_staked;
        // delta × total_staked ≤ capped × PRECISION, so this stays ≤ capped.
        let folded = div_ceil(delta.saturating_mul(self.total_staked), PRECISION);

        self.acc_reward_per_share = self.acc_reward_per_share.saturating_add(delta);
        self.reward_owed = self.reward_owed.saturating_add(folded);
        self.total_accrued = self.total_accrued.saturating_add(folded);
        self.last_reward_tick = tick;

        Some(Accrual {
            elapsed,
            tentative,
            capped,
            folded,
        })
    }

    /// Record a settlement: `owed` leaves the liability, `paid` left the pool.
    pub fn settle(&mut self, owed: i128, paid: i128) {
        self.reward_owed = self.reward_owed.saturating_sub(owed).max(0);
        self.total_paid = self.total_paid.saturating_add(paid);
    }

    /// Release a forfeited reward so it can be promised to other stakers.
    pub fn forfeit(&mut self, amount: i128) {
        self.reward_owed = self.reward_owed.saturating_sub(amount).max(0);
    }

    /// Take `amount` out of the staked total. An empty pool owes nothing, so
    /// any rounding residue left in `reward_owed` is released with it.
    pub fn unstake(&mut self, amount: i128) {
        self.total_staked = self.total_staked.saturating_sub(amount).max(0);
        if self.total_staked == 0 {
            self.reward_owed = 0;
        }
    }
}

// ── Pure helpers ────────────────────────────────────────────────────────────

/// Number of emitting ticks in `(from, to]`, clipped to the configured
/// `[start_tick, end_tick]` window.
pub fn emission_ticks(config: &PoolConfig, from: u32, to: u32) -> u32 {
    let lo = from.max(config.start_tick.unwrap_or(0));
    let hi = to.min(config.end_tick.unwrap_or(u32::MAX));
    hi.saturating_sub(lo)
}

/// `n / d` rounded up, for non-negative `n` and positive `d`.
pub fn div_ceil(n: i128, d: i128) -> i128 {
    n.saturating_add(d - 1) / d
}

/// Clamp a tentative emission to what the pool can still promise.
pub fn cap_reward(tentative: i128, reserve: i128, limit: Option<i128>, accrued: i128) -> i128 {
    let mut capped = tentative.min(reserve.max(0));
    if let Some(limit) = limit {
        capped = capped.min(limit.saturating_sub(accrued).max(0));
    }
    capped.max(0)
}
