use soroban_sdk::contracttype;

use crate::pool::{div_ceil, PoolState, PRECISION};

/// Per-account staking position.
///
/// Created on the first deposit and kept (possibly zeroed) afterwards.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserState {
    /// Currently staked quantity.
    pub amount: i128,
    /// `amount × acc_reward_per_share / PRECISION` at the last checkpoint,
    /// rounded up.
    pub reward_debt: i128,
}

impl UserState {
    /// Reward credited to this position by the accumulator `acc` since inception.
    pub fn accumulated(&self, acc: i128) -> i128 {
        self.amount.saturating_mul(acc) / PRECISION
    }

    /// Reward earned since the last checkpoint, never negative.
    ///
    /// ```text
    /// pending = amount × acc / PRECISION − reward_debt
    /// ```
    pub fn pending(&self, acc: i128) -> i128 {
        self.accumulated(acc).saturating_sub(self.reward_debt).max(0)
    }

    /// Re-anchor `reward_debt` so only accrual after this point counts.
    ///
    /// Must run against an already-updated pool after every stake change
    /// and every settlement. The debt is rounded up so a position is never
    /// credited more than its exact share of later accrual.
    pub fn checkpoint(&mut self, pool: &PoolState) {
        self.reward_debt = div_ceil(
            self.amount.saturating_mul(pool.acc_reward_per_share),
            PRECISION,
        );
    }

    pub fn is_staked(&self) -> bool {
        self.amount > 0
    }
}
