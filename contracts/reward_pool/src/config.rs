use soroban_sdk::{contracttype, Address};

use crate::ContractError;

/// Construction-time parameters of the pool. Immutable once stored.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    /// Asset users deposit.
    pub stake_token: Address,
    /// Asset paid out as reward. May equal `stake_token` (single-asset pool).
    pub reward_token: Address,
    /// Asset burned from the depositor before a deposit is admitted.
    pub gate_token: Option<Address>,
    /// Reward emitted per tick across all stakers.
    pub reward_per_tick: i128,
    /// Minimum stake an account must hold after a deposit.
    pub min_stake_amount: i128,
    /// Gate-asset quantity burned per admitting deposit.
    pub gate_burn_amount: i128,
    /// Lifetime ceiling on reward folded into the accumulator.
    pub limit_amount: Option<i128>,
    /// Emission starts with the tick after this one.
    pub start_tick: Option<u32>,
    /// Last tick that emits.
    pub end_tick: Option<u32>,
}

impl PoolConfig {
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.reward_per_tick < 0 || self.min_stake_amount < 0 || self.gate_burn_amount < 0 {
            return Err(ContractError::InvalidConfig);
        }
        if matches!(self.limit_amount, Some(limit) if limit < 0) {
            return Err(ContractError::InvalidConfig);
        }
        if let (Some(start), Some(end)) = (self.start_tick, self.end_tick) {
            if start > end {
                return Err(ContractError::InvalidConfig);
            }
        }
        if let Some(gate) = &self.gate_token {
            if *gate == self.stake_token || *gate == self.reward_token {
                return Err(ContractError::InvalidConfig);
            }
        }
        Ok(())
    }

    /// Stake and reward share one asset, so the staked principal sits in the
    /// same balance as the reward supply.
    pub fn is_single_asset(&self) -> bool {
        self.stake_token == self.reward_token
    }

    /// Gate asset and burn quantity, when deposits are gated.
    pub fn gate(&self) -> Option<(&Address, i128)> {
        match &self.gate_token {
            Some(token) if self.gate_burn_amount > 0 => Some((token, self.gate_burn_amount)),
            _ => None,
        }
    }

    /// Guard: the post-deposit stake must reach `min_stake_amount`. Only
    /// applies to deposits that add stake.
    pub fn check_min_stake(&self, staked: i128, amount: i128) -> Result<(), ContractError> {
        if staked.saturating_add(amount) < self.min_stake_amount {
            return Err(ContractError::InsufficientStakeAmount);
        }
        Ok(())
    }
}
