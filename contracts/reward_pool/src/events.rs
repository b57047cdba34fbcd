#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

use crate::{config::PoolConfig, pool::Accrual};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the pool is configured.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub stake_token: Address,
    pub reward_token: Address,
    pub gate_token: Option<Address>,
    pub reward_per_tick: i128,
    pub tick: u32,
}

/// Fired when a deposit is admitted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub account: Address,
    pub amount: i128,
    pub staked: i128,
    pub total_staked: i128,
    pub tick: u32,
}

/// Fired when stake is withdrawn (including zero-amount claims).
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub account: Address,
    pub amount: i128,
    pub staked: i128,
    pub total_staked: i128,
    pub tick: u32,
}

/// Fired when an account exits through the emergency path.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawEvent {
    pub account: Address,
    pub amount: i128,
    pub forfeited: i128,
    pub tick: u32,
}

/// Fired on every settlement. `paid` may be zero or below `pending` when the
/// reward balance is short.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPaidEvent {
    pub account: Address,
    pub pending: i128,
    pub paid: i128,
    pub tick: u32,
}

/// Fired whenever the accumulator advances to a new tick.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolUpdatedEvent {
    pub acc_reward_per_share: i128,
    pub tentative: i128,
    pub folded: i128,
    pub total_staked: i128,
    pub tick: u32,
}

/// Fired when the gate asset is burned for a deposit.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GateBurnedEvent {
    pub account: Address,
    pub amount: i128,
    pub tick: u32,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, config: &PoolConfig) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            stake_token: config.stake_token.clone(),
            reward_token: config.reward_token.clone(),
            gate_token: config.gate_token.clone(),
            reward_per_tick: config.reward_per_tick,
            tick: env.ledger().sequence(),
        },
    );
}

pub fn publish_deposit(env: &Env, account: Address, amount: i128, staked: i128, total_staked: i128) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), account.clone()),
        DepositEvent {
            account,
            amount,
            staked,
            total_staked,
            tick: env.ledger().sequence(),
        },
    );
}

pub fn publish_withdraw(env: &Env, account: Address, amount: i128, staked: i128, total_staked: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), account.clone()),
        WithdrawEvent {
            account,
            amount,
            staked,
            total_staked,
            tick: env.ledger().sequence(),
        },
    );
}

pub fn publish_emergency_withdraw(env: &Env, account: Address, amount: i128, forfeited: i128) {
    env.events().publish(
        (symbol_short!("EMERGENCY"), account.clone()),
        EmergencyWithdrawEvent {
            account,
            amount,
            forfeited,
            tick: env.ledger().sequence(),
        },
    );
}

pub fn publish_reward_paid(env: &Env, account: Address, pending: i128, paid: i128) {
    env.events().publish(
        (symbol_short!("REWARD"), account.clone()),
        RewardPaidEvent {
            account,
            pending,
            paid,
            tick: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_updated(env: &Env, accrual: &Accrual, acc_reward_per_share: i128, total_staked: i128) {
    env.events().publish(
        (symbol_short!("POOL_UPD"),),
        PoolUpdatedEvent {
            acc_reward_per_share,
            tentative: accrual.tentative,
            folded: accrual.folded,
            total_staked,
            tick: env.ledger().sequence(),
        },
    );
}

pub fn publish_gate_burned(env: &Env, account: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("GATE_BURN"), account.clone()),
        GateBurnedEvent {
            account,
            amount,
            tick: env.ledger().sequence(),
        },
    );
}
