//! Token-ledger collaborator.
//!
//! The pool never moves balances itself; it only decides how much to move
//! and asks the SEP-41 token contracts to do it. Every call goes through the
//! generated `try_*` client methods so a failing transfer or burn surfaces as
//! a [`ContractError`] instead of a trap. Returning that error from the
//! contract entry point rolls back everything the invocation already did.

use soroban_sdk::{token::TokenClient, Address, Env};

use crate::{config::PoolConfig, pool::PoolState, ContractError};

fn transfer(
    env: &Env,
    token: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    match TokenClient::new(env, token).try_transfer(from, to, &amount) {
        Ok(Ok(_)) => Ok(()),
        _ => Err(ContractError::LedgerTransferFailed),
    }
}

/// Move `amount` stake asset from `account` into the pool.
pub fn pull_stake(
    env: &Env,
    config: &PoolConfig,
    account: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    transfer(
        env,
        &config.stake_token,
        account,
        &env.current_contract_address(),
        amount,
    )
}

/// Return `amount` stake asset from the pool to `account`.
pub fn push_stake(
    env: &Env,
    config: &PoolConfig,
    account: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    transfer(
        env,
        &config.stake_token,
        &env.current_contract_address(),
        account,
        amount,
    )
}

/// Pay `amount` reward asset to `account`. Zero amounts are still sent.
pub fn pay_reward(
    env: &Env,
    config: &PoolConfig,
    account: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    transfer(
        env,
        &config.reward_token,
        &env.current_contract_address(),
        account,
        amount,
    )
}

/// Burn the configured gate quantity from `account`. Returns the amount burned.
pub fn burn_gate(env: &Env, config: &PoolConfig, account: &Address) -> Result<i128, ContractError> {
    let Some((token, amount)) = config.gate() else {
        return Ok(0);
    };
    match TokenClient::new(env, token).try_burn(account, &amount) {
        Ok(Ok(_)) => Ok(amount),
        _ => Err(ContractError::InsufficientGateAsset),
    }
}

/// Reward-asset balance the pool can pay from.
///
/// In a single-asset pool the staked principal shares the balance and is
/// excluded.
pub fn payable_reward(env: &Env, config: &PoolConfig, total_staked: i128) -> i128 {
    let balance = TokenClient::new(env, &config.reward_token).balance(&env.current_contract_address());
    let principal = if config.is_single_asset() {
        total_staked
    } else {
        0
    };
    balance.saturating_sub(principal).max(0)
}

/// Reward the pool can still promise: payable balance minus what the
/// accumulator already owes. Read live on every accrual so top-ups resume
/// emission.
pub fn reward_reserve(env: &Env, config: &PoolConfig, pool: &PoolState) -> i128 {
    payable_reward(env, config, pool.total_staked)
        .saturating_sub(pool.reward_owed)
        .max(0)
}
