#![no_std]

pub mod assets;
pub mod config;
pub mod events;
pub mod ledger;
pub mod pool;
pub mod storage;

use soroban_sdk::{contract, contractimpl, log, Address, Env};

pub use config::PoolConfig;
pub use ledger::UserState;
pub use pool::{PoolState, PRECISION};

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidInput = 3,
    InvalidConfig = 4,
    InsufficientStakeAmount = 5,
    InsufficientGateAsset = 6,
    InsufficientStakedBalance = 7,
    LedgerTransferFailed = 8,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct RewardPoolContract;

#[contractimpl]
impl RewardPoolContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Configure the pool. The configuration is immutable afterwards.
    ///
    /// Accrual starts from the current ledger sequence; reward only flows
    /// once someone has staked and reward asset has been sent to the
    /// contract address.
    pub fn initialize(env: Env, config: PoolConfig) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        config.validate()?;

        storage::set_config(&env, &config);
        storage::set_pool(&env, &PoolState::new(env.ledger().sequence()));
        storage::extend_instance_ttl(&env);

        events::publish_initialized(&env, &config);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` stake asset, paying out any pending reward first.
    ///
    /// `deposit(0)` claims pending reward without changing the stake.
    pub fn deposit(env: Env, account: Address, amount: i128) -> Result<(), ContractError> {
        let config = storage::get_config(&env)?;
        account.require_auth();

        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }

        let mut user = storage::get_user(&env, &account);

        // A zero deposit is a claim: neither the minimum nor the gate applies.
        if amount > 0 {
            config.check_min_stake(user.amount, amount)?;
            let burned = assets::burn_gate(&env, &config, &account)?;
            if burned > 0 {
                events::publish_gate_burned(&env, account.clone(), burned);
            }
        }

        // 1. Flush the accumulator.
        let mut pool = storage::get_pool(&env);
        Self::update_pool_state(&env, &config, &mut pool);

        // 2. Pay what the existing stake earned.
        Self::settle(&env, &config, &mut pool, &user, &account)?;

        // 3. Pull the new stake in.
        if amount > 0 {
            assets::pull_stake(&env, &config, &account, amount)?;
            user.amount = user.amount.saturating_add(amount);
            pool.total_staked = pool.total_staked.saturating_add(amount);
        }

        // 4. Re-anchor the position.
        user.checkpoint(&pool);

        storage::set_user(&env, &account, &user);
        storage::set_pool(&env, &pool);
        storage::extend_instance_ttl(&env);

        events::publish_deposit(&env, account, amount, user.amount, pool.total_staked);

        Ok(())
    }

    /// Withdraw `amount` stake asset, paying out any pending reward first.
    ///
    /// `withdraw(0)` claims pending reward without changing the stake.
    pub fn withdraw(env: Env, account: Address, amount: i128) -> Result<(), ContractError> {
        let config = storage::get_config(&env)?;
        account.require_auth();

        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }

        let mut user = storage::get_user(&env, &account);
        if amount > user.amount {
            return Err(ContractError::InsufficientStakedBalance);
        }

        let mut pool = storage::get_pool(&env);
        Self::update_pool_state(&env, &config, &mut pool);

        Self::settle(&env, &config, &mut pool, &user, &account)?;

        if amount > 0 {
            user.amount = user.amount.saturating_sub(amount);
            pool.unstake(amount);
            assets::push_stake(&env, &config, &account, amount)?;
        }

        user.checkpoint(&pool);

        storage::set_user(&env, &account, &user);
        storage::set_pool(&env, &pool);
        storage::extend_instance_ttl(&env);

        events::publish_withdraw(&env, account, amount, user.amount, pool.total_staked);

        Ok(())
    }

    /// Return the full stake and forfeit every pending reward.
    ///
    /// The accumulator is not advanced and the reward asset is never touched,
    /// so this path works even when reward accounting cannot. The interval
    /// not yet folded into the accumulator goes to the remaining stakers.
    /// Returns the amount of stake asset sent back.
    pub fn emergency_withdraw(env: Env, account: Address) -> Result<i128, ContractError> {
        let config = storage::get_config(&env)?;
        account.require_auth();

        if !storage::has_user(&env, &account) {
            return Ok(0);
        }

        let user = storage::get_user(&env, &account);
        let mut pool = storage::get_pool(&env);

        let amount = user.amount;
        let forfeited = user.pending(pool.acc_reward_per_share);

        pool.forfeit(forfeited);
        pool.unstake(amount);

        if user.is_staked() {
            assets::push_stake(&env, &config, &account, amount)?;
        }

        storage::set_user(&env, &account, &UserState::default());
        storage::set_pool(&env, &pool);
        storage::extend_instance_ttl(&env);

        if forfeited > 0 {
            log!(&env, "emergency withdraw forfeits reward", account.clone(), forfeited);
        }
        events::publish_emergency_withdraw(&env, account, amount, forfeited);

        Ok(amount)
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Advance the accumulator to the current tick and persist it.
    ///
    /// Calling it again within the same tick changes nothing.
    pub fn update_pool(env: Env) -> Result<PoolState, ContractError> {
        let config = storage::get_config(&env)?;

        let mut pool = storage::get_pool(&env);
        if Self::update_pool_state(&env, &config, &mut pool) {
            storage::set_pool(&env, &pool);
            storage::extend_instance_ttl(&env);
        }

        Ok(pool)
    }

    /// Reward `account` would receive if it claimed now, without mutating state.
    pub fn pending_reward(env: Env, account: Address) -> i128 {
        let Ok(config) = storage::get_config(&env) else {
            return 0;
        };

        let mut pool = storage::get_pool(&env);
        Self::simulate(&env, &config, &mut pool);

        storage::get_user(&env, &account).pending(pool.acc_reward_per_share)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Stored accumulator state, as of the last committed update.
    pub fn get_pool_info(env: Env) -> PoolState {
        storage::get_pool(&env)
    }

    /// Stored position of `account` (zeroed if it never deposited).
    pub fn get_user_info(env: Env, account: Address) -> UserState {
        storage::get_user(&env, &account)
    }

    pub fn get_config(env: Env) -> Result<PoolConfig, ContractError> {
        storage::get_config(&env)
    }

    pub fn get_staked(env: Env, account: Address) -> i128 {
        storage::get_user(&env, &account).amount
    }

    pub fn get_total_staked(env: Env) -> i128 {
        storage::get_pool(&env).total_staked
    }

    /// Reward the pool could still promise at this moment.
    pub fn get_reward_reserve(env: Env) -> Result<i128, ContractError> {
        let config = storage::get_config(&env)?;
        Ok(assets::reward_reserve(&env, &config, &storage::get_pool(&env)))
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Fold the current tick into `pool` in memory only. `None` when the
    /// tick was already folded.
    fn simulate(env: &Env, config: &PoolConfig, pool: &mut PoolState) -> Option<pool::Accrual> {
        let tick = env.ledger().sequence();
        // The token balance is only read when there is stake to distribute into.
        let reserve = if pool.is_stale(tick) && pool.total_staked > 0 {
            assets::reward_reserve(env, config, pool)
        } else {
            0
        };
        pool.accrue(config, tick, reserve)
    }

    /// Committing variant of [`Self::simulate`]: emits the accrual event and
    /// logs when the reserve or lifetime limit cut the emission. The caller
    /// persists `pool`. Returns whether the accumulator moved.
    fn update_pool_state(env: &Env, config: &PoolConfig, pool: &mut PoolState) -> bool {
        let Some(accrual) = Self::simulate(env, config, pool) else {
            return false;
        };

        if accrual.capped < accrual.tentative {
            log!(
                env,
                "reward emission capped",
                accrual.tentative,
                accrual.capped
            );
        }
        events::publish_pool_updated(env, &accrual, pool.acc_reward_per_share, pool.total_staked);

        true
    }

    /// Pay `user`'s pending reward against an already-updated pool.
    ///
    /// The transfer is executed even for a zero amount. If the reward balance
    /// is short the payout is clamped to it and the remainder is dropped.
    fn settle(
        env: &Env,
        config: &PoolConfig,
        pool: &mut PoolState,
        user: &UserState,
        account: &Address,
    ) -> Result<i128, ContractError> {
        let pending = user.pending(pool.acc_reward_per_share);
        let paid = pending.min(assets::payable_reward(env, config, pool.total_staked));

        assets::pay_reward(env, config, account, paid)?;
        pool.settle(pending, paid);

        events::publish_reward_paid(env, account.clone(), pending, paid);

        Ok(paid)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
