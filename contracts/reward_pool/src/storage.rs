use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::{config::PoolConfig, ledger::UserState, pool::PoolState, ContractError};

// ── Storage key constants ───────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const CONFIG: Symbol = symbol_short!("CONFIG");
const POOL: Symbol = symbol_short!("POOL");

// Per-user persistent storage uses tuple keys: (prefix, account)
const USER: Symbol = symbol_short!("USER");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

fn user_key(account: &Address) -> (Symbol, Address) {
    (USER, account.clone())
}

/// Keep instance storage (config + pool) alive. Only called on mutating paths.
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Config ──────────────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn set_config(env: &Env, config: &PoolConfig) {
    env.storage().instance().set(&CONFIG, config);
    env.storage().instance().set(&INITIALIZED, &true);
}

pub fn get_config(env: &Env) -> Result<PoolConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

// ── Pool ────────────────────────────────────────────────────────────────────

pub fn get_pool(env: &Env) -> PoolState {
    env.storage().instance().get(&POOL).unwrap_or_default()
}

pub fn set_pool(env: &Env, pool: &PoolState) {
    env.storage().instance().set(&POOL, pool);
}

// ── Users ───────────────────────────────────────────────────────────────────

pub fn has_user(env: &Env, account: &Address) -> bool {
    env.storage().persistent().has(&user_key(account))
}

/// Returns a zeroed position for accounts that never deposited.
pub fn get_user(env: &Env, account: &Address) -> UserState {
    env.storage()
        .persistent()
        .get(&user_key(account))
        .unwrap_or_default()
}

pub fn set_user(env: &Env, account: &Address, user: &UserState) {
    let key = user_key(account);
    env.storage().persistent().set(&key, user);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
