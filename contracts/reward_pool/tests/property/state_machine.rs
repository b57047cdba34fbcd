#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based state machine tests for the RewardPool contract.
//!
//! Random sequences of deposits, withdrawals, claims, emergency exits and
//! ledger advances are replayed against a funded pool with three stakers.
//!
//! Invariants checked after every step:
//! - `total_staked` equals the sum of every position
//! - The pool holds exactly `total_staked` of the stake asset
//! - No staker gains or loses stake asset
//! - `acc_reward_per_share` never decreases
//! - `last_reward_tick` never runs ahead of the ledger
//! - Reward paid out plus reward still held equals the funding
//! - The outstanding reward liability is covered by the pool balance
//! - The liability covers every position's pending reward
//! - Nothing is paid that was not accrued first

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use reward_pool::ContractError;
use soroban_sdk::Address;

use crate::helpers::{setup, Harness, START_TICK};

const USERS: usize = 3;
const WALLET: i128 = 10_000;
const FUNDING: i128 = 50_000;

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    Deposit {
        #[proptest(strategy = "0usize..USERS")]
        user: usize,
        #[proptest(strategy = "0i128..=WALLET")]
        amount: i128,
    },
    Withdraw {
        #[proptest(strategy = "0usize..USERS")]
        user: usize,
        #[proptest(strategy = "0i128..=WALLET")]
        amount: i128,
    },
    Claim {
        #[proptest(strategy = "0usize..USERS")]
        user: usize,
    },
    Emergency {
        #[proptest(strategy = "0usize..USERS")]
        user: usize,
    },
    Advance {
        #[proptest(strategy = "0u32..25")]
        ticks: u32,
    },
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Clamp `amount` into `0..=max` so generated ops stay admissible.
fn fit(amount: i128, max: i128) -> i128 {
    if max <= 0 {
        0
    } else {
        amount % (max + 1)
    }
}

fn apply(h: &Harness, users: &[Address], op: &Op) {
    match *op {
        Op::Deposit { user, amount } => {
            let account = &users[user];
            let amount = fit(amount, h.stake_balance(account));
            h.client.deposit(account, &amount);
        }
        Op::Withdraw { user, amount } => {
            let account = &users[user];
            let amount = fit(amount, h.client.get_staked(account));
            h.client.withdraw(account, &amount);
        }
        Op::Claim { user } => h.client.withdraw(&users[user], &0),
        Op::Emergency { user } => {
            h.client.emergency_withdraw(&users[user]);
        }
        Op::Advance { ticks } => h.at(h.tick() + ticks),
    }
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Every reachable state keeps stake and reward accounting consistent.
    #[test]
    fn prop_accounting_consistent(
        rate in 1i128..500,
        ops in prop::collection::vec(any::<Op>(), 1..40),
    ) {
        let h = setup(rate, FUNDING);
        let users: [Address; USERS] = core::array::from_fn(|_| h.staker(WALLET));

        let mut last_acc = 0i128;
        for op in &ops {
            apply(&h, &users, op);

            let pool = h.client.update_pool();
            let staked: i128 = users.iter().map(|u| h.client.get_staked(u)).sum();
            prop_assert_eq!(pool.total_staked, staked);
            prop_assert_eq!(h.stake_balance(&h.pool), pool.total_staked);

            for user in &users {
                prop_assert_eq!(h.stake_balance(user) + h.client.get_staked(user), WALLET);
            }

            prop_assert!(pool.acc_reward_per_share >= last_acc);
            last_acc = pool.acc_reward_per_share;
            prop_assert!(pool.last_reward_tick <= h.tick());

            let paid: i128 = users.iter().map(|u| h.reward_balance(u)).sum();
            prop_assert_eq!(paid, pool.total_paid);
            prop_assert_eq!(paid + h.reward_balance(&h.pool), FUNDING);
            prop_assert!(pool.reward_owed <= h.reward_balance(&h.pool));
            prop_assert!(pool.total_paid <= pool.total_accrued);

            let pending: i128 = users.iter().map(|u| h.client.pending_reward(u)).sum();
            prop_assert!(pending <= pool.reward_owed, "pending {} > owed {}", pending, pool.reward_owed);
        }
    }

    /// Withdrawing more than the position is always rejected and leaves
    /// the position untouched.
    #[test]
    fn prop_over_withdraw_rejected(
        stake in 0i128..=WALLET,
        excess in 1i128..1_000,
        ticks in 0u32..100,
    ) {
        let h = setup(10, FUNDING);
        let account = h.staker(WALLET);
        h.client.deposit(&account, &stake);
        h.at(START_TICK + ticks);

        let result = h.client.try_withdraw(&account, &(stake + excess));
        match result {
            Err(Ok(e)) => prop_assert_eq!(e, ContractError::InsufficientStakedBalance),
            _ => prop_assert!(false, "Expected InsufficientStakedBalance error"),
        }
        prop_assert_eq!(h.client.get_staked(&account), stake);
        prop_assert_eq!(h.client.get_total_staked(), stake);
    }

    /// After everyone exits, the pool holds no stake and owes nothing it
    /// cannot pay.
    #[test]
    fn prop_full_exit_drains_stake(
        rate in 1i128..500,
        ops in prop::collection::vec(any::<Op>(), 1..30),
    ) {
        let h = setup(rate, FUNDING);
        let users: [Address; USERS] = core::array::from_fn(|_| h.staker(WALLET));

        for op in &ops {
            apply(&h, &users, op);
        }
        for user in &users {
            let staked = h.client.get_staked(user);
            h.client.withdraw(user, &staked);
        }

        let pool = h.client.get_pool_info();
        prop_assert_eq!(pool.total_staked, 0);
        prop_assert_eq!(h.stake_balance(&h.pool), 0);
        for user in &users {
            prop_assert_eq!(h.stake_balance(user), WALLET);
            prop_assert_eq!(h.client.pending_reward(user), 0);
        }
    }
}
