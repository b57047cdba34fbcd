#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use reward_pool::{PoolConfig, RewardPoolContract, RewardPoolContractClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{StellarAssetClient, TokenClient},
    Address, Env,
};

const WALLET: i128 = 1_000_000;

#[derive(Arbitrary, Debug)]
pub struct FuzzConfig {
    reward_per_tick: u16,
    funding: u32,
    limit: Option<u32>,
    start_offset: Option<u8>,
    end_offset: Option<u16>,
}

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { amount: u32 },
    Withdraw { amount: u32 },
    EmergencyWithdraw,
    UpdatePool,
    Advance { ticks: u8 },
}

fuzz_target!(|input: (FuzzConfig, Vec<FuzzAction>)| {
    let (cfg, actions) = input;

    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(1);

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(RewardPoolContract, ());
    let client = RewardPoolContractClient::new(&env, &contract_id);

    let config = PoolConfig {
        stake_token: stake_token.clone(),
        reward_token: reward_token.clone(),
        gate_token: None,
        reward_per_tick: i128::from(cfg.reward_per_tick),
        min_stake_amount: 0,
        gate_burn_amount: 0,
        limit_amount: cfg.limit.map(i128::from),
        start_tick: cfg.start_offset.map(|o| 1 + u32::from(o)),
        end_tick: cfg.end_offset.map(|o| 1 + u32::from(o)),
    };
    if client.try_initialize(&config).is_err() {
        // Start after end is rejected up front.
        return;
    }

    let funding = i128::from(cfg.funding);
    if funding > 0 {
        StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &funding);
    }

    let stake = TokenClient::new(&env, &stake_token);
    let reward = TokenClient::new(&env, &reward_token);

    let users: Vec<Address> = (0..4)
        .map(|_| {
            let user = Address::generate(&env);
            StellarAssetClient::new(&env, &stake_token).mint(&user, &WALLET);
            user
        })
        .collect();

    let mut last_acc = 0i128;
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Deposit { amount } => {
                let _ = client.try_deposit(caller, &i128::from(amount));
            }
            FuzzAction::Withdraw { amount } => {
                let _ = client.try_withdraw(caller, &i128::from(amount));
            }
            FuzzAction::EmergencyWithdraw => {
                let _ = client.try_emergency_withdraw(caller);
            }
            FuzzAction::UpdatePool => {
                let _ = client.try_update_pool();
            }
            FuzzAction::Advance { ticks } => {
                let next = env.ledger().sequence().saturating_add(u32::from(ticks));
                env.ledger().set_sequence_number(next);
            }
        }

        let pool = client.get_pool_info();
        let staked: i128 = users.iter().map(|u| client.get_staked(u)).sum();
        assert_eq!(pool.total_staked, staked, "positions must sum to total_staked");
        assert_eq!(stake.balance(&contract_id), pool.total_staked, "stake asset leaked");
        for user in &users {
            assert_eq!(stake.balance(user) + client.get_staked(user), WALLET);
        }

        assert!(pool.acc_reward_per_share >= last_acc, "accumulator went backwards");
        last_acc = pool.acc_reward_per_share;

        let paid: i128 = users.iter().map(|u| reward.balance(u)).sum();
        assert_eq!(paid, pool.total_paid);
        assert_eq!(paid + reward.balance(&contract_id), funding, "reward asset leaked");
        assert!(pool.reward_owed <= reward.balance(&contract_id));
        assert!(pool.total_paid <= pool.total_accrued, "paid more than accrued");
        if let Some(limit) = config.limit_amount {
            assert!(pool.total_accrued <= limit, "lifetime limit exceeded");
        }
    }
});
