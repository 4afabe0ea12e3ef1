#![no_std]

use plus::error::ErrorCode;
use plus::interface::Strategy;
use soroban_sdk::{
    contract, contractimpl, contracttype, panic_with_error, token, Address, Env,
};

/// Yield-source adapter used by the test suites.
///
/// Tracks booked principal separately from the asset it custodies; any asset
/// balance above principal counts as accrued yield and is realized by
/// `harvest`. Tests inject yield by minting the asset straight to this
/// contract's address.
#[contract]
pub struct MockStrategy;

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Asset,
    Deposited,
}

fn get_asset(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Asset)
        .expect("Asset not set")
}

fn get_deposited(env: &Env) -> i128 {
    env.storage().instance().get(&DataKey::Deposited).unwrap_or(0)
}

fn set_deposited(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::Deposited, &amount);
}

#[contractimpl]
impl MockStrategy {
    pub fn initialize(env: Env, asset: Address) {
        env.storage().instance().set(&DataKey::Asset, &asset);
    }
}

#[contractimpl]
impl Strategy for MockStrategy {
    fn balance(env: Env) -> i128 {
        get_deposited(&env)
    }

    fn invest(env: Env, amount: i128) {
        set_deposited(&env, get_deposited(&env) + amount);
    }

    fn harvest(env: Env) -> i128 {
        let asset = token::Client::new(&env, &get_asset(&env));
        let actual = asset.balance(&env.current_contract_address());
        let deposited = get_deposited(&env);
        let gained = actual - deposited;
        set_deposited(&env, actual);
        gained
    }

    fn withdraw(env: Env, to: Address, amount: i128) {
        let deposited = get_deposited(&env);
        if amount > deposited {
            panic_with_error!(&env, ErrorCode::InsufficientLiquidity);
        }
        set_deposited(&env, deposited - amount);
        token::Client::new(&env, &get_asset(&env)).transfer(
            &env.current_contract_address(),
            &to,
            &amount,
        );
    }
}
