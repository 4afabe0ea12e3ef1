use plus::constants::{INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD};
use soroban_sdk::{contracttype, Address, Env, Vec};

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Config,
    Initialized,
    Tokens,
    Supported(Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub governance: Address,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Initialized)
        .unwrap_or(false)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&DataKey::Initialized, &true);
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance(env);
}

pub fn get_config(env: &Env) -> Config {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .expect("Config not set")
}

/// Registry order is observable through `tokens` and redemption payouts.
/// Removal swaps the last entry into the gap, so order changes on removal.
pub fn get_tokens(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::Tokens)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn save_tokens(env: &Env, tokens: &Vec<Address>) {
    env.storage().instance().set(&DataKey::Tokens, tokens);
}

pub fn is_supported(env: &Env, token: &Address) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Supported(token.clone()))
        .unwrap_or(false)
}

pub fn set_supported(env: &Env, token: &Address, supported: bool) {
    let key = DataKey::Supported(token.clone());
    if supported {
        env.storage().instance().set(&key, &true);
    } else {
        env.storage().instance().remove(&key);
    }
}

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}
