use soroban_sdk::{Address, Env, Symbol, Vec};

pub struct CompositePlusEvents {}

impl CompositePlusEvents {
    /// - topics - `["initialize", governance: Address]`
    /// - data - `[]`
    pub fn initialize(env: &Env, governance: &Address) {
        env.events()
            .publish((Symbol::new(env, "initialize"), governance.clone()), ());
    }

    /// - topics - `["token_added"]`
    /// - data - `[token: Address]`
    pub fn token_added(env: &Env, token: &Address) {
        env.events()
            .publish((Symbol::new(env, "token_added"),), token.clone());
    }

    /// - topics - `["token_removed"]`
    /// - data - `[token: Address]`
    pub fn token_removed(env: &Env, token: &Address) {
        env.events()
            .publish((Symbol::new(env, "token_removed"),), token.clone());
    }

    /// - topics - `["mint", sender: Address]`
    /// - data - `[minted: i128, shares: i128]`
    pub fn mint(env: &Env, sender: &Address, minted: i128, shares: i128) {
        let topics = (Symbol::new(env, "mint"), sender.clone());
        env.events().publish(topics, (minted, shares));
    }

    /// - topics - `["redeem", sender: Address]`
    /// - data - `[shares: i128, amounts: Vec<i128>, fee: i128]`
    pub fn redeem(env: &Env, sender: &Address, shares: i128, amounts: &Vec<i128>, fee: i128) {
        let topics = (Symbol::new(env, "redeem"), sender.clone());
        env.events().publish(topics, (shares, amounts.clone(), fee));
    }

    /// - topics - `["redeem_single", sender: Address]`
    /// - data - `[token: Address, amount_out: i128, fee: i128]`
    pub fn redeem_single(env: &Env, sender: &Address, token: &Address, amount_out: i128, fee: i128) {
        let topics = (Symbol::new(env, "redeem_single"), sender.clone());
        env.events().publish(topics, (token.clone(), amount_out, fee));
    }

    /// - topics - `["rebase"]`
    /// - data - `[old_index: i128, new_index: i128]`
    pub fn rebase(env: &Env, old_index: i128, new_index: i128) {
        env.events()
            .publish((Symbol::new(env, "rebase"),), (old_index, new_index));
    }

    /// - topics - `["param_update", name: Symbol]`
    /// - data - `[]`
    pub fn param_update(env: &Env, name: Symbol) {
        env.events().publish((Symbol::new(env, "param_update"), name), ());
    }
}
