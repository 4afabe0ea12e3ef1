use soroban_sdk::{Address, Env, Symbol};

pub struct SinglePlusEvents {}

impl SinglePlusEvents {
    /// - topics - `["initialize", governance: Address]`
    /// - data - `[asset: Address, strategy: Address]`
    pub fn initialize(env: &Env, governance: &Address, asset: &Address, strategy: &Address) {
        let topics = (Symbol::new(env, "initialize"), governance.clone());
        env.events().publish(topics, (asset.clone(), strategy.clone()));
    }

    /// - topics - `["mint", sender: Address]`
    /// - data - `[asset_amount: i128, shares: i128]`
    pub fn mint(env: &Env, sender: &Address, asset_amount: i128, shares: i128) {
        let topics = (Symbol::new(env, "mint"), sender.clone());
        env.events().publish(topics, (asset_amount, shares));
    }

    /// - topics - `["redeem", sender: Address]`
    /// - data - `[shares: i128, asset_out: i128, fee_wad: i128]`
    pub fn redeem(env: &Env, sender: &Address, shares: i128, asset_out: i128, fee_wad: i128) {
        let topics = (Symbol::new(env, "redeem"), sender.clone());
        env.events().publish(topics, (shares, asset_out, fee_wad));
    }

    /// - topics - `["invest"]`
    /// - data - `[amount: i128]`
    pub fn invest(env: &Env, amount: i128) {
        env.events().publish((Symbol::new(env, "invest"),), amount);
    }

    /// - topics - `["harvest"]`
    /// - data - `[harvested: i128]`
    pub fn harvest(env: &Env, harvested: i128) {
        env.events().publish((Symbol::new(env, "harvest"),), harvested);
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
