use soroban_sdk::{contractclient, Address, Env};

/// Yield-source adapter consumed by the single-asset token.
///
/// Implementations custody the asset, realize yield on `harvest` and must
/// service `withdraw` in full or trap, which aborts the enclosing call.
#[contractclient(name = "StrategyClient")]
pub trait Strategy {
    /// Asset under management, in the asset's native units.
    fn balance(env: Env) -> i128;

    /// Book `amount` of the asset that the caller just transferred in.
    fn invest(env: Env, amount: i128);

    /// Realize accrued yield into the managed balance; returns the amount
    /// realized, in native units.
    fn harvest(env: Env) -> i128;

    fn withdraw(env: Env, to: Address, amount: i128);
}

/// Surface shared by every "+" token. The composite drives its constituents
/// through this client; constituents are WAD-denominated, so one unit of any
/// of them is worth one unit of ledger value.
#[contractclient(name = "PlusTokenClient")]
pub trait PlusToken {
    fn balance_of(env: Env, id: Address) -> i128;
    fn total_supply(env: Env) -> i128;
    fn index(env: Env) -> i128;
    fn total_underlying(env: Env) -> i128;
    fn rebase(env: Env) -> i128;
    fn transfer(env: Env, from: Address, to: Address, amount: i128);
}
