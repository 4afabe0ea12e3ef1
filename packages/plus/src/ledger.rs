use soroban_sdk::{contracttype, Address, Env};
use soroban_token_sdk::TokenUtils;

use crate::constants::{MAX_REDEEM, PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD, WAD};
use crate::error::{ErrorCode, PlusResult};
use crate::math::fixed::{mul_div_floor, shares_to_value, value_to_shares};
use crate::math::safe_math::SafeMath;
use crate::validate;

/// Share-ledger aggregate backing every "+" token.
///
/// Holder balances are derived, never stored: `balance = shares * index / WAD`.
/// Shares are invariant under rebase; the index converts between the two and
/// only moves when `rebase_index` folds newly accrued underlying value in.
/// A ledger drained back to zero shares keeps its last index until the next
/// mint.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ledger {
    pub total_shares: i128,
    pub index: i128,
    pub redeem_fee_bps: u32,
    pub min_liquidity_ratio: i128,
    pub treasury: Address,
}

#[contracttype]
#[derive(Clone, Debug)]
pub enum LedgerKey {
    LedgerState,
    Shares(Address),
}

pub fn init_ledger(env: &Env, treasury: &Address) {
    save_ledger(
        env,
        &Ledger {
            total_shares: 0,
            index: WAD,
            redeem_fee_bps: 0,
            min_liquidity_ratio: WAD,
            treasury: treasury.clone(),
        },
    );
}

pub fn save_ledger(env: &Env, ledger: &Ledger) {
    env.storage()
        .persistent()
        .set(&LedgerKey::LedgerState, ledger);
    env.storage().persistent().extend_ttl(
        &LedgerKey::LedgerState,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_ledger(env: &Env) -> Ledger {
    let ledger = env
        .storage()
        .persistent()
        .get(&LedgerKey::LedgerState)
        .expect("Ledger not set");

    env.storage().persistent().extend_ttl(
        &LedgerKey::LedgerState,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );

    ledger
}

pub fn get_shares(env: &Env, holder: &Address) -> i128 {
    let key = LedgerKey::Shares(holder.clone());
    match env.storage().persistent().get(&key) {
        Some(shares) => {
            env.storage().persistent().extend_ttl(
                &key,
                PERSISTENT_LIFETIME_THRESHOLD,
                PERSISTENT_BUMP_AMOUNT,
            );
            shares
        }
        None => 0,
    }
}

fn set_shares(env: &Env, holder: &Address, shares: i128) {
    let key = LedgerKey::Shares(holder.clone());
    env.storage().persistent().set(&key, &shares);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

/// Credit `to` with the shares backing `value_wad` at the current index.
/// Returns the share amount minted. The caller persists the ledger.
pub fn mint_shares(
    env: &Env,
    ledger: &mut Ledger,
    to: &Address,
    value_wad: i128,
) -> PlusResult<i128> {
    validate!(
        env,
        value_wad > 0,
        ErrorCode::InvalidState,
        "mint value must be positive"
    )?;

    let shares = value_to_shares(env, value_wad, ledger.index)?;
    ledger.total_shares = ledger.total_shares.safe_add(shares, env)?;
    set_shares(env, to, get_shares(env, to).safe_add(shares, env)?);

    TokenUtils::new(env)
        .events()
        .mint(env.current_contract_address(), to.clone(), value_wad);

    Ok(shares)
}

/// Remove `share_amt` shares from `from`. The caller persists the ledger.
pub fn burn_shares(
    env: &Env,
    ledger: &mut Ledger,
    from: &Address,
    share_amt: i128,
) -> PlusResult {
    validate!(
        env,
        share_amt > 0,
        ErrorCode::InvalidState,
        "burn amount must be positive"
    )?;

    let held = get_shares(env, from);
    validate!(
        env,
        held >= share_amt,
        ErrorCode::InsufficientBalance,
        "burn of {} shares exceeds holding {}",
        share_amt,
        held
    )?;

    let value = shares_to_value(env, share_amt, ledger.index)?;
    set_shares(env, from, held.safe_sub(share_amt, env)?);
    ledger.total_shares = ledger.total_shares.safe_sub(share_amt, env)?;

    TokenUtils::new(env).events().burn(from.clone(), value);

    Ok(())
}

/// Move the shares backing `amount_wad` from `from` to `to`. Shares are
/// conserved and the index is untouched. Returns the shares moved.
pub fn transfer_balance(
    env: &Env,
    ledger: &Ledger,
    from: &Address,
    to: &Address,
    amount_wad: i128,
) -> PlusResult<i128> {
    validate!(
        env,
        amount_wad > 0,
        ErrorCode::InvalidState,
        "transfer amount must be positive"
    )?;

    let shares = value_to_shares(env, amount_wad, ledger.index)?;
    let held = get_shares(env, from);
    validate!(
        env,
        held >= shares,
        ErrorCode::InsufficientBalance,
        "transfer of {} shares exceeds holding {}",
        shares,
        held
    )?;

    set_shares(env, from, held.safe_sub(shares, env)?);
    set_shares(env, to, get_shares(env, to).safe_add(shares, env)?);

    TokenUtils::new(env)
        .events()
        .transfer(from.clone(), to.clone(), amount_wad);

    Ok(shares)
}

/// Fold `total_underlying` into the index. A ledger without shares keeps its
/// index unchanged. Idempotent for a fixed underlying value; the caller
/// persists the ledger.
pub fn rebase_index(env: &Env, ledger: &mut Ledger, total_underlying: i128) -> PlusResult<i128> {
    if ledger.total_shares == 0 {
        return Ok(ledger.index);
    }
    ledger.index = mul_div_floor(env, total_underlying, WAD, ledger.total_shares)?;
    Ok(ledger.index)
}

pub fn balance_of(env: &Env, ledger: &Ledger, holder: &Address) -> PlusResult<i128> {
    shares_to_value(env, get_shares(env, holder), ledger.index)
}

pub fn total_supply(env: &Env, ledger: &Ledger) -> PlusResult<i128> {
    shares_to_value(env, ledger.total_shares, ledger.index)
}

/// `total_underlying / total_supply` in WAD; defined as 1.0 for an empty
/// ledger. At or above 1.0 after a clean rebase; redeem fees push it higher
/// until the next rebase folds the surplus in.
pub fn liquidity_ratio(env: &Env, ledger: &Ledger, total_underlying: i128) -> PlusResult<i128> {
    let supply = total_supply(env, ledger)?;
    if supply == 0 {
        return Ok(WAD);
    }
    mul_div_floor(env, total_underlying, WAD, supply)
}

/// Resolve a redeem request to a share amount at the current index.
/// `MAX_REDEEM` means the caller's whole holding.
pub fn resolve_redeem_shares(
    env: &Env,
    ledger: &Ledger,
    sender: &Address,
    amount: i128,
) -> PlusResult<i128> {
    if amount == MAX_REDEEM {
        return Ok(get_shares(env, sender));
    }
    validate!(
        env,
        amount > 0,
        ErrorCode::InvalidState,
        "redeem amount must be positive"
    )?;
    value_to_shares(env, amount, ledger.index)
}
