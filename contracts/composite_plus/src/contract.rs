use plus::constants::WAD;
use plus::error::{ErrorCode, PlusResult};
use plus::fee::{split_redeem_fee, FeeBreakdown, MAX_FEE_BPS};
use plus::interface::PlusTokenClient;
use plus::ledger;
use plus::math::fixed::{mul_div_floor, shares_to_value, value_to_shares};
use plus::math::safe_math::SafeMath;
use plus::validate;
use soroban_sdk::{contract, contractimpl, contractmeta, Address, Env, String, Symbol, Vec};
use soroban_token_sdk::metadata::TokenMetadata;
use soroban_token_sdk::TokenUtils;

use crate::events::CompositePlusEvents;
use crate::msg::RedeemQuote;
use crate::storage::{
    extend_instance, get_config, get_tokens, is_initialized, is_supported, save_config,
    save_tokens, set_initialized, set_supported, Config,
};

contractmeta!(
    key = "Description",
    val = "Rebasing basket token over a registry of + tokens"
);

#[contract]
pub struct CompositePlus;

fn require_governance(env: &Env, config: &Config, sender: &Address) -> PlusResult {
    sender.require_auth();
    validate!(
        env,
        *sender == config.governance,
        ErrorCode::NotAuthorized,
        "sender is not governance"
    )?;
    Ok(())
}

/// Basket backing: the sum of this contract's balances in every registered
/// token. Constituents are WAD-denominated, so amounts add directly.
fn total_underlying_wad(env: &Env) -> PlusResult<i128> {
    let this = env.current_contract_address();
    let mut total = 0_i128;
    for token in get_tokens(env).iter() {
        let held = PlusTokenClient::new(env, &token).balance_of(&this);
        total = total.safe_add(held, env)?;
    }
    Ok(total)
}

fn check_liquidity(env: &Env, state: &ledger::Ledger) -> PlusResult {
    if state.total_shares == 0 {
        return Ok(());
    }
    let underlying = total_underlying_wad(env)?;
    let ratio = ledger::liquidity_ratio(env, state, underlying)?;
    validate!(
        env,
        ratio >= state.min_liquidity_ratio,
        ErrorCode::InsufficientLiquidity,
        "liquidity ratio {} below minimum {}",
        ratio,
        state.min_liquidity_ratio
    )?;
    Ok(())
}

#[contractimpl]
impl CompositePlus {
    pub fn initialize(
        env: Env,
        governance: Address,
        treasury: Address,
        name: String,
        symbol: String,
    ) -> Result<(), ErrorCode> {
        validate!(
            &env,
            !is_initialized(&env),
            ErrorCode::AlreadyInitialized,
            "contract already initialized"
        )?;

        save_config(&env, &Config { governance: governance.clone() });
        ledger::init_ledger(&env, &treasury);
        set_initialized(&env);

        TokenUtils::new(&env).metadata().set_metadata(&TokenMetadata {
            decimal: plus::constants::PLUS_DECIMALS,
            name,
            symbol,
        });

        CompositePlusEvents::initialize(&env, &governance);
        Ok(())
    }

    // ----- registry -----

    pub fn add_token(env: Env, sender: Address, token: Address) -> Result<(), ErrorCode> {
        extend_instance(&env);
        let config = get_config(&env);
        require_governance(&env, &config, &sender)?;
        validate!(
            &env,
            !is_supported(&env, &token),
            ErrorCode::InvalidState,
            "token already registered"
        )?;
        validate!(
            &env,
            token != env.current_contract_address(),
            ErrorCode::InvalidState,
            "basket cannot contain itself"
        )?;

        let mut tokens = get_tokens(&env);
        tokens.push_back(token.clone());
        save_tokens(&env, &tokens);
        set_supported(&env, &token, true);

        CompositePlusEvents::token_added(&env, &token);
        Ok(())
    }

    /// Deregister `token`. Only possible once the basket holds none of it;
    /// the last registry entry is swapped into the gap.
    pub fn remove_token(env: Env, sender: Address, token: Address) -> Result<(), ErrorCode> {
        extend_instance(&env);
        let config = get_config(&env);
        require_governance(&env, &config, &sender)?;
        validate!(
            &env,
            is_supported(&env, &token),
            ErrorCode::InvalidState,
            "token not registered"
        )?;

        let held = PlusTokenClient::new(&env, &token).balance_of(&env.current_contract_address());
        validate!(
            &env,
            held == 0,
            ErrorCode::InvalidState,
            "basket still holds {} of the token",
            held
        )?;

        let mut tokens = get_tokens(&env);
        // registry membership was checked above
        let idx = tokens.first_index_of(&token).ok_or(ErrorCode::InvalidState)?;
        let last = tokens.len() - 1;
        if idx != last {
            let tail = tokens.get(last).ok_or(ErrorCode::InvalidState)?;
            tokens.set(idx, tail);
        }
        tokens.pop_back_unchecked();
        save_tokens(&env, &tokens);
        set_supported(&env, &token, false);

        CompositePlusEvents::token_removed(&env, &token);
        Ok(())
    }

    pub fn tokens(env: Env) -> Vec<Address> {
        get_tokens(&env)
    }

    pub fn token_supported(env: Env, token: Address) -> bool {
        is_supported(&env, &token)
    }

    // ----- mint / redeem -----

    /// Deposit registered + tokens and mint basket tokens for their combined
    /// value. `tokens[i]` is deposited in amount `amounts[i]` (WAD). Returns
    /// the basket token amount minted.
    pub fn mint(
        env: Env,
        sender: Address,
        tokens: Vec<Address>,
        amounts: Vec<i128>,
    ) -> Result<i128, ErrorCode> {
        sender.require_auth();
        extend_instance(&env);

        validate!(
            &env,
            !tokens.is_empty() && tokens.len() == amounts.len(),
            ErrorCode::InvalidState,
            "token and amount lists must match"
        )?;

        // validate everything before moving anything
        let mut value_wad = 0_i128;
        for (token, amount) in tokens.iter().zip(amounts.iter()) {
            validate!(
                &env,
                is_supported(&env, &token),
                ErrorCode::InvalidState,
                "token not registered"
            )?;
            validate!(
                &env,
                amount > 0,
                ErrorCode::InvalidState,
                "deposit amount must be positive"
            )?;
            value_wad = value_wad.safe_add(amount, &env)?;
        }

        let this = env.current_contract_address();
        for (token, amount) in tokens.iter().zip(amounts.iter()) {
            PlusTokenClient::new(&env, &token).transfer(&sender, &this, &amount);
        }

        let mut state = ledger::get_ledger(&env);
        let shares = ledger::mint_shares(&env, &mut state, &sender, value_wad)?;
        let minted = shares_to_value(&env, shares, state.index)?;
        ledger::save_ledger(&env, &state);

        CompositePlusEvents::mint(&env, &sender, minted, shares);
        Ok(minted)
    }

    /// Quote the basket token amount a deposit would mint. Rejects exactly
    /// what `mint` would reject.
    pub fn get_mint_amount(
        env: Env,
        tokens: Vec<Address>,
        amounts: Vec<i128>,
    ) -> Result<i128, ErrorCode> {
        validate!(
            &env,
            !tokens.is_empty() && tokens.len() == amounts.len(),
            ErrorCode::InvalidState,
            "token and amount lists must match"
        )?;

        let mut value_wad = 0_i128;
        for (token, amount) in tokens.iter().zip(amounts.iter()) {
            validate!(
                &env,
                is_supported(&env, &token),
                ErrorCode::InvalidState,
                "token not registered"
            )?;
            validate!(
                &env,
                amount > 0,
                ErrorCode::InvalidState,
                "deposit amount must be positive"
            )?;
            value_wad = value_wad.safe_add(amount, &env)?;
        }
        let state = ledger::get_ledger(&env);
        let shares = value_to_shares(&env, value_wad, state.index)?;
        shares_to_value(&env, shares, state.index)
    }

    /// Burn basket tokens worth `amount` (WAD; `MAX_REDEEM` for the full
    /// holding) and pay out every registered token pro rata to the basket's
    /// holdings. Returns the payout amounts in registry order.
    pub fn redeem(env: Env, sender: Address, amount: i128) -> Result<Vec<i128>, ErrorCode> {
        sender.require_auth();
        extend_instance(&env);

        let mut state = ledger::get_ledger(&env);
        let share_amt = ledger::resolve_redeem_shares(&env, &state, &sender, amount)?;
        validate!(
            &env,
            share_amt > 0,
            ErrorCode::InvalidState,
            "nothing to redeem"
        )?;
        let held = ledger::get_shares(&env, &sender);
        validate!(
            &env,
            held >= share_amt,
            ErrorCode::InsufficientBalance,
            "redeem of {} shares exceeds holding {}",
            share_amt,
            held
        )?;

        let FeeBreakdown { fee, net, .. } =
            split_redeem_fee(&env, share_amt, state.redeem_fee_bps)?;
        let fee_value = shares_to_value(&env, fee, state.index)?;

        let this = env.current_contract_address();
        let tokens = get_tokens(&env);
        let total_before = state.total_shares;

        let mut amounts = Vec::new(&env);
        for token in tokens.iter() {
            let held = PlusTokenClient::new(&env, &token).balance_of(&this);
            let out = mul_div_floor(&env, held, net, total_before)?;
            amounts.push_back(out);
        }

        ledger::burn_shares(&env, &mut state, &sender, share_amt)?;

        for (token, out) in tokens.iter().zip(amounts.iter()) {
            if out > 0 {
                PlusTokenClient::new(&env, &token).transfer(&this, &sender, &out);
            }
        }

        check_liquidity(&env, &state)?;
        ledger::save_ledger(&env, &state);

        CompositePlusEvents::redeem(&env, &sender, share_amt, &amounts, fee_value);
        Ok(amounts)
    }

    /// Quote a pro-rata redemption without executing it.
    pub fn get_redeem_amount(
        env: Env,
        sender: Address,
        amount: i128,
    ) -> Result<RedeemQuote, ErrorCode> {
        let state = ledger::get_ledger(&env);
        let share_amt = ledger::resolve_redeem_shares(&env, &state, &sender, amount)?;
        let held = ledger::get_shares(&env, &sender);
        validate!(
            &env,
            held >= share_amt,
            ErrorCode::InsufficientBalance,
            "redeem of {} shares exceeds holding {}",
            share_amt,
            held
        )?;
        let FeeBreakdown { fee, net, .. } =
            split_redeem_fee(&env, share_amt, state.redeem_fee_bps)?;
        let fee_value = shares_to_value(&env, fee, state.index)?;

        let this = env.current_contract_address();
        let tokens = get_tokens(&env);
        let mut amounts = Vec::new(&env);
        for token in tokens.iter() {
            let held = PlusTokenClient::new(&env, &token).balance_of(&this);
            amounts.push_back(mul_div_floor(&env, held, net, state.total_shares)?);
        }

        Ok(RedeemQuote {
            tokens,
            amounts,
            fee: fee_value,
        })
    }

    /// Burn basket tokens worth `amount` and take the payout entirely in one
    /// registered token, capped by what the basket holds of it. Returns the
    /// amount paid out.
    pub fn redeem_single(
        env: Env,
        sender: Address,
        token: Address,
        amount: i128,
    ) -> Result<i128, ErrorCode> {
        sender.require_auth();
        extend_instance(&env);

        validate!(
            &env,
            is_supported(&env, &token),
            ErrorCode::InvalidState,
            "token not registered"
        )?;

        let mut state = ledger::get_ledger(&env);
        let share_amt = ledger::resolve_redeem_shares(&env, &state, &sender, amount)?;
        validate!(
            &env,
            share_amt > 0,
            ErrorCode::InvalidState,
            "nothing to redeem"
        )?;

        let FeeBreakdown { fee, net, .. } =
            split_redeem_fee(&env, share_amt, state.redeem_fee_bps)?;
        let fee_value = shares_to_value(&env, fee, state.index)?;
        let out = shares_to_value(&env, net, state.index)?;

        let this = env.current_contract_address();
        let client = PlusTokenClient::new(&env, &token);
        let held = client.balance_of(&this);
        validate!(
            &env,
            held >= out,
            ErrorCode::InsufficientLiquidity,
            "basket holds {} of the token, {} requested",
            held,
            out
        )?;

        ledger::burn_shares(&env, &mut state, &sender, share_amt)?;
        client.transfer(&this, &sender, &out);

        check_liquidity(&env, &state)?;
        ledger::save_ledger(&env, &state);

        CompositePlusEvents::redeem_single(&env, &sender, &token, out, fee_value);
        Ok(out)
    }

    /// Quote a single-token redemption: `(amount_out, fee)`.
    pub fn get_redeem_single_amount(
        env: Env,
        sender: Address,
        token: Address,
        amount: i128,
    ) -> Result<(i128, i128), ErrorCode> {
        validate!(
            &env,
            is_supported(&env, &token),
            ErrorCode::InvalidState,
            "token not registered"
        )?;

        let state = ledger::get_ledger(&env);
        let share_amt = ledger::resolve_redeem_shares(&env, &state, &sender, amount)?;
        let FeeBreakdown { fee, net, .. } =
            split_redeem_fee(&env, share_amt, state.redeem_fee_bps)?;
        let fee_value = shares_to_value(&env, fee, state.index)?;
        let out = shares_to_value(&env, net, state.index)?;

        let held = PlusTokenClient::new(&env, &token).balance_of(&env.current_contract_address());
        validate!(
            &env,
            held >= out,
            ErrorCode::InsufficientLiquidity,
            "basket holds {} of the token, {} requested",
            held,
            out
        )?;
        Ok((out, fee_value))
    }

    /// Rebase every constituent, then fold the basket's refreshed backing
    /// into its own index. Permissionless; the index never decreases.
    /// Returns the new index.
    pub fn rebase(env: Env) -> Result<i128, ErrorCode> {
        extend_instance(&env);

        for token in get_tokens(&env).iter() {
            PlusTokenClient::new(&env, &token).rebase();
        }

        let mut state = ledger::get_ledger(&env);
        let old_index = state.index;
        let underlying = total_underlying_wad(&env)?;
        let new_index = ledger::rebase_index(&env, &mut state, underlying)?;
        validate!(
            &env,
            new_index >= old_index,
            ErrorCode::InvalidState,
            "index would decrease from {} to {}",
            old_index,
            new_index
        )?;
        ledger::save_ledger(&env, &state);

        CompositePlusEvents::rebase(&env, old_index, new_index);
        Ok(new_index)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), ErrorCode> {
        from.require_auth();
        extend_instance(&env);
        let state = ledger::get_ledger(&env);
        ledger::transfer_balance(&env, &state, &from, &to, amount)?;
        Ok(())
    }

    // ----- reads -----

    pub fn balance_of(env: Env, id: Address) -> Result<i128, ErrorCode> {
        let state = ledger::get_ledger(&env);
        ledger::balance_of(&env, &state, &id)
    }

    pub fn total_supply(env: Env) -> Result<i128, ErrorCode> {
        let state = ledger::get_ledger(&env);
        ledger::total_supply(&env, &state)
    }

    pub fn user_share(env: Env, id: Address) -> i128 {
        ledger::get_shares(&env, &id)
    }

    pub fn total_shares(env: Env) -> i128 {
        ledger::get_ledger(&env).total_shares
    }

    pub fn index(env: Env) -> i128 {
        ledger::get_ledger(&env).index
    }

    pub fn total_underlying(env: Env) -> Result<i128, ErrorCode> {
        total_underlying_wad(&env)
    }

    pub fn liquidity_ratio(env: Env) -> Result<i128, ErrorCode> {
        let state = ledger::get_ledger(&env);
        let underlying = total_underlying_wad(&env)?;
        ledger::liquidity_ratio(&env, &state, underlying)
    }

    pub fn name(env: Env) -> String {
        TokenUtils::new(&env).metadata().get_metadata().name
    }

    pub fn symbol(env: Env) -> String {
        TokenUtils::new(&env).metadata().get_metadata().symbol
    }

    pub fn decimals(env: Env) -> u32 {
        TokenUtils::new(&env).metadata().get_metadata().decimal
    }

    pub fn query_config(env: Env) -> Config {
        get_config(&env)
    }

    // ----- governance -----

    pub fn set_redeem_fee(env: Env, sender: Address, fee_bps: u32) -> Result<(), ErrorCode> {
        let config = get_config(&env);
        require_governance(&env, &config, &sender)?;
        validate!(
            &env,
            fee_bps <= MAX_FEE_BPS,
            ErrorCode::InvalidFee,
            "fee {} bps out of range",
            fee_bps
        )?;

        let mut state = ledger::get_ledger(&env);
        state.redeem_fee_bps = fee_bps;
        ledger::save_ledger(&env, &state);

        CompositePlusEvents::param_update(&env, Symbol::new(&env, "redeem_fee"));
        Ok(())
    }

    pub fn set_min_liquidity_ratio(
        env: Env,
        sender: Address,
        ratio: i128,
    ) -> Result<(), ErrorCode> {
        let config = get_config(&env);
        require_governance(&env, &config, &sender)?;
        validate!(
            &env,
            ratio >= WAD,
            ErrorCode::InvalidState,
            "minimum liquidity ratio must be at least 1.0"
        )?;

        let mut state = ledger::get_ledger(&env);
        state.min_liquidity_ratio = ratio;
        ledger::save_ledger(&env, &state);

        CompositePlusEvents::param_update(&env, Symbol::new(&env, "min_liquidity_ratio"));
        Ok(())
    }

    pub fn set_treasury(env: Env, sender: Address, treasury: Address) -> Result<(), ErrorCode> {
        let config = get_config(&env);
        require_governance(&env, &config, &sender)?;

        let mut state = ledger::get_ledger(&env);
        state.treasury = treasury;
        ledger::save_ledger(&env, &state);

        CompositePlusEvents::param_update(&env, Symbol::new(&env, "treasury"));
        Ok(())
    }

    pub fn set_governance(env: Env, sender: Address, governance: Address) -> Result<(), ErrorCode> {
        let mut config = get_config(&env);
        require_governance(&env, &config, &sender)?;
        config.governance = governance;
        save_config(&env, &config);

        CompositePlusEvents::param_update(&env, Symbol::new(&env, "governance"));
        Ok(())
    }
}
