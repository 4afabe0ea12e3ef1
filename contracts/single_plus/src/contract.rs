use plus::constants::{PLUS_DECIMALS, WAD};
use plus::decimal::{denormalize, normalize};
use plus::error::{ErrorCode, PlusResult};
use plus::fee::{split_redeem_fee, FeeBreakdown, MAX_FEE_BPS};
use plus::interface::StrategyClient;
use plus::ledger;
use plus::math::fixed::{shares_to_value, value_to_shares};
use plus::math::safe_math::SafeMath;
use plus::validate;
use soroban_sdk::{
    contract, contractimpl, contractmeta, token, Address, Env, String, Symbol,
};
use soroban_token_sdk::metadata::TokenMetadata;
use soroban_token_sdk::TokenUtils;

use crate::events::SinglePlusEvents;
use crate::storage::{
    extend_instance, get_config, is_initialized, save_config, set_initialized, Config,
};

contractmeta!(
    key = "Description",
    val = "Rebasing + token backed by a single asset and one strategy"
);

#[contract]
pub struct SinglePlus;

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

fn require_strategist(env: &Env, config: &Config, sender: &Address) -> PlusResult {
    sender.require_auth();
    validate!(
        env,
        *sender == config.strategist || *sender == config.governance,
        ErrorCode::NotAuthorized,
        "sender is not the strategist"
    )?;
    Ok(())
}

/// Idle asset held by the contract plus assets under management in the
/// strategy, normalized to WAD.
fn total_underlying_wad(env: &Env, config: &Config) -> PlusResult<i128> {
    let idle = token::Client::new(env, &config.asset).balance(&env.current_contract_address());
    let managed = StrategyClient::new(env, &config.strategy).balance();
    normalize(env, idle.safe_add(managed, env)?, config.asset_decimals)
}

/// Fold the current backing into the index. The index never decreases.
fn run_rebase(env: &Env, config: &Config) -> PlusResult<i128> {
    let mut state = ledger::get_ledger(env);
    let old_index = state.index;
    let underlying = total_underlying_wad(env, config)?;
    let new_index = ledger::rebase_index(env, &mut state, underlying)?;
    validate!(
        env,
        new_index >= old_index,
        ErrorCode::InvalidState,
        "index would decrease from {} to {}",
        old_index,
        new_index
    )?;
    ledger::save_ledger(env, &state);

    SinglePlusEvents::rebase(env, old_index, new_index);
    Ok(new_index)
}

/// Redemptions must leave the backing at or above the configured floor.
fn check_liquidity(env: &Env, config: &Config, ledger: &ledger::Ledger) -> PlusResult {
    if ledger.total_shares == 0 {
        return Ok(());
    }
    let underlying = total_underlying_wad(env, config)?;
    let ratio = ledger::liquidity_ratio(env, ledger, underlying)?;
    validate!(
        env,
        ratio >= ledger.min_liquidity_ratio,
        ErrorCode::InsufficientLiquidity,
        "liquidity ratio {} below minimum {}",
        ratio,
        ledger.min_liquidity_ratio
    )?;
    Ok(())
}

#[contractimpl]
impl SinglePlus {
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        governance: Address,
        strategist: Address,
        treasury: Address,
        asset: Address,
        strategy: Address,
        name: String,
        symbol: String,
    ) -> Result<(), ErrorCode> {
        validate!(
            &env,
            !is_initialized(&env),
            ErrorCode::AlreadyInitialized,
            "contract already initialized"
        )?;

        let asset_decimals = token::Client::new(&env, &asset).decimals();
        validate!(
            &env,
            asset_decimals <= PLUS_DECIMALS,
            ErrorCode::InvalidState,
            "asset precision exceeds {} decimals",
            PLUS_DECIMALS
        )?;

        save_config(
            &env,
            &Config {
                asset: asset.clone(),
                asset_decimals,
                strategy: strategy.clone(),
                governance: governance.clone(),
                strategist,
            },
        );
        ledger::init_ledger(&env, &treasury);
        set_initialized(&env);

        TokenUtils::new(&env).metadata().set_metadata(&TokenMetadata {
            decimal: PLUS_DECIMALS,
            name,
            symbol,
        });

        SinglePlusEvents::initialize(&env, &governance, &asset, &strategy);
        Ok(())
    }

    /// Deposit `amount` of the asset (native units) and credit the sender
    /// with freshly minted + tokens. Returns the token amount minted.
    pub fn mint(env: Env, sender: Address, amount: i128) -> Result<i128, ErrorCode> {
        sender.require_auth();
        extend_instance(&env);

        let config = get_config(&env);
        validate!(
            &env,
            amount > 0,
            ErrorCode::InvalidState,
            "mint amount must be positive"
        )?;

        token::Client::new(&env, &config.asset).transfer(
            &sender,
            &env.current_contract_address(),
            &amount,
        );

        let value_wad = normalize(&env, amount, config.asset_decimals)?;
        let mut state = ledger::get_ledger(&env);
        let shares = ledger::mint_shares(&env, &mut state, &sender, value_wad)?;
        let minted = shares_to_value(&env, shares, state.index)?;
        ledger::save_ledger(&env, &state);

        SinglePlusEvents::mint(&env, &sender, amount, shares);
        Ok(minted)
    }

    /// Quote the + token amount a deposit of `amount` would mint.
    pub fn get_mint_amount(env: Env, amount: i128) -> Result<i128, ErrorCode> {
        let config = get_config(&env);
        validate!(
            &env,
            amount > 0,
            ErrorCode::InvalidState,
            "mint amount must be positive"
        )?;
        let value_wad = normalize(&env, amount, config.asset_decimals)?;
        let state = ledger::get_ledger(&env);
        let shares = value_to_shares(&env, value_wad, state.index)?;
        shares_to_value(&env, shares, state.index)
    }

    /// Burn + tokens worth `amount` (WAD; `MAX_REDEEM` for the full holding)
    /// and pay the sender the backing asset net of the redemption fee.
    /// Returns the asset amount paid out, in native units.
    pub fn redeem(env: Env, sender: Address, amount: i128) -> Result<i128, ErrorCode> {
        sender.require_auth();
        extend_instance(&env);

        let config = get_config(&env);
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
        let value_wad = shares_to_value(&env, net, state.index)?;
        let fee_wad = shares_to_value(&env, fee, state.index)?;
        let asset_out = denormalize(&env, value_wad, config.asset_decimals)?;

        ledger::burn_shares(&env, &mut state, &sender, share_amt)?;

        let asset = token::Client::new(&env, &config.asset);
        let idle = asset.balance(&env.current_contract_address());
        if idle < asset_out {
            StrategyClient::new(&env, &config.strategy).withdraw(
                &env.current_contract_address(),
                &(asset_out.safe_sub(idle, &env)?),
            );
        }
        asset.transfer(&env.current_contract_address(), &sender, &asset_out);

        check_liquidity(&env, &config, &state)?;
        ledger::save_ledger(&env, &state);

        SinglePlusEvents::redeem(&env, &sender, share_amt, asset_out, fee_wad);
        Ok(asset_out)
    }

    /// Quote a redemption: `(asset_out, fee_wad)` for burning + tokens worth
    /// `amount` held by `sender`.
    pub fn get_redeem_amount(
        env: Env,
        sender: Address,
        amount: i128,
    ) -> Result<(i128, i128), ErrorCode> {
        let config = get_config(&env);
        let state = ledger::get_ledger(&env);

        let share_amt = ledger::resolve_redeem_shares(&env, &state, &sender, amount)?;
        let FeeBreakdown { fee, net, .. } =
            split_redeem_fee(&env, share_amt, state.redeem_fee_bps)?;
        let value_wad = shares_to_value(&env, net, state.index)?;
        let fee_wad = shares_to_value(&env, fee, state.index)?;
        let asset_out = denormalize(&env, value_wad, config.asset_decimals)?;
        Ok((asset_out, fee_wad))
    }

    /// Move idle asset into the strategy. Strategist only.
    pub fn invest(env: Env, sender: Address, amount: i128) -> Result<(), ErrorCode> {
        extend_instance(&env);
        let config = get_config(&env);
        require_strategist(&env, &config, &sender)?;

        let asset = token::Client::new(&env, &config.asset);
        let idle = asset.balance(&env.current_contract_address());
        validate!(
            &env,
            amount > 0 && amount <= idle,
            ErrorCode::InvalidState,
            "invest of {} exceeds idle balance {}",
            amount,
            idle
        )?;

        asset.transfer(&env.current_contract_address(), &config.strategy, &amount);
        StrategyClient::new(&env, &config.strategy).invest(&amount);

        SinglePlusEvents::invest(&env, amount);
        Ok(())
    }

    /// Realize accrued strategy yield and fold it into the index right
    /// away. Strategist only. Returns the amount realized, in native units.
    pub fn harvest(env: Env, sender: Address) -> Result<i128, ErrorCode> {
        extend_instance(&env);
        let config = get_config(&env);
        require_strategist(&env, &config, &sender)?;

        let harvested = StrategyClient::new(&env, &config.strategy).harvest();
        run_rebase(&env, &config)?;

        SinglePlusEvents::harvest(&env, harvested);
        Ok(harvested)
    }

    /// Fold the current backing into the index. Permissionless; the index
    /// never decreases. Returns the new index.
    pub fn rebase(env: Env) -> Result<i128, ErrorCode> {
        extend_instance(&env);
        let config = get_config(&env);
        run_rebase(&env, &config)
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
        let config = get_config(&env);
        total_underlying_wad(&env, &config)
    }

    pub fn liquidity_ratio(env: Env) -> Result<i128, ErrorCode> {
        let config = get_config(&env);
        let state = ledger::get_ledger(&env);
        let underlying = total_underlying_wad(&env, &config)?;
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

        SinglePlusEvents::param_update(&env, Symbol::new(&env, "redeem_fee"));
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

        SinglePlusEvents::param_update(&env, Symbol::new(&env, "min_liquidity_ratio"));
        Ok(())
    }

    pub fn set_treasury(env: Env, sender: Address, treasury: Address) -> Result<(), ErrorCode> {
        let config = get_config(&env);
        require_governance(&env, &config, &sender)?;

        let mut state = ledger::get_ledger(&env);
        state.treasury = treasury;
        ledger::save_ledger(&env, &state);

        SinglePlusEvents::param_update(&env, Symbol::new(&env, "treasury"));
        Ok(())
    }

    pub fn set_governance(env: Env, sender: Address, governance: Address) -> Result<(), ErrorCode> {
        let mut config = get_config(&env);
        require_governance(&env, &config, &sender)?;
        config.governance = governance;
        save_config(&env, &config);

        SinglePlusEvents::param_update(&env, Symbol::new(&env, "governance"));
        Ok(())
    }

    pub fn set_strategist(env: Env, sender: Address, strategist: Address) -> Result<(), ErrorCode> {
        let mut config = get_config(&env);
        require_governance(&env, &config, &sender)?;
        config.strategist = strategist;
        save_config(&env, &config);

        SinglePlusEvents::param_update(&env, Symbol::new(&env, "strategist"));
        Ok(())
    }
}
