use plus::constants::WAD;
use plus::error::ErrorCode;
use pretty_assertions::assert_eq;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, String};

use crate::tests::setup::{TestFixture, UNIT};

#[test]
fn initialize_twice_fails() {
    let fixture = TestFixture::create();
    let plus = fixture.plus_client();

    assert_eq!(
        plus.try_initialize(
            &fixture.governance,
            &fixture.strategist,
            &fixture.treasury,
            &fixture.asset,
            &fixture.strategy,
            &String::from_str(&fixture.env, "Plus USD"),
            &String::from_str(&fixture.env, "USD+"),
        ),
        Err(Ok(ErrorCode::AlreadyInitialized))
    );
}

#[test]
fn metadata_reports_wad_precision() {
    let fixture = TestFixture::create();
    let plus = fixture.plus_client();

    assert_eq!(plus.decimals(), 18);
    assert_eq!(plus.name(), String::from_str(&fixture.env, "Plus USD"));
    assert_eq!(plus.symbol(), String::from_str(&fixture.env, "USD+"));

    let config = plus.query_config();
    assert_eq!(config.asset, fixture.asset);
    assert_eq!(config.asset_decimals, 7);
    assert_eq!(config.governance, fixture.governance);
}

#[test]
fn set_redeem_fee_requires_governance() {
    let fixture = TestFixture::create();
    let plus = fixture.plus_client();
    let user = fixture.funded_user(UNIT);

    assert_eq!(
        plus.try_set_redeem_fee(&user, &100),
        Err(Ok(ErrorCode::NotAuthorized))
    );
    plus.set_redeem_fee(&fixture.governance, &100);
}

#[test]
fn set_redeem_fee_out_of_range_fails() {
    let fixture = TestFixture::create();
    let plus = fixture.plus_client();

    assert_eq!(
        plus.try_set_redeem_fee(&fixture.governance, &10_001),
        Err(Ok(ErrorCode::InvalidFee))
    );
}

#[test]
fn governance_rotation_hands_over_control() {
    let fixture = TestFixture::create();
    let plus = fixture.plus_client();
    let successor = Address::generate(&fixture.env);

    plus.set_governance(&fixture.governance, &successor);

    assert_eq!(
        plus.try_set_redeem_fee(&fixture.governance, &50),
        Err(Ok(ErrorCode::NotAuthorized))
    );
    plus.set_redeem_fee(&successor, &50);
}

#[test]
fn strategist_rotation() {
    let fixture = TestFixture::create();
    let plus = fixture.plus_client();
    let user = fixture.funded_user(6 * UNIT);
    let successor = Address::generate(&fixture.env);

    plus.mint(&user, &(6 * UNIT));
    plus.set_strategist(&fixture.governance, &successor);

    assert_eq!(
        plus.try_invest(&fixture.strategist, &UNIT),
        Err(Ok(ErrorCode::NotAuthorized))
    );
    plus.invest(&successor, &UNIT);
}

#[test]
fn min_liquidity_ratio_below_one_fails() {
    let fixture = TestFixture::create();
    let plus = fixture.plus_client();

    assert_eq!(
        plus.try_set_min_liquidity_ratio(&fixture.governance, &(WAD - 1)),
        Err(Ok(ErrorCode::InvalidState))
    );
}

#[test]
fn redeem_blocked_below_liquidity_floor() {
    let fixture = TestFixture::create();
    let plus = fixture.plus_client();
    let user = fixture.funded_user(10 * UNIT);

    plus.mint(&user, &(10 * UNIT));
    // demand 10% surplus backing; a fee-free redeem leaves exactly 1.0
    plus.set_min_liquidity_ratio(&fixture.governance, &(11 * WAD / 10));

    assert_eq!(
        plus.try_redeem(&user, &(5 * WAD)),
        Err(Ok(ErrorCode::InsufficientLiquidity))
    );
}
