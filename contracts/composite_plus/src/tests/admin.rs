use plus::constants::WAD;
use plus::error::ErrorCode;
use pretty_assertions::assert_eq;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{vec, Address, String};

use crate::tests::setup::{BasketFixture, UNIT};

#[test]
fn initialize_twice_fails() {
    let fixture = BasketFixture::create();
    let basket = fixture.basket_client();

    assert_eq!(
        basket.try_initialize(
            &fixture.governance,
            &fixture.treasury,
            &String::from_str(&fixture.env, "Plus Basket"),
            &String::from_str(&fixture.env, "BSK+"),
        ),
        Err(Ok(ErrorCode::AlreadyInitialized))
    );
}

#[test]
fn metadata_reports_wad_precision() {
    let fixture = BasketFixture::create();
    let basket = fixture.basket_client();

    assert_eq!(basket.decimals(), 18);
    assert_eq!(basket.name(), String::from_str(&fixture.env, "Plus Basket"));
    assert_eq!(basket.symbol(), String::from_str(&fixture.env, "BSK+"));
    assert_eq!(basket.query_config().governance, fixture.governance);
}

#[test]
fn set_redeem_fee_requires_governance() {
    let fixture = BasketFixture::create();
    let basket = fixture.basket_client();
    let user = Address::generate(&fixture.env);

    assert_eq!(
        basket.try_set_redeem_fee(&user, &100),
        Err(Ok(ErrorCode::NotAuthorized))
    );
    basket.set_redeem_fee(&fixture.governance, &100);
}

#[test]
fn governance_rotation_hands_over_control() {
    let fixture = BasketFixture::create();
    let basket = fixture.basket_client();
    let successor = Address::generate(&fixture.env);

    basket.set_governance(&fixture.governance, &successor);

    assert_eq!(
        basket.try_add_token(&fixture.governance, &Address::generate(&fixture.env)),
        Err(Ok(ErrorCode::NotAuthorized))
    );
    basket.set_redeem_fee(&successor, &50);
}

#[test]
fn redeem_blocked_below_liquidity_floor() {
    let fixture = BasketFixture::create();
    let basket = fixture.basket_client();
    let user = Address::generate(&fixture.env);

    fixture.mint_single(&user, 0, 10 * UNIT);
    basket.mint(
        &user,
        &vec![&fixture.env, fixture.singles[0].clone()],
        &vec![&fixture.env, 10 * WAD],
    );
    basket.set_min_liquidity_ratio(&fixture.governance, &(11 * WAD / 10));

    assert_eq!(
        basket.try_redeem(&user, &(5 * WAD)),
        Err(Ok(ErrorCode::InsufficientLiquidity))
    );
}

#[test]
fn transfer_moves_basket_balance() {
    let fixture = BasketFixture::create();
    let basket = fixture.basket_client();
    let user = Address::generate(&fixture.env);
    let friend = Address::generate(&fixture.env);

    fixture.mint_single(&user, 0, 10 * UNIT);
    basket.mint(
        &user,
        &vec![&fixture.env, fixture.singles[0].clone()],
        &vec![&fixture.env, 10 * WAD],
    );
    basket.transfer(&user, &friend, &(4 * WAD));

    assert_eq!(basket.balance_of(&user), 6 * WAD);
    assert_eq!(basket.balance_of(&friend), 4 * WAD);
    assert_eq!(basket.total_supply(), 10 * WAD);
}
