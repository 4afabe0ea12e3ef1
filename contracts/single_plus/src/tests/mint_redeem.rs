use plus::constants::{MAX_REDEEM, WAD};
use plus::error::ErrorCode;
use pretty_assertions::assert_eq;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;

use crate::tests::setup::{TestFixture, UNIT};

#[test]
fn mint_is_one_to_one_at_initial_index() {
    let fixture = TestFixture::create();
    let plus = fixture.plus_client();
    let user = fixture.funded_user(6 * UNIT);

    let quoted = plus.get_mint_amount(&(6 * UNIT));
    let minted = plus.mint(&user, &(6 * UNIT));

    assert_eq!(minted, 6 * WAD);
    assert_eq!(quoted, minted);
    assert_eq!(plus.balance_of(&user), 6 * WAD);
    assert_eq!(plus.user_share(&user), 6 * WAD);
    assert_eq!(plus.total_supply(), 6 * WAD);
    assert_eq!(plus.index(), WAD);
    assert_eq!(fixture.asset_client().balance(&user), 0);
    assert_eq!(fixture.asset_client().balance(&fixture.plus), 6 * UNIT);
}

#[test]
fn mint_requires_sender_auth() {
    let fixture = TestFixture::create();
    let plus = fixture.plus_client();
    let user = fixture.funded_user(UNIT);

    plus.mint(&user, &UNIT);
    assert_eq!(fixture.env.auths()[0].0, user);
}

#[test]
fn mint_zero_fails() {
    let fixture = TestFixture::create();
    let plus = fixture.plus_client();
    let user = fixture.funded_user(UNIT);

    assert_eq!(
        plus.try_mint(&user, &0),
        Err(Ok(ErrorCode::InvalidState))
    );
}

#[test]
fn redeem_full_holding_round_trips_without_fee() {
    let fixture = TestFixture::create();
    let plus = fixture.plus_client();
    let user = fixture.funded_user(6 * UNIT);

    plus.mint(&user, &(6 * UNIT));
    let paid = plus.redeem(&user, &MAX_REDEEM);

    assert_eq!(paid, 6 * UNIT);
    assert_eq!(fixture.asset_client().balance(&user), 6 * UNIT);
    assert_eq!(plus.balance_of(&user), 0);
    assert_eq!(plus.total_supply(), 0);
    assert_eq!(plus.total_shares(), 0);
    // drained ledger keeps its index
    assert_eq!(plus.index(), WAD);
}

#[test]
fn redeem_fee_stays_as_surplus_until_rebase() {
    let fixture = TestFixture::create();
    let plus = fixture.plus_client();
    let user = fixture.funded_user(10 * UNIT);

    plus.mint(&user, &(10 * UNIT));
    plus.set_redeem_fee(&fixture.governance, &100);

    let (quoted_out, quoted_fee) = plus.get_redeem_amount(&user, &(5 * WAD));
    let paid = plus.redeem(&user, &(5 * WAD));

    // 1% of 5.0 is retained; 4.95 units go out
    assert_eq!(paid, 495 * UNIT / 100);
    assert_eq!(quoted_out, paid);
    assert_eq!(quoted_fee, 5 * WAD / 100);
    assert_eq!(plus.balance_of(&user), 5 * WAD);
    assert_eq!(plus.total_supply(), 5 * WAD);

    // the retained fee floats as surplus backing
    assert_eq!(plus.total_underlying(), 505 * WAD / 100);
    assert_eq!(plus.liquidity_ratio(), 101 * WAD / 100);

    // rebase folds it in for the remaining holder
    plus.rebase();
    assert_eq!(plus.index(), 101 * WAD / 100);
    assert_eq!(plus.balance_of(&user), 505 * WAD / 100);
    assert_eq!(plus.user_share(&user), 5 * WAD);
}

#[test]
fn redeem_more_than_held_fails() {
    let fixture = TestFixture::create();
    let plus = fixture.plus_client();
    let user = fixture.funded_user(UNIT);

    plus.mint(&user, &UNIT);
    assert_eq!(
        plus.try_redeem(&user, &(2 * WAD)),
        Err(Ok(ErrorCode::InsufficientBalance))
    );
}

#[test]
fn redeem_with_no_holding_fails() {
    let fixture = TestFixture::create();
    let plus = fixture.plus_client();
    let user = fixture.funded_user(UNIT);

    plus.mint(&user, &UNIT);
    let stranger = Address::generate(&fixture.env);
    assert_eq!(
        plus.try_redeem(&stranger, &MAX_REDEEM),
        Err(Ok(ErrorCode::InvalidState))
    );
}

#[test]
fn transfer_moves_balance_not_supply() {
    let fixture = TestFixture::create();
    let plus = fixture.plus_client();
    let user = fixture.funded_user(6 * UNIT);
    let friend = Address::generate(&fixture.env);

    plus.mint(&user, &(6 * UNIT));
    plus.transfer(&user, &friend, &(2 * WAD));

    assert_eq!(plus.balance_of(&user), 4 * WAD);
    assert_eq!(plus.balance_of(&friend), 2 * WAD);
    assert_eq!(plus.total_supply(), 6 * WAD);
    assert_eq!(plus.total_shares(), 6 * WAD);
}

#[test]
fn transfer_more_than_held_fails() {
    let fixture = TestFixture::create();
    let plus = fixture.plus_client();
    let user = fixture.funded_user(UNIT);
    let friend = Address::generate(&fixture.env);

    plus.mint(&user, &UNIT);
    assert_eq!(
        plus.try_transfer(&user, &friend, &(2 * WAD)),
        Err(Ok(ErrorCode::InsufficientBalance))
    );
}

#[test]
fn mint_after_rebase_prices_at_index() {
    let fixture = TestFixture::create();
    let plus = fixture.plus_client();
    let user = fixture.funded_user(6 * UNIT);
    let late = fixture.funded_user(6 * UNIT);

    plus.mint(&user, &(6 * UNIT));
    // double the backing, then fold it in
    fixture.mint_asset(&fixture.plus, 6 * UNIT);
    plus.rebase();
    assert_eq!(plus.index(), 2 * WAD);

    let minted = plus.mint(&late, &(6 * UNIT));
    assert_eq!(minted, 6 * WAD);
    assert_eq!(plus.user_share(&late), 3 * WAD);
    assert_eq!(plus.balance_of(&user), 12 * WAD);
    assert_eq!(plus.total_supply(), 18 * WAD);
}
