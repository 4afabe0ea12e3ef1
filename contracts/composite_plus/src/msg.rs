use soroban_sdk::{contracttype, Address, Vec};

/// Quoted pro-rata redemption: one payout amount per registered token, in
/// registry order, plus the fee retained by the basket.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RedeemQuote {
    pub tokens: Vec<Address>,
    pub amounts: Vec<i128>,
    pub fee: i128,
}
