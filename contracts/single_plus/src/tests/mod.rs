mod setup;

mod admin;
mod mint_redeem;
