#![no_std]

#[cfg(test)]
extern crate std;

mod contract;
mod events;
mod msg;
mod storage;

#[cfg(test)]
mod tests;

pub use crate::contract::{CompositePlus, CompositePlusClient};
pub use crate::msg::RedeemQuote;
