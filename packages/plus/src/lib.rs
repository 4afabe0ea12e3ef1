#![no_std]

pub mod constants;
pub mod decimal;
pub mod error;
pub mod fee;
pub mod interface;
pub mod ledger;
pub mod macros;
pub mod math;
