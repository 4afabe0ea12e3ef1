#![no_std]

mod contract;
mod events;
mod storage;

#[cfg(test)]
mod tests;

pub use crate::contract::{SinglePlus, SinglePlusClient};
