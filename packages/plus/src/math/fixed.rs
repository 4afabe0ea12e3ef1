use soroban_sdk::{log, Env, I256};

use crate::constants::WAD;
use crate::error::{ErrorCode, PlusResult};

/// Floor of `a * b / denominator`, widening through I256 when the product
/// does not fit in an i128. Ledger amounts are never negative, so floor and
/// truncation toward zero coincide.
pub fn mul_div_floor(env: &Env, a: i128, b: i128, denominator: i128) -> PlusResult<i128> {
    if denominator == 0 {
        log!(env, "Math error thrown at {}:{}", file!(), line!());
        return Err(ErrorCode::MathError);
    }
    match a.checked_mul(b) {
        Some(product) => Ok(product / denominator),
        None => {
            let product = I256::from_i128(env, a).mul(&I256::from_i128(env, b));
            match product.div(&I256::from_i128(env, denominator)).to_i128() {
                Some(result) => Ok(result),
                None => {
                    log!(env, "Math error thrown at {}:{}", file!(), line!());
                    Err(ErrorCode::MathError)
                }
            }
        }
    }
}

/// Shares backing `value_wad` at `index`.
pub fn value_to_shares(env: &Env, value_wad: i128, index: i128) -> PlusResult<i128> {
    mul_div_floor(env, value_wad, WAD, index)
}

/// WAD value of `shares` at `index`.
pub fn shares_to_value(env: &Env, shares: i128, index: i128) -> PlusResult<i128> {
    mul_div_floor(env, shares, index, WAD)
}
