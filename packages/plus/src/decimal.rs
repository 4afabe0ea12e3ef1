use soroban_sdk::Env;

use crate::constants::PLUS_DECIMALS;
use crate::error::PlusResult;
use crate::math::safe_math::SafeMath;

fn scaling_factor(decimals: u32) -> i128 {
    10_i128.pow(PLUS_DECIMALS - decimals)
}

/// Convert an amount in the asset's native precision to the WAD ledger unit.
/// `decimals` must not exceed 18; contracts validate this at initialization.
pub fn normalize(env: &Env, amount: i128, decimals: u32) -> PlusResult<i128> {
    if decimals == PLUS_DECIMALS {
        return Ok(amount);
    }
    amount.safe_mul(scaling_factor(decimals), env)
}

/// Convert a WAD value back to the asset's native precision, truncating
/// toward zero.
pub fn denormalize(env: &Env, value_wad: i128, decimals: u32) -> PlusResult<i128> {
    if decimals == PLUS_DECIMALS {
        return Ok(value_wad);
    }
    value_wad.safe_div(scaling_factor(decimals), env)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::WAD;
    use crate::error::ErrorCode;
    use soroban_sdk::Env;
    use test_case::test_case;

    #[test_case(7, 60_000_000, 6 * WAD; "seven decimals")]
    #[test_case(6, 6_000_000, 6 * WAD; "six decimals")]
    #[test_case(18, 6 * WAD, 6 * WAD; "already wad")]
    #[test_case(0, 6, 6 * WAD; "zero decimals")]
    fn normalize_scales_up(decimals: u32, amount: i128, expected: i128) {
        let env = Env::default();
        assert_eq!(normalize(&env, amount, decimals).unwrap(), expected);
    }

    #[test]
    fn denormalize_truncates_toward_zero() {
        let env = Env::default();
        // 1.23456789999... units of a 7-decimal asset
        let value = 12_345_678_999_999_999_999_i128;
        assert_eq!(denormalize(&env, value, 7).unwrap(), 123_456_789);
        assert_eq!(denormalize(&env, value, 18).unwrap(), value);
    }

    #[test]
    fn normalize_overflow_is_math_error() {
        let env = Env::default();
        assert_eq!(
            normalize(&env, i128::MAX, 0),
            Err(ErrorCode::MathError)
        );
    }
}
