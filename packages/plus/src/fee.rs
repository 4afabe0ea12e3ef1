use soroban_sdk::{contracttype, Env};

use crate::constants::BPS_DENOMINATOR;
use crate::error::{ErrorCode, PlusResult};
use crate::math::safe_math::SafeMath;
use crate::validate;

pub const MAX_FEE_BPS: u32 = 10_000;

/// Gross/fee/net decomposition of a redemption at the current fee setting.
///
/// The retained fee is never minted to anyone: it stays inside
/// `total_underlying` as floating surplus and is folded into the index for
/// all remaining holders at the next rebase.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeBreakdown {
    pub gross: i128,
    pub fee: i128,
    pub net: i128,
}

pub fn split_redeem_fee(env: &Env, gross: i128, fee_bps: u32) -> PlusResult<FeeBreakdown> {
    validate!(env, fee_bps <= MAX_FEE_BPS, ErrorCode::InvalidFee)?;
    let fee = gross
        .safe_mul(fee_bps as i128, env)?
        .safe_div(BPS_DENOMINATOR, env)?;
    let net = gross.safe_sub(fee, env)?;
    Ok(FeeBreakdown { gross, fee, net })
}
