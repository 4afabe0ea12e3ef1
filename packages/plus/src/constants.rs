/// Fixed-point unit of the share ledger: 1.0 with 18 decimal places.
pub const WAD: i128 = 1_000_000_000_000_000_000;

/// Decimal places of every "+" token.
pub const PLUS_DECIMALS: u32 = 18;

/// Denominator for basis-point fee math.
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Sentinel redeem amount meaning "the caller's full balance".
pub const MAX_REDEEM: i128 = i128::MAX;

pub const DAY_IN_LEDGERS: u32 = 17280;

pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;
