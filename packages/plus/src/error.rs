use soroban_sdk::contracterror;

pub type PlusResult<T = ()> = Result<T, ErrorCode>;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ErrorCode {
    AlreadyInitialized = 1,
    NotAuthorized = 2,
    /// Duplicate/unsupported token, length mismatch, zero-amount operation,
    /// or removing a constituent that still holds value.
    InvalidState = 3,
    InsufficientBalance = 4,
    InsufficientLiquidity = 5,
    InvalidFee = 6,
    MathError = 7,
}
