pub mod fixed;
pub mod safe_math;
