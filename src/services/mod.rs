//! Background services and shared components

pub mod backup;
pub mod export;
pub mod rate_limiter;
