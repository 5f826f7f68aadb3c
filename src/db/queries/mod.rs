//! Database queries

pub mod signup;
