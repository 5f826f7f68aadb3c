//! Shared domain types

pub mod signup;

pub use signup::{NewSignup, Signup};
