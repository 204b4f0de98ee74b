//! Argon2id password hashing with configurable cost.

pub mod hasher;

pub use hasher::PasswordHasher;
