//! Shared fixtures for the vesting integration tests.

pub mod helpers;
