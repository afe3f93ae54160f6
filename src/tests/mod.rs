//! tests/mod.rs
pub mod support;

mod campaign_tests;
