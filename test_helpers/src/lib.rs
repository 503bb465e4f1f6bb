//! Test helpers shared across crates.
//!
//! This crate provides fragment directory fixtures and the sample fragment
//! set used by integration tests.

pub mod fragments;
