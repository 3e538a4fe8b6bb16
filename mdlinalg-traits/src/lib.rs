//! Shared traits for the mdlinalg crates.
//!
//! This crate provides the core trait definitions that are shared across
//! `mdlinalg-view` and `mdlinalg`.
//!
//! External crates can depend on `mdlinalg-traits` to implement traits for
//! their types without orphan rule violations.

pub mod conjugate;
pub mod scalar;

pub use conjugate::Conjugate;
pub use scalar::ScalarBase;
