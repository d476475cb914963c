//! Implementation of the `#[derive(Item)]` macro.
//!
//! Generates the `vitrine_core::Item` implementation and field name
//! constants from `#[item(...)]` field annotations.

mod attrs;
mod derive;

pub use derive::item_derive_impl;
