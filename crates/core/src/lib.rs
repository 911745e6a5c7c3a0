//! Starfruit Core - Domain types for the cart & checkout engine.
//!
//! This crate provides the types shared across all Starfruit components:
//! - `cart` - Cart/checkout engine (stores, persistence, backend clients)
//!
//! # Architecture
//!
//! The core crate contains only types and pure aggregate logic - no I/O, no
//! storage access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe product ids and prices
//! - [`cart`] - The cart aggregate, its line items, and the buy-now snapshot

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::*;
pub use types::*;
