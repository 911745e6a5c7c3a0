//! Type-safe wrappers for domain primitives.

mod id;
mod price;

pub use id::ProductId;
pub use price::Price;
