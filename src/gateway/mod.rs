//! Gateway construction and lookup operations.

mod builder;
mod lookup;

pub use builder::{Platter, PlatterBuilder};
pub use lookup::DiscogsGateway;
