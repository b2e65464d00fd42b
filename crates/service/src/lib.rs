//! Catalog operations on top of the `models` entities. Handlers call these
//! instead of touching the entity directly.

pub mod errors;
pub mod product_service;
#[cfg(test)]
pub mod test_support;
