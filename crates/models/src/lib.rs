//! Entities and the persistence handle for the product catalog.

pub mod errors;
pub mod db;
pub mod product;

#[cfg(test)]
mod tests;
