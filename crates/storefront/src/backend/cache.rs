//! Cache types for catalog responses.

use bakehouse_core::{ListPage, ProductId};

use super::types::Product;

/// Cache key for catalog reads.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(ProductId),
    Products { page: u64, page_size: u64 },
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(ListPage<Product>),
}
