//! # Error Types
//!
//! Domain-specific error types for sweetcart-core.
//!
//! ## Error Surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sweetcart-core errors (this file)                                     │
//! │  └── CatalogError   - Catalog ingestion/validation failures            │
//! │                                                                         │
//! │  The cart reducer and total calculator are TOTAL functions: every      │
//! │  intent maps to a next state and every cart has a total. The only      │
//! │  fallible operation in the core is turning the static product JSON     │
//! │  into a validated Catalog, once, at startup.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item name, offending value)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Catalog Error
// =============================================================================

/// Catalog ingestion errors.
///
/// Raised while parsing and validating the static product data at startup.
/// After a `Catalog` exists it is immutable and nothing else in the core
/// can fail.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The product JSON document could not be parsed.
    #[error("catalog JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    /// A product price is not representable as non-negative cents.
    ///
    /// ## When This Occurs
    /// - Negative price in the data file
    /// - NaN/infinite value produced by a bad export
    #[error("invalid price {value} for catalog item '{name}'")]
    InvalidPrice { name: String, value: f64 },

    /// Two catalog entries share a name.
    ///
    /// Names key cart line items, so a duplicate would make two products
    /// collide in the cart.
    #[error("duplicate catalog item name '{name}'")]
    DuplicateName { name: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CatalogError.
pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// Unit Tests
// =============================================================================
