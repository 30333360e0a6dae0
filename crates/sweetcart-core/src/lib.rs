//! # sweetcart-core: Pure Business Logic for Sweetcart
//!
//! This crate is the **heart** of the Sweetcart storefront. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sweetcart Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (web UI)                            │   │
//! │  │    Product grid ──► Cart panel ──► Confirmation overlay         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ dispatch / subscribe                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    sweetcart-session                            │   │
//! │  │    SessionStore, ConfirmationLifecycle, scroll-lock effects     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sweetcart-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │  catalog  │  │   cart    │  │  totals   │  │   │
//! │  │   │   Money   │  │ Catalog   │  │   Cart    │  │ order     │  │   │
//! │  │   │           │  │ ImageSet  │  │ reduce()  │  │ _total    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO HIDDEN STATE • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Read-only product catalog loaded once at startup
//! - [`cart`] - Cart, line items, intents, and the pure reducer
//! - [`totals`] - Order total derivation
//! - [`error`] - Typed errors for catalog ingestion
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every transition is deterministic - same input = same output
//! 2. **No I/O**: Network, file system, and clock access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Total Reducer**: `reduce` never fails - every intent maps to a next state
//!
//! ## Example Usage
//!
//! ```rust
//! use sweetcart_core::cart::{Cart, CartIntent, LineItem, reduce};
//! use sweetcart_core::money::Money;
//! use sweetcart_core::totals::order_total;
//!
//! // Two slices of cake at $4.50 each
//! let item = LineItem::new("Red Velvet Cake", 2, Money::from_cents(450), "thumb.jpg");
//!
//! let cart = reduce(Cart::new(), CartIntent::AddOrUpdate { item });
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(order_total(&cart).cents(), 900); // $9.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod totals;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use sweetcart_core::Money` instead of
// `use sweetcart_core::money::Money`

pub use cart::{reduce, Cart, CartIntent, LineItem};
pub use catalog::{Catalog, CatalogItem, ImageSet};
pub use error::{CatalogError, CatalogResult};
pub use money::Money;
pub use totals::{order_total, OrderSummary};
