//! # Totals Module
//!
//! Derives the order total (and the summary DTO the cart panel renders)
//! from cart contents.
//!
//! Totals are always computed live from the current cart - nothing here is
//! cached or captured at confirmation time, so the figure on screen can
//! never disagree with the itemized lines.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::money::Money;

// =============================================================================
// Order Total
// =============================================================================

/// Computes the order total for a cart.
///
/// ## Contract
/// - Lines with quantity ≤ 0 are skipped, even though the reducer already
///   keeps them out of the cart
/// - Empty cart totals zero
/// - Pure, deterministic, O(n) in cart size
///
/// ## Example
/// ```rust
/// use sweetcart_core::cart::{reduce, Cart, CartIntent, LineItem};
/// use sweetcart_core::money::Money;
/// use sweetcart_core::totals::order_total;
///
/// assert!(order_total(&Cart::new()).is_zero());
///
/// let item = LineItem::new("Cake", 2, Money::from_cents(450), "thumb.jpg");
/// let cart = reduce(Cart::new(), CartIntent::AddOrUpdate { item });
/// assert_eq!(order_total(&cart).cents(), 900);
/// ```
pub fn order_total(cart: &Cart) -> Money {
    cart.items()
        .iter()
        .filter(|line| line.quantity > 0)
        .fold(Money::zero(), |acc, line| acc + line.line_total)
}

// =============================================================================
// Order Summary
// =============================================================================

/// Cart totals summary for the presentation boundary.
///
/// The cart panel header wants "Your Cart (3)" and the footer wants
/// "Order Total $14.00"; this bundles both so the frontend makes one read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderSummary {
    /// Number of distinct lines.
    pub item_count: usize,

    /// Total quantity across all lines.
    pub total_quantity: i64,

    /// The order total.
    pub total: Money,
}

impl From<&Cart> for OrderSummary {
    fn from(cart: &Cart) -> Self {
        OrderSummary {
            item_count: cart.len(),
            total_quantity: cart.total_quantity(),
            total: order_total(cart),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
