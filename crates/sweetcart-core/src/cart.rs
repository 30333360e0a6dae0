//! # Cart Module
//!
//! The cart state machine: line items, intents, and the pure reducer.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Transitions                               │
//! │                                                                         │
//! │  Frontend Action          Intent                    Next State          │
//! │  ───────────────          ──────                    ──────────          │
//! │                                                                         │
//! │  Pick quantity > 0 ──────► AddOrUpdate { item } ──► replace-or-append  │
//! │                                                                         │
//! │  Quantity back to 0 ─────► AddOrUpdate (qty 0) ───► line purged        │
//! │                                                                         │
//! │  Click remove (✕) ───────► Remove { name } ───────► line filtered out  │
//! │                                                                         │
//! │  Start new order ────────► Reset ─────────────────► empty cart         │
//! │                                                                         │
//! │  NOTE: `reduce` is pure. The session store owns the single mutable     │
//! │        slot; everyone else sees cloned snapshots.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line item per `name` at any time
//! - No line item with quantity ≤ 0 persists
//! - Ordering is insertion/update order (an update moves the line to the tail)

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::CatalogItem;
use crate::money::Money;

// =============================================================================
// Line Item
// =============================================================================

/// One catalog item's entry in the cart.
///
/// ## Design Notes
/// - `name`: the unique key a line is matched on within the cart
/// - `unit_price`/`thumbnail`: frozen copies of catalog data at add time,
///   so the cart displays consistent rows even if the catalog were swapped
///   out under it
/// - `line_total`: carried, not recomputed, because the caller supplies the
///   final quantity and total together (full-replace semantics)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Display name, unique within the cart.
    pub name: String,

    /// Quantity selected. Never ≤ 0 for a line that is *in* the cart.
    pub quantity: i64,

    /// Unit price at time of adding (frozen).
    pub unit_price: Money,

    /// `unit_price × quantity`, supplied by the caller.
    pub line_total: Money,

    /// Thumbnail reference shown next to the line. Opaque to the core.
    pub thumbnail: String,
}

impl LineItem {
    /// Creates a line item, computing the line total.
    ///
    /// ## Example
    /// ```rust
    /// use sweetcart_core::cart::LineItem;
    /// use sweetcart_core::money::Money;
    ///
    /// let line = LineItem::new("Red Velvet Cake", 2, Money::from_cents(450), "thumb.jpg");
    /// assert_eq!(line.line_total.cents(), 900);
    /// ```
    pub fn new(
        name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
        thumbnail: impl Into<String>,
    ) -> Self {
        LineItem {
            name: name.into(),
            quantity,
            unit_price,
            line_total: unit_price.multiply_quantity(quantity),
            thumbnail: thumbnail.into(),
        }
    }

    /// Creates a line item from a catalog entry and quantity.
    ///
    /// ## Price Freezing
    /// The price and thumbnail are captured at this moment. The cart row
    /// stays consistent with what the shopper saw when they added it.
    pub fn from_catalog(item: &CatalogItem, quantity: i64) -> Self {
        LineItem::new(item.name.clone(), quantity, item.price, item.image.thumbnail.clone())
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: an ordered sequence of line items.
///
/// ## Invariants
/// - Lines are unique by `name`
/// - No line has quantity ≤ 0
/// - Order is insertion/update order, not price-sorted
///
/// The field is private on purpose: the only mutation path is
/// [`reduce`], and presentation collaborators read cloned snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// The line items in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Looks up a line by name.
    pub fn get(&self, name: &str) -> Option<&LineItem> {
        self.items.iter().find(|line| line.name == name)
    }

    /// Checks whether a line with this name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of distinct lines in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total quantity across all lines (the "(3)" in "Your Cart (3)").
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}

// =============================================================================
// Intents
// =============================================================================

/// A discrete request to change cart state.
///
/// Serialized with a `kind` tag so the frontend dispatches plain objects:
/// `{ "kind": "remove", "name": "Classic Tiramisu" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "camelCase")]
#[ts(export)]
pub enum CartIntent {
    /// Put `item` in the cart, replacing any line with the same name.
    ///
    /// The caller supplies the *final* quantity, price, and total - this is
    /// a wholesale replace, not an incremental merge. Quantity ≤ 0 purges
    /// the line instead.
    AddOrUpdate { item: LineItem },

    /// Delete the line matching `name`, if present. No-op otherwise.
    Remove { name: String },

    /// Empty the cart, unconditionally.
    Reset,
}

// =============================================================================
// Reducer
// =============================================================================

/// Applies one intent to a cart, returning the next cart.
///
/// ## Contract
/// Pure and total: no side effects, no failure mode. `CartIntent` is a
/// closed enum, so the "unrecognized intent leaves state unchanged" rule is
/// enforced by the type system rather than a runtime arm.
///
/// ## Behavior
/// ```text
/// AddOrUpdate, qty ≤ 0   line with that name purged entirely
/// AddOrUpdate, qty > 0   existing line removed, new line appended at the
///                        tail (an update moves the item to the end of the
///                        display order), stale zero-qty rows swept
/// Remove                 matching line deleted; absent name is a no-op
/// Reset                  empty cart
/// ```
///
/// ## Example
/// ```rust
/// use sweetcart_core::cart::{reduce, Cart, CartIntent, LineItem};
/// use sweetcart_core::money::Money;
///
/// let item = LineItem::new("Lemon Meringue Pie", 1, Money::from_cents(500), "pie.jpg");
/// let cart = reduce(Cart::new(), CartIntent::AddOrUpdate { item });
/// assert_eq!(cart.len(), 1);
///
/// let cart = reduce(cart, CartIntent::Reset);
/// assert!(cart.is_empty());
/// ```
pub fn reduce(cart: Cart, intent: CartIntent) -> Cart {
    match intent {
        CartIntent::AddOrUpdate { item } if item.quantity <= 0 => {
            // Equivalent to Remove: a zero-quantity line must not persist.
            reduce(cart, CartIntent::Remove { name: item.name })
        }
        CartIntent::AddOrUpdate { item } => {
            let mut items: Vec<LineItem> = cart
                .items
                .into_iter()
                .filter(|line| line.name != item.name && line.quantity > 0)
                .collect();
            items.push(item);
            Cart { items }
        }
        CartIntent::Remove { name } => {
            let mut items = cart.items;
            items.retain(|line| line.name != name);
            Cart { items }
        }
        CartIntent::Reset => Cart::new(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogItem, ImageSet};

    fn cake(quantity: i64) -> LineItem {
        LineItem::new("Cake", quantity, Money::from_cents(450), "cake-thumb.jpg")
    }

    fn tart(quantity: i64) -> LineItem {
        LineItem::new("Tart", quantity, Money::from_cents(500), "tart-thumb.jpg")
    }

    fn add(cart: Cart, item: LineItem) -> Cart {
        reduce(cart, CartIntent::AddOrUpdate { item })
    }

    #[test]
    fn add_to_empty_cart() {
        // Scenario: cart=[], add("Cake", 2, $4.50) → one line, $9.00 total
        let cart = add(Cart::new(), cake(2));

        assert_eq!(cart.len(), 1);
        let line = cart.get("Cake").unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price.cents(), 450);
        assert_eq!(line.line_total.cents(), 900);
    }

    #[test]
    fn add_same_name_replaces_not_merges() {
        let cart = add(Cart::new(), cake(2));
        let cart = add(cart, cake(5));

        // Full replace: quantity is 5, not 7
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("Cake").unwrap().quantity, 5);
        assert_eq!(cart.get("Cake").unwrap().line_total.cents(), 2250);
    }

    #[test]
    fn uniqueness_holds_over_any_add_sequence() {
        let mut cart = Cart::new();
        for quantity in [1, 3, 2, 9, 4] {
            cart = add(cart, cake(quantity));
            cart = add(cart, tart(quantity));
        }

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get("Cake").unwrap().quantity, 4);
        assert_eq!(cart.get("Tart").unwrap().quantity, 4);
    }

    #[test]
    fn add_with_zero_quantity_purges_line() {
        // Scenario: cart=[{Cake,2}], add("Cake", 0) → cart=[]
        let cart = add(Cart::new(), cake(2));
        let cart = add(cart, cake(0));

        assert!(cart.is_empty());
        assert!(!cart.contains("Cake"));
    }

    #[test]
    fn add_with_negative_quantity_purges_line() {
        let cart = add(Cart::new(), cake(2));
        let cart = add(cart, cake(-1));

        assert!(cart.is_empty());
    }

    #[test]
    fn add_with_zero_quantity_on_absent_name_is_noop() {
        let cart = add(Cart::new(), tart(1));
        let cart = add(cart, cake(0));

        assert_eq!(cart.len(), 1);
        assert!(cart.contains("Tart"));
    }

    #[test]
    fn update_moves_item_to_tail() {
        // Observed display-order policy: updating a line re-appends it.
        let cart = add(Cart::new(), cake(1));
        let cart = add(cart, tart(1));
        let cart = add(cart, cake(3));

        let names: Vec<&str> = cart.items().iter().map(|line| line.name.as_str()).collect();
        assert_eq!(names, vec!["Tart", "Cake"]);
    }

    #[test]
    fn remove_deletes_matching_line() {
        // Scenario: [{Cake,2},{Tart,1}] − remove("Cake") → [{Tart,1}]
        let cart = add(Cart::new(), cake(2));
        let cart = add(cart, tart(1));

        let cart = reduce(cart, CartIntent::Remove { name: "Cake".to_string() });

        assert_eq!(cart.len(), 1);
        assert!(!cart.contains("Cake"));
        assert_eq!(cart.get("Tart").unwrap().line_total.cents(), 500);
    }

    #[test]
    fn remove_absent_name_is_noop() {
        let cart = add(Cart::new(), tart(1));
        let before = cart.clone();

        let cart = reduce(cart, CartIntent::Remove { name: "Croissant".to_string() });

        assert_eq!(cart, before);
    }

    #[test]
    fn reset_empties_any_cart_and_is_idempotent() {
        let cart = add(Cart::new(), cake(2));
        let cart = add(cart, tart(4));

        let once = reduce(cart, CartIntent::Reset);
        assert!(once.is_empty());

        let twice = reduce(once.clone(), CartIntent::Reset);
        assert_eq!(once, twice);
    }

    #[test]
    fn total_quantity_counts_across_lines() {
        let cart = add(Cart::new(), cake(2));
        let cart = add(cart, tart(3));

        assert_eq!(cart.total_quantity(), 5);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn from_catalog_freezes_price_and_thumbnail() {
        let item = CatalogItem {
            name: "Pistachio Baklava".to_string(),
            category: "Baklava".to_string(),
            price: Money::from_cents(400),
            image: ImageSet {
                thumbnail: "images/baklava-thumb.jpg".to_string(),
                mobile: "images/baklava-mobile.jpg".to_string(),
                tablet: "images/baklava-tablet.jpg".to_string(),
                desktop: "images/baklava-desktop.jpg".to_string(),
            },
        };

        let line = LineItem::from_catalog(&item, 3);

        assert_eq!(line.name, "Pistachio Baklava");
        assert_eq!(line.unit_price.cents(), 400);
        assert_eq!(line.line_total.cents(), 1200);
        assert_eq!(line.thumbnail, "images/baklava-thumb.jpg");
    }

    #[test]
    fn intent_serialization_shape() {
        let intent = CartIntent::Remove { name: "Cake".to_string() };
        let json = serde_json::to_string(&intent).unwrap();
        assert_eq!(json, r#"{"kind":"remove","name":"Cake"}"#);

        let round: CartIntent = serde_json::from_str(&json).unwrap();
        assert_eq!(round, intent);
    }
}
