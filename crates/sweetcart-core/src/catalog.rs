//! # Catalog Module
//!
//! The read-only product catalog shown on the storefront page.
//!
//! ## Catalog Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Lifecycle                                  │
//! │                                                                         │
//! │  data.json (static asset)                                              │
//! │       │                                                                 │
//! │       ▼  loaded ONCE, before first render                              │
//! │  Catalog::from_json(...)                                               │
//! │       │   • parse document                                             │
//! │       │   • freeze decimal prices to integer cents                     │
//! │       │   • reject duplicate names (names key the cart)                │
//! │       ▼                                                                 │
//! │  Catalog (immutable for the process lifetime)                          │
//! │       │                                                                 │
//! │       ├──► Product grid renders name/category/price/images             │
//! │       └──► LineItem::from_catalog freezes price at add-to-cart time    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The core never reads files or the network itself: the host hands it the
//! document contents. The core only parses and validates.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CatalogError, CatalogResult};
use crate::money::Money;

// =============================================================================
// Image Set
// =============================================================================

/// Per-breakpoint image references for one product.
///
/// The values are opaque to the core (paths or URLs); the frontend picks
/// the right one for the viewport and the cart keeps only the thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ImageSet {
    /// Small square image used in cart rows and the confirmation list.
    pub thumbnail: String,

    /// Image for narrow viewports.
    pub mobile: String,

    /// Image for medium viewports.
    pub tablet: String,

    /// Image for wide viewports.
    pub desktop: String,
}

// =============================================================================
// Catalog Item
// =============================================================================

/// One purchasable product, immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CatalogItem {
    /// Display name. Unique within the catalog - this is the key cart
    /// line items are matched on.
    pub name: String,

    /// Display category ("Waffle", "Tiramisu", ...).
    pub category: String,

    /// Unit price, frozen to cents at ingestion.
    pub price: Money,

    /// Responsive image references.
    pub image: ImageSet,
}

/// The raw on-disk shape of one product entry.
///
/// Prices in the data file are decimal dollars (`6.5`), so ingestion goes
/// through this intermediate and converts explicitly instead of letting a
/// float leak into [`Money`].
#[derive(Debug, Deserialize)]
struct RawCatalogItem {
    image: ImageSet,
    name: String,
    category: String,
    price: f64,
}

/// Converts a decimal dollar price to cents.
///
/// Returns `None` for values that are not representable as a non-negative
/// amount of cents (negative, NaN, infinite). Sub-cent precision in the
/// source rounds to the nearest cent.
fn cents_from_price(value: f64) -> Option<i64> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some((value * 100.0).round() as i64)
}

// =============================================================================
// Catalog
// =============================================================================

/// The full product catalog, ordered as authored in the data file.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Parses and validates a catalog from the static product JSON.
    ///
    /// ## Example
    /// ```rust
    /// use sweetcart_core::catalog::Catalog;
    ///
    /// let json = r#"[{
    ///     "image": {
    ///         "thumbnail": "images/thumb.jpg",
    ///         "mobile": "images/mobile.jpg",
    ///         "tablet": "images/tablet.jpg",
    ///         "desktop": "images/desktop.jpg"
    ///     },
    ///     "name": "Classic Tiramisu",
    ///     "category": "Tiramisu",
    ///     "price": 5.5
    /// }]"#;
    ///
    /// let catalog = Catalog::from_json(json).unwrap();
    /// assert_eq!(catalog.len(), 1);
    /// assert_eq!(catalog.get("Classic Tiramisu").unwrap().price.cents(), 550);
    /// ```
    ///
    /// ## Errors
    /// - [`CatalogError::Parse`] for malformed JSON
    /// - [`CatalogError::InvalidPrice`] for negative/non-finite prices
    /// - [`CatalogError::DuplicateName`] when two entries share a name
    pub fn from_json(document: &str) -> CatalogResult<Self> {
        let raw: Vec<RawCatalogItem> = serde_json::from_str(document)?;

        let mut items = Vec::with_capacity(raw.len());
        for entry in raw {
            let cents = cents_from_price(entry.price).ok_or(CatalogError::InvalidPrice {
                name: entry.name.clone(),
                value: entry.price,
            })?;

            items.push(CatalogItem {
                name: entry.name,
                category: entry.category,
                price: Money::from_cents(cents),
                image: entry.image,
            });
        }

        Self::from_items(items)
    }

    /// Builds a catalog from already-constructed items.
    ///
    /// Used by hosts that assemble the product list elsewhere. The same
    /// name-uniqueness rule applies.
    pub fn from_items(items: Vec<CatalogItem>) -> CatalogResult<Self> {
        for (index, item) in items.iter().enumerate() {
            if items[..index].iter().any(|other| other.name == item.name) {
                return Err(CatalogError::DuplicateName {
                    name: item.name.clone(),
                });
            }
        }

        Ok(Catalog { items })
    }

    /// Looks up an item by its display name.
    pub fn get(&self, name: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Iterates items in authored order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter()
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
