//! # Session Store
//!
//! Holds the one cart and the one order-confirmation flag for the lifetime
//! of a browsing session.
//!
//! ## Thread Safety
//! The state slot is guarded by a `Mutex`:
//! 1. Dispatch and reads may arrive from any task
//! 2. Only one intent may transition the cart at a time
//! 3. Holding the lock across the snapshot publish keeps subscriber
//!    snapshots in dispatch order
//!
//! ## Ordering Guarantee
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  dispatch(A); dispatch(B); dispatch(C);                                 │
//! │                                                                         │
//! │  reduce runs A, then B, then C - no reordering, no batching across     │
//! │  unrelated intents. Subscribers observe the LATEST snapshot (watch     │
//! │  semantics): views render current state, they do not replay a log.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use sweetcart_core::cart::{reduce, Cart, CartIntent};
use sweetcart_core::totals::OrderSummary;

// =============================================================================
// Store Snapshot
// =============================================================================

/// What presentation collaborators observe: the cart plus the
/// order-confirmation flag, captured atomically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StoreSnapshot {
    /// Current cart contents.
    pub cart: Cart,

    /// Whether the confirmation overlay is conceptually open.
    /// Stays `true` through the whole modal superstate (Confirmed AND
    /// Closing) and flips back only after the close delay elapses.
    pub order_confirmed: bool,
}

// =============================================================================
// Session Store
// =============================================================================

/// Session-lifetime holder for cart state and the confirmation flag.
///
/// Constructed once at session start with an empty cart; dropped when the
/// session ends. There is no persistence across reloads - a fresh page gets
/// a fresh store.
///
/// ## Mutation Paths
/// - [`dispatch`](SessionStore::dispatch) - the only way to change the cart
/// - [`set_order_confirmed`](SessionStore::set_order_confirmed) - flag
///   writes; in practice only the confirmation lifecycle calls this
///
/// Everything else is a read-only snapshot.
#[derive(Debug)]
pub struct SessionStore {
    /// Session identity for log correlation.
    session_id: Uuid,

    /// When this browsing session started.
    started_at: DateTime<Utc>,

    /// Single source of truth, single writer under the lock.
    state: Mutex<StoreSnapshot>,

    /// Broadcasts the latest snapshot to subscribed views.
    snapshot_tx: watch::Sender<StoreSnapshot>,
}

impl SessionStore {
    /// Creates a store with an empty cart and the flag down.
    pub fn new() -> Self {
        let session_id = Uuid::new_v4();
        let initial = StoreSnapshot::default();
        let (snapshot_tx, _) = watch::channel(initial.clone());

        info!(%session_id, "session store initialized");

        SessionStore {
            session_id,
            started_at: Utc::now(),
            state: Mutex::new(initial),
            snapshot_tx,
        }
    }

    /// Session identity for log correlation.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// When this browsing session started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Returns a snapshot of the current cart.
    pub fn cart(&self) -> Cart {
        self.state.lock().expect("store mutex poisoned").cart.clone()
    }

    /// Routes an intent through the pure reducer and notifies subscribers.
    ///
    /// ## Contract
    /// Total, like the reducer underneath: no intent can fail, malformed
    /// requests degrade to no-ops inside `reduce`. Intents dispatched in
    /// sequence are applied in that same sequence.
    pub fn dispatch(&self, intent: CartIntent) {
        let mut state = self.state.lock().expect("store mutex poisoned");

        debug!(session_id = %self.session_id, ?intent, "dispatch");

        let cart = std::mem::take(&mut state.cart);
        state.cart = reduce(cart, intent);

        // Publish while still holding the lock so snapshots leave in
        // dispatch order.
        self.snapshot_tx.send_replace(state.clone());
    }

    /// Current value of the order-confirmation flag.
    pub fn order_confirmed(&self) -> bool {
        self.state.lock().expect("store mutex poisoned").order_confirmed
    }

    /// Sets the order-confirmation flag.
    ///
    /// The confirmation lifecycle is the only in-tree caller; the method is
    /// part of the store contract so hosts can wire their own lifecycle if
    /// they need to.
    pub fn set_order_confirmed(&self, confirmed: bool) {
        let mut state = self.state.lock().expect("store mutex poisoned");

        debug!(session_id = %self.session_id, confirmed, "set order confirmation");

        state.order_confirmed = confirmed;
        self.snapshot_tx.send_replace(state.clone());
    }

    /// Subscribes to snapshot updates.
    ///
    /// Views hold the receiver and re-render whenever it changes; the
    /// receiver always yields the latest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Derives the order summary (line count, quantity, total) live from
    /// the current cart.
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::from(&self.state.lock().expect("store mutex poisoned").cart)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SessionStore {
    /// The session ends with the page; nothing is persisted.
    fn drop(&mut self) {
        info!(session_id = %self.session_id, "session store dropped");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
