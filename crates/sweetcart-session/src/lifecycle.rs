//! # Order-Confirmation Lifecycle
//!
//! Coordinates the confirmation flag with the cart reset, including the
//! timed visual-exit window before state is cleared.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Confirmation Lifecycle                                  │
//! │                                                                         │
//! │            confirm()                reset()                             │
//! │  ┌──────┐ ──────────► ┌───────────┐ ──────► ┌─────────┐                │
//! │  │ Idle │             │ Confirmed │         │ Closing │                │
//! │  └──────┘ ◄────────── └───────────┘         └─────────┘                │
//! │      ▲                                            │                     │
//! │      └────────── after close delay (400ms) ───────┘                     │
//! │                  • flag ← false                                         │
//! │                  • dispatch Reset                                       │
//! │                  • phase ← Idle (open animation restored)               │
//! │                                                                         │
//! │  MODAL SUPERSTATE (Confirmed + Closing):                               │
//! │  • scroll_lock() fired on entry, scroll_unlock() on exit               │
//! │  • the flag the rest of the UI reads stays true throughout             │
//! │                                                                         │
//! │  reset() during Closing: idempotent no-op - no second timer, no        │
//! │  shortened delay, no double-clear.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why the Delay?
//! The overlay animates out for 400ms. Clearing the cart the instant the
//! button is pressed would blank the modal contents mid-slide, so the clear
//! is scheduled after the animation window. The scheduled task is owned by
//! this lifecycle and aborted on drop - it can never fire into a torn-down
//! session.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::debug;
use ts_rs::TS;

use sweetcart_core::cart::CartIntent;

use crate::store::SessionStore;

// =============================================================================
// Modal Phase
// =============================================================================

/// Where the confirmation overlay is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ModalPhase {
    /// Browsing. No overlay.
    #[default]
    Idle,

    /// Overlay visible, slide-in animation state.
    Confirmed,

    /// Overlay animating out; the confirmation flag is still up and the
    /// clear has been scheduled but has not fired.
    Closing,
}

// =============================================================================
// Boundary Effects
// =============================================================================

/// Boundary signals fired on entering/leaving the modal superstate.
///
/// The page-level collaborator uses these to suppress and restore host
/// scrolling while the overlay is up. The lifecycle only emits the signal;
/// it never touches the page itself.
pub trait ModalEffects: Send + Sync {
    /// The overlay just opened; the host should lock page scrolling.
    fn scroll_lock(&self);

    /// The overlay finished closing; the host should unlock scrolling.
    fn scroll_unlock(&self);
}

/// No-op effects for tests and headless use.
pub struct NoOpEffects;

impl ModalEffects for NoOpEffects {
    fn scroll_lock(&self) {}
    fn scroll_unlock(&self) {}
}

// =============================================================================
// Configuration
// =============================================================================

/// Lifecycle tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// How long the overlay's exit animation runs before state is cleared
    /// (milliseconds).
    #[serde(default = "default_close_delay_ms")]
    pub close_delay_ms: u64,
}

fn default_close_delay_ms() -> u64 {
    400
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        LifecycleConfig {
            close_delay_ms: default_close_delay_ms(),
        }
    }
}

impl LifecycleConfig {
    /// The close delay as a `Duration`.
    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }
}

// =============================================================================
// Confirmation Lifecycle
// =============================================================================

/// Shared internals so the scheduled close task can finish the transition
/// after the public handle has moved on.
struct LifecycleInner {
    store: Arc<SessionStore>,
    effects: Arc<dyn ModalEffects>,
    close_delay: Duration,
    phase: Mutex<ModalPhase>,
    pending_close: Mutex<Option<JoinHandle<()>>>,
}

impl LifecycleInner {
    /// Runs the delayed half of `reset()`: clear the flag, reset the cart,
    /// restore the open-animation state, release the scroll lock.
    fn finish_close(&self) {
        self.store.set_order_confirmed(false);
        self.store.dispatch(CartIntent::Reset);
        *self.phase.lock().expect("lifecycle mutex poisoned") = ModalPhase::Idle;
        self.pending_close
            .lock()
            .expect("lifecycle mutex poisoned")
            .take();
        self.effects.scroll_unlock();

        debug!(session_id = %self.store.session_id(), "confirmation closed, cart reset");
    }
}

/// The order-confirmation state machine.
///
/// One per session, owning the one scheduled timer in the system. Dropping
/// the lifecycle aborts any pending close so the delayed transition cannot
/// fire on a destroyed store.
///
/// ## Live Totals
/// Nothing is captured at confirmation time: the overlay derives its totals
/// from the store on every read, so if the cart changed after `confirm()`
/// the overlay would reflect the latest state. Confirm freezes the display
/// only by covering the page with the modal, not by caching data.
pub struct ConfirmationLifecycle {
    inner: Arc<LifecycleInner>,
}

impl ConfirmationLifecycle {
    /// Creates a lifecycle with the default 400ms close delay.
    pub fn new(store: Arc<SessionStore>, effects: Arc<dyn ModalEffects>) -> Self {
        Self::with_config(store, effects, LifecycleConfig::default())
    }

    /// Creates a lifecycle with explicit configuration.
    pub fn with_config(
        store: Arc<SessionStore>,
        effects: Arc<dyn ModalEffects>,
        config: LifecycleConfig,
    ) -> Self {
        ConfirmationLifecycle {
            inner: Arc::new(LifecycleInner {
                store,
                effects,
                close_delay: config.close_delay(),
                phase: Mutex::new(ModalPhase::Idle),
                pending_close: Mutex::new(None),
            }),
        }
    }

    /// Current phase of the overlay.
    pub fn phase(&self) -> ModalPhase {
        *self.inner.phase.lock().expect("lifecycle mutex poisoned")
    }

    /// Whether the overlay is in the modal superstate (Confirmed or
    /// Closing) - the window during which host scrolling is suppressed.
    pub fn modal_open(&self) -> bool {
        self.phase() != ModalPhase::Idle
    }

    /// Confirms the order: `Idle → Confirmed`.
    ///
    /// Raises the store flag and fires `scroll_lock`. Confirming an empty
    /// cart is allowed - whether that should be possible is a business rule
    /// for the caller, not this machine. No-op outside `Idle`.
    pub fn confirm(&self) {
        {
            let mut phase = self.inner.phase.lock().expect("lifecycle mutex poisoned");
            if *phase != ModalPhase::Idle {
                debug!(current = ?*phase, "confirm ignored");
                return;
            }
            *phase = ModalPhase::Confirmed;
        }

        self.inner.store.set_order_confirmed(true);
        self.inner.effects.scroll_lock();

        debug!(session_id = %self.inner.store.session_id(), "order confirmed");
    }

    /// Starts a new order: `Confirmed → Closing`, then `Idle` after the
    /// close delay.
    ///
    /// The transition is scheduled, never immediate: the flag clears, the
    /// cart resets, and the open-animation state is restored only once the
    /// delay elapses. Calling `reset()` again while `Closing` is a no-op -
    /// one timer, one clear. No-op in `Idle`.
    ///
    /// Must be called from within a Tokio runtime (the close task is
    /// spawned on it).
    pub fn reset(&self) {
        {
            let mut phase = self.inner.phase.lock().expect("lifecycle mutex poisoned");
            match *phase {
                ModalPhase::Confirmed => *phase = ModalPhase::Closing,
                ModalPhase::Closing => {
                    debug!("reset ignored: close already pending");
                    return;
                }
                ModalPhase::Idle => {
                    debug!("reset ignored: nothing confirmed");
                    return;
                }
            }
        }

        debug!(
            session_id = %self.inner.store.session_id(),
            delay_ms = self.inner.close_delay.as_millis() as u64,
            "closing confirmation overlay"
        );

        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(inner.close_delay).await;
            inner.finish_close();
        });

        *self
            .inner
            .pending_close
            .lock()
            .expect("lifecycle mutex poisoned") = Some(handle);
    }
}

impl Drop for ConfirmationLifecycle {
    /// Cancels any pending close: the delayed transition must never fire
    /// into a store that outlived its lifecycle, or after teardown.
    fn drop(&mut self) {
        if let Some(handle) = self
            .inner
            .pending_close
            .lock()
            .expect("lifecycle mutex poisoned")
            .take()
        {
            handle.abort();
            debug!("pending confirmation close cancelled");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use sweetcart_core::cart::LineItem;
    use sweetcart_core::money::Money;
    use tokio::time::advance;

    /// Counts boundary-effect firings so tests can assert exactly-once
    /// behavior.
    struct RecordingEffects {
        locks: AtomicUsize,
        unlocks: AtomicUsize,
    }

    impl RecordingEffects {
        fn new() -> Arc<Self> {
            Arc::new(RecordingEffects {
                locks: AtomicUsize::new(0),
                unlocks: AtomicUsize::new(0),
            })
        }

        fn locks(&self) -> usize {
            self.locks.load(Ordering::SeqCst)
        }

        fn unlocks(&self) -> usize {
            self.unlocks.load(Ordering::SeqCst)
        }
    }

    impl ModalEffects for RecordingEffects {
        fn scroll_lock(&self) {
            self.locks.fetch_add(1, Ordering::SeqCst);
        }

        fn scroll_unlock(&self) {
            self.unlocks.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn store_with_cake() -> Arc<SessionStore> {
        let store = Arc::new(SessionStore::new());
        store.dispatch(CartIntent::AddOrUpdate {
            item: LineItem::new("Cake", 2, Money::from_cents(450), "thumb.jpg"),
        });
        store
    }

    /// Lets the scheduled close task run after the clock moved.
    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn confirm_raises_flag_and_locks_scroll() {
        let store = store_with_cake();
        let effects = RecordingEffects::new();
        let lifecycle = ConfirmationLifecycle::new(Arc::clone(&store), effects.clone());

        lifecycle.confirm();

        assert_eq!(lifecycle.phase(), ModalPhase::Confirmed);
        assert!(lifecycle.modal_open());
        assert!(store.order_confirmed());
        assert_eq!(effects.locks(), 1);
        assert_eq!(effects.unlocks(), 0);
    }

    #[tokio::test]
    async fn confirm_twice_is_noop() {
        let store = store_with_cake();
        let effects = RecordingEffects::new();
        let lifecycle = ConfirmationLifecycle::new(Arc::clone(&store), effects.clone());

        lifecycle.confirm();
        lifecycle.confirm();

        assert_eq!(effects.locks(), 1);
    }

    #[tokio::test]
    async fn empty_cart_may_be_confirmed() {
        let store = Arc::new(SessionStore::new());
        let lifecycle = ConfirmationLifecycle::new(Arc::clone(&store), Arc::new(NoOpEffects));

        lifecycle.confirm();

        assert!(store.order_confirmed());
    }

    #[tokio::test]
    async fn reset_in_idle_is_noop() {
        let store = store_with_cake();
        let lifecycle = ConfirmationLifecycle::new(Arc::clone(&store), Arc::new(NoOpEffects));

        lifecycle.reset();

        assert_eq!(lifecycle.phase(), ModalPhase::Idle);
        assert!(!store.cart().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn reset_clears_nothing_until_the_delay_elapses() {
        let store = store_with_cake();
        let effects = RecordingEffects::new();
        let lifecycle = ConfirmationLifecycle::new(Arc::clone(&store), effects.clone());

        lifecycle.confirm();
        lifecycle.reset();
        // Let the scheduled close task register its timer before the clock
        // is advanced, so the deadline anchors at reset() time.
        settle().await;

        // Scheduled but not fired: the overlay is animating out
        assert_eq!(lifecycle.phase(), ModalPhase::Closing);
        assert!(store.order_confirmed());
        assert!(!store.cart().is_empty());

        // One millisecond short of the window: still nothing
        advance(Duration::from_millis(399)).await;
        settle().await;
        assert!(store.order_confirmed());
        assert!(!store.cart().is_empty());
        assert_eq!(effects.unlocks(), 0);

        // Past the window: flag down, cart empty, scroll released
        advance(Duration::from_millis(2)).await;
        settle().await;
        assert!(!store.order_confirmed());
        assert!(store.cart().is_empty());
        assert_eq!(lifecycle.phase(), ModalPhase::Idle);
        assert_eq!(effects.unlocks(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn second_reset_does_not_reschedule_or_double_clear() {
        let store = store_with_cake();
        let effects = RecordingEffects::new();
        let lifecycle = ConfirmationLifecycle::new(Arc::clone(&store), effects.clone());

        lifecycle.confirm();
        lifecycle.reset();
        // Let the scheduled close task register its timer before the clock
        // is advanced, so the deadline anchors at reset() time.
        settle().await;

        // Halfway through the window a second press lands on the button
        advance(Duration::from_millis(200)).await;
        settle().await;
        lifecycle.reset();

        // The original deadline still applies: 200ms later we are done.
        // A rescheduled timer would still be pending here.
        advance(Duration::from_millis(201)).await;
        settle().await;

        assert!(!store.order_confirmed());
        assert!(store.cart().is_empty());
        assert_eq!(effects.unlocks(), 1);

        // And nothing else ever fires
        advance(Duration::from_millis(1000)).await;
        settle().await;
        assert_eq!(effects.unlocks(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_lifecycle_cancels_the_pending_close() {
        let store = store_with_cake();
        let effects = RecordingEffects::new();
        let lifecycle = ConfirmationLifecycle::new(Arc::clone(&store), effects.clone());

        lifecycle.confirm();
        lifecycle.reset();
        drop(lifecycle);

        advance(Duration::from_millis(1000)).await;
        settle().await;

        // The delayed transition never fired on the outliving store
        assert!(store.order_confirmed());
        assert!(!store.cart().is_empty());
        assert_eq!(effects.unlocks(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn confirm_reset_cycle_repeats_within_a_session() {
        let store = store_with_cake();
        let effects = RecordingEffects::new();
        let lifecycle = ConfirmationLifecycle::new(Arc::clone(&store), effects.clone());

        lifecycle.confirm();
        lifecycle.reset();
        // Let the scheduled close task register its timer before the clock
        // is advanced, so the deadline anchors at reset() time.
        settle().await;
        advance(Duration::from_millis(401)).await;
        settle().await;

        // Shopper fills a fresh cart and confirms again
        store.dispatch(CartIntent::AddOrUpdate {
            item: LineItem::new("Tart", 1, Money::from_cents(500), "tart.jpg"),
        });
        lifecycle.confirm();

        assert_eq!(lifecycle.phase(), ModalPhase::Confirmed);
        assert!(store.order_confirmed());
        assert_eq!(effects.locks(), 2);
        assert_eq!(effects.unlocks(), 1);
    }

    #[tokio::test]
    async fn totals_stay_live_while_the_modal_is_open() {
        let store = store_with_cake();
        let lifecycle = ConfirmationLifecycle::new(Arc::clone(&store), Arc::new(NoOpEffects));

        lifecycle.confirm();
        assert_eq!(store.summary().total.cents(), 900);

        // Confirm freezes the display via the overlay, not the data: a cart
        // change after confirmation is reflected in the derived totals.
        store.dispatch(CartIntent::AddOrUpdate {
            item: LineItem::new("Tart", 1, Money::from_cents(500), "tart.jpg"),
        });

        assert_eq!(store.summary().total.cents(), 1400);
        assert!(store.order_confirmed());
    }
}
