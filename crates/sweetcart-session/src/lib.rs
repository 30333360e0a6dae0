//! # sweetcart-session: Session State for Sweetcart
//!
//! Everything in this crate lives for exactly one browsing session: it is
//! constructed once before first render and torn down when the page unloads.
//! Nothing here persists across reloads.
//!
//! ## Module Organization
//! ```text
//! sweetcart_session/
//! ├── lib.rs          ◄─── You are here (exports)
//! ├── store.rs        ◄─── SessionStore: cart slot + confirmation flag,
//! │                        dispatch/subscribe over the pure reducer
//! └── lifecycle.rs    ◄─── ConfirmationLifecycle: Idle/Confirmed/Closing,
//!                          close-delay timer, scroll-lock effects
//! ```
//!
//! ## Event Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One User Interaction                                 │
//! │                                                                         │
//! │  click/keypress                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.dispatch(intent) ──► reduce(cart, intent) ──► new cart stored   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  watch channel publishes StoreSnapshot                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subscribed views re-render from the snapshot                           │
//! │                                                                         │
//! │  The ONLY asynchronous element in the whole crate is the 400ms         │
//! │  close-delay task owned by ConfirmationLifecycle.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No Hidden Globals
//! There is no process-wide singleton: the host constructs one
//! [`SessionStore`] and one [`ConfirmationLifecycle`] at session start and
//! passes them (by `Arc`) to every consumer.

pub mod lifecycle;
pub mod store;

pub use lifecycle::{
    ConfirmationLifecycle, LifecycleConfig, ModalEffects, ModalPhase, NoOpEffects,
};
pub use store::{SessionStore, StoreSnapshot};
