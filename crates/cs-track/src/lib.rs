//! `cs-track` — per-vehicle site association state.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`association`] | `Association` (assigned / unassociated), `Transition`    |
//! | [`tracker`]     | `AssociationTracker`, the vehicle → association store   |
//!
//! # State machine
//!
//! ```text
//!               observe (first)            observe (check step)
//!   UNTRACKED ─────────────────► Assigned(s) ◄──────────────────► Unassociated
//!       ▲                            │                                 │
//!       └────────── remove ──────────┴─────────────────────────────────┘
//! ```
//!
//! Between check steps a tracked vehicle's association never changes.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | Uses `rustc_hash::FxHashMap` for the record map.        |

pub mod association;
pub mod tracker;

#[cfg(test)]
mod tests;

pub use association::{Association, Transition};
pub use tracker::AssociationTracker;
