//! # Pawbond Core Library
//!
//! A shared virtual-pet state engine for two linked users.
//!
//! Two users form a [`Pairing`] that jointly owns one [`Pet`] with three
//! bounded stats (satiety, affection, hygiene), experience and levels.
//! Either partner mutates the pet through a small set of actions; an
//! independent background sweep applies time-proportional stat decay while
//! the pet is left alone; a pure mood projection classifies the current
//! stats for presentation.
//!
//! The engine is transport-agnostic: chat platforms, button layouts and
//! message templates live in the embedding application, which drives
//! [`PetService`] and receives outbound [`notify::PetEvent`]s through a
//! [`notify::NotificationSink`] it supplies.
//!
//! ## Consistency contract
//!
//! - Stats are always in [0,100]; XP is always in `[0, threshold)` after an
//!   action resolves.
//! - All pet mutation flows through [`store::PetStore::mutate`], which
//!   serialises concurrent writers per pairing — a user action and a decay
//!   sweep on the same pet never interleave partially.
//! - The action cooldown check and the mutation are one atomic step.
//! - A pairing and its pet are created and deleted together.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod config;
pub mod decay;
pub mod error;
pub mod mood;
pub mod notify;
pub mod pet;
pub mod scheduler;
pub mod service;
pub mod store;
pub mod types;

pub use action::{Action, ActionReceipt};
pub use config::PawbondConfig;
pub use error::{PawbondError, Result};
pub use mood::Mood;
pub use pet::Pet;
pub use scheduler::DecayScheduler;
pub use service::PetService;
pub use store::PetStore;
pub use types::{PairKey, Pairing, UserId};
