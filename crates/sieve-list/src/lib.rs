//! The **sieve** list controller and its building blocks.
//!
//! [`ListController`] implements [`sieve_core::Component`], so a host embeds
//! it in its own [`sieve_core::Model`] and routes [`Message`]s to it. The
//! controller keeps a sorted copy of the host's collection, applies a
//! debounced fuzzy filter, pins the externally selected item, and exposes one
//! page of the result at a time.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`controller`] | The list controller component |
//! | [`order`] | Case-insensitive ordering by identifier |
//! | [`fuzzy`] | Subsequence fuzzy matching |
//! | [`pin`] | Keeping the current item in a derived list |
//! | [`paginator`] | Page windows, availability, and range labels |
//! | [`task`] | Debounced tasks with drop or restart policies |
//! | [`rename`] | Name validation and rename failure handling |
//!
//! # Utilities
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | [`ListConfig`] and its defaults |
//! | [`item`] | The [`Item`] trait and [`NamedItem`] |

pub mod config;
pub mod controller;
pub mod fuzzy;
pub mod item;
pub mod order;
pub mod paginator;
pub mod pin;
pub mod rename;
pub mod task;

pub use config::ListConfig;
pub use controller::{ListController, Message};
pub use item::{Item, NamedItem};
pub use rename::{NameError, Notifier, RenameError};
pub use task::{DebouncedTask, TaskPolicy, TaskState, Ticket};
