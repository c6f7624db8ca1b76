//! **sieve** -- a sorted, fuzzy-filtered, paginated list controller.
//!
//! This is the umbrella crate that re-exports everything a host needs from a
//! single dependency:
//!
//! ```toml
//! [dependencies]
//! sieve = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`sieve_core`] are available at the crate root
//!   ([`Model`], [`Component`], [`Command`], [`Program`], [`run`],
//!   [`run_with`], etc.).
//! * The [`list`] module re-exports everything from [`sieve_list`]
//!   (the controller, its configuration, and the rename helpers).
//! * [`tokio`] is re-exported so hosts do not need to depend on it directly.
//!
//! # Quick start
//!
//! ```ignore
//! use sieve::list::{ListConfig, ListController, Message, NamedItem};
//! use sieve::{Command, Component, Model};
//! use std::sync::Arc;
//!
//! struct Host {
//!     list: ListController<NamedItem>,
//! }
//!
//! enum Msg {
//!     List(Message<NamedItem>),
//! }
//!
//! impl Model for Host {
//!     type Message = Msg;
//!     type Flags = Vec<Arc<NamedItem>>;
//!
//!     fn init(items: Vec<Arc<NamedItem>>) -> (Self, Command<Msg>) {
//!         let list = ListController::with_items(ListConfig::default(), items);
//!         (Host { list }, Command::none())
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Command<Msg> {
//!         match msg {
//!             Msg::List(m) => self.list.update(m).map(Msg::List),
//!         }
//!     }
//! }
//! ```

pub use sieve_core::*;
pub mod list {
    pub use sieve_list::*;
}

// Re-export dependencies for use in demos and downstream crates
pub use tokio;
