//! Headless runtime for the **sieve** list controller.
//!
//! `sieve-core` provides the traits, types, and message loop that the list
//! controller and its host are built on. The design follows the
//! [Elm Architecture]: state lives in a model, every change arrives as a
//! message, and side effects (timers, async work, shutdown) are pushed to the
//! edges through [`Command`]s.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application trait (init / update) |
//! | [`Component`] | Reusable sub-model embedded by a parent |
//! | [`Command`] | Describes a side effect to be executed by the runtime |
//! | [`Program`] | Owns a [`Model`] and drives its update loop on tokio |
//! | [`TestProgram`](testing::TestProgram) | Deterministic harness for unit-testing a [`Model`] |
//!
//! # Concurrency
//!
//! Updates never run concurrently: the [`Program`] processes one message at
//! a time on the task that awaits [`Program::run`]. Timers created with
//! [`Command::tick`] run on the tokio runtime and only *report back* as
//! messages, so a model can invalidate a stale timer simply by ignoring its
//! message when it arrives.
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod model;
pub mod runtime;
pub mod testing;

pub use command::Command;
pub use component::Component;
pub use model::Model;
pub use runtime::{Program, ProgramError, ProgramHandle, ProgramOptions};

/// Run a sieve application with default options.
pub async fn run<M: Model>(flags: M::Flags) -> Result<M, ProgramError> {
    Program::<M>::new(flags).run().await
}

/// Run with custom options.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options).run().await
}
