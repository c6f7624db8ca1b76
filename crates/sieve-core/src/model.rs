use crate::command::Command;

/// The top-level application trait, following the [Elm Architecture].
///
/// The runtime drives a continuous **init -> update** cycle:
///
/// 1. [`init`](Model::init) creates the initial state and may return a
///    [`Command`] for early side effects.
/// 2. Messages arrive from commands (immediate, async, or timers) and from
///    [`ProgramHandle::send`](crate::ProgramHandle::send).
/// 3. [`update`](Model::update) processes each message, mutates state, and
///    optionally returns a [`Command`] for further work.
/// 4. Step 3 repeats until a [`Command::quit`] is returned.
///
/// # Example
///
/// ```rust,ignore
/// use sieve_core::{Model, Command};
///
/// struct Counter {
///     count: i32,
/// }
///
/// #[derive(Debug)]
/// enum Msg {
///     Increment,
///     Done,
/// }
///
/// impl Model for Counter {
///     type Message = Msg;
///     type Flags = ();
///
///     fn init(_flags: ()) -> (Self, Command<Msg>) {
///         (Counter { count: 0 }, Command::none())
///     }
///
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         match msg {
///             Msg::Increment => self.count += 1,
///             Msg::Done => return Command::quit(),
///         }
///         Command::none()
///     }
/// }
/// ```
///
/// [Elm Architecture]: https://guide.elm-lang.org/architecture/
pub trait Model: Sized + Send + 'static {
    /// The application's message type.
    type Message: Send + 'static;

    /// Initialization data passed to [`Model::init`].
    ///
    /// Use `()` when no startup data is needed.
    type Flags: Send + 'static;

    /// Create the initial model state and an optional startup command.
    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    /// Process a message, mutate state, and return a command for side effects.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;
}
