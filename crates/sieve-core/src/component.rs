use crate::command::Command;

/// A reusable sub-model that owns a slice of application state.
///
/// `Component` is [`Model`](crate::Model) without the `init`/`Flags`
/// ceremony: the parent constructs it directly and routes messages to it.
/// Components never touch shared state on their own; every mutation goes
/// through [`update`](Component::update), which makes the component the single
/// writer of whatever it derives.
///
/// # Composition pattern
///
/// Wrap the component's message type in a variant of the parent message and
/// use [`Command::map`] to translate commands:
///
/// ```rust,ignore
/// use sieve_core::{Model, Component, Command};
///
/// struct Host { list: ListController<NamedItem> }
///
/// enum HostMsg { List(list::Message) }
///
/// impl Model for Host {
///     type Message = HostMsg;
///     type Flags = ();
///
///     fn init(_: ()) -> (Self, Command<HostMsg>) {
///         (Host { list: ListController::new(ListConfig::default()) }, Command::none())
///     }
///
///     fn update(&mut self, msg: HostMsg) -> Command<HostMsg> {
///         match msg {
///             HostMsg::List(m) => self.list.update(m).map(HostMsg::List),
///         }
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    ///
    /// Parent models typically wrap this in one of their own message variants
    /// so that events can be routed to the correct child.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] for side effects.
    ///
    /// The returned command uses the component's own `Message` type; the
    /// parent should call [`.map()`](Command::map) to lift it into the parent
    /// message type.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Whether the component has work pending that will come back as a message.
    ///
    /// Hosts can use this as a busy hint (spinners, disabled controls). The
    /// default implementation returns `false`.
    fn busy(&self) -> bool {
        false
    }
}
