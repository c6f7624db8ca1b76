use crate::command::{Action, Command, CommandInner};
use crate::model::Model;
use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use std::time::Duration;

/// A headless test harness that drives a [`Model`] without the [`Program`](crate::Program) loop.
///
/// Synchronous commands (e.g. [`Command::message`]) are queued and flushed
/// with [`drain_messages`](TestProgram::drain_messages). Async commands
/// (including [`Command::tick`] timers) are held as in-flight futures; they
/// only make progress inside [`advance`](TestProgram::advance) or
/// [`settle`](TestProgram::settle), which makes timer-driven behavior
/// deterministic under tokio's paused clock:
///
/// ```rust,ignore
/// #[tokio::test(start_paused = true)]
/// async fn debounced() {
///     let mut prog = TestProgram::<Host>::new(());
///     prog.send(HostMsg::Search("ab".into()));
///     prog.advance(Duration::from_millis(799)).await;
///     assert!(prog.model().list.is_filtering());
///     prog.settle().await;
///     assert!(!prog.model().list.is_filtering());
/// }
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending_messages: Vec<M::Message>,
    in_flight: FuturesUnordered<BoxFuture<'static, M::Message>>,
    quit: bool,
}

impl<M: Model> TestProgram<M> {
    /// Create a test program by calling [`Model::init`] with the given flags.
    ///
    /// Any synchronous commands produced by `init` are collected into the
    /// pending-message queue.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending_messages: Vec::new(),
            in_flight: FuturesUnordered::new(),
            quit: false,
        };
        program.collect(init_cmd);
        program
    }

    /// Send a message, triggering a single update cycle.
    ///
    /// Synchronous follow-ups are enqueued; call
    /// [`drain_messages`](TestProgram::drain_messages) to flush them.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect(cmd);
    }

    /// Process all pending synchronous messages produced by [`Command::message`].
    ///
    /// Repeats until no new synchronous messages are generated.
    pub fn drain_messages(&mut self) {
        while !self.pending_messages.is_empty() {
            let messages: Vec<_> = self.pending_messages.drain(..).collect();
            for msg in messages {
                let cmd = self.model.update(msg);
                self.collect(cmd);
            }
        }
    }

    /// Let `duration` of (tokio) time pass, delivering every in-flight
    /// message that becomes ready before the deadline.
    ///
    /// Messages that are ready at the deadline itself are delivered too.
    pub async fn advance(&mut self, duration: Duration) {
        let deadline = tokio::time::Instant::now() + duration;
        let sleep = tokio::time::sleep_until(deadline);
        tokio::pin!(sleep);

        self.drain_messages();
        loop {
            if self.in_flight.is_empty() {
                (&mut sleep).await;
                break;
            }
            tokio::select! {
                biased;

                Some(msg) = self.in_flight.next() => {
                    self.send(msg);
                    self.drain_messages();
                }
                _ = &mut sleep => break,
            }
        }
        self.drain_in_flight_ready().await;
    }

    /// Run until no async work remains, delivering each result as it completes.
    pub async fn settle(&mut self) {
        self.drain_messages();
        while let Some(msg) = self.in_flight.next().await {
            self.send(msg);
            self.drain_messages();
        }
    }

    /// Number of async commands still in flight.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Whether the model has returned [`Command::quit`].
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Get a shared reference to the model for assertions.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model for direct test setup.
    ///
    /// This bypasses the normal message-driven update cycle.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Deliver futures that are already complete without letting time pass.
    async fn drain_in_flight_ready(&mut self) {
        loop {
            let ready = futures::future::poll_fn(|cx| {
                std::task::Poll::Ready(match self.in_flight.poll_next_unpin(cx) {
                    std::task::Poll::Ready(Some(msg)) => Some(msg),
                    _ => None,
                })
            })
            .await;
            match ready {
                Some(msg) => {
                    self.send(msg);
                    self.drain_messages();
                }
                None => break,
            }
        }
    }

    fn collect(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => {
                self.pending_messages.push(msg);
            }
            CommandInner::Action(Action::Quit) => {
                self.quit = true;
            }
            CommandInner::Future(fut) => {
                self.in_flight.push(fut);
            }
            CommandInner::Batch(cmds) | CommandInner::Sequence(cmds) => {
                for cmd in cmds {
                    self.collect(cmd);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A minimal counter model for testing
    struct Counter {
        count: i64,
    }

    #[derive(Debug)]
    enum CounterMsg {
        Increment,
        Decrement,
        Reset,
        IncrementLater(u64),
        Stop,
    }

    impl Model for Counter {
        type Message = CounterMsg;
        type Flags = i64;

        fn init(initial: i64) -> (Self, Command<CounterMsg>) {
            (Counter { count: initial }, Command::none())
        }

        fn update(&mut self, msg: CounterMsg) -> Command<CounterMsg> {
            match msg {
                CounterMsg::Increment => self.count += 1,
                CounterMsg::Decrement => self.count -= 1,
                CounterMsg::Reset => self.count = 0,
                CounterMsg::IncrementLater(ms) => {
                    return Command::tick(Duration::from_millis(ms), |_| CounterMsg::Increment);
                }
                CounterMsg::Stop => return Command::quit(),
            }
            Command::none()
        }
    }

    #[test]
    fn test_program_init_with_flags() {
        let prog = TestProgram::<Counter>::new(42);
        assert_eq!(prog.model().count, 42);
    }

    #[test]
    fn test_program_send_multiple() {
        let mut prog = TestProgram::<Counter>::new(0);
        prog.send(CounterMsg::Increment);
        prog.send(CounterMsg::Increment);
        prog.send(CounterMsg::Increment);
        prog.send(CounterMsg::Decrement);
        assert_eq!(prog.model().count, 2);
    }

    #[test]
    fn test_program_reset() {
        let mut prog = TestProgram::<Counter>::new(10);
        prog.send(CounterMsg::Increment);
        prog.send(CounterMsg::Reset);
        assert_eq!(prog.model().count, 0);
    }

    #[test]
    fn test_program_records_quit() {
        let mut prog = TestProgram::<Counter>::new(0);
        assert!(!prog.quit_requested());
        prog.send(CounterMsg::Stop);
        assert!(prog.quit_requested());
    }

    #[tokio::test(start_paused = true)]
    async fn advance_stops_short_of_later_timers() {
        let mut prog = TestProgram::<Counter>::new(0);
        prog.send(CounterMsg::IncrementLater(100));
        prog.send(CounterMsg::IncrementLater(300));
        assert_eq!(prog.in_flight(), 2);

        prog.advance(Duration::from_millis(99)).await;
        assert_eq!(prog.model().count, 0);

        prog.advance(Duration::from_millis(1)).await;
        assert_eq!(prog.model().count, 1);
        assert_eq!(prog.in_flight(), 1);

        prog.settle().await;
        assert_eq!(prog.model().count, 2);
        assert_eq!(prog.in_flight(), 0);
    }

    // A model that uses Command::message for chaining
    struct ChainModel {
        steps: Vec<String>,
    }

    #[derive(Debug)]
    enum ChainMsg {
        Start,
        Step(String),
    }

    impl Model for ChainModel {
        type Message = ChainMsg;
        type Flags = ();

        fn init(_: ()) -> (Self, Command<ChainMsg>) {
            (ChainModel { steps: vec![] }, Command::none())
        }

        fn update(&mut self, msg: ChainMsg) -> Command<ChainMsg> {
            match msg {
                ChainMsg::Start => {
                    self.steps.push("started".into());
                    Command::message(ChainMsg::Step("auto".into()))
                }
                ChainMsg::Step(s) => {
                    self.steps.push(s);
                    Command::none()
                }
            }
        }
    }

    #[test]
    fn test_command_message_chaining() {
        let mut prog = TestProgram::<ChainModel>::new(());
        prog.send(ChainMsg::Start);
        prog.drain_messages();
        assert_eq!(prog.model().steps, vec!["started", "auto"]);
    }
}
