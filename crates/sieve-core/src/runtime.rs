use crate::command::{Action, Command, CommandInner};
use crate::model::Model;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinSet;
use tracing::{debug, trace};

/// Errors that can occur while running a [`Program`].
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// Installing the ctrl-c handler failed.
    #[error("signal handler error: {0}")]
    Signal(#[from] std::io::Error),
}

/// Configuration options for a [`Program`].
///
/// All fields have sensible defaults (see [`Default`] impl). Use struct
/// update syntax to override only the options you need:
///
/// ```rust,ignore
/// use sieve_core::ProgramOptions;
///
/// let opts = ProgramOptions {
///     handle_signals: false,
///     ..ProgramOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Quit gracefully on ctrl-c (default: true).
    pub handle_signals: bool,
    /// After a message arrives, keep draining queued messages for this long
    /// before yielding back to the select loop (default: 100µs).
    pub batch_window: Duration,
    /// Upper bound on messages drained in one batch (default: 100).
    pub batch_limit: u32,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            handle_signals: true,
            batch_window: Duration::from_micros(100),
            batch_limit: 100,
        }
    }
}

/// A cloneable handle to a running [`Program`] for external control.
///
/// `ProgramHandle` is [`Clone`] and can safely be sent across threads or into
/// async tasks. It is how external collaborators (a selection service, an
/// item store) notify the model after they change something.
pub struct ProgramHandle<Msg: Send + 'static> {
    msg_tx: mpsc::UnboundedSender<Msg>,
    killed: Arc<AtomicBool>,
    wake: Arc<Notify>,
}

// Not derived: the handle is cloneable whatever the message type.
impl<Msg: Send + 'static> Clone for ProgramHandle<Msg> {
    fn clone(&self) -> Self {
        Self {
            msg_tx: self.msg_tx.clone(),
            killed: self.killed.clone(),
            wake: self.wake.clone(),
        }
    }
}

impl<Msg: Send + 'static> ProgramHandle<Msg> {
    /// Send a message to the running program.
    ///
    /// Returns silently if the program has already exited.
    pub fn send(&self, msg: Msg) {
        let _ = self.msg_tx.send(msg);
    }

    /// Force-kill the program.
    ///
    /// The event loop checks the flag on every iteration and exits without
    /// processing remaining messages.
    pub fn kill(&self) {
        self.killed.store(true, Ordering::SeqCst);
        self.wake.notify_one();
    }
}

/// The program runtime. Owns the [`Model`] and drives its update loop.
///
/// All updates run on the task that called [`run`](Program::run), one
/// message at a time, so the model is the single writer of its own state.
/// Async commands are spawned onto the tokio runtime and their results are
/// fed back through the same channel.
///
/// ```rust,ignore
/// use sieve_core::{Program, ProgramError};
///
/// #[tokio::main]
/// async fn main() -> Result<(), ProgramError> {
///     let model = Program::<MyApp>::new(()).run().await?;
///     Ok(())
/// }
/// ```
pub struct Program<M: Model> {
    model: M,
    msg_tx: mpsc::UnboundedSender<M::Message>,
    msg_rx: mpsc::UnboundedReceiver<M::Message>,
    tasks: JoinSet<()>,
    options: ProgramOptions,
    should_quit: bool,
    killed: Arc<AtomicBool>,
    wake: Arc<Notify>,
}

impl<M: Model> Program<M> {
    /// Create a new program with default options.
    pub fn new(flags: M::Flags) -> Self {
        Self::with_options(flags, ProgramOptions::default())
    }

    /// Create a new program with custom options.
    ///
    /// `init` runs immediately and its command is executed right away, so
    /// its messages are queued ahead of anything sent through a handle.
    /// Must be called from within a tokio runtime when `init` returns async
    /// work.
    pub fn with_options(flags: M::Flags, options: ProgramOptions) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (model, init_cmd) = M::init(flags);

        let mut program = Self {
            model,
            msg_tx,
            msg_rx,
            tasks: JoinSet::new(),
            options,
            should_quit: false,
            killed: Arc::new(AtomicBool::new(false)),
            wake: Arc::new(Notify::new()),
        };
        program.execute_command(init_cmd);
        program
    }

    /// Get a sender for external message injection.
    pub fn sender(&self) -> mpsc::UnboundedSender<M::Message> {
        self.msg_tx.clone()
    }

    /// Get a handle for external control (send messages, force-kill).
    pub fn handle(&self) -> ProgramHandle<M::Message> {
        ProgramHandle {
            msg_tx: self.msg_tx.clone(),
            killed: self.killed.clone(),
            wake: self.wake.clone(),
        }
    }

    /// Run the program until it quits, returning the final model.
    pub async fn run(mut self) -> Result<M, ProgramError> {
        debug!("program started");
        let result = self.event_loop().await;

        debug!(pending = self.tasks.len(), "shutting down");
        self.tasks.abort_all();
        result.map(|()| self.model)
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        let handle_signals = self.options.handle_signals;

        loop {
            if self.should_quit || self.killed.load(Ordering::SeqCst) {
                return Ok(());
            }

            // Reap finished tasks so the set does not grow without bound.
            while self.tasks.try_join_next().is_some() {}

            tokio::select! {
                biased;

                res = tokio::signal::ctrl_c(), if handle_signals => {
                    res?;
                    debug!("received ctrl+c signal");
                    return Ok(());
                }

                _ = self.wake.notified() => {}

                Some(msg) = self.msg_rx.recv() => {
                    self.process_message(msg);

                    let deadline = Instant::now() + self.options.batch_window;
                    let mut batch_count = 0u32;
                    while Instant::now() < deadline && batch_count < self.options.batch_limit {
                        if self.should_quit || self.killed.load(Ordering::SeqCst) {
                            break;
                        }
                        match self.msg_rx.try_recv() {
                            Ok(msg) => {
                                self.process_message(msg);
                                batch_count += 1;
                            }
                            Err(_) => break,
                        }
                    }
                }
            }
        }
    }

    fn process_message(&mut self, msg: M::Message) {
        trace!("update");
        let cmd = self.model.update(msg);
        self.execute_command(cmd);
    }

    fn execute_command(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => {
                let _ = self.msg_tx.send(msg);
            }
            CommandInner::Action(Action::Quit) => {
                debug!("quit requested");
                self.should_quit = true;
            }
            CommandInner::Future(fut) => {
                let tx = self.msg_tx.clone();
                self.tasks.spawn(async move {
                    let msg = fut.await;
                    let _ = tx.send(msg);
                });
            }
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.execute_command(cmd);
                }
            }
            CommandInner::Sequence(cmds) => {
                let tx = self.msg_tx.clone();
                self.tasks.spawn(async move {
                    for cmd in cmds {
                        execute_command_sequential(cmd, &tx).await;
                    }
                });
            }
        }
    }
}

/// Execute a command sequentially (for `Command::sequence`).
fn execute_command_sequential<Msg: Send + 'static>(
    cmd: Command<Msg>,
    tx: &mpsc::UnboundedSender<Msg>,
) -> futures::future::BoxFuture<'_, ()> {
    Box::pin(async move {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => {
                let _ = tx.send(msg);
            }
            CommandInner::Action(Action::Quit) => {
                // A sequence has no direct access to the quit flag.
            }
            CommandInner::Future(fut) => {
                let msg = fut.await;
                let _ = tx.send(msg);
            }
            CommandInner::Batch(cmds) => {
                let runs = cmds
                    .into_iter()
                    .map(|cmd| execute_command_sequential(cmd, tx));
                futures::future::join_all(runs).await;
            }
            CommandInner::Sequence(cmds) => {
                for cmd in cmds {
                    execute_command_sequential(cmd, tx).await;
                }
            }
        }
    })
}
