//! Debounced, cancellable delayed tasks.
//!
//! A [`DebouncedTask`] tracks one logical operation that runs after a delay.
//! The delay itself is a [`Command::tick`] timer owned by the runtime; when it
//! fires, the owner hands the [`Ticket`] back to [`DebouncedTask::resume`],
//! which only accepts the ticket of the current, still-pending instance.
//! Cancellation never touches the timer: a superseded or cancelled instance
//! is recognized by its stale generation and its result is discarded.
//!
//! Two policies cover the list controller's needs:
//!
//! - [`TaskPolicy::Exclusive`]: invoking while busy is a no-op (the request
//!   is dropped). Used for page turns.
//! - [`TaskPolicy::Restartable`]: invoking while busy supersedes the current
//!   instance and starts the delay over. Used for filtering.

use sieve_core::Command;
use std::time::Duration;
use tracing::trace;

/// How a task reacts to being invoked while busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPolicy {
    /// Drop the new invocation; the in-flight instance wins.
    Exclusive,
    /// Cancel the in-flight instance; the new invocation wins.
    Restartable,
}

/// Lifecycle of the current task instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Nothing scheduled.
    Idle,
    /// Waiting for the delay to elapse.
    Pending,
    /// Delay elapsed; the owner is applying the effect.
    Running,
    /// The last instance was cancelled before it ran.
    Cancelled,
}

/// Identifies one scheduled instance of a [`DebouncedTask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

/// A delayed task with an invocation policy and generation-based cancellation.
#[derive(Debug, Clone)]
pub struct DebouncedTask {
    policy: TaskPolicy,
    delay: Duration,
    state: TaskState,
    generation: u64,
}

impl DebouncedTask {
    /// Create an idle task.
    pub fn new(policy: TaskPolicy, delay: Duration) -> Self {
        Self {
            policy,
            delay,
            state: TaskState::Idle,
            generation: 0,
        }
    }

    /// Shorthand for an [`Exclusive`](TaskPolicy::Exclusive) task.
    pub fn exclusive(delay: Duration) -> Self {
        Self::new(TaskPolicy::Exclusive, delay)
    }

    /// Shorthand for a [`Restartable`](TaskPolicy::Restartable) task.
    pub fn restartable(delay: Duration) -> Self {
        Self::new(TaskPolicy::Restartable, delay)
    }

    pub fn policy(&self) -> TaskPolicy {
        self.policy
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Whether an instance is pending or running.
    pub fn is_busy(&self) -> bool {
        matches!(self.state, TaskState::Pending | TaskState::Running)
    }

    /// Request a new instance.
    ///
    /// Returns the new instance's ticket, or `None` when an exclusive task is
    /// busy and the request is dropped. A restartable task invalidates the
    /// previous ticket.
    pub fn invoke(&mut self) -> Option<Ticket> {
        if self.is_busy() {
            match self.policy {
                TaskPolicy::Exclusive => {
                    trace!(generation = self.generation, "busy, dropping invocation");
                    return None;
                }
                TaskPolicy::Restartable => {
                    trace!(generation = self.generation, "superseding pending instance");
                }
            }
        }
        self.generation += 1;
        self.state = TaskState::Pending;
        Some(Ticket {
            generation: self.generation,
        })
    }

    /// Invoke and, if accepted, return a timer command that delivers
    /// `make(ticket)` once the delay has elapsed.
    pub fn schedule<Msg: Send + 'static>(
        &mut self,
        make: impl FnOnce(Ticket) -> Msg + Send + 'static,
    ) -> Command<Msg> {
        match self.invoke() {
            Some(ticket) => Command::tick(self.delay, move |_| make(ticket)),
            None => Command::none(),
        }
    }

    /// The delay for `ticket` elapsed. Returns `true` (and moves to
    /// [`Running`](TaskState::Running)) only for the current pending instance;
    /// stale or cancelled tickets are rejected.
    pub fn resume(&mut self, ticket: Ticket) -> bool {
        if ticket.generation != self.generation || self.state != TaskState::Pending {
            trace!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale ticket"
            );
            return false;
        }
        self.state = TaskState::Running;
        true
    }

    /// Mark the running instance as done.
    pub fn finish(&mut self, ticket: Ticket) {
        if ticket.generation == self.generation && self.state == TaskState::Running {
            self.state = TaskState::Idle;
        }
    }

    /// Cancel the current instance, if any. Its ticket will be rejected.
    pub fn cancel(&mut self) {
        if self.is_busy() {
            trace!(generation = self.generation, "cancelled");
            self.state = TaskState::Cancelled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(200);

    #[test]
    fn exclusive_drops_while_busy() {
        let mut task = DebouncedTask::exclusive(DELAY);
        let first = task.invoke().unwrap();
        assert_eq!(task.state(), TaskState::Pending);
        assert!(task.invoke().is_none());

        assert!(task.resume(first));
        assert_eq!(task.state(), TaskState::Running);
        assert!(task.invoke().is_none());

        task.finish(first);
        assert_eq!(task.state(), TaskState::Idle);
        assert!(task.invoke().is_some());
    }

    #[test]
    fn restartable_supersedes() {
        let mut task = DebouncedTask::restartable(DELAY);
        let first = task.invoke().unwrap();
        let second = task.invoke().unwrap();
        assert_ne!(first, second);

        assert!(!task.resume(first));
        assert_eq!(task.state(), TaskState::Pending);
        assert!(task.resume(second));
        task.finish(second);
        assert_eq!(task.state(), TaskState::Idle);
    }

    #[test]
    fn cancelled_ticket_is_rejected() {
        let mut task = DebouncedTask::exclusive(DELAY);
        let ticket = task.invoke().unwrap();
        task.cancel();
        assert_eq!(task.state(), TaskState::Cancelled);
        assert!(!task.is_busy());
        assert!(!task.resume(ticket));

        let next = task.invoke().unwrap();
        assert!(!task.resume(ticket));
        assert!(task.resume(next));
    }

    #[test]
    fn ticket_cannot_resume_twice() {
        let mut task = DebouncedTask::restartable(DELAY);
        let ticket = task.invoke().unwrap();
        assert!(task.resume(ticket));
        task.finish(ticket);
        assert!(!task.resume(ticket));
    }

    #[test]
    fn cancel_when_idle_is_noop() {
        let mut task = DebouncedTask::restartable(DELAY);
        task.cancel();
        assert_eq!(task.state(), TaskState::Idle);
    }

    #[test]
    fn schedule_returns_none_when_dropped() {
        let mut task = DebouncedTask::exclusive(DELAY);
        let first: Command<Ticket> = task.schedule(|t| t);
        assert!(first.is_async());
        let second: Command<Ticket> = task.schedule(|t| t);
        assert!(second.is_none());
    }
}
