//! Search-input debouncing.
//!
//! Two layers:
//! - [`DebounceTimer`]: the Idle/Pending state machine, driven by explicit
//!   instants so it can be stepped by hand.
//! - [`Debouncer`]: a tokio task wrapping the timer. Raw values go in
//!   through [`Debouncer::push`], settled values come out of a channel.
//!
//! Last write wins: input arriving while a value is pending replaces it and
//! restarts the delay.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, trace};

/// Delay used by the search box
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Observable state of a [`DebounceTimer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    Pending { deadline: Instant },
}

/// Clock-driven debounce state machine.
#[derive(Debug, Clone)]
pub struct DebounceTimer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> DebounceTimer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn state(&self) -> DebounceState {
        match &self.pending {
            None => DebounceState::Idle,
            Some((_, deadline)) => DebounceState::Pending {
                deadline: *deadline,
            },
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Record new input at `now`, discarding any pending value and
    /// restarting the delay.
    pub fn input(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Emit the pending value if its deadline has passed, returning to Idle.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Drop any pending value without emitting it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Handle to a running debounce task.
///
/// Dropping the handle closes the input side; a value still pending at that
/// point is emitted once its delay runs out, then the task exits.
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the debounce task on the current tokio runtime.
    ///
    /// # Returns
    /// The input handle and the receiver of settled values
    pub fn spawn(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (input, input_rx) = mpsc::unbounded_channel();
        let (output, output_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(DebounceTimer::new(delay), input_rx, output));
        (Self { input, task }, output_rx)
    }

    /// Feed a raw value. Returns `false` once the task has stopped.
    pub fn push(&self, value: T) -> bool {
        self.input.send(value).is_ok()
    }

    /// Stop the task immediately, discarding anything pending.
    pub fn abort(&self) {
        self.task.abort();
    }
}

async fn run<T>(
    mut timer: DebounceTimer<T>,
    mut input: mpsc::UnboundedReceiver<T>,
    output: mpsc::UnboundedSender<T>,
) {
    loop {
        let deadline = timer.deadline();
        // Only polled while a value is pending
        let wake_at = deadline.unwrap_or_else(|| Instant::now() + timer.delay());

        tokio::select! {
            received = input.recv() => match received {
                Some(value) => {
                    trace!("Debounce input, restarting {:?} delay", timer.delay());
                    timer.input(value, Instant::now());
                }
                None => {
                    if let Some(deadline) = timer.deadline() {
                        sleep_until(deadline).await;
                        if let Some(value) = timer.poll(Instant::now()) {
                            let _ = output.send(value);
                        }
                    }
                    debug!("Debounce input closed, stopping");
                    break;
                }
            },
            _ = sleep_until(wake_at), if deadline.is_some() => {
                if let Some(value) = timer.poll(Instant::now()) {
                    if output.send(value).is_err() {
                        debug!("Debounce output dropped, stopping");
                        break;
                    }
                }
            }
        }
    }
}
