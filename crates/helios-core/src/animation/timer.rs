//! Cancellable repeating timer

use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Handle to a task that fires a callback every `period`.
///
/// The first fire happens one full period after the timer is spawned.
/// Dropping the handle cancels the task.
pub struct RepeatingTimer {
    task: JoinHandle<()>,
    period: Duration,
}

impl RepeatingTimer {
    /// Spawn a repeating timer on the given runtime
    pub fn spawn<F>(runtime: &Handle, period: Duration, mut on_fire: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        // tokio intervals panic on a zero period
        let period = period.max(Duration::from_millis(1));
        let first_fire = Instant::now() + period;

        let task = runtime.spawn(async move {
            let mut interval = time::interval_at(first_fire, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                on_fire();
            }
        });

        Self { task, period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Stop the timer.
    ///
    /// On a current-thread runtime no callback runs after this returns. On a
    /// multi-thread runtime a callback already in progress may still finish.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for RepeatingTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
