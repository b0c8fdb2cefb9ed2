//! Animation clock implementation

use super::{RepeatingTimer, TimeSubscriber, TimeWindow};
use crate::settings::ClockSettings;
use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::{Mutex, RwLock};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::debug;

type Subscribers = RwLock<Vec<Weak<dyn TimeSubscriber>>>;

/// Snapshot of the clock's state
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    /// Current animation time
    pub current: DateTime<Utc>,
    /// Window the animation cycles over
    pub window: TimeWindow,
    /// Scene seconds advanced per frame
    pub cadence_secs: f64,
    /// Wall-clock delay between frames
    pub frame_delay: Duration,
    /// Whether a frame timer is active
    pub running: bool,
}

impl AnimationState {
    /// Time of the frame after `current`.
    ///
    /// Overshooting `end` wraps to `start`; it never clamps to `end`.
    pub fn next_frame_time(&self) -> DateTime<Utc> {
        let next = step(self.cadence_secs).and_then(|delta| self.current.checked_add_signed(delta));
        match next {
            Some(next) if next <= self.window.end => next,
            _ => self.window.start,
        }
    }
}

/// Cadence as a whole-second step. Non-finite or out-of-range cadences have no step.
fn step(cadence_secs: f64) -> Option<TimeDelta> {
    if !cadence_secs.is_finite() {
        return None;
    }
    TimeDelta::try_seconds(cadence_secs.trunc() as i64)
}

/// Drives the scene through a time window, one cadence step per frame
pub struct AnimationClock {
    state: Arc<RwLock<AnimationState>>,
    subscribers: Arc<Subscribers>,
    timer: Mutex<Option<RepeatingTimer>>,
    runtime: Handle,
}

impl AnimationClock {
    /// Create a stopped clock covering the last 24 hours
    pub fn new(runtime: Handle) -> Self {
        Self::with_settings(runtime, &ClockSettings::default())
    }

    /// Create a stopped clock from settings; `current` starts at the window start
    pub fn with_settings(runtime: Handle, settings: &ClockSettings) -> Self {
        let window = TimeWindow::trailing(Utc::now(), settings.initial_span());
        let state = AnimationState {
            current: window.start,
            window,
            cadence_secs: settings.cadence_secs,
            frame_delay: settings.frame_delay(),
            running: false,
        };

        Self {
            state: Arc::new(RwLock::new(state)),
            subscribers: Arc::new(RwLock::new(Vec::new())),
            timer: Mutex::new(None),
            runtime,
        }
    }

    /// Begin the animation. Does nothing if it is already running.
    pub fn play(&self) {
        let mut timer = self.timer.lock();
        if timer.is_some() {
            return;
        }

        let delay = {
            let mut state = self.state.write();
            state.running = true;
            state.frame_delay
        };

        let state = Arc::clone(&self.state);
        let subscribers = Arc::clone(&self.subscribers);
        *timer = Some(RepeatingTimer::spawn(&self.runtime, delay, move || {
            tick_frame(&state, &subscribers);
        }));
        debug!(?delay, "animation started");
    }

    /// Stop the animation. Safe to call when not running.
    pub fn pause(&self) {
        if let Some(timer) = self.timer.lock().take() {
            timer.cancel();
            debug!("animation paused");
        }
        self.state.write().running = false;
    }

    /// Replace the animation window. No ordering check is made.
    pub fn set_time_window(&self, window: TimeWindow) {
        debug!(start = %window.start, end = %window.end, "animation window changed");
        self.state.write().window = window;
    }

    pub fn set_start_time(&self, start: DateTime<Utc>) {
        self.state.write().window.start = start;
    }

    pub fn set_end_time(&self, end: DateTime<Utc>) {
        self.state.write().window.end = end;
    }

    /// Jump to a point in time and update the scene immediately
    pub fn set_time(&self, time: DateTime<Utc>) {
        self.state.write().current = time;
        notify_subscribers(&self.subscribers, time);
    }

    pub fn set_cadence(&self, cadence_secs: f64) {
        self.state.write().cadence_secs = cadence_secs;
    }

    /// Set the delay between frames. A running timer keeps its old delay
    /// until the next `play()`.
    pub fn set_frame_delay(&self, delay: Duration) {
        self.state.write().frame_delay = delay;
    }

    pub fn current_time(&self) -> DateTime<Utc> {
        self.state.read().current
    }

    pub fn time_window(&self) -> TimeWindow {
        self.state.read().window
    }

    pub fn cadence(&self) -> f64 {
        self.state.read().cadence_secs
    }

    pub fn frame_delay(&self) -> Duration {
        self.state.read().frame_delay
    }

    pub fn is_running(&self) -> bool {
        self.state.read().running
    }

    pub fn snapshot(&self) -> AnimationState {
        self.state.read().clone()
    }

    /// Advance one frame right away, exactly as a timer fire would
    pub fn tick(&self) {
        tick_frame(&self.state, &self.subscribers);
    }

    /// Add a subscriber. Only a weak reference is kept.
    pub fn add_subscriber(&self, subscriber: Arc<dyn TimeSubscriber>) {
        self.subscribers.write().push(Arc::downgrade(&subscriber));
    }
}

fn tick_frame(state: &RwLock<AnimationState>, subscribers: &Subscribers) {
    let mut state = state.write();
    let next = state.next_frame_time();
    if next < state.current {
        debug!(start = %next, "animation wrapped to window start");
    }
    state.current = next;
    drop(state);

    notify_subscribers(subscribers, next);
}

fn notify_subscribers(subscribers: &Subscribers, time: DateTime<Utc>) {
    let live: Vec<Arc<dyn TimeSubscriber>> = {
        let mut subscribers = subscribers.write();

        // Remove any dead weak references
        subscribers.retain(|weak| weak.strong_count() > 0);
        subscribers.iter().filter_map(Weak::upgrade).collect()
    };

    for subscriber in live {
        subscriber.on_time_changed(time);
    }
}
