//! Call rate limiting: throttle and debounce.
//!
//! Both are synchronous state machines driven by the caller's clock. Every
//! entry point takes the current [`Instant`]; a pending trailing call is run
//! by a later [`Throttle::poll`] / [`Debounce::poll`] once it is due. No
//! timers or threads are involved.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

const DEFAULT_WAIT_MS: u64 = 16;

/// Options for [`Throttle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThrottleOptions {
    /// Minimum interval between two runs, in milliseconds. Default is 16.
    pub wait_ms: u64,
    /// Suppress the leading run of a burst.
    pub no_start: bool,
    /// Suppress the trailing run of a burst.
    pub no_end: bool,
}

impl Default for ThrottleOptions {
    fn default() -> Self {
        Self {
            wait_ms: DEFAULT_WAIT_MS,
            no_start: false,
            no_end: false,
        }
    }
}

/// Options for [`Debounce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DebounceOptions {
    /// Quiet period after the last call, in milliseconds. Default is 16.
    pub wait_ms: u64,
    /// Run on the first call of a burst instead of after it.
    pub immediate: bool,
}

impl Default for DebounceOptions {
    fn default() -> Self {
        Self {
            wait_ms: DEFAULT_WAIT_MS,
            immediate: false,
        }
    }
}

/// Runs `func` at most once per `wait`.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, Instant};
/// use zutil::function::{Throttle, ThrottleOptions};
///
/// let options = ThrottleOptions { wait_ms: 100, ..Default::default() };
/// let mut throttle = Throttle::new(|n: u32| n * 10, options);
/// let t0 = Instant::now();
///
/// assert_eq!(throttle.call(t0, 1), Some(&10));
/// // Inside the window: the latest arguments are kept for a trailing run.
/// assert_eq!(throttle.call(t0 + Duration::from_millis(10), 2), Some(&10));
/// assert_eq!(throttle.call(t0 + Duration::from_millis(20), 3), Some(&10));
///
/// assert!(throttle.poll(t0 + Duration::from_millis(100)));
/// assert_eq!(throttle.last(), Some(&30));
/// ```
pub struct Throttle<F, A, R> {
    func: F,
    options: ThrottleOptions,
    previous: Option<Instant>,
    pending: Option<(Instant, A)>,
    result: Option<R>,
}

impl<F, A, R> Throttle<F, A, R>
where
    F: FnMut(A) -> R,
{
    pub fn new(func: F, options: ThrottleOptions) -> Self {
        Self {
            func,
            options,
            previous: None,
            pending: None,
            result: None,
        }
    }

    fn wait(&self) -> Duration {
        Duration::from_millis(self.options.wait_ms)
    }

    /// Register a call at `now`. Returns the most recent result.
    pub fn call(&mut self, now: Instant, args: A) -> Option<&R> {
        if self.previous.is_none() && self.options.no_start {
            self.previous = Some(now);
        }
        let wait = self.wait();
        let elapsed = self.previous.map(|previous| now.checked_duration_since(previous));

        // Never run before, the window has passed, or the clock moved back.
        let due = match elapsed {
            None => true,
            Some(None) => true,
            Some(Some(elapsed)) => elapsed >= wait,
        };

        if due {
            self.pending = None;
            self.previous = Some(now);
            self.result = Some((self.func)(args));
        } else if let Some((_, pending_args)) = self.pending.as_mut() {
            *pending_args = args;
        } else if !self.options.no_end {
            let deadline = self.previous.map_or(now, |previous| previous + wait);
            self.pending = Some((deadline, args));
        }
        self.result.as_ref()
    }

    /// Run the trailing call if it is due at `now`. Returns whether it ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending.take() {
            Some((deadline, args)) if now >= deadline => {
                self.previous = if self.options.no_start { None } else { Some(now) };
                self.result = Some((self.func)(args));
                true
            }
            other => {
                self.pending = other;
                false
            }
        }
    }

    /// When the pending trailing call becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    pub fn last(&self) -> Option<&R> {
        self.result.as_ref()
    }
}

/// Runs `func` once calls have stopped arriving for `wait`.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, Instant};
/// use zutil::function::{Debounce, DebounceOptions};
///
/// let options = DebounceOptions { wait_ms: 50, ..Default::default() };
/// let mut debounce = Debounce::new(|s: &str| s.len(), options);
/// let t0 = Instant::now();
///
/// debounce.call(t0, "a");
/// debounce.call(t0 + Duration::from_millis(30), "abc");
/// assert!(!debounce.poll(t0 + Duration::from_millis(50)));
/// assert!(debounce.poll(t0 + Duration::from_millis(80)));
/// assert_eq!(debounce.last(), Some(&3));
/// ```
pub struct Debounce<F, A, R> {
    func: F,
    options: DebounceOptions,
    timestamp: Option<Instant>,
    deadline: Option<Instant>,
    args: Option<A>,
    result: Option<R>,
}

impl<F, A, R> Debounce<F, A, R>
where
    F: FnMut(A) -> R,
{
    pub fn new(func: F, options: DebounceOptions) -> Self {
        Self {
            func,
            options,
            timestamp: None,
            deadline: None,
            args: None,
            result: None,
        }
    }

    fn wait(&self) -> Duration {
        Duration::from_millis(self.options.wait_ms)
    }

    /// Register a call at `now`. Returns the most recent result.
    pub fn call(&mut self, now: Instant, args: A) -> Option<&R> {
        self.timestamp = Some(now);
        let call_now = self.options.immediate && self.deadline.is_none();
        if self.deadline.is_none() {
            self.deadline = Some(now + self.wait());
        }
        if call_now {
            self.args = None;
            self.result = Some((self.func)(args));
        } else {
            self.args = Some(args);
        }
        self.result.as_ref()
    }

    /// Settle the burst if it is due at `now`. Returns whether `func` ran.
    ///
    /// A burst that received calls after it was armed is pushed back to
    /// `wait` after the latest call instead of settling.
    pub fn poll(&mut self, now: Instant) -> bool {
        let (Some(deadline), Some(timestamp)) = (self.deadline, self.timestamp) else {
            return false;
        };
        if now < deadline {
            return false;
        }
        let wait = self.wait();
        let since_last = now.saturating_duration_since(timestamp);
        if since_last < wait && since_last > Duration::ZERO {
            self.deadline = Some(timestamp + wait);
            return false;
        }
        self.deadline = None;
        match self.args.take() {
            Some(args) if !self.options.immediate => {
                self.result = Some((self.func)(args));
                true
            }
            _ => false,
        }
    }

    /// When the pending burst is next checked, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn last(&self) -> Option<&R> {
        self.result.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn recorder() -> impl FnMut(u32) -> u32 {
        |n| n
    }

    #[test]
    fn test_throttle_leading_and_trailing() {
        let options = ThrottleOptions {
            wait_ms: 100,
            ..Default::default()
        };
        let mut throttle = Throttle::new(recorder(), options);
        let t0 = Instant::now();

        assert_eq!(throttle.call(t0, 1), Some(&1));
        assert_eq!(throttle.call(t0 + ms(50), 2), Some(&1));
        assert_eq!(throttle.deadline(), Some(t0 + ms(100)));
        assert!(!throttle.poll(t0 + ms(99)));
        assert!(throttle.poll(t0 + ms(100)));
        assert_eq!(throttle.last(), Some(&2));
        assert!(throttle.deadline().is_none());
    }

    #[test]
    fn test_throttle_runs_again_after_window() {
        let options = ThrottleOptions {
            wait_ms: 10,
            ..Default::default()
        };
        let mut throttle = Throttle::new(recorder(), options);
        let t0 = Instant::now();
        throttle.call(t0, 1);
        assert_eq!(throttle.call(t0 + ms(10), 2), Some(&2));
        assert_eq!(throttle.call(t0 + ms(25), 3), Some(&3));
    }

    #[test]
    fn test_throttle_no_end_drops_trailing() {
        let options = ThrottleOptions {
            wait_ms: 100,
            no_end: true,
            ..Default::default()
        };
        let mut throttle = Throttle::new(recorder(), options);
        let t0 = Instant::now();
        throttle.call(t0, 1);
        throttle.call(t0 + ms(10), 2);
        assert!(throttle.deadline().is_none());
        assert!(!throttle.poll(t0 + ms(200)));
        assert_eq!(throttle.last(), Some(&1));
    }

    #[test]
    fn test_throttle_no_start_skips_leading() {
        let options = ThrottleOptions {
            wait_ms: 100,
            no_start: true,
            ..Default::default()
        };
        let mut throttle = Throttle::new(recorder(), options);
        let t0 = Instant::now();
        assert_eq!(throttle.call(t0, 1), None);
        assert_eq!(throttle.deadline(), Some(t0 + ms(100)));
        assert!(throttle.poll(t0 + ms(100)));
        assert_eq!(throttle.last(), Some(&1));

        // The next burst starts a fresh window instead of running at once.
        assert_eq!(throttle.call(t0 + ms(500), 2), Some(&1));
        assert!(throttle.poll(t0 + ms(600)));
        assert_eq!(throttle.last(), Some(&2));
    }

    #[test]
    fn test_debounce_trailing() {
        let options = DebounceOptions {
            wait_ms: 50,
            ..Default::default()
        };
        let mut debounce = Debounce::new(recorder(), options);
        let t0 = Instant::now();
        assert_eq!(debounce.call(t0, 1), None);
        debounce.call(t0 + ms(20), 2);
        debounce.call(t0 + ms(40), 3);

        assert!(!debounce.poll(t0 + ms(50)));
        assert_eq!(debounce.deadline(), Some(t0 + ms(90)));
        assert!(debounce.poll(t0 + ms(90)));
        assert_eq!(debounce.last(), Some(&3));
        assert!(!debounce.poll(t0 + ms(200)));
    }

    #[test]
    fn test_debounce_immediate() {
        let options = DebounceOptions {
            wait_ms: 50,
            immediate: true,
        };
        let mut debounce = Debounce::new(recorder(), options);
        let t0 = Instant::now();
        assert_eq!(debounce.call(t0, 1), Some(&1));
        assert_eq!(debounce.call(t0 + ms(10), 2), Some(&1));
        assert!(!debounce.poll(t0 + ms(60)));
        assert!(debounce.deadline().is_none());
        assert_eq!(debounce.call(t0 + ms(100), 3), Some(&3));
    }

    #[test]
    fn test_poll_without_calls() {
        let mut debounce = Debounce::new(recorder(), DebounceOptions::default());
        assert!(!debounce.poll(Instant::now()));
        let mut throttle = Throttle::new(recorder(), ThrottleOptions::default());
        assert!(!throttle.poll(Instant::now()));
    }

    #[test]
    fn test_options_from_json() {
        let options: ThrottleOptions =
            serde_json::from_str(r#"{"waitMs": 250, "noEnd": true}"#).unwrap();
        let expected = ThrottleOptions {
            wait_ms: 250,
            no_start: false,
            no_end: true,
        };
        assert_eq!(options, expected);
        let options: DebounceOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, DebounceOptions::default());
    }
}
