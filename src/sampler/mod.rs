use crate::error::TrackerError;
use crate::journal::JournalWriter;
use crate::models::ActivitySample;
use crate::platform::PlatformProbe;
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Granularity of the shutdown check inside the interval sleep.
const SLEEP_SLICE: Duration = Duration::from_millis(250);

pub struct SamplerConfig {
    pub poll_interval: Duration,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
        }
    }
}

/// Requests termination of a running [`Sampler`] from another thread or a
/// signal handler. The loop notices within one sleep slice.
#[derive(Clone)]
pub struct ShutdownHandle(Arc<AtomicBool>);

impl ShutdownHandle {
    pub fn stop(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// The fixed-cadence sampling loop: each cycle takes a window snapshot and
/// an idle duration from the probe, stamps an [`ActivitySample`], hands it
/// to the journal, then sleeps for the configured interval.
pub struct Sampler {
    config: SamplerConfig,
    running: Arc<AtomicBool>,
}

impl Sampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self {
            config,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle(Arc::clone(&self.running))
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Run until stopped via a [`ShutdownHandle`] or until a write fails.
    ///
    /// Providers never fail: an unknown window is an empty snapshot and an
    /// unavailable idle time is zero, so only the journal can end the loop
    /// early. A write error is propagated to the caller, which is
    /// responsible for reporting it; there is no in-loop retry or reopen.
    pub fn run<P: PlatformProbe>(
        &self,
        probe: &P,
        journal: &mut JournalWriter,
    ) -> Result<(), TrackerError> {
        while self.running.load(Ordering::SeqCst) {
            let window = probe.active_window();
            let idle_secs = probe.idle_time_secs();
            let sample = ActivitySample::now(window.app_name, window.window_title, idle_secs);

            if let Err(err) = journal.write(&sample) {
                self.running.store(false, Ordering::SeqCst);
                return Err(err);
            }

            self.sleep_interval();
        }

        debug!("sampler stopped");
        Ok(())
    }

    /// Sleep one poll interval in short slices, so a stop request is
    /// observed well within the interval instead of after it.
    fn sleep_interval(&self) {
        let mut remaining = self.config.poll_interval;
        while !remaining.is_zero() && self.running.load(Ordering::SeqCst) {
            let slice = remaining.min(SLEEP_SLICE);
            thread::sleep(slice);
            remaining = remaining.saturating_sub(slice);
        }
    }
}
