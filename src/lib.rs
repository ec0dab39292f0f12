pub mod config;
pub mod error;
pub mod journal;
pub mod models;
pub mod platform;
pub mod sampler;

pub use error::TrackerError;

use crate::journal::JournalWriter;
use crate::platform::NativeProbe;
use crate::sampler::{Sampler, SamplerConfig};
use log::{error, info, warn};

/// Resolve a journal destination and drive the sampling loop until the
/// process receives Ctrl+C or a write fails.
///
/// When no candidate target can be opened this logs a diagnostic and
/// returns without starting the loop; it is a clean early exit, not a
/// crash.
pub fn run(config: SamplerConfig) {
    let mut journal = JournalWriter::new(config::default_targets());
    match journal.open() {
        Ok(path) => info!("journaling activity to {}", path.display()),
        Err(_) => {
            error!(
                "unable to open the activity log: set {} to a writable path, \
                 or run from a directory where ../data-backend or \
                 ../../data-backend can be created",
                config::ACTIVITY_PATH_ENV,
            );
            return;
        }
    }

    let sampler = Sampler::new(config);
    let shutdown = sampler.shutdown_handle();
    if let Err(err) = ctrlc::set_handler(move || shutdown.stop()) {
        warn!("could not install Ctrl+C handler, stop with SIGKILL: {err}");
    }

    let probe = NativeProbe::new();
    info!("tracker running, press Ctrl+C to stop");
    match sampler.run(&probe, &mut journal) {
        Ok(()) => info!("tracker stopped"),
        Err(err) => error!("tracker stopped due to error: {err}"),
    }
}
