//! Profiling utilities based on the `puffin` crate.
//!
//! With the `profiling` feature disabled, `profile_function!` and
//! `profile_scope!` expand to nothing.

#[cfg(feature = "profiling")]
pub use puffin::{profile_function, profile_scope};

#[cfg(not(feature = "profiling"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __formwork_noop_profile {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "profiling"))]
pub use crate::__formwork_noop_profile as profile_function;
#[cfg(not(feature = "profiling"))]
pub use crate::__formwork_noop_profile as profile_scope;

use crate::config::BenchmarkMode;

#[cfg(feature = "profiling")]
static PROFILING_SERVER: std::sync::OnceLock<puffin_http::Server> = std::sync::OnceLock::new();

/// Turn profiling on according to `mode`.
///
/// # Example
/// ```no_run
/// use formwork_core::{BenchmarkMode, profiling::init_profiling};
///
/// init_profiling(BenchmarkMode::On);
/// ```
#[cfg(feature = "profiling")]
pub fn init_profiling(mode: BenchmarkMode) {
    match mode {
        BenchmarkMode::Off => {}
        BenchmarkMode::On => puffin::set_scopes_on(true),
        BenchmarkMode::WithWebserver => {
            puffin::set_scopes_on(true);

            // Start the puffin server on the default port (8585)
            match puffin_http::Server::new("0.0.0.0:8585") {
                Ok(server) => {
                    tracing::info!("Puffin profiler server started on http://0.0.0.0:8585");
                    // Store the server in a static to keep it alive
                    let _ = PROFILING_SERVER.set(server);
                }
                Err(e) => {
                    tracing::error!("Failed to start puffin server: {}", e);
                }
            }
        }
    }
}

#[cfg(not(feature = "profiling"))]
pub fn init_profiling(mode: BenchmarkMode) {
    if mode != BenchmarkMode::Off {
        tracing::warn!("profiling requested but the `profiling` feature is disabled");
    }
}

/// Mark the start of a new frame for profiling.
///
/// Call once per processed event batch.
pub fn new_frame() {
    #[cfg(feature = "profiling")]
    puffin::GlobalProfiler::lock().new_frame();
}
