//! Logger setup for hosts embedding the loader.
//!
//! The crate logs through the `log` facade only. Nothing is printed until a
//! host installs a logger, either its own or the one [`init`] provides.
//! Hosts with their own logger skip [`init`] and filter on the
//! `minecart_loading` target to see per-phase and per-transfer messages.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Target prefix of every message this crate logs.
const TARGET: &str = env!("CARGO_CRATE_NAME");

/// Installs `env_logger` as the global logger.
///
/// Other crates log at warn and above. This crate logs at info, or at debug
/// when `verbose` is set. `RUST_LOG` overrides both.
pub fn init(verbose: bool) {
    let loader_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module(TARGET, loader_level)
        .parse_env(Env::default());

    // Fails only when a logger is already installed, which is fine for
    // hosts that set up their own and for repeated calls in tests.
    if builder.try_init().is_err() {
        log::debug!("logger already installed; keeping it");
    }
}
