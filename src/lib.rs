//! procscript
//!
//! An embeddable BASIC/Pascal-like scripting runtime. Scripts declare typed
//! variables, procedures, functions and **processes**: cooperatively
//! scheduled actors that keep their local state across scheduler ticks.
//!
//! # Example
//!
//! ```text
//! program demo;
//! process blink(int times)
//! begin
//!     int n = 0;
//!     loop begin
//!         n++;
//!         if (n == times) break;
//!     end
//!     print("done");
//! end
//! begin
//!     blink(3);
//! end.
//! ```

#![warn(rust_2018_idioms)]

// Public modules
pub mod frontend;
pub mod runtime;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use thiserror::Error;

pub use runtime::{Interpreter, Literal, ScriptError};

use std::fs;
use std::path::Path;
use tracing::debug;

/// Language version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Language name
pub const NAME: &str = "procscript";

/// Run a script: execute the main block, then tick spawned processes until
/// none is left (bounded by the default tick limit)
///
/// # Example
///
/// ```no_run
/// use procscript::{run, Result};
///
/// fn main() -> Result<()> {
///     run("program hello;\nbegin\n    print(\"Hello, World!\");\nend.")?;
///     Ok(())
/// }
/// ```
pub fn run(source: &str) -> Result<()> {
    run_with_ticks(source, util::config::RuntimeConfig::default().max_ticks)
}

/// Like [`run`], with an explicit tick limit
pub fn run_with_ticks(
    source: &str,
    max_ticks: u64,
) -> Result<()> {
    let config = util::config::RuntimeConfig {
        max_ticks,
        ..Default::default()
    };
    run_with_config(source, &config)
}

/// Run a script with a fully specified runtime configuration
pub fn run_with_config(
    source: &str,
    config: &util::config::RuntimeConfig,
) -> Result<()> {
    debug!("run called ({} bytes)", source.len());
    let mut interp = Interpreter::with_config(config);
    interp.execute_source(source)?;
    let ticks = interp.run_until_idle(config.max_ticks)?;
    debug!("Script finished after {} ticks", ticks);
    Ok(())
}

/// Run a script file
pub fn run_file(path: &Path) -> Result<()> {
    debug!("Running file {}", path.display());
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    run(&source).with_context(|| format!("Failed to run: {}", path.display()))
}
