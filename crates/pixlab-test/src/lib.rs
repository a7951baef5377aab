//! pixlab-test - Regression test framework for pixlab
//!
//! This crate provides the shared harness used by every `*_reg.rs`
//! regression test in the workspace, supporting two modes:
//!
//! - **Compare**: Check computed values and buffers (default)
//! - **Display**: Additionally write intermediate buffers to the regout
//!   directory as PPM files for visual inspection
//!
//! Test images are generated synthetically (see [`synthetic`]), so no
//! image files need to be checked in.
//!
//! # Usage
//!
//! ```ignore
//! use pixlab_test::{RegParams, synthetic};
//!
//! let mut rp = RegParams::new("median");
//! let pix = synthetic::uniform(5, 5, 100);
//! rp.compare_values(100.0, pix.get_rgba(2, 2).unwrap()[0] as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;
pub mod synthetic;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // pixlab-test is at crates/pixlab-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
