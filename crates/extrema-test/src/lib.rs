//! extrema-test - Regression test framework for extrema
//!
//! This crate provides the bookkeeping shared by the `*_reg` tests of the
//! workspace, supporting three modes:
//!
//! - **Generate**: Write golden files for comparison
//! - **Compare**: Compare results with golden files when present
//! - **Display**: Write results to `tests/regout` for visual inspection
//!
//! It also carries a brute-force reference detector and generated test
//! images.
//!
//! # Usage
//!
//! ```ignore
//! use extrema_test::RegParams;
//!
//! let mut rp = RegParams::new("local_minima");
//! rp.compare_values(12.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;
pub mod reference;
pub mod synthetic;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
pub use reference::{ReferenceRule, brute_force_scan, is_local_extremum, reference_extrema};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // extrema-test is at crates/extrema-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
