//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use extrema_core::Image;
use extrema_io::{GrayImage, ImageFormat};
use std::fmt::Debug;
use std::fs;
use std::path::Path;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - run without comparison, keeping outputs for inspection
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the index of the current check, the mode and
/// every failure recorded so far.
pub struct RegParams {
    /// Name of the test (e.g., "local_minima")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        if mode != RegTestMode::Compare {
            let _ = fs::create_dir_all(golden_dir());
            let _ = fs::create_dir_all(regout_dir());
        }

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Compare two images for exact equality
    ///
    /// # Returns
    ///
    /// `true` if images have the same dimensions and pixels.
    pub fn compare_images<T: Copy + PartialEq + Debug>(
        &mut self,
        expected: &Image<T>,
        actual: &Image<T>,
    ) -> bool {
        self.index += 1;

        if expected.dimensions() != actual.dimensions() {
            self.fail(format!(
                "Failure in {}_reg: image comparison for index {} - dimension mismatch {:?} vs {:?}",
                self.test_name,
                self.index,
                expected.dimensions(),
                actual.dimensions()
            ));
            return false;
        }

        let (width, height, _) = expected.dimensions();
        let mismatch = expected
            .data()
            .iter()
            .zip(actual.data())
            .position(|(a, b)| a != b);
        if let Some(pos) = mismatch {
            let plane = (width as usize) * (height as usize);
            let (x, y, z) = (
                pos % width as usize,
                (pos % plane) / width as usize,
                pos / plane,
            );
            self.fail(format!(
                "Failure in {}_reg: image comparison for index {} - pixel mismatch at ({}, {}, {}): expected {:?}, got {:?}",
                self.test_name,
                self.index,
                x,
                y,
                z,
                expected.data()[pos],
                actual.data()[pos]
            ));
            return false;
        }

        true
    }

    /// Write an image to the regout directory and check it against its
    /// golden counterpart
    ///
    /// In generate mode, the written file becomes the golden file.
    /// In compare mode, the image is compared with the golden file when one
    /// exists. In display mode the file is only written.
    pub fn write_image_and_check(
        &mut self,
        image: &GrayImage,
        format: ImageFormat,
    ) -> TestResult<()> {
        self.index += 1;

        let ext = format.extension();
        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            ext
        );

        match self.mode {
            RegTestMode::Generate => {
                write_to(image, &golden_path, format)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    eprintln!("No golden file {}, skipping", golden_path);
                    return Ok(());
                }
                let golden = extrema_io::read_image(&golden_path).map_err(|e| {
                    TestError::ImageLoad {
                        path: golden_path.clone(),
                        message: e.to_string(),
                    }
                })?;
                if golden != *image {
                    self.fail(format!(
                        "Failure in {}_reg, index {}: image differs from {}",
                        self.test_name, self.index, golden_path
                    ));
                }
            }
            RegTestMode::Display => {
                let local_path = format!(
                    "{}/{}.{:02}.{}",
                    regout_dir(),
                    self.test_name,
                    self.index,
                    ext
                );
                write_to(image, &local_path, format)?;
                eprintln!("Wrote: {}", local_path);
            }
        }

        Ok(())
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

fn write_to(image: &GrayImage, path: &str, format: ImageFormat) -> TestResult<()> {
    extrema_io::write_image(image, path, format).map_err(|e| TestError::ImageWrite {
        path: path.to_string(),
        message: e.to_string(),
    })
}
