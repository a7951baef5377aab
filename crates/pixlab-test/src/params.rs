//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use pixlab_core::PixelBuffer;
use pixlab_io::{ImageFormat, write_image};
use std::fs;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare computed results (default)
    #[default]
    Compare,
    /// Compare and also dump intermediate images to regout
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
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "convolve")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "convolve")
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

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
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Record a boolean property
    ///
    /// `what` names the property in the failure message.
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if !condition {
            let msg = format!(
                "Failure in {}_reg: check {} does not hold: {}",
                self.test_name, self.index, what
            );
            self.fail(msg);
        }
        condition
    }

    /// Compare two buffers for exact equality
    ///
    /// On a mismatch the first differing pixel is reported.
    pub fn compare_buffers(&mut self, pix1: &PixelBuffer, pix2: &PixelBuffer) -> bool {
        self.index += 1;

        if !pix1.sizes_equal(pix2) {
            let msg = format!(
                "Failure in {}_reg: buffer comparison for index {} - size {:?} vs {:?}",
                self.test_name,
                self.index,
                pix1.dimensions(),
                pix2.dimensions()
            );
            self.fail(msg);
            return false;
        }

        let mismatch = pix1
            .pixels()
            .zip(pix2.pixels())
            .position(|(a, b)| a != b);
        match mismatch {
            None => true,
            Some(i) => {
                let (x, y) = (i as u32 % pix1.width(), i as u32 / pix1.width());
                let msg = format!(
                    "Failure in {}_reg: buffer comparison for index {} - pixel ({}, {}): {:?} vs {:?}",
                    self.test_name,
                    self.index,
                    x,
                    y,
                    pix1.get_rgba_unchecked(x, y),
                    pix2.get_rgba_unchecked(x, y)
                );
                self.fail(msg);
                false
            }
        }
    }

    /// Compare two binary data arrays
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            let msg = format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len()
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Write a buffer to the regout directory when in display mode
    ///
    /// Does nothing in compare mode. The file is named
    /// `{test_name}.{index:02}.ppm`.
    pub fn write_buffer(&mut self, pix: &PixelBuffer) -> TestResult<()> {
        self.index += 1;
        if !self.display() {
            return Ok(());
        }

        let dir = regout_dir();
        fs::create_dir_all(&dir).map_err(|source| TestError::DirectoryCreate {
            path: dir.clone(),
            source,
        })?;

        let local_path = format!("{}/{}.{:02}.ppm", dir, self.test_name, self.index);
        write_image(pix, &local_path, ImageFormat::Ppm).map_err(|source| {
            TestError::ImageWrite {
                path: local_path.clone(),
                source,
            }
        })?;
        eprintln!("Wrote: {}", local_path);
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
