//! Threshold regression test
//!
//! Tests manual, percent-black and iterative threshold selection, and the
//! green coverage measure.
//!
//! Run with:
//! ```
//! cargo test -p pixlab-color --test threshold_reg
//! ```

use pixlab_color::{
    DEFAULT_GREEN_MARGIN, IterativeThresholdOptions, compute_iterative_threshold,
    compute_percent_black_threshold, green_coverage, threshold_manual, threshold_percent_black,
};
use pixlab_core::PixelBuffer;
use pixlab_test::{RegParams, synthetic};

fn black_count(pix: &PixelBuffer) -> usize {
    pix.pixels().filter(|px| px[..3] == [0, 0, 0]).count()
}

#[test]
fn threshold_reg() {
    let mut rp = RegParams::new("threshold");

    let ramp = synthetic::ramp(256, 2, 0, 255);
    let n = ramp.pixel_count() as f64;

    // Manual threshold splits the ramp at t
    let out = threshold_manual(&ramp, 127);
    rp.compare_values(0.0, out.get_rgba(127, 0).unwrap()[0] as f64, 0.0);
    rp.compare_values(255.0, out.get_rgba(128, 0).unwrap()[0] as f64, 0.0);
    rp.compare_values(n / 2.0, black_count(&out) as f64, 0.0);
    rp.write_buffer(&out).unwrap();

    // Percent black endpoints
    rp.compare_values(0.0, compute_percent_black_threshold(&ramp, 0.0).unwrap() as f64, 0.0);
    let (all_black, t) = threshold_percent_black(&ramp, 100.0).unwrap();
    rp.compare_values(255.0, t as f64, 0.0);
    rp.compare_values(n, black_count(&all_black) as f64, 0.0);

    // Quarter of the ramp is black
    let (quarter, t) = threshold_percent_black(&ramp, 25.0).unwrap();
    rp.compare_values(63.0, t as f64, 0.0);
    rp.compare_values(n / 4.0, black_count(&quarter) as f64, 0.0);

    // Iterative threshold on a bimodal checkerboard lands between the modes
    let board = synthetic::checkerboard(32, 32, 4, 30, 220);
    let t = compute_iterative_threshold(&board, &IterativeThresholdOptions::default());
    rp.compare_values(125.0, t as f64, 0.0);
    let binarized = threshold_manual(&board, t);
    rp.compare_values(512.0, black_count(&binarized) as f64, 0.0);

    // Colored pixels compare on exact luma
    let colored = PixelBuffer::from_rgb(
        4,
        1,
        &[128, 127, 127, 127, 127, 127, 1, 0, 0, 0, 0, 0],
    )
    .unwrap();
    let out = threshold_manual(&colored, 127);
    // luma 127.3 is above 127, luma 127 is not
    rp.compare_values(255.0, out.get_rgba(0, 0).unwrap()[0] as f64, 0.0);
    rp.compare_values(0.0, out.get_rgba(1, 0).unwrap()[0] as f64, 0.0);
    let (out, t) = threshold_percent_black(&colored, 0.0).unwrap();
    rp.compare_values(0.0, t as f64, 0.0);
    // only the true zero-luma pixel is black
    rp.compare_values(255.0, out.get_rgba(2, 0).unwrap()[0] as f64, 0.0);
    rp.compare_values(1.0, black_count(&out) as f64, 0.0);

    // Iterative means use unrounded luma: (0 + 226.95) / 2 rounds to 113
    let pair = PixelBuffer::from_rgb(2, 1, &[0, 0, 0, 255, 255, 0]).unwrap();
    let t = compute_iterative_threshold(&pair, &IterativeThresholdOptions::default());
    rp.compare_values(113.0, t as f64, 0.0);

    // Green coverage on a half-green image
    let mut field = synthetic::uniform(20, 10, 90);
    for y in 0..10 {
        for x in 0..10 {
            field.set_rgba(x, y, [40, 180, 60, 255]).unwrap();
        }
    }
    let cov = green_coverage(&field, DEFAULT_GREEN_MARGIN).unwrap();
    rp.compare_values(50.0, cov.percent, 1e-9);
    let transparent = cov.masked.pixels().filter(|px| px[3] == 0).count();
    rp.compare_values(100.0, transparent as f64, 0.0);

    assert!(rp.cleanup(), "threshold regression test failed");
}
