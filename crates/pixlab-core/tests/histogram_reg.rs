//! Histogram regression test
//!
//! Tests channel and luma histograms, the CDF and range statistics on
//! synthetic images.
//!
//! Run with:
//! ```
//! cargo test -p pixlab-core --test histogram_reg
//! ```

use pixlab_core::color::Channel;
use pixlab_core::{BorderPolicy, ColorHistogram, Histogram};
use pixlab_test::{RegParams, synthetic};

#[test]
fn histogram_reg() {
    let mut rp = RegParams::new("histogram");

    // Full ramp: every level appears once per row
    let ramp = synthetic::ramp(256, 3, 0, 255);
    let hist = Histogram::from_channel(&ramp, Channel::Red);
    rp.compare_values(768.0, hist.total() as f64, 0.0);
    rp.compare_values(3.0, hist.count(0) as f64, 0.0);
    rp.compare_values(3.0, hist.count(255) as f64, 0.0);
    rp.compare_values(127.5, hist.mean().unwrap(), 1e-9);

    let cdf = hist.cdf();
    rp.compare_values(3.0, cdf[0] as f64, 0.0);
    rp.compare_values(384.0, cdf[127] as f64, 0.0);
    rp.compare_values(768.0, cdf[255] as f64, 0.0);

    // Gray pixels have luma equal to their value
    let luma = Histogram::from_luma(&ramp);
    rp.check(luma == hist, "gray luma matches red channel");

    // Checkerboard has exactly two levels per channel
    let board = synthetic::checkerboard(16, 16, 2, 40, 210);
    let color = ColorHistogram::from_buffer(&board);
    for ch in Channel::RGB {
        let h = color.channel(ch).unwrap();
        rp.compare_values(40.0, h.min_value().unwrap() as f64, 0.0);
        rp.compare_values(210.0, h.max_value().unwrap() as f64, 0.0);
        rp.compare_values(128.0, h.count(40) as f64, 0.0);
        rp.compare_values(40.0, h.mean_in_range(0, 100).unwrap(), 0.0);
    }
    rp.check(color.channel(Channel::Alpha).is_none(), "no alpha histogram");
    rp.check(
        color.red.mean_in_range(41, 209).is_none(),
        "empty range has no mean",
    );

    // Border addressing on a 5-wide axis
    let cases = [
        (BorderPolicy::Clamp, -2, Some(0)),
        (BorderPolicy::Clamp, 7, Some(4)),
        (BorderPolicy::Wrap, -1, Some(4)),
        (BorderPolicy::Wrap, 6, Some(1)),
        (BorderPolicy::Ignore, -1, None),
        (BorderPolicy::Ignore, 3, Some(3)),
    ];
    for (policy, coord, expected) in cases {
        let got = policy.resolve(coord, 5);
        rp.check(got == expected, "border resolution");
    }

    assert!(rp.cleanup(), "histogram regression test failed");
}
