//! Histogram enhancement regression test
//!
//! Tests contrast stretching and histogram equalization.
//!
//! Run with:
//! ```
//! cargo test -p pixlab-color --test enhance_reg
//! ```

use pixlab_color::{equalize_histogram, stretch_histogram};
use pixlab_core::color::Channel;
use pixlab_test::{RegParams, synthetic};

#[test]
fn enhance_reg() {
    let mut rp = RegParams::new("enhance");

    // A full-range ramp is already stretched
    let full = synthetic::ramp(256, 4, 0, 255);
    let stretched = stretch_histogram(&full).unwrap();
    rp.compare_buffers(&full, &stretched);

    // A narrow ramp gets stretched to [0, 255] in every channel
    let narrow = synthetic::ramp(64, 8, 60, 180);
    let stretched = stretch_histogram(&narrow).unwrap();
    for ch in Channel::RGB {
        let (lo, hi) = stretched.channel_range(ch);
        rp.compare_values(0.0, lo as f64, 0.0);
        rp.compare_values(255.0, hi as f64, 0.0);
    }
    rp.write_buffer(&stretched).unwrap();

    // Stretching is monotonic along the ramp
    let row: Vec<u8> = (0..64).map(|x| stretched.get_rgba(x, 0).unwrap()[0]).collect();
    let monotonic = row.windows(2).all(|w| w[0] <= w[1]);
    rp.check(monotonic, "stretch is monotonic");

    // Equalizing twice does not change the channel range
    let noisy = synthetic::noise(40, 30, 3);
    let once = equalize_histogram(&noisy).unwrap();
    let twice = equalize_histogram(&once).unwrap();
    for ch in Channel::RGB {
        let r1 = once.channel_range(ch);
        let r2 = twice.channel_range(ch);
        rp.compare_values(r1.0 as f64, r2.0 as f64, 0.0);
        rp.compare_values(r1.1 as f64, r2.1 as f64, 0.0);
        // the brightest level always maps to 255
        rp.compare_values(255.0, r1.1 as f64, 0.0);
    }
    rp.write_buffer(&once).unwrap();

    // Uniform images pass through both operations unchanged
    let flat = synthetic::uniform(10, 10, 77);
    rp.compare_buffers(&flat, &stretch_histogram(&flat).unwrap());
    rp.compare_buffers(&flat, &equalize_histogram(&flat).unwrap());

    assert!(rp.cleanup(), "enhance regression test failed");
}
