//! Hit-miss transform regression test
//!
//! Run with:
//! ```
//! cargo test -p pixlab-morph --test hitmiss_reg
//! ```

use pixlab_core::PixelBuffer;
use pixlab_morph::{Sel, hit_miss_transform};
use pixlab_test::{RegParams, synthetic};

#[test]
fn hitmiss_reg() {
    let mut rp = RegParams::new("hitmiss");

    // One isolated dot, one 3x3 block and one horizontal bar
    let pixs = synthetic::binary_rects(24, 16, &[(3, 3, 1, 1), (10, 6, 3, 3), (16, 12, 6, 1)]);

    // Isolated point detector
    let isolated = Sel::from_string("ooo\noxo\nooo").unwrap();
    let out = hit_miss_transform(&pixs, &isolated).unwrap();
    rp.compare_values(1.0, synthetic::foreground_area(&out) as f64, 0.0);
    rp.compare_values(255.0, out.get_rgba(3, 3).unwrap()[0] as f64, 0.0);
    rp.write_buffer(&out).unwrap();

    // Upper-left corner detector: hit at origin, misses above and left
    let corner = Sel::from_string("oo.\noXx\n.x.").unwrap();
    let out = hit_miss_transform(&pixs, &corner).unwrap();
    rp.compare_values(255.0, out.get_rgba(10, 6).unwrap()[0] as f64, 0.0);
    // The bar has nothing below its left end
    rp.compare_values(0.0, out.get_rgba(16, 12).unwrap()[0] as f64, 0.0);
    rp.compare_values(0.0, out.get_rgba(11, 7).unwrap()[0] as f64, 0.0);
    rp.write_buffer(&out).unwrap();

    // Output is always opaque black or white
    let binary = out
        .pixels()
        .all(|px| px == [0, 0, 0, 255] || px == [255, 255, 255, 255]);
    rp.check(binary, "output is black and white");

    // Samples at or below 128 are background
    let dim = PixelBuffer::new_filled(3, 3, [128, 255, 255, 255]).unwrap();
    let hit = Sel::create_square(1).unwrap();
    let out = hit_miss_transform(&dim, &hit).unwrap();
    rp.compare_values(0.0, synthetic::foreground_area(&out) as f64, 0.0);

    // A colored pixel with one channel at or below 128 is neither
    // foreground nor background
    let mut colored = PixelBuffer::new(5, 5).unwrap();
    colored.set_rgba(2, 2, [255, 255, 255, 255]).unwrap();
    let out = hit_miss_transform(&colored, &isolated).unwrap();
    rp.compare_values(1.0, synthetic::foreground_area(&out) as f64, 0.0);
    colored.set_rgba(1, 2, [200, 200, 50, 255]).unwrap();
    let out = hit_miss_transform(&colored, &isolated).unwrap();
    rp.compare_values(0.0, synthetic::foreground_area(&out) as f64, 0.0);
    colored.set_rgba(1, 2, [100, 128, 20, 255]).unwrap();
    let out = hit_miss_transform(&colored, &isolated).unwrap();
    rp.compare_values(1.0, synthetic::foreground_area(&out) as f64, 0.0);
    colored.set_rgba(2, 2, [255, 90, 255, 255]).unwrap();
    let out = hit_miss_transform(&colored, &isolated).unwrap();
    rp.compare_values(0.0, synthetic::foreground_area(&out) as f64, 0.0);

    assert!(rp.cleanup(), "hitmiss regression test failed");
}
