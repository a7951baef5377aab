//! Structuring element regression test
//!
//! Tests Sel creation, string and JSON parsing, reflection, rotation, and
//! hit/miss offsets.
//!
//! Run with:
//! ```
//! cargo test -p pixlab-morph --test selio_reg -- --nocapture
//! ```

use pixlab_morph::{Sel, SelElement};
use pixlab_test::RegParams;

// 'x' = hit, 'o' = miss, ' ' = don't care, 'O' = miss + origin
const TEXTSEL1: &str = "x  oo \nx oOo \nx  o  \nx     \nxxxxxx";
// TEXTSEL1 mirrored left to right
const TEXTSEL2: &str = " oo  x\n oOo x\n  o  x\n     x\nxxxxxx";

#[test]
fn selio_reg() {
    let mut rp = RegParams::new("selio");

    let sel1 = Sel::from_string(TEXTSEL1).unwrap();
    rp.compare_values(6.0, sel1.width() as f64, 0.0);
    rp.compare_values(5.0, sel1.height() as f64, 0.0);
    rp.compare_values(3.0, sel1.origin_x() as f64, 0.0);
    rp.compare_values(1.0, sel1.origin_y() as f64, 0.0);
    rp.compare_values(10.0, sel1.hit_count() as f64, 0.0);
    rp.compare_values(6.0, sel1.miss_count() as f64, 0.0);

    let sel2 = Sel::from_string(TEXTSEL2).unwrap();
    rp.compare_values(sel1.hit_count() as f64, sel2.hit_count() as f64, 0.0);
    rp.compare_values(2.0, sel2.origin_x() as f64, 0.0);

    // Reflection twice is the identity
    let twice = sel1.reflect().reflect();
    rp.check(twice == sel1, "double reflection is identity");

    // Four quarter turns is the identity, one turn swaps the sides
    let quarter = sel1.rotate_orth(1);
    rp.compare_values(5.0, quarter.width() as f64, 0.0);
    rp.compare_values(6.0, quarter.height() as f64, 0.0);
    rp.check(sel1.rotate_orth(4) == sel1, "four quarter turns are identity");
    rp.compare_values(sel1.miss_count() as f64, quarter.miss_count() as f64, 0.0);

    // Line and diamond elements
    let horiz = Sel::create_horizontal(5).unwrap();
    let vert = Sel::create_vertical(5).unwrap();
    rp.check(horiz.rotate_orth(1) == vert, "quarter turn of a row is a column");
    let diamond = Sel::create_diamond(2).unwrap();
    rp.compare_values(13.0, diamond.hit_count() as f64, 0.0);
    rp.check(diamond.reflect() == diamond, "diamond is symmetric");

    // Offsets are relative to the origin
    let mut hits: Vec<_> = Sel::create_cross(3).unwrap().hit_offsets().collect();
    hits.sort();
    let expected = vec![(-1, 0), (0, -1), (0, 0), (0, 1), (1, 0)];
    rp.check(hits == expected, "cross hit offsets");

    // JSON and row builders agree
    let json = Sel::from_json("[[1, 1, 1], [0, 1, 0]]").unwrap();
    let rows = Sel::from_binary_rows(&[[1u8, 1, 1], [0, 1, 0]]).unwrap();
    rp.check(json == rows, "JSON and row builders agree");
    rp.compare_values(1.0, json.origin_x() as f64, 0.0);
    rp.compare_values(1.0, json.origin_y() as f64, 0.0);

    let tern = Sel::from_json("[[true, null], [false, true]]").unwrap();
    rp.check(tern.get_element(0, 1) == Some(SelElement::Miss), "false cell is a miss");

    // Malformed descriptions are rejected
    for bad in ["", "[[1, 2]]", "[[1], [1, 1]]", "not json"] {
        rp.check(Sel::from_json(bad).is_err(), "malformed JSON rejected");
    }
    rp.check(Sel::from_string("xX\nX.").is_err(), "two origins rejected");
    rp.check(Sel::from_string("x?x").is_err(), "unknown character rejected");

    assert!(rp.cleanup(), "selio regression test failed");
}
