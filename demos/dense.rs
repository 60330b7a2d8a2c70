//! A denser, warmer variant: more particles, amber hues, longer links.
//!
//! Run with: cargo run --example dense

use driftnet::color::hex;
use driftnet::prelude::*;

fn main() -> Result<(), BackdropError> {
    let config = FieldConfig::default()
        .with_density(8000.0)
        .with_link_radius(90.0)
        .with_hue_range(20.0, 60.0)
        .with_link_color(hex(0xea9e66));

    Backdrop::new()
        .with_title("driftnet - dense")
        .with_size(1280, 720)
        .with_seed(2024)
        .with_config(config)
        .run()
}
