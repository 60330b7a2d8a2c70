//! The classic portfolio backdrop with default tuning.
//!
//! Run with: cargo run --example basic

use driftnet::prelude::*;

fn main() -> Result<(), BackdropError> {
    Backdrop::new()
        .with_title("driftnet - basic")
        .with_size(1280, 720)
        .run()
}
