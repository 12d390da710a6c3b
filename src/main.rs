//! Aptamut - Aptamer Mutagenesis Tool
//!
//! A Rust application for enumerating or sampling substitution and deletion
//! variants of short DNA sequences for probe/primer design.

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod mutation;

use app::AptamutApp;

fn main() -> eframe::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 750.0])
            .with_min_inner_size([850.0, 550.0])
            .with_title("Aptamut"),
        ..Default::default()
    };

    eframe::run_native(
        "Aptamut",
        native_options,
        Box::new(|cc| Ok(Box::new(AptamutApp::new(cc)))),
    )
}
