/// Tab Porter - Chrome Extension for exporting and re-opening tabs
/// Built with Rust + WASM + Yew

pub mod codec;
pub mod error;
pub mod export;
pub mod host;
pub mod import;
pub mod preferences;
pub mod tab_data;
pub mod ui;

use wasm_bindgen::prelude::*;

pub use error::{Result, TabPorterError};
pub use tab_data::{ExportDocument, ExportScope, ExportedTabEntry, PlacementMode, TabRecord};

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
