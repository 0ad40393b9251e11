//! Droid Roast core crate.
//!
//! A small browser widget that roasts robots: it glues a random adjective to
//! a random noun, lets the user keep favorites, and tracks a generation
//! streak shown next to a pie chart. Favorites and statistics live in
//! `localStorage` under the keys `favorites` and `stats`.
//!
//! Everything except the browser glue in `widget` is plain Rust and runs natively, so
//! the roaster state machine ([`roaster::Roaster`]) can be driven from tests
//! with an in-memory store ([`storage::MemoryStore`]) and a seeded rng.

use wasm_bindgen::prelude::*;

pub mod chart;
pub mod config;
pub mod error;
pub mod favorites;
pub mod logging;
pub mod phrase;
pub mod roaster;
pub mod stats;
pub mod storage;
mod widget;

pub use config::RoasterConfig;
pub use error::{Error, Result};
pub use favorites::Favorites;
pub use phrase::{Phrase, PhraseGenerator, WordList};
pub use roaster::{Action, Outcome, Roaster, View};
pub use stats::Statistics;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Word lists
// Adjectives never contain spaces; nouns may.
// -----------------------------------------------------------------------------

pub const ADJECTIVES: &[&str] = &[
    "Rusty", "Jammed-up", "Overclocked", "Scrapheap", "Grease-soaked", "Wobbly",
    "Faulty", "Oil-leaking", "Sparking", "Misfiring", "Cheaply-built", "Clogged",
];

pub const NOUNS: &[&str] = &[
    "Gear grinder", "Circuit-sniffer", "Wireback", "Servo-brain", "Bolt muncher",
    "Oil slurper", "Scrap pile", "Toaster", "Tin can", "Metalhead", "Clank-stack", "Fuse-blower",
];

/// Roast line shown before anything has been generated. Never saved.
pub const PLACEHOLDER: &str = "Click below to roast a clanker!";

/// Roast line shown while a rapid-fire batch is on screen.
pub const BATCH_READY: &str = "Batch of insults ready!";

pub const BATCH_SIZE: usize = 10;

// -----------------------------------------------------------------------------
// Unified entrypoints
// -----------------------------------------------------------------------------

/// Mounts the widget with the default configuration.
#[wasm_bindgen]
pub fn start_roaster() -> std::result::Result<(), JsValue> {
    widget::mount(RoasterConfig::default())?;
    Ok(())
}

/// Mounts the widget with a JSON [`RoasterConfig`]; omitted fields keep their defaults.
#[wasm_bindgen]
pub fn start_roaster_with_config(config: &str) -> std::result::Result<(), JsValue> {
    let config = RoasterConfig::from_json(config)?;
    widget::mount(config)?;
    Ok(())
}
