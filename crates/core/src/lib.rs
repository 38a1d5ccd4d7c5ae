//! Core game rules and state machines. Keep this crate free of IO and
//! platform concerns; the front-end owns timing, rendering, and the save file.

pub mod cards;
pub mod deck;
pub mod eval;
pub mod events;
pub mod ledger;
pub mod rng;
pub mod shop;
pub mod table;

pub use cards::*;
pub use deck::*;
pub use eval::*;
pub use events::*;
pub use ledger::*;
pub use rng::*;
pub use shop::*;
pub use table::*;
