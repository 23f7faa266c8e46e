//! Gate clustering and viewport fitting for check-in venue maps
//!
//! Turns a snapshot of gate records into render-ready cluster markers and a tile-map
//! viewport. Every call recomputes from scratch and performs no I/O.
pub mod layout;

pub use layout::*;
