pub mod board;
pub mod camera;
pub mod config;
pub mod events;
pub mod frame;
pub mod io;
pub mod random;
pub mod rules;
pub mod world;

/// Board and screen coordinates. Signed, so that cells off the board have an address too.
pub type CellOffset = i32;
