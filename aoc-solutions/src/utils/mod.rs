//! Helpers shared by several days

pub mod assembunny;
pub mod dp_cache;
pub mod grid;
pub mod math;
pub mod point;
