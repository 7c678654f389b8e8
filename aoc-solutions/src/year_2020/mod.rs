pub mod day_11;
pub mod day_17;
pub mod day_23;
