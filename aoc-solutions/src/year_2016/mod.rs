pub mod day_12;
pub mod day_19;
pub mod day_25;
