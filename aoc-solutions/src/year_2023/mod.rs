pub mod day_24;
