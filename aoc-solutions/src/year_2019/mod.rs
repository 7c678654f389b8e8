pub mod day_1;
pub mod day_2;
pub mod day_3;
pub mod day_4;
pub mod day_6;
pub mod day_8;
pub mod day_10;
pub mod day_12;
pub mod day_14;
pub mod day_16;
pub mod day_18;
pub mod day_20;
pub mod day_22;
