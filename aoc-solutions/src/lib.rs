//! Advent of Code puzzle solutions: all of 2015 plus selected days of
//! 2016-2023
//!
//! Every day module holds a unit `Solver` deriving `AutoRegisterSolver`, so
//! linking this crate is enough for the runner to discover it.

pub mod utils;

pub mod year_2015;
pub mod year_2016;
pub mod year_2017;
pub mod year_2018;
pub mod year_2019;
pub mod year_2020;
pub mod year_2021;
pub mod year_2022;
pub mod year_2023;
