use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Grid;
use crate::utils::point::Point;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 11, tags = ["2020", "grid", "cellular-automaton"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Floor,
    Empty,
    Occupied,
}

impl AocParser for Solver {
    type SharedData<'a> = Grid<Tile>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse(input.trim(), |b| match b {
            b'.' => Ok(Tile::Floor),
            b'L' => Ok(Tile::Empty),
            b'#' => Ok(Tile::Occupied),
            other => bail!("unexpected tile {:?}", other as char),
        })
        .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

/// First seat from `from` in direction `dir`, looking past floor when
/// `line_of_sight` is set
fn seat_towards(layout: &Grid<Tile>, from: Point, dir: Point, line_of_sight: bool) -> Option<Point> {
    let mut p = from + dir;
    while let Some(&tile) = layout.get(p) {
        if tile != Tile::Floor {
            return Some(p);
        }
        if !line_of_sight {
            return None;
        }
        p += dir;
    }
    None
}

/// Seats that influence each position, in row order
fn watched_seats(layout: &Grid<Tile>, line_of_sight: bool) -> Vec<Vec<Point>> {
    layout
        .points()
        .map(|p| {
            Point::ALL_DIRECTIONS
                .iter()
                .filter_map(|&dir| seat_towards(layout, p, dir, line_of_sight))
                .collect()
        })
        .collect()
}

/// Occupied seats once the layout stops changing
fn settle(layout: &Grid<Tile>, line_of_sight: bool, tolerance: usize) -> usize {
    let watched = watched_seats(layout, line_of_sight);
    let mut current = layout.clone();
    loop {
        let mut index = 0;
        let next = current.map(|_, &tile| {
            let occupied = watched[index]
                .iter()
                .filter(|&&p| current.get(p) == Some(&Tile::Occupied))
                .count();
            index += 1;
            match tile {
                Tile::Empty if occupied == 0 => Tile::Occupied,
                Tile::Occupied if occupied >= tolerance => Tile::Empty,
                unchanged => unchanged,
            }
        });
        if next == current {
            return current.count(|&t| t == Tile::Occupied);
        }
        current = next;
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(settle(shared, false, 4).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(settle(shared, true, 5).to_string())
    }
}
