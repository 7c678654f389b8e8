//! 2D integer points.

use std::ops::{Add, AddAssign, Mul, Sub};

/// A position or offset on an unbounded integer plane
///
/// `y` grows downwards, matching the row order of puzzle text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const ORIGIN: Point = Point::new(0, 0);
    pub const UP: Point = Point::new(0, -1);
    pub const DOWN: Point = Point::new(0, 1);
    pub const LEFT: Point = Point::new(-1, 0);
    pub const RIGHT: Point = Point::new(1, 0);

    /// The four orthogonal unit offsets
    pub const ORTHOGONAL: [Point; 4] = [Self::UP, Self::RIGHT, Self::DOWN, Self::LEFT];

    /// The eight unit offsets including diagonals
    pub const ALL_DIRECTIONS: [Point; 8] = [
        Point::new(-1, -1),
        Point::new(0, -1),
        Point::new(1, -1),
        Point::new(-1, 0),
        Point::new(1, 0),
        Point::new(-1, 1),
        Point::new(0, 1),
        Point::new(1, 1),
    ];

    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: Point) -> i64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Orthogonal neighbours
    pub fn neighbors4(self) -> impl Iterator<Item = Point> {
        Self::ORTHOGONAL.into_iter().map(move |d| self + d)
    }

    /// Orthogonal and diagonal neighbours
    pub fn neighbors8(self) -> impl Iterator<Item = Point> {
        Self::ALL_DIRECTIONS.into_iter().map(move |d| self + d)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i64> for Point {
    type Output = Point;

    fn mul(self, rhs: i64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_arithmetic() {
        let mut p = Point::new(2, 3);
        assert_eq!(p + Point::RIGHT, Point::new(3, 3));
        assert_eq!(p - Point::new(5, 5), Point::new(-3, -2));
        assert_eq!(Point::UP * 4, Point::new(0, -4));
        p += Point::DOWN;
        assert_eq!(p, Point::new(2, 4));
        assert_eq!(p.manhattan(Point::ORIGIN), 6);
    }

    #[test]
    fn test_neighbourhoods() {
        let p = Point::new(10, -10);
        let four: HashSet<_> = p.neighbors4().collect();
        let eight: HashSet<_> = p.neighbors8().collect();
        assert_eq!(four.len(), 4);
        assert_eq!(eight.len(), 8);
        assert!(four.is_subset(&eight));
        assert!(!eight.contains(&p));
        assert!(eight.iter().all(|n| (n.x - p.x).abs() <= 1 && (n.y - p.y).abs() <= 1));
    }
}
