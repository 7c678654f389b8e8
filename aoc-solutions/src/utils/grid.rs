//! Dense rectangular grids parsed from puzzle text.

use anyhow::{anyhow, bail};

use super::point::Point;

/// Row-major grid of cells
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Build a grid from text, one row per line, mapping each byte with `cell`
    ///
    /// Every row must have the same width.
    pub fn parse(input: &str, mut cell: impl FnMut(u8) -> anyhow::Result<T>) -> anyhow::Result<Self> {
        let mut cells = Vec::with_capacity(input.len());
        let mut width = None;
        let mut height = 0;

        for (row, line) in input.lines().enumerate() {
            let line = line.trim_end();
            match width {
                None => width = Some(line.len()),
                Some(w) if w != line.len() => {
                    bail!("(line {}) expected {} cells, found {}", row + 1, w, line.len())
                }
                Some(_) => {}
            }
            for byte in line.bytes() {
                cells.push(cell(byte).map_err(|e| anyhow!("(line {}) {}", row + 1, e))?);
            }
            height += 1;
        }

        let width = width.ok_or_else(|| anyhow!("empty grid"))?;
        if width == 0 {
            bail!("empty grid");
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, p: Point) -> Option<usize> {
        let x = usize::try_from(p.x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(p.y).ok().filter(|&y| y < self.height)?;
        Some(y * self.width + x)
    }

    pub fn contains(&self, p: Point) -> bool {
        self.index(p).is_some()
    }

    pub fn get(&self, p: Point) -> Option<&T> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// Overwrite a cell; returns `false` when `p` is outside the grid
    pub fn set(&mut self, p: Point, value: T) -> bool {
        match self.index(p) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// Every position, row by row
    pub fn points(&self) -> impl Iterator<Item = Point> + use<T> {
        let (width, height) = (self.width as i64, self.height as i64);
        (0..height).flat_map(move |y| (0..width).map(move |x| Point::new(x, y)))
    }

    /// Cells with their positions, row by row
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> {
        self.points().zip(self.cells.iter())
    }

    /// Values of the in-bounds cells among the eight neighbours of `p`
    pub fn neighbors8(&self, p: Point) -> impl Iterator<Item = &T> {
        p.neighbors8().filter_map(|n| self.get(n))
    }

    /// Number of cells matching `pred`
    pub fn count(&self, pred: impl Fn(&T) -> bool) -> usize {
        self.cells.iter().filter(|c| pred(c)).count()
    }

    /// A grid of the same shape with every cell mapped by position
    pub fn map(&self, mut f: impl FnMut(Point, &T) -> T) -> Self {
        let cells = self.iter().map(|(p, c)| f(p, c)).collect();
        Self {
            width: self.width,
            height: self.height,
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lights(input: &str) -> Grid<bool> {
        Grid::parse(input, |b| match b {
            b'#' => Ok(true),
            b'.' => Ok(false),
            other => bail!("unexpected {:?}", other as char),
        })
        .unwrap()
    }

    #[test]
    fn test_parse_and_lookup() {
        let grid = lights(".#.\n..#\n###\n");
        assert_eq!((grid.width(), grid.height()), (3, 3));
        assert_eq!(grid.get(Point::new(1, 0)), Some(&true));
        assert_eq!(grid.get(Point::new(0, 1)), Some(&false));
        assert_eq!(grid.get(Point::new(3, 0)), None);
        assert_eq!(grid.get(Point::new(0, -1)), None);
        assert_eq!(grid.count(|&on| on), 5);
    }

    #[test]
    fn test_neighbours_clip_at_edges() {
        let grid = lights("##\n##");
        assert_eq!(grid.neighbors8(Point::new(0, 0)).count(), 3);
        let grid = lights("###\n###\n###");
        assert_eq!(grid.neighbors8(Point::new(1, 1)).count(), 8);
        assert_eq!(grid.neighbors8(Point::new(2, 1)).count(), 5);
    }

    #[test]
    fn test_set_and_map() {
        let mut grid = lights("..\n..");
        assert!(grid.set(Point::new(1, 1), true));
        assert!(!grid.set(Point::new(2, 1), true));
        let flipped = grid.map(|_, &on| !on);
        assert_eq!(flipped.count(|&on| on), 3);
        assert_eq!(flipped.iter().find(|(_, on)| !**on).map(|(p, _)| p), Some(Point::new(1, 1)));
    }

    #[test]
    fn test_ragged_or_bad_input_rejected() {
        assert!(Grid::parse("##\n#", |_| Ok(())).is_err());
        assert!(Grid::parse("", |_| Ok(())).is_err());
        let err = Grid::parse("#.\n#x", |b| match b {
            b'#' | b'.' => Ok(b),
            other => bail!("unexpected {:?}", other as char),
        })
        .unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
