use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 8, tags = ["2019", "image"])]
pub struct Solver;

const WIDTH: usize = 25;
const HEIGHT: usize = 6;

const BLACK: u8 = 0;
const WHITE: u8 = 1;
const TRANSPARENT: u8 = 2;

/// Space Image Format picture, one flat pixel vector per layer
#[derive(Debug, Clone)]
pub struct Image {
    width: usize,
    layers: Vec<Vec<u8>>,
}

impl Image {
    fn parse(input: &str, width: usize, height: usize) -> Result<Self, ParseError> {
        let pixels = input
            .trim()
            .bytes()
            .map(|b| match b {
                b'0'..=b'2' => Ok(b - b'0'),
                other => Err(ParseError::InvalidFormat(format!(
                    "invalid pixel {:?}",
                    other as char
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let size = width * height;
        if pixels.is_empty() || pixels.len() % size != 0 {
            return Err(ParseError::InvalidFormat(format!(
                "{} pixels do not fill {width}x{height} layers",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            layers: pixels.chunks(size).map(<[u8]>::to_vec).collect(),
        })
    }

    fn checksum(&self) -> Option<usize> {
        let count = |layer: &[u8], colour| layer.iter().filter(|&&p| p == colour).count();
        let layer = self.layers.iter().min_by_key(|layer| count(layer, BLACK))?;
        Some(count(layer, WHITE) * count(layer, TRANSPARENT))
    }

    /// Top-most opaque pixel of every position
    fn flatten(&self) -> Vec<u8> {
        let mut image = vec![TRANSPARENT; self.layers.first().map_or(0, Vec::len)];
        for layer in &self.layers {
            for (pixel, &below) in image.iter_mut().zip(layer) {
                if *pixel == TRANSPARENT {
                    *pixel = below;
                }
            }
        }
        image
    }

    fn render(&self) -> String {
        self.flatten()
            .chunks(self.width)
            .map(|row| {
                row.iter()
                    .map(|&p| if p == WHITE { '#' } else { '.' })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Image;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Image::parse(input, WIDTH, HEIGHT)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .checksum()
            .map(|n| n.to_string())
            .ok_or_else(|| SolveError::failed("image has no layers"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum() {
        let image = Image::parse("123456789012", 3, 2);
        // '3'..'9' are not SIF colours
        assert!(image.is_err());
        let image = Image::parse("122112000122", 3, 2).unwrap();
        assert_eq!(image.layers.len(), 2);
        // the first layer has no zeros: three ones and three twos
        assert_eq!(image.checksum(), Some(9));
    }

    #[test]
    fn test_render() {
        let image = Image::parse("0222112222120000", 2, 2).unwrap();
        assert_eq!(image.flatten(), vec![0, 1, 1, 0]);
        assert_eq!(image.render(), ".#\n#.");
    }

    #[test]
    fn test_layer_size_mismatch() {
        assert!(Image::parse("0222112", 2, 2).is_err());
        assert!(Solver::parse("").is_err());
    }
}
