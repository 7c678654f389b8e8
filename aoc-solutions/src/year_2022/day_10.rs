use anyhow::{Context, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 10, tags = ["2022", "cpu", "image"])]
pub struct Solver;

const SCREEN_WIDTH: usize = 40;
const SCREEN_HEIGHT: usize = 6;
const SAMPLE_CYCLES: [usize; 6] = [20, 60, 100, 140, 180, 220];

/// Value of X during each cycle, the first cycle at index 0
fn register_trace(input: &str) -> anyhow::Result<Vec<i64>> {
    let mut x = 1;
    let mut trace = Vec::new();
    for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words[..] {
            ["noop"] => trace.push(x),
            ["addx", value] => {
                trace.extend([x, x]);
                x += value
                    .parse::<i64>()
                    .with_context(|| format!("invalid addx operand {value:?}"))?;
            }
            _ => bail!("unknown instruction {line:?}"),
        }
    }
    Ok(trace)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<i64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        register_trace(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut total = 0;
        for cycle in SAMPLE_CYCLES {
            let x = shared
                .get(cycle - 1)
                .ok_or_else(|| SolveError::failed(format!("program ends before cycle {cycle}")))?;
            total += cycle as i64 * x;
        }
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let pixels = SCREEN_WIDTH * SCREEN_HEIGHT;
        if shared.len() < pixels {
            return Err(SolveError::failed("program ends before the screen is drawn"));
        }
        // the sprite is three pixels wide, centred on X
        let rows: Vec<String> = shared[..pixels]
            .chunks(SCREEN_WIDTH)
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(column, &x)| if (x - column as i64).abs() <= 1 { '#' } else { '.' })
                    .collect()
            })
            .collect();
        Ok(rows.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
addx 15
addx -11
addx 6
addx -3
addx 5
addx -1
addx -8
addx 13
addx 4
noop
addx -1
addx 5
addx -1
addx 5
addx -1
addx 5
addx -1
addx 5
addx -1
addx -35
addx 1
addx 24
addx -19
addx 1
addx 16
addx -11
noop
noop
addx 21
addx -15
noop
noop
addx -3
addx 9
addx 1
addx -3
addx 8
addx 1
addx 5
noop
noop
noop
noop
noop
addx -36
noop
addx 1
addx 7
noop
noop
noop
addx 2
addx 6
noop
noop
noop
noop
noop
addx 1
noop
noop
addx 7
addx 1
noop
addx -13
addx 13
addx 7
noop
addx 1
addx -33
noop
noop
noop
addx 2
noop
noop
noop
addx 8
noop
addx -1
addx 2
addx 1
noop
addx 17
addx -9
addx 1
addx 1
addx -3
addx 11
noop
noop
addx 1
noop
addx 1
noop
noop
addx -13
addx -19
addx 1
addx 3
addx 26
addx -30
addx 12
addx -1
addx 3
addx 1
noop
noop
noop
addx -9
addx 18
addx 1
addx 2
noop
noop
addx 9
noop
noop
noop
addx -1
addx 2
addx -37
addx 1
addx 3
noop
addx 15
addx -21
addx 22
addx -6
addx 1
noop
addx 2
addx 1
noop
addx -10
noop
noop
addx 20
addx 1
addx 2
addx 2
addx -6
addx -11
noop
noop
noop";

    #[test]
    fn test_small_program() {
        assert_eq!(register_trace("noop\naddx 3\naddx -5").unwrap(), vec![1, 1, 1, 4, 4]);
        assert!(register_trace("addx x").is_err());
        assert!(register_trace("mul 2").is_err());
    }

    #[test]
    fn test_part1() {
        let trace = register_trace(EXAMPLE).unwrap();
        let strengths: Vec<i64> = SAMPLE_CYCLES.iter().map(|&c| c as i64 * trace[c - 1]).collect();
        assert_eq!(strengths, [420, 1140, 1800, 2940, 2880, 3960]);
        let mut trace = trace;
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut trace).unwrap(), "13140");
    }

    #[test]
    fn test_part2() {
        let mut trace = Solver::parse(EXAMPLE).unwrap();
        let expected = [
            "##..##..##..##..##..##..##..##..##..##..",
            "###...###...###...###...###...###...###.",
            "####....####....####....####....####....",
            "#####.....#####.....#####.....#####.....",
            "######......######......######......####",
            "#######.......#######.......#######.....",
        ];
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut trace).unwrap(), expected.join("\n"));
    }

    #[test]
    fn test_short_program() {
        let mut trace = Solver::parse("noop").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut trace).is_err());
        assert!(<Solver as PartSolver<2>>::solve(&mut trace).is_err());
    }
}
