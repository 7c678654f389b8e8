use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 23, tags = ["2020", "simulation", "linked-list"])]
pub struct Solver;

const MILLION: u32 = 1_000_000;

impl AocParser for Solver {
    /// Starting cup labels, clockwise
    type SharedData<'a> = Vec<u32>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let labels = input
            .trim()
            .chars()
            .map(|c| c.to_digit(10).ok_or_else(|| ParseError::InvalidFormat(format!("invalid cup {c:?}"))))
            .collect::<Result<Vec<_>, _>>()?;
        let mut sorted = labels.clone();
        sorted.sort_unstable();
        if labels.len() < 5 || !sorted.iter().copied().eq(1..=labels.len() as u32) {
            return Err(ParseError::InvalidFormat(
                "cups must be labelled 1..=n for some n of at least 5".into(),
            ));
        }
        Ok(labels)
    }
}

/// Circle of cups stored as `next[label]`, the label clockwise of each cup
struct Cups {
    next: Vec<u32>,
    current: u32,
}

impl Cups {
    /// Start from `labels`, followed by every label up to `total`
    fn new(labels: &[u32], total: u32) -> Self {
        let order: Vec<u32> = labels
            .iter()
            .copied()
            .chain(labels.len() as u32 + 1..=total)
            .collect();
        let mut next = vec![0; total as usize + 1];
        for (i, &cup) in order.iter().enumerate() {
            next[cup as usize] = order[(i + 1) % order.len()];
        }
        Self {
            next,
            current: order[0],
        }
    }

    fn after(&self, cup: u32) -> u32 {
        self.next[cup as usize]
    }

    fn play(&mut self, moves: usize) {
        let total = self.next.len() as u32 - 1;
        for _ in 0..moves {
            let a = self.after(self.current);
            let b = self.after(a);
            let c = self.after(b);

            let mut dest = self.current;
            loop {
                dest = if dest == 1 { total } else { dest - 1 };
                if dest != a && dest != b && dest != c {
                    break;
                }
            }

            self.next[self.current as usize] = self.after(c);
            self.next[c as usize] = self.after(dest);
            self.next[dest as usize] = a;
            self.current = self.after(self.current);
        }
    }

    /// Labels clockwise after cup 1
    fn labels_after_one(&self) -> String {
        std::iter::successors(Some(self.after(1)), |&cup| Some(self.after(cup)))
            .take_while(|&cup| cup != 1)
            .map(|cup| cup.to_string())
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut cups = Cups::new(shared, shared.len() as u32);
        cups.play(100);
        Ok(cups.labels_after_one())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut cups = Cups::new(shared, MILLION);
        cups.play(10 * MILLION as usize);
        let first = cups.after(1);
        let second = cups.after(first);
        Ok((u64::from(first) * u64::from(second)).to_string())
    }
}
