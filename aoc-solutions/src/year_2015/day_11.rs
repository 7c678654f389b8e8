use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 11, tags = ["2015", "strings"])]
pub struct Solver;

const BANNED: [u8; 3] = [b'i', b'o', b'l'];

#[derive(Debug)]
pub struct SharedData {
    password: Vec<u8>,
    first: Option<Vec<u8>>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let password = input.trim().as_bytes().to_vec();
        if password.is_empty() || !password.iter().all(u8::is_ascii_lowercase) {
            return Err(ParseError::InvalidFormat(format!(
                "password must be lowercase letters, got {:?}",
                input.trim()
            )));
        }
        Ok(SharedData {
            password,
            first: None,
        })
    }
}

fn has_straight(password: &[u8]) -> bool {
    password
        .windows(3)
        .any(|w| w[0] + 1 == w[1] && w[1] + 1 == w[2])
}

/// Two pairs of doubled letters that do not overlap
fn has_two_pairs(password: &[u8]) -> bool {
    let mut pairs = 0;
    let mut i = 0;
    while i + 1 < password.len() {
        if password[i] == password[i + 1] {
            pairs += 1;
            i += 2;
        } else {
            i += 1;
        }
    }
    pairs >= 2
}

fn is_valid(password: &[u8]) -> bool {
    !password.iter().any(|c| BANNED.contains(c)) && has_straight(password) && has_two_pairs(password)
}

/// Next candidate in base-26 order, skipping every password containing a
/// banned letter
fn increment(password: &mut [u8]) {
    if let Some(pos) = password.iter().position(|c| BANNED.contains(c)) {
        password[pos] += 1;
        password[pos + 1..].fill(b'a');
        return;
    }
    for c in password.iter_mut().rev() {
        if *c == b'z' {
            *c = b'a';
            continue;
        }
        *c += 1;
        if BANNED.contains(c) {
            *c += 1;
        }
        return;
    }
}

fn next_valid(password: &[u8]) -> Vec<u8> {
    let mut candidate = password.to_vec();
    loop {
        increment(&mut candidate);
        if is_valid(&candidate) {
            return candidate;
        }
    }
}

fn first(shared: &mut SharedData) -> &[u8] {
    shared.first.get_or_insert_with(|| next_valid(&shared.password))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(String::from_utf8_lossy(first(shared)).into_owned())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(String::from_utf8_lossy(&next_valid(first(shared))).into_owned())
    }
}
