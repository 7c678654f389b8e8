use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError, SolverPlugin,
    SolverRegistryBuilder,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2034, day = 24, tags = ["test", "combined"])]
struct Registered;

impl AocParser for Registered {
    type SharedData<'a> = Vec<i64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .map(|line| line.parse().map_err(ParseError::invalid))
            .collect()
    }
}

impl PartSolver<1> for Registered {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i64>().to_string())
    }
}

impl PartSolver<2> for Registered {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().product::<i64>().to_string())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2034, day = 25)]
struct Untagged;

impl AocParser for Untagged {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input)
    }
}

impl PartSolver<1> for Untagged {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

fn plugin(year: u16, day: u8) -> Option<&'static SolverPlugin> {
    aoc_solver::inventory::iter::<SolverPlugin>().find(|p| p.year == year && p.day == day)
}

#[test]
fn test_plugin_is_submitted() {
    let registered = plugin(2034, 24).expect("plugin submitted");
    assert_eq!(registered.tags, &["test", "combined"]);
    assert_eq!(registered.solver.parts(), 2);

    let untagged = plugin(2034, 25).expect("plugin submitted");
    assert!(untagged.tags.is_empty());
    assert_eq!(untagged.solver.parts(), 1);
}

#[test]
fn test_registered_solver_runs() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .expect("no duplicate plugins")
        .build();

    let mut solver = registry.create_solver(2034, 24, "5\n6\n7").unwrap();
    assert_eq!(solver.parts(), 2);
    assert_eq!(solver.solve(1).unwrap().answer, "18");
    assert_eq!(solver.solve(2).unwrap().answer, "210");
}

#[test]
fn test_filtered_registration_by_tag() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|p| p.tags.contains(&"combined"))
        .unwrap()
        .build();

    assert!(registry.storage().contains(2034, 24));
    assert!(!registry.storage().contains(2034, 25));
}
