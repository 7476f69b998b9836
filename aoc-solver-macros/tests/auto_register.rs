use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError,
    SolverRegistryBuilder,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 1, tags = ["fuel", "easy"])]
struct Fuel;

impl AocParser for Fuel {
    type SharedData<'a> = Vec<u64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .enumerate()
            .map(|(i, l)| l.trim().parse().map_err(|_| ParseError::at_line(i + 1, "bad mass")))
            .collect()
    }
}

fn fuel_for(mass: u64) -> u64 {
    (mass / 3).saturating_sub(2)
}

impl PartSolver<1> for Fuel {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(|&m| fuel_for(m)).sum::<u64>().to_string())
    }
}

impl PartSolver<2> for Fuel {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared
            .iter()
            .map(|&m| {
                std::iter::successors(Some(fuel_for(m)), |&f| (f > 0).then(|| fuel_for(f)))
                    .sum::<u64>()
            })
            .sum();
        Ok(total.to_string())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2019, day = 2)]
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

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2019, day = 3, tags = ["wires",])]
struct TrailingComma;

impl AocParser for TrailingComma {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input)
    }
}

impl PartSolver<1> for TrailingComma {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.lines().count().to_string())
    }
}

#[test]
fn test_tag_lists_are_parsed() {
    let tags_of = |day: u8| {
        aoc_solver::inventory::iter::<aoc_solver::SolverPlugin>()
            .find(|plugin| plugin.year == 2019 && plugin.day == day)
            .map(|plugin| plugin.tags)
    };

    assert_eq!(tags_of(1), Some(&["fuel", "easy"][..]));
    assert_eq!(tags_of(2), Some(&[][..]));
    assert_eq!(tags_of(3), Some(&["wires"][..]));
}

#[test]
fn test_plugins_are_collected() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();

    assert!(registry.storage().contains(2019, 1));
    assert!(registry.storage().contains(2019, 2));
    assert_eq!(registry.storage().get_info(2019, 2).unwrap().parts, 1);

    let mut solver = registry.create_solver(2019, 1, "1969\n100756").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "34237");
    assert_eq!(solver.solve(2).unwrap().answer, "51312");
}

#[test]
fn test_tag_filtering() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"fuel"))
        .unwrap()
        .build();

    assert!(registry.storage().contains(2019, 1));
    assert!(!registry.storage().contains(2019, 2));
}

#[test]
fn test_registering_plugins_twice_is_rejected() {
    let builder = SolverRegistryBuilder::new().register_all_plugins().unwrap();
    assert!(builder.register_all_plugins().is_err());
}
