use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2021, day = 2, tags = ["submarine", "easy"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Forward(i64),
    Down(i64),
    Up(i64),
}

fn parse_command(line: &str) -> anyhow::Result<Command> {
    let (word, amount) = line
        .split_once(' ')
        .ok_or_else(|| anyhow!("expected `<direction> <amount>`, got {:?}", line))?;
    let amount: i64 = amount.trim().parse()?;
    if amount < 0 {
        bail!("negative amount {}", amount);
    }
    Ok(match word {
        "forward" => Command::Forward(amount),
        "down" => Command::Down(amount),
        "up" => Command::Up(amount),
        other => bail!("unknown direction {:?}", other),
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Command>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                parse_command(line.trim())
                    .map_err(|e| ParseError::at_line(line_idx + 1, e.to_string()))
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (horizontal, depth) =
            shared
                .iter()
                .fold((0i64, 0i64), |(horizontal, depth), command| match *command {
                    Command::Forward(n) => (horizontal + n, depth),
                    Command::Down(n) => (horizontal, depth + n),
                    Command::Up(n) => (horizontal, depth - n),
                });
        Ok((horizontal * depth).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (horizontal, depth, _) = shared.iter().fold(
            (0i64, 0i64, 0i64),
            |(horizontal, depth, aim), command| match *command {
                Command::Forward(n) => (horizontal + n, depth + aim * n, aim),
                Command::Down(n) => (horizontal, depth, aim + n),
                Command::Up(n) => (horizontal, depth, aim - n),
            },
        );
        Ok((horizontal * depth).to_string())
    }
}
