//! Shell command grammar
//!
//! One command per line, case-insensitive verb first:
//! ```text
//! PUT <key> <value...>
//! GET <key>
//! STATE | STATS | RESET | HELP | QUIT | EXIT
//! CAPACITY <n>
//! ```
//! Keys are signed integers; a PUT value is the rest of the line and may
//! contain spaces.

use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{digit1, i64 as parse_i64, multispace0, multispace1},
    combinator::{all_consuming, map_res, rest, value, verify},
    sequence::delimited,
    IResult,
};

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Look up a key
    Get {
        /// Key to look up
        key: i64,
    },
    /// Insert or update an entry
    Put {
        /// Key to store under
        key: i64,
        /// Value text, trailing whitespace stripped
        value: String,
    },
    /// Render the entries, most recent first
    State,
    /// Render the session counters
    Stats,
    /// Clear all entries
    Reset,
    /// Replace the cache with an empty one of a new capacity
    Capacity {
        /// Requested capacity; zero is rejected later, by the engine
        capacity: usize,
    },
    /// Show the command list
    Help,
    /// Leave the shell
    Quit,
}

/// Parse one input line into a [`Command`].
///
/// Errors are user-facing messages, already phrased for the prompt.
pub fn parse(line: &str) -> Result<Command, String> {
    match command(line) {
        Ok((_, cmd)) => Ok(cmd),
        Err(_) => Err(diagnose(line)),
    }
}

fn command(input: &str) -> IResult<&str, Command> {
    all_consuming(delimited(
        multispace0,
        alt((put_command, get_command, capacity_command, bare_command)),
        multispace0,
    ))(input)
}

fn get_command(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag_no_case("GET")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, key) = parse_i64(input)?;
    Ok((input, Command::Get { key }))
}

fn put_command(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag_no_case("PUT")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, key) = parse_i64(input)?;
    let (input, _) = multispace1(input)?;
    let (input, raw) = verify(rest, |s: &str| !s.trim().is_empty())(input)?;
    Ok((
        input,
        Command::Put {
            key,
            value: raw.trim_end().to_string(),
        },
    ))
}

fn capacity_command(input: &str) -> IResult<&str, Command> {
    let (input, _) = tag_no_case("CAPACITY")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, capacity) = map_res(digit1, str::parse)(input)?;
    Ok((input, Command::Capacity { capacity }))
}

fn bare_command(input: &str) -> IResult<&str, Command> {
    alt((
        value(Command::State, tag_no_case("STATE")),
        value(Command::Stats, tag_no_case("STATS")),
        value(Command::Reset, tag_no_case("RESET")),
        value(Command::Help, tag_no_case("HELP")),
        value(Command::Quit, tag_no_case("QUIT")),
        value(Command::Quit, tag_no_case("EXIT")),
    ))(input)
}

fn diagnose(line: &str) -> String {
    let verb = line.split_whitespace().next().unwrap_or("");
    match verb.to_ascii_uppercase().as_str() {
        "" => "empty command; type HELP for the command list".to_string(),
        "GET" => "GET needs a numeric key, e.g. GET 42".to_string(),
        "PUT" => "PUT needs a numeric key and a non-empty value, e.g. PUT 42 apple".to_string(),
        "CAPACITY" => "CAPACITY needs a positive whole number, e.g. CAPACITY 4".to_string(),
        "STATE" | "STATS" | "RESET" | "HELP" | "QUIT" | "EXIT" => {
            format!("{} takes no arguments", verb.to_ascii_uppercase())
        }
        _ => format!("unknown command '{}'; type HELP for the command list", verb),
    }
}
