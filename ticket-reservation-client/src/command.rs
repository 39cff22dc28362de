use std::str::FromStr;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};
use uuid::Uuid;

pub const MAX_SIMULATED_REQUESTS: u32 = 10_000;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub const HELP: &str = "\
Available commands:
  get                                  list events
  create <name> <YYYY-MM-DD> <total>   create event
  book <event_id> <count>              book tickets
  simulate <event_id> <requests>       send concurrent single ticket bookings (at most 10000)
  help                                 show this message
  exit                                 quit";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Get,
    Create {
        name: String,
        date: Date,
        total_tickets: u32,
    },
    Book {
        event_id: Uuid,
        count: u32,
    },
    Simulate {
        event_id: Uuid,
        requests: u32,
    },
    Help,
    Exit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}', type 'help' to view available commands")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("invalid event id '{0}'")]
    InvalidEventId(String),

    #[error("at most {max} requests can be simulated, got {0}", max = MAX_SIMULATED_REQUESTS)]
    TooManyRequests(u32),
}

impl FromStr for Command {
    type Err = ParseError;

    ///
    /// Words are separated by whitespace.
    /// Event name in `create` may contain spaces, date and total are the last two words
    ///
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words = line.split_whitespace().collect::<Vec<_>>();
        let Some((command, args)) = words.split_first() else {
            return Err(ParseError::Empty);
        };

        match *command {
            "get" => match args {
                [] => Ok(Command::Get),
                _ => Err(ParseError::Usage("get")),
            },
            "create" => match args {
                [name @ .., date, total_tickets] if !name.is_empty() => Ok(Command::Create {
                    name: name.join(" "),
                    date: parse_date(date)?,
                    total_tickets: parse_number(total_tickets)?,
                }),
                _ => Err(ParseError::Usage("create <name> <YYYY-MM-DD> <total>")),
            },
            "book" => match args {
                [event_id, count] => Ok(Command::Book {
                    event_id: parse_event_id(event_id)?,
                    count: parse_number(count)?,
                }),
                _ => Err(ParseError::Usage("book <event_id> <count>")),
            },
            "simulate" => match args {
                [event_id, requests] => {
                    let event_id = parse_event_id(event_id)?;
                    let requests = parse_number(requests)?;
                    if requests > MAX_SIMULATED_REQUESTS {
                        return Err(ParseError::TooManyRequests(requests));
                    }

                    Ok(Command::Simulate { event_id, requests })
                }
                _ => Err(ParseError::Usage("simulate <event_id> <requests>")),
            },
            "help" => Ok(Command::Help),
            "exit" | "quit" => Ok(Command::Exit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

fn parse_date(value: &str) -> Result<Date, ParseError> {
    Date::parse(value, DATE_FORMAT).map_err(|_| ParseError::InvalidDate(value.to_string()))
}

fn parse_number(value: &str) -> Result<u32, ParseError> {
    value
        .parse()
        .map_err(|_| ParseError::InvalidNumber(value.to_string()))
}

fn parse_event_id(value: &str) -> Result<Uuid, ParseError> {
    Uuid::parse_str(value).map_err(|_| ParseError::InvalidEventId(value.to_string()))
}
