//! Ledger batch loader (deterministic).
//!
//! Input format
//!
//! - Line 1: `T`, the number of test cases (1..=100).
//! - Per test case:
//!   - `<num_cars> <num_events>`
//!   - `num_cars` lines of `<name> <catalog_price> <pickup_price> <price_per_km>`
//!   - `num_events` lines of `<ts> <agent> <p|a|r> <value>`
//!     (`p` takes a car name, `a` a damage percentage, `r` a distance in km)
//!
//! Framing errors (a count that is not an integer, a count out of range, or
//! input ending early) are fatal for the whole run. A malformed car or event
//! record poisons only its own test case: the case's remaining lines are
//! consumed and the case is reported as [`LoadedCase::Poisoned`], so later
//! test cases still load. A `p` event naming an undeclared car is NOT a load
//! error — it flows through to reconciliation and becomes that agent's
//! INCONSISTENT verdict.

use rdk_fleet::{CarPricing, Event, EventBook, PricingTable};

use crate::batch::TestCase;

pub const MAX_TEST_CASES: i64 = 100;
pub const MAX_CARS_PER_CASE: i64 = 500;
pub const MAX_EVENTS_PER_CASE: i64 = 10_000;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Loader errors are small, explicit, and test-friendly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// A framing count could not be parsed as an integer.
    MalformedFraming { line: usize, value: String },
    /// A framing count parsed but falls outside its documented bound.
    FramingOutOfRange {
        line: usize,
        what: &'static str,
        value: i64,
    },
    /// Input ended while records were still owed.
    UnexpectedEof { expected: &'static str },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::MalformedFraming { line, value } => {
                write!(f, "malformed framing count at line {line}: {value:?}")
            }
            LoadError::FramingOutOfRange { line, what, value } => {
                write!(f, "framing count {what} out of range at line {line}: {value}")
            }
            LoadError::UnexpectedEof { expected } => {
                write!(f, "unexpected end of input, expected {expected}")
            }
        }
    }
}

impl std::error::Error for LoadError {}

// ---------------------------------------------------------------------------
// Loaded cases
// ---------------------------------------------------------------------------

/// Outcome of loading one test case. A poisoned case carries the first bad
/// record's position and reason; it is skipped at audit time without
/// disturbing its neighbours.
#[derive(Clone, Debug)]
pub enum LoadedCase {
    Case(TestCase),
    Poisoned { line: usize, reason: String },
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a ledger batch from text (pure, deterministic).
pub fn parse_batch(input: &str) -> Result<Vec<LoadedCase>, LoadError> {
    let mut cursor = Cursor::new(input);

    let header = cursor.next_line("test case count")?;
    let num_cases = parse_count(header, "test cases", 1, MAX_TEST_CASES)?;

    let mut out = Vec::with_capacity(num_cases as usize);
    for _ in 0..num_cases {
        out.push(parse_case(&mut cursor)?);
    }
    Ok(out)
}

fn parse_case(cursor: &mut Cursor<'_>) -> Result<LoadedCase, LoadError> {
    let header = cursor.next_line("test case header")?;
    let mut tokens = header.text.split_whitespace();
    let num_cars = parse_count(
        Line {
            no: header.no,
            text: tokens.next().unwrap_or(""),
        },
        "cars",
        0,
        MAX_CARS_PER_CASE,
    )?;
    let num_events = parse_count(
        Line {
            no: header.no,
            text: tokens.next().unwrap_or(""),
        },
        "events",
        0,
        MAX_EVENTS_PER_CASE,
    )?;

    // First bad record poisons the case; the remaining declared lines are
    // still consumed so the next case starts at the right cursor position.
    let mut poison: Option<(usize, String)> = None;
    let mut pricing = PricingTable::new();
    let mut book = EventBook::new();

    for _ in 0..num_cars {
        let line = cursor.next_line("car record")?;
        if poison.is_some() {
            continue;
        }
        if let Err(reason) = parse_car_record(line.text, &mut pricing) {
            poison = Some((line.no, reason));
        }
    }

    for _ in 0..num_events {
        let line = cursor.next_line("event record")?;
        if poison.is_some() {
            continue;
        }
        if let Err(reason) = parse_event_record(line.text, &mut book) {
            poison = Some((line.no, reason));
        }
    }

    Ok(match poison {
        None => LoadedCase::Case(TestCase::new(pricing, book)),
        Some((line, reason)) => LoadedCase::Poisoned { line, reason },
    })
}

fn parse_car_record(text: &str, pricing: &mut PricingTable) -> Result<(), String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let [name, catalog, pickup, per_km] = tokens[..] else {
        return Err(format!("expected 4 car fields, got {}", tokens.len()));
    };
    let catalog = parse_i64(catalog, "catalog price")?;
    let pickup = parse_i64(pickup, "pickup price")?;
    let per_km = parse_i64(per_km, "price per km")?;
    pricing
        .insert(CarPricing::new(name, catalog, pickup, per_km))
        .map_err(|e| e.to_string())
}

fn parse_event_record(text: &str, book: &mut EventBook) -> Result<(), String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let [ts, agent, action, value] = tokens[..] else {
        return Err(format!("expected 4 event fields, got {}", tokens.len()));
    };
    let ts = parse_i64(ts, "timestamp")?;
    let event = match action {
        "p" => Event::pickup(ts, value),
        "a" => Event::accident(ts, parse_i64(value, "severity")?),
        "r" => Event::ret(ts, parse_i64(value, "distance")?),
        other => return Err(format!("unknown action {other:?}, expected p, a or r")),
    };
    book.append(agent, event).map_err(|e| e.to_string())
}

fn parse_i64(token: &str, what: &str) -> Result<i64, String> {
    token
        .parse::<i64>()
        .map_err(|_| format!("{what} is not an integer: {token:?}"))
}

fn parse_count(line: Line<'_>, what: &'static str, min: i64, max: i64) -> Result<i64, LoadError> {
    let value = line
        .text
        .trim()
        .parse::<i64>()
        .map_err(|_| LoadError::MalformedFraming {
            line: line.no,
            value: line.text.trim().to_string(),
        })?;
    if value < min || value > max {
        return Err(LoadError::FramingOutOfRange {
            line: line.no,
            what,
            value,
        });
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
struct Line<'a> {
    no: usize,
    text: &'a str,
}

/// Line-by-line reader with 1-based positions. Blank lines are skipped.
struct Cursor<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines().enumerate(),
        }
    }

    fn next_line(&mut self, expected: &'static str) -> Result<Line<'a>, LoadError> {
        for (idx, raw) in self.lines.by_ref() {
            let text = raw.trim();
            if text.is_empty() {
                continue;
            }
            return Ok(Line { no: idx + 1, text });
        }
        Err(LoadError::UnexpectedEof { expected })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
