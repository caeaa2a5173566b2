//! Line-oriented description files and the human-readable report.
//!
//! A description file holds one body per line:
//!
//! ```text
//! # type   R  color   mass      x         y    Vx   Vy       [parity]
//! Star    30  yellow  1.989e30  0         0    0    0
//! Planet   5  blue    5.974e24  1.496e11  0    0    29783    1
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. The type token is
//! matched without regard to case. A line with an unknown type is skipped and
//! reported as a [`ParseWarning`]; a numeric field that does not parse fails
//! the whole read. An integer ninth token is the orbit parity; any other
//! trailing text, such as `# the sun`, is ignored.
//!
//! [`write_report`] produces numbered blocks meant for people and cannot be
//! read back. [`write_description`] produces the grammar above.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::{Point2, Vector2};

use crate::body::{validate_color, Body, BodyKind};
use crate::error::{Error, Result};
use crate::state::SystemState;

/// Tokens on a complete body line, type token included
const BODY_FIELDS: usize = 8;

/// A skipped line whose type token named no known body kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line number
    pub line: usize,
    pub token: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: unknown body type `{}`", self.line, self.token)
    }
}

/// Result of reading a description: the system plus anything skipped on the way
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Loaded {
    pub system: SystemState,
    pub warnings: Vec<ParseWarning>,
}

/// Outcome of reading a single line
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Empty,
    Body(Body),
    Unknown(String),
}

/// Parses one line of a description file
///
/// `line_no` is only used for error messages.
///
/// # Examples
///
/// ```
/// use solar::body::BodyKind;
/// use solar::codec::{parse_line, Line};
///
/// let Line::Body(star) = parse_line("Star 10 red 1000 1 2 3 4", 1).unwrap() else {
///     panic!("expected a body");
/// };
/// assert_eq!(star.kind, BodyKind::Star);
/// assert_eq!(star.mass(), 1000.0);
///
/// assert_eq!(parse_line("  # comment", 2).unwrap(), Line::Empty);
/// assert_eq!(parse_line("Moon 1 grey 1 0 0 0 0", 3).unwrap(), Line::Unknown("Moon".into()));
/// ```
pub fn parse_line(text: &str, line_no: usize) -> Result<Line> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(Line::Empty);
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let Some(kind) = BodyKind::from_token(tokens[0]) else {
        return Ok(Line::Unknown(tokens[0].to_string()));
    };

    if tokens.len() < BODY_FIELDS {
        return Err(Error::MissingFields {
            line: line_no,
            kind: tokens[0].to_string(),
            expected: BODY_FIELDS,
            found: tokens.len(),
        });
    }

    let number = |index: usize, field: &'static str| -> Result<f64> {
        tokens[index]
            .parse::<f64>()
            .map_err(|_| Error::MalformedField {
                line: line_no,
                field,
                value: tokens[index].to_string(),
            })
    };

    let radius = number(1, "radius")?;
    let color = tokens[2];
    let mass = number(3, "mass")?;
    let position = Point2::new(number(4, "x")?, number(5, "y")?);
    let velocity = Vector2::new(number(6, "Vx")?, number(7, "Vy")?);

    // anything after the required fields that is not an integer is trailing text
    let orbit_parity = tokens
        .get(BODY_FIELDS)
        .and_then(|token| token.parse::<i32>().ok())
        .unwrap_or(0);

    let body = Body::new(kind, radius, color, mass, position, velocity).map_err(|e| {
        Error::AtLine {
            line: line_no,
            source: Box::new(e),
        }
    })?;

    Ok(Line::Body(body.with_orbit_parity(orbit_parity)))
}

/// Reads a whole description from `reader`
///
/// Bodies keep the order of their lines. Fails on the first malformed line;
/// nothing read so far is returned in that case.
pub fn read_system<R: BufRead>(reader: R) -> Result<Loaded> {
    let mut loaded = Loaded::default();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        match parse_line(&line?, line_no)? {
            Line::Empty => {}
            Line::Body(body) => {
                loaded.system.add_body(body);
            }
            Line::Unknown(token) => loaded.warnings.push(ParseWarning {
                line: line_no,
                token,
            }),
        }
    }

    Ok(loaded)
}

/// Parses a description held in memory
pub fn parse_str(text: &str) -> Result<Loaded> {
    read_system(text.as_bytes())
}

/// Opens and reads a description file
pub fn load<P: AsRef<Path>>(path: P) -> Result<Loaded> {
    let path = path.as_ref();
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    match read_system(BufReader::new(file)) {
        Err(Error::Stream(source)) => Err(io_err(source)),
        other => other,
    }
}

/// Writes the numbered, human-readable report
///
/// ```text
/// Body 1: type=Star radius=10 color=red mass=1000
///   x=1 y=2 Vx=3 Vy=4
///
/// Body 2: ...
/// ```
pub fn write_report<W: Write>(mut writer: W, state: &SystemState) -> Result<()> {
    for (index, body) in state.iter().enumerate() {
        if index > 0 {
            writeln!(writer)?;
        }
        writeln!(
            writer,
            "Body {}: type={} radius={} color={} mass={}",
            index + 1,
            body.kind,
            body.radius,
            body.color,
            body.mass()
        )?;
        writeln!(
            writer,
            "  x={} y={} Vx={} Vy={}",
            body.position.x, body.position.y, body.velocity.x, body.velocity.y
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the report to `path`, replacing any existing file
pub fn save<P: AsRef<Path>>(path: P, state: &SystemState) -> Result<()> {
    write_to_path(path.as_ref(), state, write_report)
}

/// Writes the system back in the description grammar
///
/// Every `f64` is printed in its shortest round-trip form, so reading the
/// output reproduces the same bodies bit for bit. Simulation time and
/// accumulated forces are not part of the grammar.
///
/// A body whose color was edited into something that is not a single token
/// fails with `Error::InvalidBody` before anything is written.
pub fn write_description<W: Write>(mut writer: W, state: &SystemState) -> Result<()> {
    for body in state {
        validate_color(&body.color)?;
    }

    for body in state {
        write!(
            writer,
            "{} {} {} {} {} {} {} {}",
            body.kind,
            body.radius,
            body.color,
            body.mass(),
            body.position.x,
            body.position.y,
            body.velocity.x,
            body.velocity.y
        )?;
        if body.orbit_parity != 0 {
            write!(writer, " {}", body.orbit_parity)?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a re-loadable description to `path`
pub fn save_description<P: AsRef<Path>>(path: P, state: &SystemState) -> Result<()> {
    write_to_path(path.as_ref(), state, write_description)
}

fn write_to_path(
    path: &Path,
    state: &SystemState,
    write: fn(BufWriter<File>, &SystemState) -> Result<()>,
) -> Result<()> {
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    match write(BufWriter::new(file), state) {
        Err(Error::Stream(source)) => Err(io_err(source)),
        other => other,
    }
}
