use std::{fs, path::Path, str::FromStr};

use anyhow::{Context, Result};
use manor_core::{ItemPlacement, PlaceLayout, Rect, TargetLayout, TownLayout, ValidationError};
use thiserror::Error;

/// Reads and parses a town description file.
pub(crate) fn load(path: &Path) -> Result<TownLayout> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read town file {}", path.display()))?;
    parse(&contents).with_context(|| format!("failed to parse town file {}", path.display()))
}

/// Parses the line-oriented town description format.
///
/// ```text
/// <rows> <columns> <town name>
/// <target health> <target name>
/// <pet name>
/// <place count>
/// <row1> <col1> <row2> <col2> <place name>   (one line per place)
/// <item count>
/// <place index> <damage> <item name>         (one line per item)
/// ```
///
/// Blank lines are skipped.
pub(crate) fn parse(contents: &str) -> Result<TownLayout, TownFileError> {
    let mut records = Records::new(contents);

    let (line, text) = records.next("grid size and town name")?;
    let mut rest = text;
    let rows = take_number(line, &mut rest, "row count")?;
    let columns = take_number(line, &mut rest, "column count")?;
    let name = take_name(line, rest, "town name")?;

    let (line, text) = records.next("target health and name")?;
    let mut rest = text;
    let health = take_number(line, &mut rest, "target health")?;
    let target = TargetLayout {
        name: take_name(line, rest, "target name")?,
        health,
    };

    let (line, text) = records.next("pet name")?;
    let pet = take_name(line, text, "pet name")?;

    let (line, text) = records.next("place count")?;
    let place_count: usize = parse_whole(line, text, "place count")?;
    let mut places = Vec::with_capacity(place_count);
    for _ in 0..place_count {
        let (line, text) = records.next("place")?;
        let mut rest = text;
        let row1 = take_number(line, &mut rest, "top row")?;
        let col1 = take_number(line, &mut rest, "left column")?;
        let row2 = take_number(line, &mut rest, "bottom row")?;
        let col2 = take_number(line, &mut rest, "right column")?;
        let rect = Rect::new(row1, col1, row2, col2)
            .map_err(|source| TownFileError::Invalid { line, source })?;
        places.push(PlaceLayout {
            rect,
            name: take_name(line, rest, "place name")?,
        });
    }

    let (line, text) = records.next("item count")?;
    let item_count: usize = parse_whole(line, text, "item count")?;
    let mut items = Vec::with_capacity(item_count);
    for _ in 0..item_count {
        let (line, text) = records.next("item")?;
        let mut rest = text;
        let place_index = take_number(line, &mut rest, "place index")?;
        let damage = take_number(line, &mut rest, "item damage")?;
        items.push(ItemPlacement {
            place_index,
            damage,
            name: take_name(line, rest, "item name")?,
        });
    }

    if let Some((line, _)) = records.peek() {
        return Err(TownFileError::TrailingContent { line });
    }

    Ok(TownLayout {
        name,
        rows,
        columns,
        target,
        pet: Some(pet),
        places,
        items,
    })
}

/// Errors that can occur while parsing a town description.
#[derive(Debug, PartialEq, Eq, Error)]
pub(crate) enum TownFileError {
    /// The file ended before the expected record.
    #[error("line {line}: unexpected end of file, expected {expected}")]
    UnexpectedEnd {
        /// Line after the last record read.
        line: usize,
        /// Record that was expected.
        expected: &'static str,
    },
    /// A numeric field could not be parsed.
    #[error("line {line}: could not read {field} from `{text}`")]
    InvalidNumber {
        /// Line containing the field.
        line: usize,
        /// Field that was being read.
        field: &'static str,
        /// Text that failed to parse.
        text: String,
    },
    /// A record ended before its name.
    #[error("line {line}: missing {field}")]
    MissingName {
        /// Line containing the record.
        line: usize,
        /// Name that was expected.
        field: &'static str,
    },
    /// A record parsed but described an invalid value.
    #[error("line {line}: {source}")]
    Invalid {
        /// Line containing the record.
        line: usize,
        /// Validation failure for the record.
        #[source]
        source: ValidationError,
    },
    /// Records continued after the declared items.
    #[error("line {line}: unexpected content after the last item")]
    TrailingContent {
        /// First unexpected line.
        line: usize,
    },
}

struct Records<'a> {
    lines: std::iter::Peekable<std::iter::Enumerate<std::str::Lines<'a>>>,
    last_line: usize,
}

impl<'a> Records<'a> {
    fn new(contents: &'a str) -> Self {
        Self {
            lines: contents.lines().enumerate().peekable(),
            last_line: 0,
        }
    }

    fn skip_blank(&mut self) {
        while self
            .lines
            .next_if(|(_, text)| text.trim().is_empty())
            .is_some()
        {}
    }

    fn next(&mut self, expected: &'static str) -> Result<(usize, &'a str), TownFileError> {
        self.skip_blank();
        let (index, text) = self.lines.next().ok_or(TownFileError::UnexpectedEnd {
            line: self.last_line + 1,
            expected,
        })?;
        self.last_line = index + 1;
        Ok((index + 1, text.trim()))
    }

    fn peek(&mut self) -> Option<(usize, &'a str)> {
        self.skip_blank();
        self.lines.peek().map(|(index, text)| (index + 1, *text))
    }
}

fn take_number<T: FromStr>(
    line: usize,
    rest: &mut &str,
    field: &'static str,
) -> Result<T, TownFileError> {
    let trimmed = rest.trim_start();
    let (token, remainder) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));
    let value = parse_whole(line, token, field)?;
    *rest = remainder;
    Ok(value)
}

fn parse_whole<T: FromStr>(line: usize, text: &str, field: &'static str) -> Result<T, TownFileError> {
    text.trim()
        .parse()
        .map_err(|_| TownFileError::InvalidNumber {
            line,
            field,
            text: text.trim().to_owned(),
        })
}

fn take_name(line: usize, rest: &str, field: &'static str) -> Result<String, TownFileError> {
    let name = rest.trim();
    if name.is_empty() {
        return Err(TownFileError::MissingName { line, field });
    }
    Ok(name.to_owned())
}
