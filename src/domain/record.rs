//! Input records: one parsed row of the person table.

use thiserror::Error;

/// Maximum number of characters in a name or surname.
pub const MAX_NAME_LEN: usize = 49;
/// Maximum number of characters in a birth date.
pub const MAX_BIRTH_DATE_LEN: usize = 11;

/// One row of the input table: a person and an optional reference to its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: u32,
    pub name: String,
    pub surname: String,
    pub age: u32,
    pub birth_date: String,
    /// `None` when the row has no parent (`0` or an omitted field)
    pub parent_id: Option<u32>,
}

impl Record {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        surname: impl Into<String>,
        age: u32,
        birth_date: impl Into<String>,
        parent_id: Option<u32>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            surname: surname.into(),
            age,
            birth_date: birth_date.into(),
            parent_id: parent_id.filter(|&p| p != 0),
        }
    }

    /// Parse a single data line: `id,name,surname,age,birthDate,parentId`.
    ///
    /// The trailing `parentId` field may be omitted. `line_no` is only used
    /// for error reporting (1-based, header included).
    pub fn parse_line(line: &str, line_no: usize) -> Result<Self, RecordParseError> {
        let err = |message: String| RecordParseError {
            line: line_no,
            message,
        };

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 5 && fields.len() != 6 {
            return Err(err(format!(
                "expected 6 comma-separated fields, found {}",
                fields.len()
            )));
        }

        let id = parse_number(fields[0], "id").map_err(err)?;
        if id == 0 {
            return Err(err("id must be greater than 0".to_string()));
        }
        let name = parse_text(fields[1], "name", MAX_NAME_LEN).map_err(err)?;
        let surname = parse_text(fields[2], "surname", MAX_NAME_LEN).map_err(err)?;
        let age = parse_number(fields[3], "age").map_err(err)?;

        let birth_date = fields[4];
        if birth_date.chars().count() > MAX_BIRTH_DATE_LEN {
            return Err(err(format!(
                "birthDate longer than {} characters: {}",
                MAX_BIRTH_DATE_LEN, birth_date
            )));
        }

        let parent_id = match fields.get(5) {
            Some(raw) if !raw.is_empty() => Some(parse_number(raw, "parentId").map_err(err)?),
            _ => None,
        };

        Ok(Self::new(id, name, surname, age, birth_date, parent_id))
    }
}

fn parse_number(raw: &str, field: &str) -> Result<u32, String> {
    raw.parse::<u32>()
        .map_err(|e| format!("invalid {} '{}': {}", field, raw, e))
}

fn parse_text<'a>(raw: &'a str, field: &str, max: usize) -> Result<&'a str, String> {
    if raw.is_empty() {
        return Err(format!("{} is empty", field));
    }
    if raw.chars().count() > max {
        return Err(format!("{} longer than {} characters: {}", field, max, raw));
    }
    Ok(raw)
}

/// Parse the whole table: the first line is a header and is discarded,
/// blank lines are skipped. Stops at the first malformed line.
pub fn parse_records(content: &str) -> Result<Vec<Record>, RecordParseError> {
    content
        .lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| Record::parse_line(line, i + 1))
        .collect()
}

/// A line of the input table that could not be turned into a [`Record`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct RecordParseError {
    pub line: usize,
    pub message: String,
}
