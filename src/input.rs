use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use std::convert::TryFrom;
use std::iter::once;
use thiserror::Error;

/// Header of the name column when a table is built from records
pub const NAME_COLUMN: &str = "Name";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Table has no columns, the first column must hold participant names")]
    MissingNameColumn,
    #[error("Row {row} has {found} cells. Expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A rectangular table of raw availability text, as read from a
/// spreadsheet: the first column holds names, every other column is a date.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTable"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawTable {
    header: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<String>>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTable> for Table {
    type Error = TableError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        Table::new(raw.header, raw.rows)
    }
}

impl Table {
    /// Checks that there is a name column and that every row has one cell
    /// per column.
    ///
    /// # Examples
    /// ```
    /// use zeitfenster::input::{Table, TableError};
    ///
    /// let header = vec!["Name".to_string(), "Mon".to_string()];
    ///
    /// assert!(Table::new(header.clone(), vec![vec!["Alice".into(), "9AM-5PM".into()]]).is_ok());
    /// assert_eq!(
    ///     Table::new(header, vec![vec!["Bob".into()]]),
    ///     Err(TableError::RaggedRow { row: 0, expected: 2, found: 1 })
    /// );
    /// ```
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, TableError> {
        if header.is_empty() {
            return Err(TableError::MissingNameColumn);
        }

        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != header.len())
        {
            return Err(TableError::RaggedRow {
                row,
                expected: header.len(),
                found: cells.len(),
            });
        }

        Ok(Table { header, rows })
    }

    /// Builds a table from `(name, [(date, cell)])` records. Dates become
    /// columns in the order they are first seen; a record without a date
    /// gets an empty cell there.
    ///
    /// ```
    /// use zeitfenster::input::Table;
    ///
    /// let table = Table::from_records(vec![
    ///     ("Alice", vec![("Mon", "9AM-12PM")]),
    ///     ("Bob", vec![("Tue", "1-3PM"), ("Mon", "NA")]),
    /// ]);
    ///
    /// assert_eq!(table.dates(), ["Mon", "Tue"]);
    /// assert_eq!(table.rows().nth(0), Some(&["Alice".to_string(), "9AM-12PM".into(), "".into()][..]));
    /// ```
    pub fn from_records<'a, I, C>(records: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, C)>,
        C: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let records = records
            .into_iter()
            .map(|(name, cells)| (name, cells.into_iter().collect_vec()))
            .collect_vec();

        let dates = records
            .iter()
            .flat_map(|(_, cells)| cells.iter().map(|&(date, _)| date))
            .unique()
            .collect_vec();

        let header = once(NAME_COLUMN)
            .chain(dates.iter().copied())
            .map(String::from)
            .collect();

        let rows = records
            .iter()
            .map(|(name, cells)| {
                once(name.to_string())
                    .chain(dates.iter().map(|date| {
                        cells
                            .iter()
                            .rev()
                            .find(|(d, _)| d == date)
                            .map(|&(_, cell)| cell.to_string())
                            .unwrap_or_default()
                    }))
                    .collect()
            })
            .collect();

        Table { header, rows }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// The date labels, in column order
    pub fn dates(&self) -> &[String] {
        &self.header[1..]
    }

    /// Every row, name cell first
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Table {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        const CELLS: [&str; 8] = [
            "NA", "on leave", "", "9AM-5PM", "9-12PM", "11AM-1PM", "12AM-3AM", "1-3PM; 4-6PM",
        ];

        let dates = u.int_in_range(0..=7_usize)?;
        let mut header = Vec::with_capacity(dates + 1);
        header.push(NAME_COLUMN.to_string());
        for _ in 0..dates {
            header.push(u.arbitrary::<String>()?);
        }

        let len = u.int_in_range(0..=16_usize)?;
        let mut rows = Vec::with_capacity(len);
        for _ in 0..len {
            let mut row = Vec::with_capacity(header.len());
            row.push(u.arbitrary::<String>()?);
            for _ in 0..dates {
                let cell = if u.arbitrary::<bool>()? {
                    u.choose(&CELLS)?.to_string()
                } else if u.arbitrary::<bool>()? {
                    format!(
                        "{}{}-{}{}",
                        u.int_in_range(0..=13_u8)?,
                        u.choose(&["", "AM", "PM"])?,
                        u.int_in_range(0..=13_u8)?,
                        u.choose(&["AM", "PM"])?
                    )
                } else {
                    u.arbitrary::<String>()?
                };
                row.push(cell);
            }
            rows.push(row);
        }

        Ok(Table { header, rows })
    }
}
