use crate::input::Table;
use crate::parser::{parse_cell_report, ParseError};
use crate::participant::Participant;
use log::debug;
#[cfg(feature = "serde")]
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Names spreadsheet exports write into empty name cells
const NULL_NAMES: [&str; 3] = ["", "nan", "none"];

/// A fragment of a cell that was not understood
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCell {
    pub participant: String,
    pub date: String,
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_error"))]
    pub error: ParseError,
}

#[cfg(feature = "serde")]
fn serialize_error<S>(error: &ParseError, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(error)
}

/// What building an index left out
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Rows (zero based, header excluded) without a usable name
    pub dropped_rows: Vec<usize>,
    /// Names that appeared more than once. The last row won.
    pub overwritten: Vec<String>,
    pub skipped: Vec<SkippedCell>,
}

/// Every participant's parsed availability, in table order.
///
/// Built once per table and never changed afterwards; load a new table by
/// building a new index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleIndex {
    participants: Vec<Participant>,
    positions: HashMap<String, usize>,
}

impl ScheduleIndex {
    /// Parses every cell of `table`.
    ///
    /// # Examples
    /// ```
    /// use zeitfenster::input::Table;
    /// use zeitfenster::schedule::ScheduleIndex;
    /// use zeitfenster::time::TimeRange;
    ///
    /// let table = Table::from_records(vec![
    ///     (" Alice ", vec![("Mon", "9AM-12PM"), ("Tue", "NA")]),
    ///     ("nan", vec![("Mon", "9AM-5PM")]),
    /// ]);
    /// let index = ScheduleIndex::build(&table);
    ///
    /// assert_eq!(index.names().collect::<Vec<_>>(), ["Alice"]);
    ///
    /// let alice = index.participant("Alice").unwrap();
    /// assert_eq!(alice.availability("Mon"), [TimeRange::new(9, 12)]);
    /// assert!(alice.availability("Tue").is_empty());
    /// ```
    pub fn build(table: &Table) -> ScheduleIndex {
        ScheduleIndex::build_with_report(table).0
    }

    /// Like [`ScheduleIndex::build`], also returning what was left out
    pub fn build_with_report(table: &Table) -> (ScheduleIndex, BuildReport) {
        let mut index = ScheduleIndex::default();
        let mut report = BuildReport::default();

        for (row, cells) in table.rows().enumerate() {
            let name = cells.first().map(|name| name.trim()).unwrap_or_default();

            if NULL_NAMES.contains(&name.to_lowercase().as_str()) {
                debug!(row = row; "dropping row without a participant name");
                report.dropped_rows.push(row);
                continue;
            }

            let mut participant = Participant::new(name);

            for (date, cell) in table.dates().iter().zip(cells.iter().skip(1)) {
                let parsed = parse_cell_report(cell);

                report
                    .skipped
                    .extend(parsed.skipped.into_iter().map(|error| SkippedCell {
                        participant: name.to_string(),
                        date: date.clone(),
                        error,
                    }));

                participant.schedule.insert(date, parsed.ranges);
            }

            if index.insert(participant) {
                debug!(participant = name; "participant listed twice, keeping the last row");
                report.overwritten.push(name.to_string());
            }
        }

        (index, report)
    }

    /// Returns true when a participant of the same name was replaced. The
    /// replacement keeps the original position.
    fn insert(&mut self, participant: Participant) -> bool {
        match self.positions.get(&participant.name) {
            Some(&position) => {
                self.participants[position] = participant;
                true
            }
            None => {
                self.positions
                    .insert(participant.name.clone(), self.participants.len());
                self.participants.push(participant);
                false
            }
        }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, name: &str) -> Option<&Participant> {
        self.positions
            .get(name)
            .map(|&position| &self.participants[position])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.participants.iter().map(|p| p.name.as_str())
    }

    /// Every date anyone was asked about, sorted
    pub fn dates(&self) -> Vec<&str> {
        self.participants
            .iter()
            .flat_map(|p| p.schedule.dates())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
