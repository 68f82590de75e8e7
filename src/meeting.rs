use crate::schedule::ScheduleIndex;
use crate::time::{CommonTimes, Hour, TimeRange};
use core::fmt;
use itertools::Itertools;
use log::debug;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};

/// How many alternative slots a search keeps unless told otherwise
pub const DEFAULT_ALTERNATIVE_LIMIT: usize = 10;

/// One time on one date, with who can and cannot make it
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingSlot {
    pub date: String,
    pub time: TimeRange<Hour>,
    pub available: Vec<String>,
    pub unavailable: Vec<String>,
}

impl MeetingSlot {
    /// Share of all participants that can make it
    ///
    /// # Examples
    /// ```
    /// use zeitfenster::meeting::MeetingSlot;
    /// use zeitfenster::time::TimeRange;
    ///
    /// let slot = MeetingSlot {
    ///     date: "Tue".to_string(),
    ///     time: TimeRange::new(15, 17),
    ///     available: vec!["Bob".to_string(), "Carol".to_string()],
    ///     unavailable: vec!["Alice".to_string()],
    /// };
    ///
    /// assert_eq!(slot.coverage(), 2.0 / 3.0);
    /// assert!(!slot.is_perfect());
    /// assert_eq!(slot.to_string(), "Tue 3PM-5PM");
    /// ```
    pub fn coverage(&self) -> f64 {
        let total = self.available.len() + self.unavailable.len();
        if total == 0 {
            0.0
        } else {
            self.available.len() as f64 / total as f64
        }
    }

    /// Everybody can make it
    pub fn is_perfect(&self) -> bool {
        self.unavailable.is_empty() && !self.available.is_empty()
    }

    pub fn length(&self) -> f64 {
        self.time.length()
    }
}

impl fmt::Display for MeetingSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.time)
    }
}

#[cfg(feature = "serde")]
impl Serialize for MeetingSlot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut slot = serializer.serialize_struct("MeetingSlot", 6)?;
        slot.serialize_field("date", &self.date)?;
        slot.serialize_field("start", &self.time.start())?;
        slot.serialize_field("end", &self.time.end())?;
        slot.serialize_field("available", &self.available)?;
        slot.serialize_field("unavailable", &self.unavailable)?;
        slot.serialize_field("coverage", &self.coverage())?;
        slot.end()
    }
}

/// Result of one search
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeetingTimes {
    /// Slots everybody can make, by date
    pub perfect_slots: Vec<MeetingSlot>,
    /// Slots at least two people can make, best coverage first. Perfect
    /// slots show up here too.
    pub best_alternative_slots: Vec<MeetingSlot>,
}

impl MeetingTimes {
    pub fn is_empty(&self) -> bool {
        self.perfect_slots.is_empty() && self.best_alternative_slots.is_empty()
    }
}

/// Parameters of one search
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Search {
    /// Hours the meeting lasts. Zero or less matches any common time.
    pub duration: f64,
    /// Alternative slots to keep, [`DEFAULT_ALTERNATIVE_LIMIT`] if `None`
    #[cfg_attr(feature = "serde", serde(default))]
    pub limit: Option<usize>,
}

impl Search {
    pub fn new(duration: f64) -> Search {
        Search {
            duration,
            limit: None,
        }
    }

    pub fn with_limit(self, limit: usize) -> Search {
        Search {
            limit: Some(limit),
            ..self
        }
    }

    /// Looks at every date, in sorted order, for times shared by the people
    /// available that date.
    ///
    /// A date where everybody gave a time yields perfect slots. A date
    /// where at least two people gave a time yields alternative slots,
    /// whether or not it was perfect. Alternatives are then ranked by
    /// coverage, keeping date order among equals, and cut to the limit.
    ///
    /// # Examples
    /// ```
    /// use zeitfenster::input::Table;
    /// use zeitfenster::meeting::Search;
    /// use zeitfenster::schedule::ScheduleIndex;
    /// use zeitfenster::time::TimeRange;
    ///
    /// let index = ScheduleIndex::build(&Table::from_records(vec![
    ///     ("Alice", vec![("Mon", "9AM-12PM")]),
    ///     ("Bob", vec![("Mon", "10AM-2PM")]),
    /// ]));
    ///
    /// let times = Search::new(1.0).with_limit(5).run(&index);
    ///
    /// assert_eq!(times.perfect_slots[0].time, TimeRange::new(10, 12));
    /// assert_eq!(times.best_alternative_slots.len(), 1);
    /// ```
    pub fn run(&self, index: &ScheduleIndex) -> MeetingTimes {
        let mut times = MeetingTimes::default();
        let total = index.len();

        for date in index.dates() {
            let (available, unavailable): (Vec<_>, Vec<_>) = index
                .participants()
                .iter()
                .partition(|participant| participant.is_available(date));

            if available.is_empty() {
                continue;
            }

            let common = available
                .iter()
                .map(|participant| participant.availability(date))
                .common_times(self.duration);

            debug!(date = date, available = available.len(), common = common.len(); "searched date");

            let available = available.iter().map(|p| p.name.clone()).collect_vec();

            if available.len() == total {
                times.perfect_slots.extend(common.iter().map(|&time| MeetingSlot {
                    date: date.to_string(),
                    time,
                    available: available.clone(),
                    unavailable: vec![],
                }));
            }

            if available.len() >= 2 {
                let unavailable = unavailable.iter().map(|p| p.name.clone()).collect_vec();

                times
                    .best_alternative_slots
                    .extend(common.iter().map(|&time| MeetingSlot {
                        date: date.to_string(),
                        time,
                        available: available.clone(),
                        unavailable: unavailable.clone(),
                    }));
            }
        }

        // `sort_by` is stable, equal coverage stays in date order
        times
            .best_alternative_slots
            .sort_by(|a, b| b.coverage().total_cmp(&a.coverage()));
        times
            .best_alternative_slots
            .truncate(self.limit.unwrap_or(DEFAULT_ALTERNATIVE_LIMIT));

        times
    }
}

/// Searches `index` for meetings of `duration` hours
pub fn find(index: &ScheduleIndex, duration: f64) -> MeetingTimes {
    Search::new(duration).run(index)
}

/// Runs one search per duration against the same index, in parallel.
/// Results are in the order of `durations`.
#[cfg(feature = "rayon")]
pub fn find_many(index: &ScheduleIndex, durations: &[f64]) -> Vec<MeetingTimes> {
    durations
        .par_iter()
        .map(|&duration| find(index, duration))
        .collect()
}
