use crate::time::{Hour, TimeRange};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Available times of one participant per date label, in the order the
/// dates were first given. An empty list means unavailable that date.
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DaySchedule {
    days: Vec<(String, Vec<TimeRange<Hour>>)>,
}

impl DaySchedule {
    /// Sets the times of `date`. A date given twice keeps its first
    /// position and its latest times.
    pub fn insert(&mut self, date: &str, times: Vec<TimeRange<Hour>>) {
        match self.days.iter_mut().find(|(d, _)| d == date) {
            Some((_, existing)) => *existing = times,
            None => self.days.push((date.to_string(), times)),
        }
    }

    /// Times given for `date`, empty if the date is unknown
    pub fn get(&self, date: &str) -> &[TimeRange<Hour>] {
        self.days
            .iter()
            .find(|(d, _)| d == date)
            .map(|(_, times)| times.as_slice())
            .unwrap_or(&[])
    }

    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.days.iter().map(|(date, _)| date.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TimeRange<Hour>])> {
        self.days
            .iter()
            .map(|(date, times)| (date.as_str(), times.as_slice()))
    }
}

#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
    pub schedule: DaySchedule,
}

impl Participant {
    /// Constructs a new Participant with no dates yet.
    pub fn new(name: &str) -> Participant {
        Participant {
            name: name.to_string(),
            schedule: DaySchedule::default(),
        }
    }

    /// Times this participant can meet on `date`
    pub fn availability(&self, date: &str) -> &[TimeRange<Hour>] {
        self.schedule.get(date)
    }

    /// Whether any time at all was given for `date`
    ///
    /// # Examples
    /// ```
    /// use zeitfenster::participant::Participant;
    /// use zeitfenster::time::TimeRange;
    ///
    /// let mut alice = Participant::new("Alice");
    /// alice.schedule.insert("Mon", vec![TimeRange::new(9, 12)]);
    /// alice.schedule.insert("Tue", vec![]);
    ///
    /// assert!(alice.is_available("Mon"));
    /// assert!(!alice.is_available("Tue"));
    /// assert!(!alice.is_available("Wed"));
    /// ```
    pub fn is_available(&self, date: &str) -> bool {
        !self.availability(date).is_empty()
    }
}
