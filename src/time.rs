use core::fmt;
use itertools::Itertools;
use num::Integer;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hours on a 24-hour clock, as produced by the cell parser
pub type Hour = u32;

/// Half-open [start, end) time range
/// <N>: Any integer type
///
/// No ordering between `start` and `end` is enforced: an inverted range
/// is kept as written and simply never overlaps anything.
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TimeRange<N>(pub N, pub N)
where
    N: Integer + Copy;

impl<N> TimeRange<N>
where
    N: Integer + Copy,
{
    /// Construct a new Time Range
    /// Range is half-open on [start, end)
    /// # Examples
    /// ```
    /// use zeitfenster::time::TimeRange;
    ///
    /// let test = TimeRange::new(9, 17);
    ///
    /// assert_eq!(test.0, 9);
    /// assert_eq!(test.1, 17);
    /// ```
    pub fn new(start: N, end: N) -> TimeRange<N> {
        TimeRange(start, end)
    }

    /// Convenience function for readability
    /// Returns the start of the TimeRange
    pub fn start(self) -> N {
        self.0
    }

    /// Convenience function for readability
    /// Returns the end of the TimeRange
    pub fn end(self) -> N {
        self.1
    }

    /// The common part of two ranges, if it is not empty
    ///
    /// # Examples
    /// ```
    /// use zeitfenster::time::TimeRange;
    ///
    /// let morning = TimeRange::new(9, 12);
    ///
    /// assert_eq!(morning.overlap(TimeRange::new(10, 14)), Some(TimeRange::new(10, 12)));
    /// assert_eq!(morning.overlap(TimeRange::new(12, 14)), None);
    /// ```
    pub fn overlap(self, other: TimeRange<N>) -> Option<TimeRange<N>> {
        let start = self.start().max(other.start());
        let end = self.end().min(other.end());

        if end > start {
            Some(TimeRange(start, end))
        } else {
            None
        }
    }
}

impl<N> TimeRange<N>
where
    N: Integer + Copy + Into<f64>,
{
    /// `end - start`, negative for inverted ranges
    pub fn length(self) -> f64 {
        self.end().into() - self.start().into()
    }

    /// Whether a meeting of `duration` hours fits in this range
    pub fn lasts_at_least(self, duration: f64) -> bool {
        self.length() >= duration
    }
}

impl fmt::Display for TimeRange<Hour> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", format_time(self.0), format_time(self.1))
    }
}

/// Renders a 24-hour clock hour on the 12-hour clock
///
/// # Examples
/// ```
/// use zeitfenster::time::format_time;
///
/// assert_eq!(format_time(0), "12AM");
/// assert_eq!(format_time(9), "9AM");
/// assert_eq!(format_time(12), "12PM");
/// assert_eq!(format_time(17), "5PM");
/// ```
pub fn format_time(hour: Hour) -> String {
    match hour {
        0 => String::from("12AM"),
        1..=11 => format!("{}AM", hour),
        12 => String::from("12PM"),
        _ => format!("{}PM", hour - 12),
    }
}

pub trait CommonTimes<N>
where
    N: Integer + Copy,
{
    fn common_times(self, min_duration: f64) -> Vec<TimeRange<N>>;
}

impl<'a, T, N> CommonTimes<N> for T
where
    T: Iterator<Item = &'a [TimeRange<N>]>,
    N: 'a + Integer + Copy + Into<f64>,
{
    /// Self is one list of available times per participant.
    /// Folds the lists into every pairwise overlap that all of them
    /// share, then keeps the overlaps lasting at least `min_duration`.
    ///
    /// Overlaps are neither sorted nor merged: two ranges of the same
    /// participant can produce overlapping results.
    ///
    /// # Examples
    ///
    /// ```
    /// use zeitfenster::time::{CommonTimes, TimeRange};
    ///
    /// let alice = vec![TimeRange::new(9, 12), TimeRange::new(14, 17)];
    /// let bob = vec![TimeRange::new(10, 16)];
    ///
    /// assert_eq!(
    ///     vec![alice.as_slice(), bob.as_slice()].into_iter().common_times(2.0),
    ///     vec![TimeRange::new(10, 12), TimeRange::new(14, 16)]
    /// );
    /// ```
    fn common_times(mut self, min_duration: f64) -> Vec<TimeRange<N>> {
        let mut common = match self.next() {
            Some(times) => times.to_vec(),
            None => return vec![],
        };

        for times in self {
            common = common
                .iter()
                .cartesian_product(times.iter())
                .filter_map(|(&shared, &time)| shared.overlap(time))
                .collect_vec();

            // Nobody later can widen an empty intersection
            if common.is_empty() {
                return common;
            }
        }

        common
            .into_iter()
            .filter(|time| time.lasts_at_least(min_duration))
            .collect_vec()
    }
}

/// Every range shared by all of `times` lasting at least `min_duration`.
/// See [`CommonTimes::common_times`].
pub fn intersect<N, L>(times: &[L], min_duration: f64) -> Vec<TimeRange<N>>
where
    N: Integer + Copy + Into<f64>,
    L: AsRef<[TimeRange<N>]>,
{
    times.iter().map(|t| t.as_ref()).common_times(min_duration)
}
