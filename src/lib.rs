//! Finds the meeting windows that suit as much of a group as possible,
//! given each person's free-text availability per date.
//!
//! ```
//! use zeitfenster::{find, ScheduleIndex, Table};
//!
//! let table = Table::from_records(vec![
//!     ("Alice", vec![("Mon", "9AM-12PM"), ("Tue", "NA")]),
//!     ("Bob", vec![("Mon", "10AM-2PM"), ("Tue", "2-5PM")]),
//!     ("Carol", vec![("Mon", "9AM-5PM"), ("Tue", "3-6PM")]),
//! ]);
//!
//! let times = find(&ScheduleIndex::build(&table), 1.0);
//!
//! assert_eq!(times.perfect_slots[0].to_string(), "Mon 10AM-12PM");
//! assert_eq!(times.best_alternative_slots[1].to_string(), "Tue 3PM-5PM");
//! ```

pub mod input;
pub mod meeting;
pub mod parser;
pub mod participant;
pub mod schedule;
pub mod time;

pub use input::{Table, TableError};
#[cfg(feature = "rayon")]
pub use meeting::find_many;
pub use meeting::{find, MeetingSlot, MeetingTimes, Search, DEFAULT_ALTERNATIVE_LIMIT};
pub use parser::{parse_cell, parse_cell_report, ParseError};
pub use participant::{DaySchedule, Participant};
pub use schedule::{BuildReport, ScheduleIndex};
pub use time::{format_time, intersect, Hour, TimeRange};

#[cfg(test)]
mod tests {
    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn everybody_free_on_monday() {
        use crate::input::Table;
        use crate::meeting::{find, MeetingSlot};
        use crate::schedule::ScheduleIndex;
        use crate::time::TimeRange;

        let table = Table::from_records(vec![
            ("Alice", vec![("Mon", "9AM-12PM")]),
            ("Bob", vec![("Mon", "10AM-2PM")]),
            ("Carol", vec![("Mon", "9AM-5PM")]),
        ]);

        let times = find(&ScheduleIndex::build(&table), 1.0);

        assert_eq!(
            times.perfect_slots,
            vec![MeetingSlot {
                date: "Mon".to_string(),
                time: TimeRange::new(10, 12),
                available: names(&["Alice", "Bob", "Carol"]),
                unavailable: vec![],
            }]
        );
        assert_eq!(times.perfect_slots[0].coverage(), 1.0);
    }

    #[test]
    fn alice_away_on_tuesday() {
        use crate::input::Table;
        use crate::meeting::{find, MeetingSlot};
        use crate::schedule::ScheduleIndex;
        use crate::time::TimeRange;

        let table = Table::from_records(vec![
            ("Alice", vec![("Tue", "NA")]),
            ("Bob", vec![("Tue", "2-5PM")]),
            ("Carol", vec![("Tue", "3-6PM")]),
        ]);

        let times = find(&ScheduleIndex::build(&table), 1.0);

        assert!(times.perfect_slots.is_empty());
        assert_eq!(
            times.best_alternative_slots,
            vec![MeetingSlot {
                date: "Tue".to_string(),
                time: TimeRange::new(15, 17),
                available: names(&["Bob", "Carol"]),
                unavailable: names(&["Alice"]),
            }]
        );
        assert_eq!(times.best_alternative_slots[0].coverage(), 2.0 / 3.0);
    }

    #[test]
    fn perfect_slots_are_also_alternatives() {
        use crate::input::Table;
        use crate::meeting::find;
        use crate::schedule::ScheduleIndex;

        let table = Table::from_records(vec![
            ("Alice", vec![("Mon", "9AM-12PM, 1-5PM"), ("Tue", "1-5PM")]),
            ("Bob", vec![("Mon", "9AM-5PM"), ("Tue", "9AM-5PM")]),
        ]);

        let times = find(&ScheduleIndex::build(&table), 2.0);

        assert_eq!(times.perfect_slots.len(), 3);
        for slot in &times.perfect_slots {
            assert!(slot.is_perfect());
            assert!(times.best_alternative_slots.contains(slot));
        }
    }

    #[test]
    fn every_slot_lasts_long_enough() {
        use crate::input::Table;
        use crate::meeting::find;
        use crate::schedule::ScheduleIndex;

        let table = Table::from_records(vec![
            ("Alice", vec![("Mon", "9AM-10AM, 11AM-2PM"), ("Tue", "9AM-5PM")]),
            ("Bob", vec![("Mon", "9AM-5PM"), ("Tue", "10AM-11AM, 1-4PM")]),
            ("Carol", vec![("Mon", "on leave"), ("Tue", "8AM-6PM")]),
        ]);
        let index = ScheduleIndex::build(&table);

        for duration in [0.5, 1.0, 2.0, 3.0, 4.0] {
            let times = find(&index, duration);
            for slot in times.perfect_slots.iter().chain(&times.best_alternative_slots) {
                assert!(slot.length() >= duration, "{} is shorter than {}", slot, duration);
            }
        }

        assert_eq!(find(&index, 3.0).best_alternative_slots.len(), 2);
        assert!(find(&index, 3.5).is_empty());
    }

    #[test]
    fn alternatives_are_ranked_and_cut() {
        use crate::input::Table;
        use crate::meeting::{find, Search};
        use crate::schedule::ScheduleIndex;

        let dates = (1..=12).map(|day| format!("Day {:02}", day)).collect::<Vec<_>>();
        let mut alice = vec![];
        let mut bob = vec![];
        let mut carol = vec![];
        for (i, date) in dates.iter().enumerate() {
            alice.push((date.as_str(), "9AM-5PM"));
            bob.push((date.as_str(), "9AM-5PM"));
            // Carol only makes every third day
            carol.push((date.as_str(), if i % 3 == 2 { "1-3PM" } else { "OFF" }));
        }
        let table = Table::from_records(vec![("Alice", alice), ("Bob", bob), ("Carol", carol)]);
        let index = ScheduleIndex::build(&table);

        let times = find(&index, 1.0);

        assert_eq!(times.perfect_slots.len(), 4);
        assert_eq!(times.best_alternative_slots.len(), 10);
        assert!(times
            .best_alternative_slots
            .windows(2)
            .all(|pair| pair[0].coverage() >= pair[1].coverage()));

        let order = times
            .best_alternative_slots
            .iter()
            .map(|slot| slot.date.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            order,
            [
                "Day 03", "Day 06", "Day 09", "Day 12", "Day 01", "Day 02", "Day 04", "Day 05",
                "Day 07", "Day 08"
            ]
        );

        assert_eq!(Search::new(1.0).with_limit(3).run(&index).best_alternative_slots.len(), 3);
    }

    #[test]
    fn lone_participant_is_never_an_alternative() {
        use crate::input::Table;
        use crate::meeting::find;
        use crate::schedule::ScheduleIndex;

        let table = Table::from_records(vec![
            ("Alice", vec![("Mon", "9AM-5PM")]),
            ("Bob", vec![("Mon", "unavailable")]),
        ]);

        assert!(find(&ScheduleIndex::build(&table), 1.0).is_empty());
    }

    #[test]
    fn group_of_one_gets_perfect_slots() {
        use crate::input::Table;
        use crate::meeting::find;
        use crate::schedule::ScheduleIndex;
        use crate::time::TimeRange;

        let table = Table::from_records(vec![("Alice", vec![("Mon", "9AM-5PM, 9-12PM")])]);

        let times = find(&ScheduleIndex::build(&table), 1.0);

        assert_eq!(times.perfect_slots.len(), 1);
        assert_eq!(times.perfect_slots[0].time, TimeRange::new(9, 17));
        assert!(times.best_alternative_slots.is_empty());
    }

    #[test]
    fn nobody_no_dates_no_slots() {
        use crate::input::Table;
        use crate::meeting::find;
        use crate::schedule::ScheduleIndex;

        let empty = Table::new(vec!["Name".to_string()], vec![]).unwrap();
        assert!(find(&ScheduleIndex::build(&empty), 1.0).is_empty());

        let dateless = Table::new(vec!["Name".to_string()], vec![vec!["Alice".to_string()]]).unwrap();
        assert!(find(&ScheduleIndex::build(&dateless), 1.0).is_empty());
    }

    #[test]
    fn non_positive_duration_matches_any_overlap() {
        use crate::input::Table;
        use crate::meeting::find;
        use crate::schedule::ScheduleIndex;

        let table = Table::from_records(vec![
            ("Alice", vec![("Mon", "9AM-10AM")]),
            ("Bob", vec![("Mon", "9AM-5PM")]),
        ]);
        let index = ScheduleIndex::build(&table);

        assert_eq!(find(&index, 0.0).perfect_slots.len(), 1);
        assert_eq!(find(&index, -2.0).perfect_slots.len(), 1);
        assert!(find(&index, 1.5).perfect_slots.is_empty());
    }

    #[test]
    fn unsorted_overlapping_candidates_are_kept() {
        use crate::input::Table;
        use crate::meeting::find;
        use crate::schedule::ScheduleIndex;
        use crate::time::TimeRange;

        let table = Table::from_records(vec![
            ("Alice", vec![("Mon", "9AM-5PM, 1-3PM")]),
            ("Bob", vec![("Mon", "12PM-4PM")]),
        ]);

        let times = find(&ScheduleIndex::build(&table), 1.0);

        assert_eq!(
            times.perfect_slots.iter().map(|slot| slot.time).collect::<Vec<_>>(),
            [TimeRange::new(12, 16), TimeRange::new(13, 15)]
        );
    }

    #[test]
    fn searches_are_repeatable() {
        use crate::input::Table;
        use crate::meeting::find;
        use crate::schedule::ScheduleIndex;

        let table = Table::from_records(vec![
            ("Alice", vec![("Wed", "9AM-12PM"), ("Mon", "1-4PM")]),
            ("Bob", vec![("Wed", "10AM-2PM"), ("Mon", "NA")]),
            ("Carol", vec![("Wed", "n/a"), ("Mon", "2-6PM")]),
        ]);

        let first = find(&ScheduleIndex::build(&table), 1.0);
        let second = find(&ScheduleIndex::build(&table), 1.0);

        assert_eq!(first, second);
        assert_eq!(
            first
                .best_alternative_slots
                .iter()
                .map(|slot| slot.to_string())
                .collect::<Vec<_>>(),
            ["Mon 2PM-4PM", "Wed 10AM-12PM"]
        );
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn parallel_searches_match_sequential_ones() {
        use crate::input::Table;
        use crate::meeting::{find, find_many};
        use crate::schedule::ScheduleIndex;

        let table = Table::from_records(vec![
            ("Alice", vec![("Mon", "9AM-5PM"), ("Tue", "1-3PM")]),
            ("Bob", vec![("Mon", "11AM-2PM"), ("Tue", "9AM-5PM")]),
        ]);
        let index = ScheduleIndex::build(&table);
        let durations = [0.5, 1.0, 2.0, 3.0];

        let parallel = find_many(&index, &durations);

        assert_eq!(
            parallel,
            durations.iter().map(|&d| find(&index, d)).collect::<Vec<_>>()
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialized_slots_carry_coverage() {
        use crate::input::Table;
        use crate::meeting::{find, Search};
        use crate::schedule::ScheduleIndex;

        let table = Table::from_records(vec![
            ("Alice", vec![("Tue", "NA")]),
            ("Bob", vec![("Tue", "2-4PM")]),
            ("Carol", vec![("Tue", "2-4PM")]),
            ("Dave", vec![("Tue", "2-4PM")]),
        ]);

        let times = find(&ScheduleIndex::build(&table), 1.0);
        let json = serde_json::to_value(&times).unwrap();

        assert_eq!(json["perfect_slots"], serde_json::json!([]));
        assert_eq!(json["best_alternative_slots"][0]["coverage"], 0.75);
        assert_eq!(json["best_alternative_slots"][0]["start"], 14);
        assert_eq!(json["best_alternative_slots"][0]["unavailable"], serde_json::json!(["Alice"]));

        let search: Search = serde_json::from_str(r#"{ "duration": 1.5 }"#).unwrap();
        assert_eq!(search, Search::new(1.5));
    }
}
