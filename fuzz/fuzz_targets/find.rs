#![no_main]
use libfuzzer_sys::fuzz_target;
use zeitfenster::{ScheduleIndex, Search, Table, DEFAULT_ALTERNATIVE_LIMIT};

fuzz_target!(|data: (Table, u8, Option<u8>)| {
    #[cfg(feature = "log")]
    let _ = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stdout())
        .apply();

    let (table, duration, limit) = data;
    let duration = f64::from(duration) / 2.0;
    let mut search = Search::new(duration);
    if let Some(limit) = limit {
        search = search.with_limit(usize::from(limit));
    }

    let limit = search.limit.unwrap_or(DEFAULT_ALTERNATIVE_LIMIT);

    let index = ScheduleIndex::build(&table);
    let times = search.run(&index);
    let total = index.len();

    for slot in times.perfect_slots.iter().chain(&times.best_alternative_slots) {
        assert!(
            slot.length() >= duration,
            "Slot {} is shorter than {} hours",
            slot,
            duration
        );
        assert_eq!(
            slot.available.len() + slot.unavailable.len(),
            total,
            "Slot {} does not account for every participant",
            slot
        );
    }

    for slot in &times.perfect_slots {
        assert!(slot.is_perfect(), "Perfect slot {} is missing people", slot);
        assert!(
            total < 2
                || times.best_alternative_slots.len() == limit
                || times.best_alternative_slots.contains(slot),
            "Perfect slot {} is not an alternative",
            slot
        );
    }

    assert!(
        times
            .best_alternative_slots
            .windows(2)
            .all(|pair| pair[0].coverage() >= pair[1].coverage()),
        "Alternatives are not ranked by coverage"
    );
    assert!(times.best_alternative_slots.len() <= limit);
    assert!(times.best_alternative_slots.iter().all(|slot| slot.available.len() >= 2));

    assert_eq!(times, search.run(&ScheduleIndex::build(&table)), "Search is not repeatable");
});
