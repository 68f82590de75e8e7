#![no_main]
use libfuzzer_sys::fuzz_target;
use zeitfenster::{format_time, parse_cell_report};

fuzz_target!(|cell: String| {
    let parsed = parse_cell_report(&cell);

    if parsed.marked_unavailable {
        assert!(
            parsed.ranges.is_empty() && parsed.skipped.is_empty(),
            "Unavailable cell {:?} still produced {:?}",
            cell,
            parsed
        );
    }

    for range in parsed.ranges {
        // Whatever came out must render
        let _ = format_time(range.start());
        let _ = format_time(range.end());
    }
});
