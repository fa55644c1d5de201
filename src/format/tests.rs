use super::*;

#[test]
fn format_duration_pads_seconds_only() {
    assert_eq!(format_duration(125.0), "2:05");
    assert_eq!(format_duration(59.0), "0:59");
    assert_eq!(format_duration(0.0), "0:00");
    assert_eq!(format_duration(3600.0), "60:00");
    assert_eq!(format_duration(61.9), "1:01");
}

#[test]
fn format_duration_handles_non_finite_and_negative() {
    assert_eq!(format_duration(f64::NAN), "0:00");
    assert_eq!(format_duration(f64::INFINITY), "0:00");
    assert_eq!(format_duration(f64::NEG_INFINITY), "0:00");
    assert_eq!(format_duration(-4.0), "0:00");
}

#[test]
fn unknown_track_duration_is_distinct_from_zero_time() {
    assert_eq!(format_track_duration(0.0), "--:--");
    assert_eq!(format_track_duration(f64::NAN), "--:--");
    assert_eq!(format_track_duration(0.5), "0:00");
    assert_eq!(format_track_duration(200.0), "3:20");
}

#[test]
fn escape_for_display_neutralizes_terminal_sequences() {
    assert_eq!(escape_for_display("plain <b>name</b> & co"), "plain <b>name</b> & co");
    assert_eq!(escape_for_display("\u{1b}[31mred"), "\\u{1b}[31mred");
    assert_eq!(escape_for_display("tab\there"), "tab\\u{9}here");
    assert_eq!(escape_for_display("c1\u{9b}2J"), "c1\\u{9b}2J");
    assert_eq!(escape_for_display("Björk – Jóga"), "Björk – Jóga");
}
