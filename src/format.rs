//! Text helpers shared by the presenter and the renderer.
//!
//! Durations are rendered as `M:SS` (minutes unpadded). User-provided text is
//! passed through `escape_for_display` before it reaches the terminal so a file
//! name can never smuggle escape sequences into the screen.

/// Format `seconds` as `M:SS`.
///
/// Non-finite input renders as `0:00`, negative input is treated as zero.
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "0:00".to_string();
    }

    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Format a track duration, rendering an unknown (zero) duration as `--:--`.
pub fn format_track_duration(seconds: f64) -> String {
    if seconds > 0.0 && seconds.is_finite() {
        format_duration(seconds)
    } else {
        "--:--".to_string()
    }
}

/// Make `text` safe to embed in the terminal UI.
///
/// Control characters (C0, DEL and C1, which includes the CSI introducer) are
/// replaced by a visible `\u{..}` escape; everything else passes through.
pub fn escape_for_display(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_control() {
            out.push_str(&format!("\\u{{{:x}}}", ch as u32));
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests;
