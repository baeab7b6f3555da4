//! SRT composition from timed transcription segments.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Invalid segments (blank text, negative start, start not before end) are
/// dropped; the rest are ordered by time and numbered from 1.
pub fn compose_srt(segments: &[Segment]) -> String {
    let mut cues: Vec<(f64, f64, String)> = segments
        .iter()
        .filter(|s| s.start >= 0.0 && s.start < s.end)
        .filter_map(|s| {
            let text = strip_blank_lines(s.text.trim());
            (!text.is_empty()).then_some((s.start, s.end, text))
        })
        .collect();

    cues.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

    let mut out = String::new();
    for (index, (start, end, text)) in cues.iter().enumerate() {
        out.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            index + 1,
            format_timestamp(*start),
            format_timestamp(*end),
            text
        ));
    }
    out
}

fn strip_blank_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// `HH:MM:SS,mmm`; milliseconds are truncated, not rounded.
pub fn format_timestamp(seconds: f64) -> String {
    let micros = (seconds.max(0.0) * 1_000_000.0).round() as u64;
    let total_millis = micros / 1_000;

    let millis = total_millis % 1_000;
    let total_secs = total_millis / 1_000;
    let secs = total_secs % 60;
    let mins = (total_secs / 60) % 60;
    let hours = total_secs / 3_600;

    format!("{:02}:{:02}:{:02},{:03}", hours, mins, secs, millis)
}
