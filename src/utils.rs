use crate::models::MAX_DIFFICULTY;
use chrono::{DateTime, Local, Utc};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const DATE_FORMAT_TODAY: &str = "Today %H:%M";
const DATE_FORMAT_YESTERDAY: &str = "Yesterday %H:%M";
const DATE_FORMAT_OTHER: &str = "%Y-%m-%d";

/// Cuts `s` to at most `max_width` terminal columns, ending with "...".
/// Works on display width, so Cyrillic and wide glyphs never split.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let budget = max_width - 3;
    let mut width = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push_str("...");
    out
}

/// Pads `s` with spaces up to `width` columns (no-op when already wider).
pub fn pad_to_width(s: &str, width: usize) -> String {
    let current = s.width();
    if current >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - current))
    }
}

pub fn format_review_date(reviewed_at: Option<DateTime<Utc>>) -> String {
    let Some(reviewed_at) = reviewed_at else {
        return "never".to_string();
    };
    let datetime: DateTime<Local> = reviewed_at.into();
    let today = Local::now().date_naive();
    let review_date = datetime.date_naive();

    if review_date == today {
        datetime.format(DATE_FORMAT_TODAY).to_string()
    } else if review_date == today - chrono::Duration::days(1) {
        datetime.format(DATE_FORMAT_YESTERDAY).to_string()
    } else {
        datetime.format(DATE_FORMAT_OTHER).to_string()
    }
}

/// "●●○○○" style gauge for a difficulty level.
pub fn difficulty_bar(level: u8) -> String {
    let level = level.min(MAX_DIFFICULTY) as usize;
    format!(
        "{}{}",
        "●".repeat(level),
        "○".repeat(MAX_DIFFICULTY as usize - level)
    )
}
