use chrono::{DateTime, Local};

/// Date format used on sent cards: MM/DD/YY HH:MM, 24-hour clock
pub const SENT_DATE_FORMAT: &str = "%m/%d/%y %H:%M";

/// Function to format the moment a card was sent
pub fn format_sent_date(date: &DateTime<Local>) -> String {
    date.format(SENT_DATE_FORMAT).to_string()
}

/// Format a timestamp as a readable local date for listings
pub fn format_timestamp(date: &DateTime<Local>) -> String {
    date.format("%Y-%m-%d %H:%M:%S").to_string()
}
