use alloc::format;
use alloc::string::String;

use crate::*;

/// Formats elapsed seconds as `MM:SS`, minutes grow past two digits when needed.
pub fn format_time(seconds: Seconds) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
