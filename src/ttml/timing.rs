/*!
 * Clock-time parsing and timing propagation.
 *
 * Times are nanosecond counts (`ClockTime`). Only the `HH:MM:SS[.fraction]`
 * clock-time form is accepted; the fraction is scaled to milliseconds and
 * anything beyond millisecond precision is truncated.
 */

use log::{error, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ttml::element::ElementNode;

/// Time in nanoseconds
pub type ClockTime = u64;

pub const MSECOND: ClockTime = 1_000_000;
pub const SECOND: ClockTime = 1_000 * MSECOND;

static CLOCK_TIME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2,}):(\d{2}):(\d{2})(?:\.(\d+))?$").unwrap());

/// Parse a `HH:MM:SS[.fraction]` timecode.
///
/// Minutes above 59 or seconds above 60 are logged but still produce a value.
/// Strings that do not match the grammar yield `None`.
pub fn parse_timecode(timestring: &str) -> Option<ClockTime> {
    let Some(caps) = CLOCK_TIME_REGEX.captures(timestring.trim()) else {
        error!("Badly formatted time string: {}", timestring);
        return None;
    };

    let field = |idx: usize| -> Option<u64> { caps.get(idx)?.as_str().parse::<u64>().ok() };
    let (Some(hours), Some(minutes), Some(seconds)) = (field(1), field(2), field(3)) else {
        error!("Time string out of range: {}", timestring);
        return None;
    };

    let milliseconds = caps
        .get(4)
        .map(|fraction| fraction_to_millis(fraction.as_str()))
        .unwrap_or(0);

    if minutes > 59 || seconds > 60 {
        error!(
            "Invalid time string (minutes or seconds out-of-bounds): {}",
            timestring
        );
    }

    let total_ms = hours
        .saturating_mul(3_600_000)
        .saturating_add(minutes * 60_000)
        .saturating_add(seconds * 1_000)
        .saturating_add(milliseconds);
    Some(total_ms.saturating_mul(MSECOND))
}

/// `"5"` -> 500, `"05"` -> 50, `"123456"` -> 123
fn fraction_to_millis(digits: &str) -> u64 {
    let mut millis = 0u64;
    for (idx, ch) in digits.chars().take(3).enumerate() {
        let digit = ch.to_digit(10).unwrap_or(0) as u64;
        millis += digit * 10u64.pow(2 - idx as u32);
    }
    millis
}

/// Format a clock time as `HH:MM:SS.mmm`
pub fn format_timecode(time: ClockTime) -> String {
    let ms = time / MSECOND;
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

/// Give every leaf a complete begin/end pair.
///
/// A leaf without both values adopts the begin of its nearest ancestor that
/// declares one, and the end of the nearest ancestor that declares an end. Leaves that still lack a complete pair are removed, along
/// with any ancestor left without children. Returns `false` when the root
/// itself has to go.
pub fn resolve_timings(root: &mut ElementNode) -> bool {
    resolve_node(root, None)
}

fn resolve_node(node: &mut ElementNode, ancestor: Option<(ClockTime, Option<ClockTime>)>) -> bool {
    if node.is_leaf() {
        let element = &mut node.element;
        if element.begin.is_some() && element.end.is_some() {
            return true;
        }
        if let Some((begin, end)) = ancestor {
            element.begin = Some(begin);
            element.end = end;
        }
        if element.begin.is_none() || element.end.is_none() {
            warn!(
                "Dropping {:?} element without resolvable timing{}",
                element.kind,
                element
                    .text
                    .as_deref()
                    .map(|text| format!(" (\"{}\")", text))
                    .unwrap_or_default()
            );
            return false;
        }
        return true;
    }

    // An ancestor that only declares begin keeps the end of the one above it
    let inherited = match node.element.begin {
        Some(begin) => Some((begin, node.element.end.or(ancestor.and_then(|(_, end)| end)))),
        None => ancestor,
    };
    node.children.retain_mut(|child| resolve_node(child, inherited));
    !node.children.is_empty()
}
