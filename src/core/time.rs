//! Timeline unit representation.
//! One unit is one pixel at zoom 1.0; the ruler labels two units per second.

/// Position or length on the timeline, in timeline units
pub type Units = f64;

/// Conversion constants
pub mod constants {
    use super::Units;

    pub const UNITS_PER_SECOND: Units = 2.0;
    pub const BYTES_PER_MEGABYTE: u64 = 1024 * 1024;
}

/// Timeline origin
pub const ZERO: Units = 0.0;

/// Convert seconds to timeline units
#[inline]
pub fn from_seconds(seconds: f64) -> Units {
    seconds * constants::UNITS_PER_SECOND
}

/// Convert timeline units to seconds
#[inline]
pub fn to_seconds(units: Units) -> f64 {
    units / constants::UNITS_PER_SECOND
}

/// Format a timeline position as M:SS
pub fn format_time(units: Units) -> String {
    let total_seconds = to_seconds(units.max(ZERO)).floor() as u64;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;

    format!("{}:{:02}", minutes, seconds)
}

/// Format a byte count as megabytes with one decimal, e.g. "4.0 MB"
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.1} MB", to_megabytes(bytes))
}

/// Convert a byte count to (fractional) megabytes
#[inline]
pub fn to_megabytes(bytes: u64) -> f64 {
    bytes as f64 / constants::BYTES_PER_MEGABYTE as f64
}
