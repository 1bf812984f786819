//! Size conversion between PostgreSQL size strings and kilobytes.
//!
//! All sizing math in the calculators is done in kilobytes ([`SizeKb`]).
//! Strings are only produced at the end of each calculator via
//! [`format_size`], and read back with [`parse_size`] when a later step
//! needs an already rendered value (e.g. `work_mem` reads `shared_buffers`).

/// Non-negative count of kilobytes.
pub type SizeKb = u64;

/// Kilobytes in one megabyte.
pub const MB: SizeKb = 1024;
/// Kilobytes in one gigabyte.
pub const GB: SizeKb = 1024 * MB;
/// Kilobytes in one terabyte.
pub const TB: SizeKb = 1024 * GB;

/// `n` megabytes expressed in kilobytes.
pub const fn mb(n: u64) -> SizeKb {
    n * MB
}

/// Error for a size string that is not `<digits><K|M|G|T>B`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeParseError {
    pub input: String,
}

impl std::fmt::Display for SizeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "malformed size '{}': expected <integer><KB|MB|GB|TB>",
            self.input
        )
    }
}

impl std::error::Error for SizeParseError {}

/// Parses a size string such as `"16MB"` into kilobytes.
///
/// Accepts `KB`, `MB`, `GB`, `TB` and also `kB`, which is what
/// [`format_size`] emits below one megabyte.
pub fn parse_size(text: &str) -> Result<SizeKb, SizeParseError> {
    let err = || SizeParseError {
        input: text.to_string(),
    };

    let rest = text.strip_suffix('B').ok_or_else(err)?;
    let unit = rest.chars().last().ok_or_else(err)?;
    let digits = &rest[..rest.len() - unit.len_utf8()];

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }

    let factor = match unit {
        'K' | 'k' => 1,
        'M' => MB,
        'G' => GB,
        'T' => TB,
        _ => return Err(err()),
    };

    let value: u64 = digits.parse().map_err(|_| err())?;
    value.checked_mul(factor).ok_or_else(err)
}

/// Renders kilobytes in the largest unit that holds at least one whole unit.
///
/// Division floors: `1536 MB` worth of kilobytes renders as `"1GB"`.
pub fn format_size(kb: SizeKb) -> String {
    if kb >= TB {
        format!("{}TB", kb / TB)
    } else if kb >= GB {
        format!("{}GB", kb / GB)
    } else if kb >= MB {
        format!("{}MB", kb / MB)
    } else {
        format!("{}kB", kb)
    }
}

/// Converts gibibytes to kilobytes, rounding to the nearest kilobyte.
pub fn gib_to_kb(gb: f64) -> SizeKb {
    (gb * GB as f64).round() as SizeKb
}
