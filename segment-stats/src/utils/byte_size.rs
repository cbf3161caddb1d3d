use std::fmt;

const UNITS: [(i64, &str); 5] = [
    (1 << 50, "pb"),
    (1 << 40, "tb"),
    (1 << 30, "gb"),
    (1 << 20, "mb"),
    (1 << 10, "kb"),
];

/// A byte count with a human-readable rendering such as `2.1kb`.
///
/// The largest 1024-based unit not exceeding the value is used, with one
/// decimal truncated (not rounded) and a trailing `.0` dropped. Values below
/// one kilobyte, including negative ones, stay in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ByteSize(pub i64);

impl ByteSize {
    pub fn bytes(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ByteSize {
    fn from(bytes: i64) -> Self {
        Self(bytes)
    }
}

fn format_one_decimal(value: f64, suffix: &str) -> String {
    let repr = value.to_string();
    match repr.split_once('.') {
        Some((int, fraction)) => match fraction.chars().next() {
            Some(digit) if digit != '0' => format!("{int}.{digit}{suffix}"),
            _ => format!("{int}{suffix}"),
        },
        None => format!("{repr}{suffix}"),
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.0;
        let formatted = UNITS
            .iter()
            .find(|(unit, _)| bytes >= *unit)
            .map(|(unit, suffix)| format_one_decimal(bytes as f64 / *unit as f64, suffix))
            .unwrap_or_else(|| format!("{bytes}b"));
        f.pad(&formatted)
    }
}
