//! Version ordering used to break mediation ties, plus Maven range matching.
//!
//! A version is split into parts: runs of digits and runs of letters. Any
//! other character only separates parts. Two versions compare part by part,
//! padding the shorter one with `"0"`:
//! - numeric parts compare by magnitude
//! - two well-known qualifiers compare by their rank (below)
//! - a text part beats a numeric one
//! - any other pair of text parts compares case-insensitively
//!
//! When every part ties, the version with fewer parts ranks higher, and
//! failing that the whole strings compare case-insensitively.

use std::cmp::Ordering;

/// Well-known qualifiers, lowest first.
const SPECIAL_WORDS: &[&str] = &[
    // development
    "snapshot",
    "incubator",
    "incubating",
    "nightly",
    "unofficial",
    "debug",
    "test",
    "dev",
    // milestones
    "a",
    "alpha",
    "b",
    "beta",
    "m",
    "milestone",
    "pre",
    "rc",
    "cr",
    // releases
    "fcs",
    "gold",
    "g",
    "latest",
    "current",
    "release",
    "final",
    "ga",
];

/// Split a version into digit runs and letter runs.
pub fn version_parts(version: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start: Option<(usize, bool)> = None;

    for (i, ch) in version.char_indices() {
        let kind = if ch.is_ascii_digit() {
            Some(true)
        } else if ch.is_alphabetic() {
            Some(false)
        } else {
            None
        };
        match (start, kind) {
            (Some((_, numeric)), Some(k)) if numeric == k => {}
            (Some((s, _)), _) => {
                parts.push(&version[s..i]);
                start = kind.map(|k| (i, k));
            }
            (None, Some(k)) => start = Some((i, k)),
            (None, None) => {}
        }
    }
    if let Some((s, _)) = start {
        parts.push(&version[s..]);
    }
    parts
}

fn is_numeric(part: &str) -> bool {
    !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
}

fn special_rank(part: &str) -> Option<usize> {
    SPECIAL_WORDS.iter().position(|w| w.eq_ignore_ascii_case(part))
}

fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Digit runs of any length, without going through an integer type.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn compare_parts(a: &str, b: &str) -> Ordering {
    match (is_numeric(a), is_numeric(b)) {
        (true, true) => compare_numeric(a, b),
        (false, true) => Ordering::Greater,
        (true, false) => Ordering::Less,
        (false, false) => match (special_rank(a), special_rank(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => compare_ignore_case(a, b),
        },
    }
}

/// Total order over version strings.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let pa = version_parts(a);
    let pb = version_parts(b);

    for i in 0..pa.len().max(pb.len()) {
        let x = pa.get(i).copied().unwrap_or("0");
        let y = pb.get(i).copied().unwrap_or("0");
        let ord = compare_parts(x, y);
        if ord != Ordering::Equal {
            return ord;
        }
    }

    match pb.len().cmp(&pa.len()) {
        Ordering::Equal => compare_ignore_case(a, b),
        ord => ord,
    }
}

/// [`compare_versions`] as a value, for code that is handed a comparator.
#[derive(Debug, Default, Clone, Copy)]
pub struct VersionComparator;

impl VersionComparator {
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        compare_versions(a, b)
    }
}

/// The newest of a set of versions.
pub fn newest<'a>(versions: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    versions
        .into_iter()
        .max_by(|a, b| compare_versions(a, b))
}

/// A Maven version range expression.
///
/// Supports: `[1.0,2.0)`, `[1.0,]`, `(,2.0)`, `[1.0]` (exact).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    pub lower: Option<Bound>,
    pub upper: Option<Bound>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bound {
    pub version: String,
    pub inclusive: bool,
}

impl VersionRange {
    /// Parse a Maven version range string.
    ///
    /// Returns `None` for bare versions (not a range).
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim();
        if !(s.starts_with('[') || s.starts_with('(')) || !(s.ends_with(']') || s.ends_with(')'))
        {
            return None;
        }
        if s.len() < 2 {
            return None;
        }

        let open_inclusive = s.starts_with('[');
        let close_inclusive = s.ends_with(']');
        let inner = &s[1..s.len() - 1];

        let bound = |v: &str, inclusive: bool| {
            let v = v.trim();
            (!v.is_empty()).then(|| Bound {
                version: v.to_string(),
                inclusive,
            })
        };

        match inner.split_once(',') {
            Some((lower, upper)) => Some(VersionRange {
                lower: bound(lower, open_inclusive),
                upper: bound(upper, close_inclusive),
            }),
            // [1.0] means exactly 1.0
            None => {
                let exact = bound(inner, true)?;
                Some(VersionRange {
                    lower: Some(exact.clone()),
                    upper: Some(exact),
                })
            }
        }
    }

    /// Check if a version satisfies this range.
    pub fn contains(&self, version: &str) -> bool {
        if let Some(ref lower) = self.lower {
            let cmp = compare_versions(version, &lower.version);
            if cmp == Ordering::Less || (!lower.inclusive && cmp == Ordering::Equal) {
                return false;
            }
        }
        if let Some(ref upper) = self.upper {
            let cmp = compare_versions(version, &upper.version);
            if cmp == Ordering::Greater || (!upper.inclusive && cmp == Ordering::Equal) {
                return false;
            }
        }
        true
    }

    /// The newest of `available` inside the range.
    pub fn newest_in<'a>(&self, available: &'a [String]) -> Option<&'a str> {
        newest(
            available
                .iter()
                .map(String::as_str)
                .filter(|v| self.contains(v)),
        )
    }
}
