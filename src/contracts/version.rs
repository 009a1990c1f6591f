//! Library version ordering and nearest-version selection.

use std::cmp::Ordering;

#[derive(Debug, PartialEq, Eq)]
enum Run<'a> {
    Number(&'a str),
    Word(&'a str),
}

/// Split a version into digit and non-digit runs. Any character that is not
/// alphanumeric separates runs and is dropped.
fn runs(version: &str) -> Vec<Run<'_>> {
    let mut runs = Vec::new();
    let mut start = None;
    let mut digits = false;

    for (index, ch) in version.char_indices() {
        let is_digit = ch.is_ascii_digit();
        let is_part = ch.is_alphanumeric();
        if let Some(begin) = start {
            if !is_part || is_digit != digits {
                runs.push(make_run(&version[begin..index], digits));
                start = None;
            }
        }
        if is_part && start.is_none() {
            start = Some(index);
            digits = is_digit;
        }
    }
    if let Some(begin) = start {
        runs.push(make_run(&version[begin..], digits));
    }
    runs
}

fn make_run(text: &str, digits: bool) -> Run<'_> {
    if digits {
        Run::Number(text.trim_start_matches('0'))
    } else {
        Run::Word(text)
    }
}

fn compare_runs(a: &Run<'_>, b: &Run<'_>) -> Ordering {
    match (a, b) {
        // Leading zeros are already trimmed, so length orders magnitude.
        (Run::Number(a), Run::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
        (Run::Word(a), Run::Word(b)) => a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase()),
        // `1.0.beta` sorts before `1.0.0`.
        (Run::Word(_), Run::Number(_)) => Ordering::Less,
        (Run::Number(_), Run::Word(_)) => Ordering::Greater,
    }
}

/// Compare two version strings run by run: numeric runs numerically, word
/// runs case-insensitively. A version that runs out of runs first is smaller.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let (a, b) = (runs(a), runs(b));
    for (left, right) in a.iter().zip(&b) {
        let ord = compare_runs(left, right);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Whether `first` is closer to `installed` than `second`: a longer common
/// prefix wins; on equal non-empty prefixes the smaller gap at the first
/// differing character wins.
fn closer(installed: &str, first: &str, second: &str) -> bool {
    let (installed, first, second) = (installed.as_bytes(), first.as_bytes(), second.as_bytes());
    let lcp_first = common_prefix_len(installed, first);
    let lcp_second = common_prefix_len(installed, second);
    if lcp_first != lcp_second {
        return lcp_first > lcp_second;
    }
    if lcp_first == 0 {
        return false;
    }
    let at = lcp_first;
    match (installed.get(at), first.get(at), second.get(at)) {
        (Some(&i), Some(&f), Some(&s)) => i.abs_diff(f) < i.abs_diff(s),
        _ => false,
    }
}

/// Pick the entry recorded for the version nearest to `installed`.
///
/// An exact match wins. Otherwise the nearest lower and higher versions
/// compete by [`closer`], and the lower one wins ties. With only one side
/// available, that side is used.
pub fn nearest_version<'a, T>(installed: &str, candidates: &'a [(String, T)]) -> Option<&'a T> {
    let mut floor: Option<&(String, T)> = None;
    let mut ceiling: Option<&(String, T)> = None;

    for candidate in candidates {
        match compare_versions(&candidate.0, installed) {
            Ordering::Equal => return Some(&candidate.1),
            Ordering::Less => {
                if floor.is_none_or(|f| compare_versions(&candidate.0, &f.0) == Ordering::Greater) {
                    floor = Some(candidate);
                }
            }
            Ordering::Greater => {
                if ceiling.is_none_or(|c| compare_versions(&candidate.0, &c.0) == Ordering::Less) {
                    ceiling = Some(candidate);
                }
            }
        }
    }

    match (floor, ceiling) {
        (Some((_, low)), None) => Some(low),
        (None, Some((_, high))) => Some(high),
        (Some((low_version, low)), Some((high_version, high))) => {
            if closer(installed, high_version, low_version) {
                Some(high)
            } else {
                Some(low)
            }
        }
        (None, None) => None,
    }
}
