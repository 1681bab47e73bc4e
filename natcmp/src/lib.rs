//! Natural ("human") ordering of strings.
//!
//! Runs of ASCII digits are compared by their numeric value, so `"img2"`
//! sorts before `"img10"`. Everything else is compared character by
//! character, case-insensitively for [`compare`].
//!
//! Leading zeros do not affect the numeric value of a run. Two strings that
//! only differ in the zero-padding of their numbers are ordered by the first
//! run whose width differs, the narrower run being lesser:
//!
//! ```
//! use std::cmp::Ordering;
//!
//! assert_eq!(natcmp::compare("x7", "x007"), Ordering::Less);
//! assert_eq!(natcmp::compare("x7y", "x007z"), Ordering::Less);
//! assert_eq!(natcmp::compare("File1", "file1"), Ordering::Equal);
//! ```

use core::cmp::Ordering;

/// Compares two strings in natural order, ignoring letter case.
pub fn compare(a: &str, b: &str) -> Ordering {
    compare_by(a, b, fold_case)
}

/// Compares two strings in natural order, honoring letter case.
pub fn compare_case_sensitive(a: &str, b: &str) -> Ordering {
    compare_by(a, b, |a, b| a.cmp(&b))
}

/// A string slice ordered by [`compare`].
#[derive(Clone, Copy, Debug)]
pub struct Natural<'a>(pub &'a str);

impl Ord for Natural<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self.0, other.0)
    }
}

impl PartialOrd for Natural<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Natural<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for Natural<'_> {}

fn fold_case(a: char, b: char) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    a.to_lowercase().cmp(b.to_lowercase())
}

fn compare_by(mut a: &str, mut b: &str, cmp_char: fn(char, char) -> Ordering) -> Ordering {
    // Decided only once everything else compares equal.
    let mut padding = Ordering::Equal;
    loop {
        let (x, y) = match (a.chars().next(), b.chars().next()) {
            (None, None) => return padding,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => (x, y),
        };

        if x.is_ascii_digit() && y.is_ascii_digit() {
            let x = DigitRun::take(&mut a);
            let y = DigitRun::take(&mut b);
            match x.cmp_value(&y) {
                Ordering::Equal => padding = padding.then(x.width.cmp(&y.width)),
                ord => return ord,
            }
        } else {
            a = &a[x.len_utf8()..];
            b = &b[y.len_utf8()..];
            match cmp_char(x, y) {
                Ordering::Equal => {},
                ord => return ord,
            }
        }
    }
}

/// A maximal run of ASCII digits.
struct DigitRun<'a> {
    /// Digits after the leading zeros.
    significant: &'a str,
    /// Number of digits including the leading zeros.
    width: usize,
}

impl<'a> DigitRun<'a> {
    fn take(s: &mut &'a str) -> Self {
        let end = s
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(s.len());
        let (run, rest) = s.split_at(end);
        *s = rest;
        Self {
            significant: run.trim_start_matches('0'),
            width: run.len(),
        }
    }

    fn cmp_value(&self, other: &Self) -> Ordering {
        // ASCII digits order the same as their values, so equal-length runs
        // compare as big-endian numbers.
        self.significant
            .len()
            .cmp(&other.significant.len())
            .then_with(|| self.significant.cmp(other.significant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Ordering::{Equal, Greater, Less};

    #[test]
    fn numeric_runs_by_value() {
        assert_eq!(compare("img2", "img10"), Less);
        assert_eq!(compare("img10", "img2"), Greater);
        assert_eq!(compare("img12", "img12"), Equal);
        assert_eq!(compare("a99b", "a100b"), Less);
        assert_eq!(
            compare("v184467440737095516160", "v18446744073709551616"),
            Greater
        );
    }

    #[test]
    fn letters_ignore_case() {
        assert_eq!(compare("File1", "file1"), Equal);
        assert_eq!(compare("apple", "Banana"), Less);
        assert_eq!(compare("ÄRGER", "ärger"), Equal);
        assert_eq!(compare_case_sensitive("File1", "file1"), Less);
        assert_eq!(compare_case_sensitive("apple", "Banana"), Greater);
    }

    #[test]
    fn leading_zeros() {
        assert_eq!(compare("x007", "x8"), Less);
        assert_eq!(compare("x010", "x9"), Greater);
        assert_eq!(compare("x7", "x007"), Less);
        assert_eq!(compare("x007", "x7"), Greater);
        assert_eq!(compare("x0", "x00"), Less);
        // A later difference outranks the padding.
        assert_eq!(compare("x007a", "x7b"), Less);
        assert_eq!(compare("x7b", "x007a"), Greater);
    }

    #[test]
    fn prefixes() {
        assert_eq!(compare("", ""), Equal);
        assert_eq!(compare("", "a"), Less);
        assert_eq!(compare("abc", "ab"), Greater);
        assert_eq!(compare("x1", "x1y"), Less);
    }

    #[test]
    fn digits_against_other_chars() {
        assert_eq!(compare("a1", "ab"), Less);
        assert_eq!(compare("a1", "a-"), Greater);
        assert_eq!(compare("a10", "a:"), Less);
    }

    #[test]
    fn natural_wrapper() {
        let mut v = ["img10", "img2", "IMG1", "img02"];
        v.sort_by_key(|s| Natural(*s));
        assert_eq!(v, ["IMG1", "img2", "img02", "img10"]);
        assert!(Natural("A1") == Natural("a1"));
        assert!(Natural("a1") < Natural("a01"));
    }

    fn random_string() -> String {
        const ALPHABET: &[char] = &['a', 'A', 'b', 'B', '0', '1', '2', '9', '-', ' '];
        let len = fastrand::usize(..6);
        std::iter::repeat_with(|| ALPHABET[fastrand::usize(..ALPHABET.len())])
            .take(len)
            .collect()
    }

    #[test]
    fn total_order() {
        for cmp in [compare, compare_case_sensitive] {
            let mut input = std::iter::repeat_with(random_string)
                .take(60)
                .collect::<Vec<_>>();
            input.sort_by(|a, b| cmp(a, b));
            for (i, a) in input.iter().enumerate() {
                assert_eq!(cmp(a, a), Equal);
                for b in &input[i..] {
                    assert_ne!(cmp(a, b), Greater, "{a:?} > {b:?}");
                    assert_eq!(cmp(a, b), cmp(b, a).reverse(), "{a:?} <> {b:?}");
                }
            }
        }
    }
}
