//! Natural-order string comparison for page filenames.
//!
//! Embedded digit runs compare as integers ("page2" < "page10"); everything
//! else compares case-insensitively. Used to order pages within a directory.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Compare two strings with natural-order, case-insensitive semantics.
pub fn natural_cmp_ignore_case(a: &str, b: &str) -> Ordering {
    let mut ca = a.chars().peekable();
    let mut cb = b.chars().peekable();

    loop {
        match (ca.peek().copied(), cb.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if x.is_ascii_digit() && y.is_ascii_digit() {
                    let run_a = take_digit_run(&mut ca);
                    let run_b = take_digit_run(&mut cb);
                    match cmp_digit_runs(&run_a, &run_b) {
                        Ordering::Equal => {}
                        ord => return ord,
                    }
                } else {
                    match x.to_lowercase().cmp(y.to_lowercase()) {
                        Ordering::Equal => {
                            ca.next();
                            cb.next();
                        }
                        ord => return ord,
                    }
                }
            }
        }
    }
}

fn take_digit_run(chars: &mut Peekable<Chars>) -> String {
    let mut run = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

/// Compare two digit runs by numeric value. Runs may exceed integer range,
/// so compare the zero-stripped digits by length and then lexically. Equal
/// values with different zero-padding fall back to the raw runs so the
/// ordering stays total.
fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let sa = a.trim_start_matches('0');
    let sb = b.trim_start_matches('0');
    sa.len()
        .cmp(&sb.len())
        .then_with(|| sa.cmp(sb))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_runs_compare_as_integers() {
        assert_eq!(natural_cmp_ignore_case("page2", "page10"), Ordering::Less);
        assert_eq!(natural_cmp_ignore_case("page10", "page2"), Ordering::Greater);
        assert_eq!(natural_cmp_ignore_case("page1", "page1"), Ordering::Equal);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(natural_cmp_ignore_case("Page2", "page10"), Ordering::Less);
        assert_eq!(natural_cmp_ignore_case("ABC", "abd"), Ordering::Less);
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(natural_cmp_ignore_case("page002", "page10"), Ordering::Less);
        assert_eq!(natural_cmp_ignore_case("page01", "page1"), Ordering::Less);
    }

    #[test]
    fn test_sort_order() {
        let mut names = vec!["page10", "page1", "cover", "page2", "Page3"];
        names.sort_by(|a, b| natural_cmp_ignore_case(a, b));
        assert_eq!(names, vec!["cover", "page1", "page2", "Page3", "page10"]);
    }

    #[test]
    fn test_huge_digit_runs() {
        assert_eq!(
            natural_cmp_ignore_case("p99999999999999999999", "p100000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn test_digits_before_letters() {
        assert_eq!(natural_cmp_ignore_case("1intro", "intro"), Ordering::Less);
    }
}
