//! Duration token extraction.
//!
//! Scans free text for `<number><unit>` markers ("2 hours", "30 min",
//! "1.5h") and sums them into fractional hours.

use std::sync::LazyLock;

use regex::Regex;

/// Pre-compiled regex for duration tokens.
///
/// The unit vocabulary is a closed enumeration; the trailing word boundary
/// keeps longer words from matching ("3 months" is not 3 minutes).
static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?P<value>\d+(?:\.\d+)?)\s*(?P<unit>h|hr|hrs|hour|hours|m|min|mins|minute|minutes)\b")
        .unwrap()
});

/// Extracts the total fractional hours from a line of text.
///
/// Tokens are scanned left to right without overlap and sum additively.
/// A matched unit word starting with `m` counts as minutes and is divided
/// by 60; every other vocabulary word counts as whole hours. Unmatched
/// text is ignored, so extraction never fails; a line with no tokens
/// yields 0.0.
#[must_use]
pub fn parse_hours(line: &str) -> f64 {
    let mut total = 0.0;
    for caps in DURATION_RE.captures_iter(line) {
        let Ok(value) = caps["value"].parse::<f64>() else {
            continue;
        };
        if caps["unit"].starts_with(['m', 'M']) {
            total += value / 60.0;
        } else {
            total += value;
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::float_cmp, reason = "exact equality intended for exact sums")]
    fn line_without_tokens_yields_zero() {
        assert_eq!(parse_hours(""), 0.0);
        assert_eq!(parse_hours("sync with design team"), 0.0);
        assert_eq!(parse_hours("ticket #1234"), 0.0);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "exact equality intended for exact sums")]
    fn hour_forms_count_as_whole_hours() {
        assert_eq!(parse_hours("2 hours"), 2.0);
        assert_eq!(parse_hours("2 hour"), 2.0);
        assert_eq!(parse_hours("2 hrs"), 2.0);
        assert_eq!(parse_hours("2 hr"), 2.0);
        assert_eq!(parse_hours("2h"), 2.0);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "exact equality intended for exact sums")]
    fn minute_forms_divide_by_sixty() {
        assert_eq!(parse_hours("30 minutes"), 0.5);
        assert_eq!(parse_hours("30 minute"), 0.5);
        assert_eq!(parse_hours("30 mins"), 0.5);
        assert_eq!(parse_hours("30 min"), 0.5);
        assert_eq!(parse_hours("30m"), 0.5);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "exact equality intended for exact sums")]
    fn fractional_values_are_accepted() {
        assert_eq!(parse_hours("1.5 hours"), 1.5);
        assert_eq!(parse_hours("7.5h"), 7.5);
        assert_eq!(parse_hours("90 min"), 1.5);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "exact equality intended for exact sums")]
    fn multiple_tokens_sum_additively() {
        assert_eq!(parse_hours("2h 30m"), 2.5);
        assert_eq!(parse_hours("pairing 1 hour, review 45 min"), 1.75);
        assert_eq!(parse_hours("1h plus 1h plus 1h"), 3.0);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "exact equality intended for exact sums")]
    fn unit_matching_is_case_insensitive() {
        assert_eq!(parse_hours("2 HOURS"), 2.0);
        assert_eq!(parse_hours("30 Min"), 0.5);
        assert_eq!(parse_hours("1.5H"), 1.5);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "exact equality intended for exact sums")]
    fn word_boundary_rejects_longer_words() {
        // "months" starts with "m" but is not in the vocabulary.
        assert_eq!(parse_hours("3 months"), 0.0);
        assert_eq!(parse_hours("5 hx"), 0.0);
        assert_eq!(parse_hours("10 minty snacks"), 0.0);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "exact equality intended for exact sums")]
    fn tokens_embedded_in_prose_are_found() {
        assert_eq!(parse_hours("Worked 9 hours on the importer"), 9.0);
        assert_eq!(parse_hours("standup (15 min) then deep work 3h"), 3.25);
    }
}
