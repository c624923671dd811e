//! Receipt text reflow
//!
//! Tesseract output for a receipt is a soup of words with no layout left.
//! This re-lays it out the way the paper looked: section headers centered,
//! prices pushed to the right edge, body text wrapped to the paper width.

use regex::Regex;

/// Re-lay recognized words out as receipt-shaped text
pub fn reflow(text: &str, width: usize) -> String {
    // Bare price: digits with optional thousands groups and 1-2 decimals,
    // e.g. "12.40", "1,50", "1.234,56"
    let price_re = Regex::new(r"^\d+(?:\.\d{3})*[.,]\d{1,2}$").unwrap();

    let mut structured: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for word in text.split_whitespace() {
        if is_header_word(word) {
            flush(&mut structured, &mut current);
            structured.push(String::new());
            structured.push(center(word, width));
            structured.push(String::new());
        } else if is_price_word(word, &price_re) {
            flush(&mut structured, &mut current);
            structured.push(right_align(word, width));
        } else {
            let candidate_len: usize = current
                .iter()
                .chain(std::iter::once(&word))
                .map(|w| w.chars().count())
                .sum::<usize>()
                + current.len();
            if candidate_len <= width {
                current.push(word);
            } else {
                flush(&mut structured, &mut current);
                current.push(word);
            }
        }
    }

    flush(&mut structured, &mut current);
    structured.join("\n")
}

/// Section headers print in caps: more than two characters, no lowercase
fn is_header_word(word: &str) -> bool {
    let mut has_alpha = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            has_alpha = true;
            if !c.is_uppercase() {
                return false;
            }
        }
    }
    has_alpha && word.chars().count() > 2
}

fn is_price_word(word: &str, price_re: &Regex) -> bool {
    word.contains(['€', '$', '£', '¥']) || price_re.is_match(word)
}

fn flush(structured: &mut Vec<String>, current: &mut Vec<&str>) {
    if !current.is_empty() {
        structured.push(current.join(" "));
        current.clear();
    }
}

fn center(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    format!("{}{}", " ".repeat((width - len) / 2), s)
}

fn right_align(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    format!("{}{}", " ".repeat(width - len), s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_are_centered_with_blank_lines() {
        let out = reflow("KAHVILA kahvi", 20);
        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1].trim(), "KAHVILA");
        assert!(lines[1].starts_with("      "));
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "kahvi");
    }

    #[test]
    fn prices_go_to_the_right_edge() {
        let out = reflow("kahvi 2,50", 20);
        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines[0], "kahvi");
        assert_eq!(lines[1].chars().count(), 20);
        assert!(lines[1].ends_with("2,50"));
    }

    #[test]
    fn currency_symbol_marks_a_price() {
        let out = reflow("pulla 3,00€", 20);
        assert!(out.lines().any(|l| l.ends_with("3,00€")));
    }

    #[test]
    fn thousands_grouped_price_is_detected() {
        let out = reflow("lasku 1.234,56", 20);
        assert!(out.lines().last().unwrap().ends_with("1.234,56"));
    }

    #[test]
    fn body_text_wraps_at_width() {
        let out = reflow("maito leipä juusto voi kinkku", 12);
        for line in out.lines() {
            assert!(line.chars().count() <= 12);
        }
        assert!(out.lines().count() > 1);
    }

    #[test]
    fn short_caps_and_plain_numbers_stay_in_body() {
        // "AB" is too short for a header, "12" has no decimals
        let out = reflow("AB joi 12 kupillista", 48);
        assert_eq!(out, "AB joi 12 kupillista");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(reflow("", 48), "");
    }
}
