/// Extracts a numeric score from one line of server output.
///
/// `pattern` is a literal template with a single `#` placeholder marking
/// where the number sits, e.g. `"Total score: # pts"`. Whitespace is
/// insignificant on both sides. Returns `None` whenever the line does not
/// have the shape `prefix <digits[.digits]> suffix`; a malformed line is
/// never an error, just not a score.
pub fn extract_score(pattern: &str, line: &str) -> Option<f64> {
    let pat = strip_whitespace(pattern);
    let line = strip_whitespace(line);

    let placeholder = pat.iter().position(|&c| c == '#')?;
    if line.len() < placeholder || pat[..placeholder] != line[..placeholder] {
        return None;
    }

    let mut i = placeholder;
    let mut number = String::new();
    while i < line.len() && line[i].is_ascii_digit() {
        number.push(line[i]);
        i += 1;
    }
    if number.is_empty() {
        return None;
    }
    if i < line.len() && line[i] == '.' {
        number.push('.');
        i += 1;
        while i < line.len() && line[i].is_ascii_digit() {
            number.push(line[i]);
            i += 1;
        }
    }

    // The rest of the line must be exactly the rest of the pattern.
    if line[i..] != pat[placeholder + 1..] {
        return None;
    }

    number.parse().ok()
}

fn strip_whitespace(s: &str) -> Vec<char> {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn extract_ok() {
        assert_eq!(extract_score("Score: # pts", "Score: 42.5 pts"), Some(42.5));
        assert_eq!(extract_score("Score: # pts", "Score:42.5pts"), Some(42.5));
        assert_eq!(extract_score("score=#", "score=7"), Some(7.0));
        assert_eq!(extract_score("#", "123"), Some(123.0));
        assert_eq!(extract_score("#", "123.25"), Some(123.25));
        assert_eq!(extract_score("lap time: #s", "lap  time :  90.125 s"), Some(90.125));
        assert_eq!(extract_score("result: # (best)", "result: 0 (best)"), Some(0.0));
    }

    #[test]
    fn extract_prefix_mismatch() {
        assert_eq!(extract_score("X:#", "Y:42"), None);
        assert_eq!(extract_score("Score: # pts", "Points: 42.5 pts"), None);
        assert_eq!(extract_score("longer prefix #", "long"), None);
    }

    #[test]
    fn extract_suffix_mismatch() {
        assert_eq!(extract_score("Score: # pts", "Score: 42.5 sec"), None);
        assert_eq!(extract_score("Score: # pts", "Score: 42.5"), None);
        assert_eq!(extract_score("Score: #", "Score: 42.5 pts"), None);
    }

    #[test]
    fn extract_no_digits() {
        assert_eq!(extract_score("#", "abc"), None);
        assert_eq!(extract_score("Score: # pts", "Score:  pts"), None);
        assert_eq!(extract_score("Score: # pts", "Score: .5 pts"), None);
    }

    #[test]
    fn extract_without_placeholder_never_matches() {
        assert_eq!(extract_score("Score: 42", "Score: 42"), None);
        assert_eq!(extract_score("", ""), None);
    }

    #[test]
    fn extract_bounds_malformed_lines() {
        // Lines that match the prefix but then end abruptly must not panic.
        assert_eq!(extract_score("Score: # pts", "Score:"), None);
        assert_eq!(extract_score("Score: # pts", "Score: 42."), None);
        assert_eq!(extract_score("Score: # pts", ""), None);
        assert_eq!(extract_score("Score: # pts", "Sc"), None);
    }

    #[test]
    fn extract_trailing_garbage_is_no_match() {
        assert_eq!(extract_score("Score: # pts", "Score: 42.5 pts extra"), None);
    }
}
