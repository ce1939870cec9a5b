use regex::RegexBuilder;

pub const MARK_OPEN: &str = "<mark>";
pub const MARK_CLOSE: &str = "</mark>";
const ELLIPSIS: &str = "...";
const WORD_BOUNDARY_LOOKAHEAD: usize = 20;

/// Wraps every case-insensitive occurrence of `term` in `<mark>` tags, keeping the original casing.
pub fn highlight_search_term(text: &str, term: &str) -> String {
    if text.is_empty() || term.is_empty() {
        return text.to_string();
    }

    let pattern = regex::escape(term);
    let re = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re,
        Err(_) => return text.to_string(),
    };

    re.replace_all(text, |caps: &regex::Captures| {
        format!("{}{}{}", MARK_OPEN, &caps[0], MARK_CLOSE)
    }).to_string()
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn find_ignore_case(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&start| {
        haystack[start..start + needle.len()].iter()
            .zip(needle.iter())
            .all(|(a, b)| chars_eq_ignore_case(*a, *b))
    })
}

fn head(chars: &[char], max_length: usize) -> String {
    let mut snippet: String = chars.iter().take(max_length).collect();
    if chars.len() > max_length {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}

/// Excerpt of about `max_length` characters centred on the first match of `term`.
///
/// The window edges are pulled in to the closest space within 20 characters so words are not cut,
/// and `...` marks each side that was truncated. Lengths are counted in characters. A term longer
/// than `max_length` widens the window to the term itself.
pub fn extract_search_snippet(text: &str, term: &str, max_length: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let term: Vec<char> = term.trim().chars().collect();

    let Some(index) = find_ignore_case(&chars, &term) else {
        return head(&chars, max_length);
    };

    let match_end = index + term.len();
    let window = max_length.max(term.len());
    if chars.len() <= window {
        return text.to_string();
    }

    let centre = index + term.len() / 2;
    let mut start = centre.saturating_sub(window / 2).min(chars.len() - window);
    let mut end = start + window;

    if start > 0 && !chars[start - 1].is_whitespace() {
        let limit = (start + WORD_BOUNDARY_LOOKAHEAD).min(index);
        if let Some(space) = (start..limit).find(|&i| chars[i].is_whitespace()) {
            start = space + 1;
        }
    }

    if end < chars.len() && !chars[end].is_whitespace() {
        let limit = end.saturating_sub(WORD_BOUNDARY_LOOKAHEAD).max(match_end);
        if let Some(space) = (limit..end).rev().find(|&i| chars[i].is_whitespace()) {
            end = space;
        }
    }

    let mut snippet = String::new();
    if start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.extend(&chars[start..end]);
    if end < chars.len() {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}
