use crate::config::{EXCERPT_LEAD, EXCERPT_MAX_LEN};

/// Excerpt of at most [`EXCERPT_MAX_LEN`] characters around the first query term found.
pub fn excerpt(content: &str, query_terms: &[String]) -> String {
    excerpt_with_len(content, query_terms, EXCERPT_MAX_LEN)
}

/// Pick a display window from `content`.
///
/// Terms are tried in query order and the first one occurring anywhere in
/// the content anchors the window, even when a later term occurs earlier in
/// the text. Without any match the window starts at the beginning.
pub fn excerpt_with_len(content: &str, query_terms: &[String], max_len: usize) -> String {
    let (lowered, origin) = fold_case(content);
    let anchor = query_terms
        .iter()
        .filter(|t| !t.is_empty())
        .find_map(|t| lowered.find(t.as_str()))
        .map(|byte| origin[byte])
        .unwrap_or(0);

    let start = anchor.saturating_sub(EXCERPT_LEAD);
    let window: String = content.chars().skip(start).take(max_len).collect();
    window.replace('\n', " ").trim().to_string()
}

/// Lower-case `content` the way the tokenizer does, and record for every
/// byte of the folded text the index of the source char it came from.
fn fold_case(content: &str) -> (String, Vec<usize>) {
    let mut lowered = String::with_capacity(content.len());
    let mut origin = Vec::with_capacity(content.len());
    for (ci, c) in content.chars().enumerate() {
        for lc in c.to_lowercase() {
            lowered.push(lc);
            origin.resize(lowered.len(), ci);
        }
    }
    (lowered, origin)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(ts: &[&str]) -> Vec<String> {
        ts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_match_anchors_at_start() {
        assert_eq!(excerpt("  Hello\nworld  ", &terms(&["zzz"])), "Hello world");
        assert_eq!(excerpt("abc", &[]), "abc");
    }

    #[test]
    fn window_leads_match_by_120_chars() {
        let content = format!("{}TARGET{}", "a".repeat(300), "b".repeat(300));
        let out = excerpt(&content, &terms(&["target"]));
        assert_eq!(out.chars().count(), EXCERPT_MAX_LEN);
        assert!(out.starts_with(&"a".repeat(120)));
        assert_eq!(&out[120..126], "TARGET");
    }

    #[test]
    fn first_term_in_query_order_wins() {
        let content = format!("fox {} dog", "x".repeat(200));
        let out = excerpt_with_len(&content, &terms(&["dog", "fox"]), 10);
        // anchored at "dog", not at the earlier "fox"
        assert!(out.starts_with('x'));
        let out = excerpt_with_len(&content, &terms(&["fox", "dog"]), 10);
        assert!(out.starts_with("fox"));
    }

    #[test]
    fn window_clamps_to_content_end() {
        assert_eq!(excerpt_with_len("short text here", &terms(&["here"]), 400), "short text here");
    }

    #[test]
    fn multibyte_content_is_sliced_on_char_boundaries() {
        let content = format!("{}needle", "é".repeat(130));
        let out = excerpt_with_len(&content, &terms(&["needle"]), 126);
        assert_eq!(out, format!("{}needle", "é".repeat(120)));
    }

    #[test]
    fn unicode_case_folding_matches_tokenizer() {
        // KELVIN SIGN lower-cases to an ASCII 'k', as in the tokenizer
        let content = format!("{} \u{212A}ILN target", "x".repeat(200));
        let out = excerpt_with_len(&content, &terms(&["kiln"]), 124);
        assert!(out.ends_with("\u{212A}ILN"), "{out}");
        assert_eq!(out.chars().count(), 124);
    }

    #[test]
    fn expanding_lowercase_keeps_offsets_on_source_chars() {
        // 'İ' lower-cases to two chars; the anchor still lands on "fox"
        let content = format!("{}fox", "İ".repeat(130));
        let out = excerpt_with_len(&content, &terms(&["fox"]), 123);
        assert_eq!(out, format!("{}fox", "İ".repeat(120)));
    }
}
