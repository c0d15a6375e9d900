//! Search-term highlighting for displayed values
//!
//! Matching is literal and case-insensitive; the search term is never
//! interpreted as a pattern.

use regex::RegexBuilder;

/// A run of text, flagged when it matched the search term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

/// Split `value` into matched and unmatched runs of `search`.
///
/// An empty search returns the whole value as one unmatched segment;
/// an empty value returns no segments.
pub fn highlight<'a>(value: &'a str, search: &str) -> Vec<Segment<'a>> {
    if value.is_empty() {
        return Vec::new();
    }
    if search.is_empty() {
        return vec![Segment { text: value, matched: false }];
    }

    let re = match RegexBuilder::new(&regex::escape(search))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        Err(_) => return vec![Segment { text: value, matched: false }],
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for m in re.find_iter(value) {
        if m.start() > last {
            segments.push(Segment { text: &value[last..m.start()], matched: false });
        }
        segments.push(Segment { text: m.as_str(), matched: true });
        last = m.end();
    }
    if last < value.len() {
        segments.push(Segment { text: &value[last..], matched: false });
    }
    segments
}

/// Render segments, wrapping matched runs with `open`/`close`
pub fn render(segments: &[Segment<'_>], open: &str, close: &str) -> String {
    let mut out = String::new();
    for segment in segments {
        if segment.matched {
            out.push_str(open);
            out.push_str(segment.text);
            out.push_str(close);
        } else {
            out.push_str(segment.text);
        }
    }
    out
}
