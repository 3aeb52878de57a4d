//! Placeholder spans for composing independent highlight passes.
//!
//! A pass replaces each match with an opaque marker and records the match's
//! raw text and its finished HTML. Later passes only ever see markers, so no
//! pass can re-process markup emitted by an earlier one. Markers are built
//! from private-use code points; [`sanitize`] removes those from the input
//! beforehand so a marker can never be forged by document text.

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';
const DIGIT_BASE: u32 = 0xE010;

/// Whether `c` belongs to the marker alphabet.
fn is_reserved(c: char) -> bool {
    ('\u{E000}'..='\u{E01F}').contains(&c)
}

/// Replace marker-alphabet characters with U+FFFD.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if is_reserved(c) { '\u{FFFD}' } else { c })
        .collect()
}

struct Span {
    raw: String,
    html: String,
}

/// A piece of a marker skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'s> {
    Text(&'s str),
    Marker(usize),
}

#[derive(Default)]
pub struct SpanTable {
    spans: Vec<Span>,
}

impl SpanTable {
    /// Record a finished span and return the marker standing in for it.
    pub fn insert(&mut self, raw: impl Into<String>, html: String) -> String {
        let id = self.spans.len();
        self.spans.push(Span {
            raw: raw.into(),
            html,
        });
        marker(id)
    }

    pub fn raw(&self, id: usize) -> &str {
        self.spans.get(id).map_or("", |s| s.raw.as_str())
    }

    pub fn html(&self, id: usize) -> &str {
        self.spans.get(id).map_or("", |s| s.html.as_str())
    }

    /// Final substitution: escape plain text, splice in span HTML.
    pub fn expand(&self, skeleton: &str, escape: impl Fn(&str) -> String) -> String {
        let mut out = String::with_capacity(skeleton.len());
        for segment in segments(skeleton) {
            match segment {
                Segment::Text(text) => out.push_str(&escape(text)),
                Segment::Marker(id) => out.push_str(self.html(id)),
            }
        }
        out
    }

    /// Undo marking: every marker goes back to the text it replaced.
    pub fn restore(&self, skeleton: &str) -> String {
        let mut out = String::with_capacity(skeleton.len());
        for segment in segments(skeleton) {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Marker(id) => out.push_str(self.raw(id)),
            }
        }
        out
    }
}

fn marker(id: usize) -> String {
    let mut out = String::new();
    out.push(OPEN);
    for digit in id.to_string().chars() {
        let d = digit.to_digit(10).unwrap_or(0);
        out.push(char::from_u32(DIGIT_BASE + d).unwrap_or(OPEN));
    }
    out.push(CLOSE);
    out
}

/// If `text` starts with a marker, its id and byte length.
pub fn leading_marker(text: &str) -> Option<(usize, usize)> {
    let rest = text.strip_prefix(OPEN)?;
    let mut id = 0usize;
    let mut len = OPEN.len_utf8();
    for c in rest.chars() {
        len += c.len_utf8();
        if c == CLOSE {
            return (len > OPEN.len_utf8() + CLOSE.len_utf8()).then_some((id, len));
        }
        let digit = (c as u32).checked_sub(DIGIT_BASE).filter(|d| *d < 10)?;
        id = id.checked_mul(10)?.checked_add(digit as usize)?;
    }
    None
}

/// Split a skeleton into plain text and markers.
pub fn segments(skeleton: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < skeleton.len() {
        if let Some((id, len)) = leading_marker(&skeleton[i..]) {
            if start < i {
                out.push(Segment::Text(&skeleton[start..i]));
            }
            out.push(Segment::Marker(id));
            i += len;
            start = i;
        } else {
            i += skeleton[i..].chars().next().map_or(1, char::len_utf8);
        }
    }
    if start < skeleton.len() {
        out.push(Segment::Text(&skeleton[start..]));
    }
    out
}
