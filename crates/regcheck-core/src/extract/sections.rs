//! Issue-form section scanner
//!
//! Registration issues are created from an issue form, which renders every
//! field as a `### <Heading>` line followed by the submitted value. The scanner
//! splits a body into `(heading, value)` pairs without allocating; every slice
//! borrows from the body. Any UTF-8 input is accepted: the only byte offsets
//! used for slicing sit on ASCII bytes, so they are always char boundaries.

use memchr::{memchr, memmem};

const HEADING_MARKER: &[u8] = b"### ";
const FENCE: &[u8] = b"```";

/// Placeholder GitHub renders for an optional field left blank
pub const NO_RESPONSE: &str = "_No response_";

/// One `### Heading` block of an issue body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    /// Heading text, trimmed
    pub heading: &'a str,
    /// Everything up to the next heading, trimmed
    pub value: &'a str,
}

/// Parsed view over an issue body
#[derive(Debug, Clone, Default)]
pub struct IssueSections<'a> {
    sections: Vec<Section<'a>>,
}

impl<'a> IssueSections<'a> {
    /// Split `body` into sections. Text before the first heading is ignored.
    pub fn parse(body: &'a str) -> Self {
        let bytes = body.as_bytes();

        let starts: Vec<usize> = memmem::find_iter(bytes, HEADING_MARKER)
            .filter(|&pos| pos == 0 || bytes[pos - 1] == b'\n')
            .collect();

        let mut sections = Vec::with_capacity(starts.len());
        for (i, &start) in starts.iter().enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or(bytes.len());
            let heading_start = start + HEADING_MARKER.len();
            let line_end = memchr(b'\n', &bytes[heading_start..end])
                .map(|off| heading_start + off)
                .unwrap_or(end);

            let heading = body[heading_start..line_end].trim();
            let value = if line_end < end {
                body[line_end + 1..end].trim()
            } else {
                ""
            };
            sections.push(Section { heading, value });
        }

        Self { sections }
    }

    /// Number of headings found
    #[inline]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// True when the body has no headings at all
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Raw value of the first section whose heading matches (ASCII case-insensitive).
    ///
    /// Blank values, the form's no-response placeholder, and values opening
    /// with `#` (a stray deeper heading) count as absent.
    pub fn value(&self, heading: &str) -> Option<&'a str> {
        self.sections
            .iter()
            .find(|s| s.heading.eq_ignore_ascii_case(heading))
            .map(|s| s.value)
            .filter(|v| !v.is_empty() && *v != NO_RESPONSE && !v.starts_with('#'))
    }

    /// First non-blank line of a section, for single-line fields
    pub fn line(&self, heading: &str) -> Option<&'a str> {
        self.value(heading)?
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
    }

    /// Contents of the first fenced code block in a section.
    ///
    /// The info string after the opening fence is skipped. An unterminated
    /// fence runs to the end of the section.
    pub fn fenced(&self, heading: &str) -> Option<&'a str> {
        let value = self.value(heading)?;
        let bytes = value.as_bytes();
        let open = memmem::find(bytes, FENCE)?;
        let after_fence = open + FENCE.len();
        let content_start = memchr(b'\n', &bytes[after_fence..])
            .map(|off| after_fence + off + 1)
            .unwrap_or(bytes.len());
        let content_end = memmem::find(&bytes[content_start..], FENCE)
            .map(|off| content_start + off)
            .unwrap_or(bytes.len());

        Some(value[content_start..content_end].trim()).filter(|c| !c.is_empty())
    }

    /// Iterate sections in body order
    pub fn iter(&self) -> impl Iterator<Item = &Section<'a>> {
        self.sections.iter()
    }
}
