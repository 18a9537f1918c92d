//! Line-oriented frontmatter extraction.
//!
//! This is not a YAML parse. A block is the text between a first line that
//! is exactly `---` and the next line that is exactly `---`; a field is
//! present when some line of the block starts with `<name>:`.
//! Values are never inspected, so `tags:` with an empty list still counts.

const DELIMITER: &str = "---";

/// The text strictly between the opening and closing delimiter lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frontmatter<'a> {
    block: &'a str,
}

impl<'a> Frontmatter<'a> {
    /// Extract the block from a document's full text.
    ///
    /// Returns `None` when the first line is not exactly `---`, when no
    /// closing `---` line follows, or when the block holds only whitespace.
    pub fn parse(content: &'a str) -> Option<Self> {
        let mut lines = content.split_inclusive('\n');
        let first = lines.next()?;
        if trim_eol(first) != DELIMITER {
            return None;
        }

        let start = first.len();
        let mut offset = start;
        for line in lines {
            if trim_eol(line) == DELIMITER {
                let block = &content[start..offset];
                if block.trim().is_empty() {
                    return None;
                }
                return Some(Self { block });
            }
            offset += line.len();
        }

        // Opening delimiter with no closing one before EOF.
        None
    }

    pub fn as_str(&self) -> &'a str {
        self.block
    }

    /// True when a line of the block starts with `name:` (case-sensitive,
    /// no leading whitespace).
    pub fn has_field(&self, name: &str) -> bool {
        self.block.lines().any(|line| {
            line.strip_prefix(name)
                .is_some_and(|rest| rest.starts_with(':'))
        })
    }

    /// Names from `required` that have no matching line, in `required` order.
    pub fn missing<'f>(&self, required: &'f [String]) -> Vec<&'f str> {
        required
            .iter()
            .map(String::as_str)
            .filter(|name| !self.has_field(name))
            .collect()
    }
}

fn trim_eol(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
