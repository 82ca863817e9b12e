//! Inline disable comments.
//!
//! ```scss
//! /* burnish-disable ordering/property-order */
//! .a { width: 1px; color: red; }
//! /* burnish-enable ordering/property-order */
//!
//! // burnish-disable-next-line style/max-line-length
//! .b { background: url("a-very-long-path"); }
//!
//! .c { color:red; } // burnish-disable-line style/colon-spacing
//! ```
//!
//! A directive without rule names applies to every rule.

use burnish_carton::{CompactString, FxHashMap};
use memchr::{memchr, memmem, memrchr};

/// Rules suppressed by inline comments in one file
#[derive(Debug, Default)]
pub struct DisabledRules {
    /// `(line, rule, disable)` switches, sorted by line; `None` means every rule
    switches: Vec<(u32, Option<CompactString>, bool)>,
    /// Rules disabled on one line only
    lines: FxHashMap<u32, Vec<Option<CompactString>>>,
}

impl DisabledRules {
    const MARKER: &'static [u8] = b"burnish-";

    /// Parse disable comments from SCSS source
    pub fn parse(source: &str) -> Self {
        let mut result = Self::default();
        let bytes = source.as_bytes();
        let finder = memmem::Finder::new(Self::MARKER);

        let mut line_starts: Vec<usize> = vec![0];
        line_starts.extend(memchr::memchr_iter(b'\n', bytes).map(|i| i + 1));
        let line_of = |pos: usize| line_starts.partition_point(|&start| start <= pos) as u32;

        for pos in finder.find_iter(bytes) {
            if !is_in_comment(bytes, pos) {
                continue;
            }
            let directive_start = pos + Self::MARKER.len();
            let directive_end = bytes[directive_start..]
                .iter()
                .position(|&b| !(b.is_ascii_lowercase() || b == b'-'))
                .map_or(bytes.len(), |i| directive_start + i);
            let directive = &source[directive_start..directive_end];
            let rules = rule_names(source, directive_end);
            let line = line_of(pos);

            match directive {
                "disable" => result.switch(line, rules, true),
                "enable" => result.switch(line, rules, false),
                "disable-line" => result.disable_line(line, rules),
                "disable-next-line" => result.disable_line(line + 1, rules),
                _ => {}
            }
        }

        result.switches.sort_by_key(|(line, _, _)| *line);
        result
    }

    fn switch(&mut self, line: u32, rules: Vec<CompactString>, disable: bool) {
        if rules.is_empty() {
            self.switches.push((line, None, disable));
        }
        for rule in rules {
            self.switches.push((line, Some(rule), disable));
        }
    }

    fn disable_line(&mut self, line: u32, rules: Vec<CompactString>) {
        let entry = self.lines.entry(line).or_default();
        if rules.is_empty() {
            entry.push(None);
        }
        entry.extend(rules.into_iter().map(Some));
    }

    /// Whether nothing is disabled anywhere
    pub fn is_empty(&self) -> bool {
        self.switches.is_empty() && self.lines.is_empty()
    }

    /// Check if a rule is disabled at a given line
    pub fn is_disabled(&self, rule: &str, line: u32) -> bool {
        let matches = |entry: &Option<CompactString>| entry.as_deref().map_or(true, |r| r == rule);

        if self
            .lines
            .get(&line)
            .is_some_and(|entries| entries.iter().any(matches))
        {
            return true;
        }

        let mut disabled = false;
        for (switch_line, entry, disable) in &self.switches {
            if *switch_line > line {
                break;
            }
            if matches(entry) {
                disabled = *disable;
            }
        }
        disabled
    }
}

/// Check whether `pos` is inside a `//` or `/* */` comment
fn is_in_comment(bytes: &[u8], pos: usize) -> bool {
    let line_start = memrchr(b'\n', &bytes[..pos]).map_or(0, |i| i + 1);
    if memmem::find(&bytes[line_start..pos], b"//").is_some() {
        return true;
    }
    match memmem::rfind(&bytes[..pos], b"/*") {
        Some(open) => memmem::find(&bytes[open + 2..pos], b"*/").is_none(),
        None => false,
    }
}

/// Rule names after a directive, up to the end of the comment or line
fn rule_names(source: &str, start: usize) -> Vec<CompactString> {
    let rest = &source[start..];
    let line_end = memchr(b'\n', rest.as_bytes()).unwrap_or(rest.len());
    let rest = &rest[..line_end];
    let rest = match memmem::find(rest.as_bytes(), b"*/") {
        Some(end) => &rest[..end],
        None => rest,
    };

    rest.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|name| {
            !name.is_empty()
                && name
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'/')
        })
        .map(CompactString::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_disable() {
        let source = "/* burnish-disable ordering/property-order */\n.a {}\n/* burnish-enable ordering/property-order */\n.b {}\n";
        let disabled = DisabledRules::parse(source);
        assert!(disabled.is_disabled("ordering/property-order", 2));
        assert!(!disabled.is_disabled("ordering/property-order", 4));
        assert!(!disabled.is_disabled("style/blank-lines", 2));
    }

    #[test]
    fn test_line_directives() {
        let source = ".a { color:red; } // burnish-disable-line style/colon-spacing\n// burnish-disable-next-line\n.b {}\n";
        let disabled = DisabledRules::parse(source);
        assert!(disabled.is_disabled("style/colon-spacing", 1));
        assert!(!disabled.is_disabled("style/indentation", 1));
        assert!(disabled.is_disabled("style/indentation", 3));
        assert!(!disabled.is_disabled("style/indentation", 4));
    }

    #[test]
    fn test_multiple_rules() {
        let source = "/* burnish-disable style/shorthand, style/indentation */\n";
        let disabled = DisabledRules::parse(source);
        assert!(disabled.is_disabled("style/shorthand", 5));
        assert!(disabled.is_disabled("style/indentation", 5));
    }

    #[test]
    fn test_marker_outside_comment() {
        let disabled = DisabledRules::parse(".burnish-disable {}\n");
        assert!(disabled.is_empty());
    }
}
