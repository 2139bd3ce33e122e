//! Column alignment, indentation and comment wrapping shared by all syntaxes.

/// One level of indentation.
pub const INDENT_UNIT: &str = "   ";

/// Comment text is wrapped to this many columns, excluding indent and marker.
pub const COMMENT_WIDTH: usize = 120;

/// Line comment marker of both C-family targets.
pub const COMMENT_MARKER: &str = "//";

pub fn indent(depth: usize) -> String {
    INDENT_UNIT.repeat(depth)
}

/// Widest item, in characters.
pub fn column_width<I, S>(items: I) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().chars().count())
        .max()
        .unwrap_or(0)
}

/// Left-align `text` in a field of `width` characters.
pub fn pad(text: &str, width: usize) -> String {
    format!("{text:<width$}")
}

/// Append one indented line.
pub fn push_line(out: &mut String, depth: usize, line: &str) {
    out.push_str(&indent(depth));
    out.push_str(line);
    out.push('\n');
}

/// Wrap each line of `text` independently; blank lines are dropped.
pub fn wrap_comment(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for manual in text.lines() {
        for wrapped in textwrap::wrap(manual, COMMENT_WIDTH) {
            let wrapped = wrapped.trim_end();
            if !wrapped.trim().is_empty() {
                lines.push(wrapped.to_string());
            }
        }
    }
    lines
}

/// Append `text` as `//` comment lines at `depth`.
pub fn write_comment(out: &mut String, text: &str, depth: usize) {
    for line in wrap_comment(text) {
        push_line(out, depth, &format!("{COMMENT_MARKER} {line}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_is_three_spaces_per_level() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "      ");
    }

    #[test]
    fn column_width_and_pad_align_fields() {
        let names = ["a", "abc", "ab"];
        let width = column_width(names);
        assert_eq!(width, 3);
        let lines: Vec<String> = names.iter().map(|n| format!("{}=", pad(n, width + 1))).collect();
        assert!(lines.iter().all(|l| l.find('=') == Some(4)));
    }

    #[test]
    fn empty_column_is_zero_wide() {
        assert_eq!(column_width(Vec::<String>::new()), 0);
    }

    #[test]
    fn long_comments_wrap_at_width() {
        let text = "word ".repeat(60);
        let lines = wrap_comment(&text);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= COMMENT_WIDTH));
        assert_eq!(lines.join(" ").split(' ').count(), 60);
    }

    #[test]
    fn manual_lines_are_kept_and_blank_lines_dropped() {
        let mut out = String::new();
        write_comment(&mut out, "first\n\nsecond", 1);
        assert_eq!(out, "   // first\n   // second\n");
    }
}
