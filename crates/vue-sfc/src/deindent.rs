//! Common-indentation removal for block content.

use std::borrow::Cow;

/// Removes the indentation shared by all non-blank lines of `text`.
///
/// The indent character (space or tab) is taken from the first non-blank
/// line. If that line is not indented the text is returned untouched.
/// Otherwise the smallest run of that character across non-blank lines is
/// stripped from every line, blank lines included, and lines are re-joined
/// with `\n`.
pub fn deindent(text: &str) -> Cow<'_, str> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let mut indent_char = None;
    let mut min = usize::MAX;
    for line in lines.iter().filter(|l| !is_blank(l)) {
        let ch = match indent_char {
            Some(ch) => ch,
            None => match line.chars().next() {
                Some(c @ (' ' | '\t')) => {
                    indent_char = Some(c);
                    c
                }
                _ => return Cow::Borrowed(text),
            },
        };
        min = min.min(line.chars().take_while(|c| *c == ch).count());
    }

    if indent_char.is_none() {
        // Only blank lines.
        min = 0;
    }

    let stripped: Vec<&str> = lines
        .iter()
        .map(|line| match line.char_indices().nth(min) {
            Some((idx, _)) => &line[idx..],
            None => "",
        })
        .collect();
    Cow::Owned(stripped.join("\n"))
}

fn is_blank(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}
