//! Soft word wrapping for the review screen

/// Width used when the caller passes 0
pub const DEFAULT_WRAP_WIDTH: usize = 100;

/// Split `text` into display lines of at most `width` characters.
///
/// A long line breaks at the last space in the second half of the window
/// (the space is consumed); without one it hard-breaks at exactly `width`.
/// Continuations lose their leading spaces. Empty input lines stay empty
/// lines.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = if width == 0 { DEFAULT_WRAP_WIDTH } else { width };
    let mut result = Vec::new();

    for line in text.split('\n') {
        let mut rest: Vec<char> = line.chars().collect();
        if rest.len() <= width {
            result.push(line.to_string());
            continue;
        }

        while rest.len() > width {
            let break_point = soft_break(&rest, width).unwrap_or(width);
            result.push(rest[..break_point].iter().collect());

            let skip = rest[break_point..]
                .iter()
                .take_while(|c| **c == ' ')
                .count();
            rest.drain(..break_point + skip);
        }

        if !rest.is_empty() {
            result.push(rest.into_iter().collect());
        }
    }

    result
}

/// Index of the last space in `(width/2, width]`
fn soft_break(line: &[char], width: usize) -> Option<usize> {
    (width / 2 + 1..=width)
        .rev()
        .find(|&i| line.get(i) == Some(&' '))
}
