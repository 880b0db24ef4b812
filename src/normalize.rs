// Input normalization for subdivision names and codes
//
// Deliberately minimal: periods and stray spaces only. Other punctuation,
// diacritics and case are left alone; case is handled by the callers.

use std::borrow::Cow;

/// Clean a free-text name or code before lookup.
///
/// Input containing a period or a space has all periods removed, runs of two
/// or more spaces collapsed to one, and a single leading and trailing space
/// stripped. Anything else passes through untouched.
pub fn clean(input: &str) -> Cow<'_, str> {
    if !input.contains(|c: char| c == '.' || c == ' ') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut prev_space = false;
    for c in input.chars() {
        match c {
            '.' => {}
            ' ' if prev_space => {}
            ' ' => {
                out.push(' ');
                prev_space = true;
            }
            _ => {
                out.push(c);
                prev_space = false;
            }
        }
    }

    if out.starts_with(' ') {
        out.remove(0);
    }
    if out.ends_with(' ') {
        out.pop();
    }
    Cow::Owned(out)
}
