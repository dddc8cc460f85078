//! Jump targets and forward search.

use regex::Regex;

use crate::editor::{Editor, Pane};
use crate::error::{EditorError, EditorResult};

fn jump_pattern() -> EditorResult<Regex> {
    Regex::new(r"^(?:0?x([A-Fa-f0-9]+)|(\d+))$").map_err(|e| EditorError::InvalidInput(e.to_string()))
}

/// Parses `0x1f`, `x1f` or `31` into an index below `size`.
pub fn parse_jump_target(input: &str, size: usize) -> EditorResult<usize> {
    let input = input.trim();
    let invalid = || EditorError::InvalidInput(format!("invalid offset: {input:?}"));
    let pattern = jump_pattern()?;
    let caps = pattern.captures(input).ok_or_else(invalid)?;
    let parsed = if let Some(hex) = caps.get(1) {
        usize::from_str_radix(hex.as_str(), 16)
    } else if let Some(dec) = caps.get(2) {
        dec.as_str().parse::<usize>()
    } else {
        return Err(invalid());
    };
    let index = parsed.map_err(|_| invalid())?;
    if index >= size {
        return Err(EditorError::OutOfRange { index, size });
    }
    Ok(index)
}

/// Moves the cursor to a jump target in the hex pane.
pub fn jump(editor: &mut Editor, input: &str) -> EditorResult<usize> {
    let index = parse_jump_target(input, editor.len())?;
    editor.clear_selection();
    editor.set_pane(Pane::Hex);
    editor.move_to(index, 0, false);
    Ok(index)
}

/// Turns `"41 42 4a"` or `"41424a"` into bytes. Digits pair up from the
/// left; a lone trailing digit is a byte of its own.
pub fn unhexify(input: &str) -> Option<Vec<u8>> {
    let input = input.trim();
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_hexdigit() || c == ' ') {
        return None;
    }
    let mut out = Vec::new();
    for group in input.split(' ').filter(|g| !g.is_empty()) {
        for chunk in group.as_bytes().chunks(2) {
            let digits = std::str::from_utf8(chunk).ok()?;
            out.push(u8::from_str_radix(digits, 16).ok()?);
        }
    }
    Some(out)
}

pub fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() || from >= haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| i + from)
}

/// Searches forward from just past the cursor. Text is matched literally
/// for [`Pane::Ascii`] and as hex digits for [`Pane::Hex`]. A hit is
/// selected and its pane activated.
pub fn search(editor: &mut Editor, input: &str, kind: Pane) -> EditorResult<usize> {
    let needle = match kind {
        Pane::Ascii => input.as_bytes().to_vec(),
        Pane::Hex => unhexify(input)
            .ok_or_else(|| EditorError::InvalidInput(format!("not a hex string: {input:?}")))?,
    };
    let from = editor.position() + 1;
    let index = find(editor.data(), &needle, from)
        .ok_or_else(|| EditorError::InvalidInput(format!("{input:?} not found")))?;
    editor.select_range(index, index + needle.len() - 1)?;
    editor.set_pane(kind);
    editor.scroll_to_index(index);
    Ok(index)
}
