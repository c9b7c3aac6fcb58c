//! Splitting raw input into the pending block queue.

/// Split a document into text blocks at blank-line boundaries.
///
/// A blank line is any line that is empty or whitespace-only. Consecutive
/// blank lines produce no empty blocks. Line content inside a block is kept
/// verbatim, joined with single `\n` characters (`\r\n` input is normalized
/// by the line split).
#[must_use]
pub fn split_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}
