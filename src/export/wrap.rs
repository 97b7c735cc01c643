//! Greedy word wrapping with indent prefixes
//!
//! Widths are terminal display columns, so wide glyphs count double.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TAB_SIZE: usize = 8;

pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Left-justify `s` with trailing spaces up to `width` columns
pub fn pad_to(s: &str, width: usize) -> String {
    let mut out = String::with_capacity(s.len() + width);
    out.push_str(s);
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(display_width(s))));
    out
}

fn is_wrap_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

fn is_blank(chunk: &str) -> bool {
    chunk.chars().all(|c| c == ' ')
}

/// Expand tabs and turn every other whitespace character into a space
fn munge_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0usize;
    for c in text.chars() {
        match c {
            '\t' => {
                let spaces = TAB_SIZE - column % TAB_SIZE;
                out.extend(std::iter::repeat(' ').take(spaces));
                column += spaces;
            }
            '\n' | '\r' => {
                out.push(' ');
                column = 0;
            }
            c if is_wrap_space(c) => {
                out.push(' ');
                column += 1;
            }
            c => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

fn is_word_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

fn is_letter(c: char) -> bool {
    c == '_' || (c.is_alphanumeric() && !c.is_numeric())
}

fn is_word_punct(c: char) -> bool {
    is_word_char(c) || matches!(c, '!' | '"' | '\'' | '&' | '.' | ',' | '?')
}

fn letter_at(chars: &[char], i: usize) -> bool {
    chars.get(i).copied().is_some_and(is_letter)
}

/// A run of two or more hyphens at `i` between word characters
fn em_dash_len(chars: &[char], i: usize) -> Option<usize> {
    if i == 0 || !is_word_punct(chars[i - 1]) {
        return None;
    }
    let dashes = chars[i..].iter().take_while(|&&c| c == '-').count();
    let followed_by_word = chars.get(i + dashes).copied().is_some_and(is_word_char);
    (dashes >= 2 && followed_by_word).then_some(dashes)
}

/// A hyphen at `i` splits its word when letters surround it, e.g. the first
/// hyphen of `state-of` but none in `x-1` or `a-b`
fn breaks_after_hyphen(chars: &[char], i: usize) -> bool {
    if chars[i] != '-' {
        return false;
    }
    let behind = (i >= 2 && letter_at(chars, i - 2) && letter_at(chars, i - 1))
        || (i >= 3 && letter_at(chars, i - 3) && chars[i - 2] == '-' && letter_at(chars, i - 1));
    let ahead = letter_at(chars, i + 1)
        && (letter_at(chars, i + 2) || (chars.get(i + 2) == Some(&'-') && letter_at(chars, i + 3)));
    behind && ahead
}

/// End of the word chunk starting at `start`
fn word_end(chars: &[char], start: usize) -> usize {
    let mut end = start + 1;
    while end < chars.len() && chars[end] != ' ' {
        if breaks_after_hyphen(chars, end) {
            return end + 1;
        }
        if em_dash_len(chars, end).is_some() {
            return end;
        }
        end += 1;
    }
    end
}

/// Split into runs of spaces and words; words also split after hyphens
/// joining letters and around em-dashes written as `--`
fn split_chunks(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let end = if chars[pos] == ' ' {
            pos + chars[pos..].iter().take_while(|&&c| c == ' ').count()
        } else if let Some(dashes) = em_dash_len(&chars, pos) {
            pos + dashes
        } else {
            word_end(&chars, pos)
        };
        chunks.push(chars[pos..end].iter().collect());
        pos = end;
    }
    chunks
}

/// Longest prefix of `chunk` fitting in `max` columns, and the rest
fn split_at_width(chunk: &str, max: usize) -> (&str, &str) {
    let mut taken = 0;
    let mut end = 0;
    for (i, c) in chunk.char_indices() {
        let w = c.width().unwrap_or(0);
        if taken + w > max {
            break;
        }
        taken += w;
        end = i + c.len_utf8();
    }
    chunk.split_at(end)
}

fn first_char_len(s: &str) -> usize {
    s.chars().next().map_or(0, char::len_utf8)
}

/// Byte offset just past the last hyphen of `head`, unless only hyphens
/// precede it
fn hyphen_break(head: &str) -> Option<usize> {
    let hyphen = head.rfind('-')?;
    (hyphen > 0 && head[..hyphen].chars().any(|c| c != '-')).then_some(hyphen + 1)
}

/// Word wrapper producing lines of at most `width` columns, indent included
#[derive(Debug, Clone)]
pub struct TextWrapper<'a> {
    pub width: usize,
    pub initial_indent: &'a str,
    pub subsequent_indent: &'a str,
}

impl<'a> TextWrapper<'a> {
    pub fn new(width: usize) -> Self {
        TextWrapper {
            width,
            initial_indent: "",
            subsequent_indent: "",
        }
    }

    /// Use the same prefix for the first and every following line
    pub fn indent(mut self, prefix: &'a str) -> Self {
        self.initial_indent = prefix;
        self.subsequent_indent = prefix;
        self
    }

    /// Wrap `text` into lines. Empty or all-whitespace text yields no lines.
    pub fn wrap(&self, text: &str) -> Vec<String> {
        // Reversed so the next chunk is always at the end.
        let mut chunks = split_chunks(&munge_whitespace(text));
        chunks.reverse();

        let mut lines: Vec<String> = Vec::new();
        while !chunks.is_empty() {
            let indent = if lines.is_empty() {
                self.initial_indent
            } else {
                self.subsequent_indent
            };
            let width = self.width.saturating_sub(display_width(indent));

            if !lines.is_empty() && chunks.last().is_some_and(|c| is_blank(c)) {
                chunks.pop();
            }

            let mut cur_line: Vec<String> = Vec::new();
            let mut cur_len = 0usize;
            while let Some(chunk) = chunks.pop() {
                let len = display_width(&chunk);
                if cur_len + len <= width {
                    cur_len += len;
                    cur_line.push(chunk);
                } else {
                    chunks.push(chunk);
                    break;
                }
            }

            // Break a word that cannot fit on any line.
            if let Some(next) = chunks.last_mut() {
                if display_width(next) > width {
                    let space_left = if width < 1 {
                        1
                    } else {
                        width.saturating_sub(cur_len)
                    };
                    let (head, tail) = split_at_width(next, space_left);
                    let (head, tail) = if head.is_empty() && cur_line.is_empty() {
                        next.split_at(first_char_len(next))
                    } else if let Some(end) = hyphen_break(head) {
                        next.split_at(end)
                    } else {
                        (head, tail)
                    };
                    let (head, tail) = (head.to_string(), tail.to_string());
                    if !head.is_empty() {
                        cur_line.push(head);
                    }
                    if tail.is_empty() {
                        chunks.pop();
                    } else {
                        *next = tail;
                    }
                }
            }

            if cur_line.last().is_some_and(|c| is_blank(c)) {
                cur_line.pop();
            }

            if !cur_line.is_empty() {
                let mut line = String::from(indent);
                line.push_str(&cur_line.concat());
                lines.push(line);
            }
        }

        lines
    }
}
