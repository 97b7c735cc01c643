//! Box-drawing "card" export.
//!
//! Every entry becomes a card: a top border carrying the timestamp, the
//! wrapped title, an optional body section and a bottom border.
//!
//! ```text
//! ┎──────────────────────╮2021-01-01 12:00
//! ┃ Hello world          ╘═══════════════╕
//! ┠╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌┤
//! ┃ First line of body.                  │
//! ┖──────────────────────────────────────┘
//! ```

use crate::domain::{Entry, Journal};
use crate::error::SignaledError;
use crate::export::wrap::{display_width, pad_to, TextWrapper};
use tracing::{debug, trace};

/// Width used when a journal has no linewrap (or a linewrap of zero)
pub const DEFAULT_LINEWRAP: usize = 78;

/// Glyph set shared by every card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub top_left: char,
    pub rule: char,
    pub date_corner: char,
    pub date_left: char,
    pub date_rule: char,
    pub date_right: char,
    pub indent: char,
    pub right: char,
    pub separator_left: char,
    pub separator_rule: char,
    pub separator_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
}

pub const GLYPHS: BorderGlyphs = BorderGlyphs {
    top_left: '┎',
    rule: '─',
    date_corner: '╮',
    date_left: '╘',
    date_rule: '═',
    date_right: '╕',
    indent: '┃',
    right: '│',
    separator_left: '┠',
    separator_rule: '╌',
    separator_right: '┤',
    bottom_left: '┖',
    bottom_right: '┘',
};

/// Widths derived once per rendered entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig<'a> {
    pub date_str: &'a str,
    pub linewrap: usize,
    /// Title width, narrowed to leave room for the timestamp
    pub initial_linewrap: usize,
    /// Body width, and the width of title overflow lines
    pub body_linewrap: usize,
}

impl<'a> RenderConfig<'a> {
    pub fn new(date_str: &'a str, linewrap: Option<usize>) -> Self {
        let linewrap = linewrap.filter(|w| *w > 0).unwrap_or(DEFAULT_LINEWRAP);
        let initial_linewrap = linewrap.saturating_sub(display_width(date_str) + 2).max(1);

        RenderConfig {
            date_str,
            linewrap,
            initial_linewrap,
            body_linewrap: linewrap.saturating_sub(2),
        }
    }
}

fn rule(glyph: char, count: usize) -> String {
    std::iter::repeat(glyph).take(count).collect()
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Split at every line boundary (`\r\n` counts once, as do the vertical tab,
/// form feed, file/group/record separators, NEL and the Unicode line and
/// paragraph separators); a trailing boundary adds no empty line
fn authored_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_line_boundary(c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' && chars.peek().is_some_and(|&(_, next)| next == '\n') {
            chars.next();
            start += 1;
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }

    lines
}

fn check_linewrap_viability(
    top_line: &str,
    linewrap: usize,
    journal_name: &str,
) -> Result<(), SignaledError> {
    let width = display_width(top_line);
    if width > linewrap {
        return Err(SignaledError::line_wrap_too_small(
            linewrap,
            width - linewrap,
            journal_name,
        ));
    }
    Ok(())
}

/// Render one card from an already formatted timestamp.
///
/// Fails with `LineWrapTooSmallForDateFormat` when the top border does not
/// fit in `linewrap`; no partial card is produced.
pub fn render_card(
    date_str: &str,
    title: &str,
    body: &str,
    linewrap: Option<usize>,
    journal_name: &str,
) -> Result<String, SignaledError> {
    let g = GLYPHS;
    let config = RenderConfig::new(date_str, linewrap);
    let body_width = config.body_linewrap;
    let indent = format!("{} ", g.indent);
    let boxed = |line: &str| format!("{}{}", pad_to(line, body_width + 1), g.right);

    let top = format!(
        "{}{}{}{}",
        g.top_left,
        rule(g.rule, config.initial_linewrap),
        g.date_corner,
        date_str
    );
    check_linewrap_viability(&top, config.linewrap, journal_name)?;

    let mut card = vec![top];

    let title_lines = TextWrapper::new(config.initial_linewrap)
        .indent(&indent)
        .wrap(title);
    let first_title_line = title_lines.first().map_or("", String::as_str);
    card.push(format!(
        "{}{}{}{}",
        pad_to(first_title_line, config.initial_linewrap + 1),
        g.date_left,
        rule(g.date_rule, display_width(date_str).saturating_sub(1)),
        g.date_right
    ));

    let wrapper = TextWrapper::new(body_width).indent(&indent);

    if title_lines.len() > 1 {
        let overflow = title_lines[1..]
            .iter()
            .map(|line| line.strip_prefix(indent.as_str()).unwrap_or(line.as_str()))
            .collect::<Vec<_>>()
            .join(" ");
        for line in wrapper.wrap(&overflow) {
            card.push(boxed(&line));
        }
    }

    if !body.is_empty() {
        card.push(format!(
            "{}{}{}",
            g.separator_left,
            rule(g.separator_rule, body_width),
            g.separator_right
        ));
        for line in authored_lines(body) {
            let wrapped = wrapper.wrap(line);
            if wrapped.is_empty() {
                card.push(boxed(&g.indent.to_string()));
            }
            for body_line in wrapped {
                card.push(boxed(&body_line));
            }
        }
    }

    card.push(format!(
        "{}{}{}",
        g.bottom_left,
        rule(g.rule, body_width),
        g.bottom_right
    ));

    trace!(lines = card.len(), linewrap = config.linewrap, "Rendered card");
    Ok(card.join("\n"))
}

/// Render a single entry of `journal` as a card
pub fn export_entry(entry: &Entry, journal: &Journal) -> Result<String, SignaledError> {
    let date_str = journal.settings.timeformat.format(entry.date);
    render_card(
        &date_str,
        &entry.title,
        &entry.body,
        journal.settings.linewrap,
        &journal.name,
    )
}

/// Render every entry in order; cards are separated by a single newline.
///
/// The first failing entry aborts the whole export.
pub fn export_journal(journal: &Journal) -> Result<String, SignaledError> {
    debug!(
        journal = %journal.name,
        entries = journal.len(),
        "Exporting journal as cards"
    );

    let cards = journal
        .entries
        .iter()
        .map(|entry| export_entry(entry, journal))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(cards.join("\n"))
}
