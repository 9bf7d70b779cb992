//! Line-based bullet list parsing shared by every render backend.
//!
//! Free text such as
//!
//! ```text
//! - Reset password
//!   - Notify user
//! - Rotate key
//! ```
//!
//! becomes an ordered list of [`BulletEntry`] values with two indentation
//! levels. Both the package and page backends consume this exact parser so that
//! their bullet output cannot drift apart.

/// Characters stripped from the front of a line before its text is taken.
pub const BULLET_MARKERS: [char; 4] = ['-', '*', '•', '◦'];

/// Indentation level of a bullet entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulletLevel {
    /// Top-level entry, rendered with `•`.
    One,
    /// Nested entry, rendered with `◦`. Deeper indentation collapses here.
    Two,
}

impl BulletLevel {
    pub fn glyph(self) -> char {
        match self {
            BulletLevel::One => '•',
            BulletLevel::Two => '◦',
        }
    }

    pub fn depth(self) -> u8 {
        match self {
            BulletLevel::One => 1,
            BulletLevel::Two => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulletEntry {
    pub text: String,
    pub level: BulletLevel,
}

impl BulletEntry {
    pub fn new(text: impl Into<String>, level: BulletLevel) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }

    /// The visible line for this entry: glyph, two spaces, text.
    pub fn display_text(&self) -> String {
        format!("{}  {}", self.level.glyph(), self.text)
    }
}

/// Parses free text into bullet entries.
///
/// Blank lines are dropped. A line starting with two or more whitespace
/// characters is level two, anything else level one. Leading whitespace and
/// marker characters are stripped and the remainder trimmed; lines that end up
/// empty are dropped.
pub fn parse_bullets(raw: &str) -> Vec<BulletEntry> {
    raw.split('\n').filter_map(parse_line).collect()
}

fn parse_line(raw_line: &str) -> Option<BulletEntry> {
    let line = raw_line.trim_end_matches('\r');
    if line.trim().is_empty() {
        return None;
    }

    let leading_ws = line.chars().take_while(|c| c.is_whitespace()).count();
    let level = if leading_ws >= 2 {
        BulletLevel::Two
    } else {
        BulletLevel::One
    };

    let text = line
        .trim_start()
        .trim_start_matches(|c: char| BULLET_MARKERS.contains(&c))
        .trim();

    if text.is_empty() {
        None
    } else {
        Some(BulletEntry::new(text, level))
    }
}

/// Renders entries back to plain text: level-two lines are indented by two
/// spaces and every line carries its level glyph. Parsing the result yields the
/// same entries.
pub fn render_bullets(entries: &[BulletEntry]) -> String {
    entries
        .iter()
        .map(|entry| match entry.level {
            BulletLevel::One => entry.display_text(),
            BulletLevel::Two => format!("  {}", entry.display_text()),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
