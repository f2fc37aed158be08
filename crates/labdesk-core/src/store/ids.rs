//! Record id and slip number generation.

use chrono::Utc;

/// Single-letter tag that starts every id, one per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPrefix {
    Patient,
    Test,
    Report,
    Invoice,
}

impl IdPrefix {
    pub fn as_char(&self) -> char {
        match self {
            Self::Patient => 'p',
            Self::Test => 't',
            Self::Report => 'r',
            Self::Invoice => 'i',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'p' => Some(Self::Patient),
            't' => Some(Self::Test),
            'r' => Some(Self::Report),
            'i' => Some(Self::Invoice),
            _ => None,
        }
    }
}

/// Issues `<prefix><millis>` ids that never repeat within a process.
///
/// Each id uses the later of the wall clock and the previous id + 1ms, so
/// several creates in the same millisecond still get distinct ids.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last_millis: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, prefix: IdPrefix) -> String {
        self.next_at(prefix, Utc::now().timestamp_millis())
    }

    fn next_at(&mut self, prefix: IdPrefix, now_millis: i64) -> String {
        let millis = now_millis.max(self.last_millis + 1);
        self.last_millis = millis;
        format!("{}{}", prefix.as_char(), millis)
    }

    /// Never issue anything at or below the timestamps of existing ids.
    pub fn observe<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        for id in ids {
            if let Some(millis) = timestamp_of(id) {
                self.last_millis = self.last_millis.max(millis);
            }
        }
    }
}

/// Creation timestamp embedded in a generated id.
pub fn timestamp_of(id: &str) -> Option<i64> {
    let mut chars = id.chars();
    IdPrefix::from_char(chars.next()?)?;
    chars.as_str().parse().ok()
}

/// Slip label for the `n`th registered patient (`SN0007`).
pub fn slip_number(n: usize) -> String {
    format!("SN{:04}", n)
}
