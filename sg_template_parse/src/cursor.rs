/**
 * Forward-only position tracking over the template characters.
 */

/// The cursor starts before the first character, every parsing routine
/// expects it to sit on the character that started the routine.
#[derive(Debug, Clone)]
pub struct Cursor {
    source: Vec<char>,
    // One past the index of the current character, 0 before the first advance
    pos: usize,
}

impl Cursor {
    pub fn new(source: &str) -> Self {
        Self{ source: source.chars().collect(), pos: 0 }
    }

    /// Length of the whole template in characters.
    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Index of the current character. Past the end this is the template
    /// length.
    pub fn offset(&self) -> usize {
        self.pos.saturating_sub(1)
    }

    /// Steps onto the next character and returns it.
    pub fn advance(&mut self) -> Option<char> {
        if self.pos <= self.source.len() {
            self.pos += 1;
        }
        self.current()
    }

    pub fn current(&self) -> Option<char> {
        self.pos.checked_sub(1).and_then(|i| self.source.get(i)).copied()
    }

    /// Just an alias.
    pub fn peek(&self) -> Option<char> {
        self.current()
    }

    /// The character after the current one.
    pub fn lookahead(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    /// The character before the current one.
    pub fn last(&self) -> Option<char> {
        if self.pos < 2 {
            None
        }
        else {
            self.source.get(self.pos - 2).copied()
        }
    }
}

// Tests ///////////////////////////////////////////////////////////////////////
