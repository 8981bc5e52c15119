//! Size-bounded text accumulation.

/// Characters per approximate token.
pub const CHARS_PER_TOKEN: usize = 4;

/// Accumulates artifact text against an approximate token ceiling.
///
/// The estimate is `characters / 4`. Callers ask [`BudgetEmitter::has_room`] before each
/// unit of output (a type); once the estimate exceeds the ceiling the emitter refuses all
/// further units and stays truncated. Text already accepted is never rolled back.
///
/// ```rust
/// use dotscribe::knowledge::BudgetEmitter;
///
/// let mut emitter = BudgetEmitter::new(2);
/// assert!(emitter.has_room());
/// emitter.push_str("twelve chars");
/// assert!(!emitter.has_room());
/// assert!(emitter.is_truncated());
/// ```
#[derive(Debug)]
pub struct BudgetEmitter {
    text: String,
    chars: usize,
    ceiling: usize,
    truncated: bool,
}

impl BudgetEmitter {
    /// Creates an empty emitter with a ceiling in approximate tokens.
    #[must_use]
    pub fn new(ceiling: usize) -> Self {
        BudgetEmitter {
            text: String::new(),
            chars: 0,
            ceiling,
            truncated: false,
        }
    }

    /// Appends text unconditionally.
    pub fn push_str(&mut self, text: &str) {
        self.chars += text.chars().count();
        self.text.push_str(text);
    }

    /// Appends a line terminated by `\n`.
    pub fn push_line(&mut self, line: &str) {
        self.push_str(line);
        self.push_str("\n");
    }

    /// Approximate tokens accumulated so far.
    #[must_use]
    pub fn estimated_tokens(&self) -> usize {
        self.chars / CHARS_PER_TOKEN
    }

    /// True if another unit may be emitted. Sets the truncation flag otherwise.
    pub fn has_room(&mut self) -> bool {
        if !self.truncated && self.estimated_tokens() > self.ceiling {
            log::warn!(
                "Token budget exhausted at ~{} tokens (ceiling {})",
                self.estimated_tokens(),
                self.ceiling
            );
            self.truncated = true;
        }

        !self.truncated
    }

    /// True once the ceiling was exceeded at a check.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// The accumulated text and the truncation flag.
    #[must_use]
    pub fn finish(self) -> (String, bool) {
        (self.text, self.truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceiling_is_exclusive() {
        let mut emitter = BudgetEmitter::new(2);
        emitter.push_str("12345678");
        // 8 / 4 = 2, not above the ceiling
        assert!(emitter.has_room());

        emitter.push_str("9abc");
        assert_eq!(emitter.estimated_tokens(), 3);
        assert!(!emitter.has_room());
    }

    #[test]
    fn truncation_is_sticky() {
        let mut emitter = BudgetEmitter::new(0);
        emitter.push_line("abcd");
        assert!(!emitter.has_room());

        emitter.push_line("late footer");
        assert!(!emitter.has_room());
        assert!(emitter.is_truncated());

        let (text, truncated) = emitter.finish();
        assert_eq!(text, "abcd\nlate footer\n");
        assert!(truncated);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let mut emitter = BudgetEmitter::new(10);
        emitter.push_str("ééééé");
        assert_eq!(emitter.estimated_tokens(), 1);
    }
}
