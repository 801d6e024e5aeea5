/// Fixed, ordered symbol set: `a-z`, `A-Z`, then `0-9`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymbolAlphabet {
    symbols: &'static [u8],
}

const ASCII_LETTERS_AND_DIGITS: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

impl Default for SymbolAlphabet {
    fn default() -> Self {
        Self::ascii_alphanumeric()
    }
}

impl SymbolAlphabet {
    /// The process-wide alphabet used by the augmenter.
    pub const fn ascii_alphanumeric() -> Self {
        Self {
            symbols: ASCII_LETTERS_AND_DIGITS,
        }
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the alphabet has no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol at `id`, if in bounds.
    pub fn symbol(&self, id: usize) -> Option<char> {
        self.symbols.get(id).map(|&b| char::from(b))
    }

    /// Map a sequence of ids to a string, failing on the first out-of-bounds id.
    pub fn spell(&self, ids: &[usize]) -> Option<String> {
        ids.iter().map(|&id| self.symbol(id)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyphs/alphabet.rs"]
mod tests;
