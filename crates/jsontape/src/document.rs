//! Navigation over a completed parse.

use alloc::vec::Vec;

use crate::{
    token::{Kind, Token},
    unescape::unescape_into,
};

/// The result of a successful parse: the token tape plus the input it
/// indexes into.
///
/// Tokens are numbered from 1 in document order (depth first, left to
/// right); index 0 is the reserved sentinel that parents the root. Skipping
/// a whole subtree is [`next`](Self::next); descending into it is
/// [`first_child`](Self::first_child); both are O(1).
#[derive(Debug)]
pub struct Document<'p, 'src> {
    tokens: &'p [Token],
    input: &'src [u8],
}

impl<'p, 'src> Document<'p, 'src> {
    pub(crate) fn new(tokens: &'p [Token], input: &'src [u8]) -> Self {
        Self { tokens, input }
    }

    /// Number of tokens produced, which equals the number of JSON values in
    /// the text. At least 1.
    #[must_use]
    pub fn token_count(&self) -> u32 {
        self.tokens.len() as u32 - 1
    }

    /// Index of the root value's token.
    #[must_use]
    pub fn root(&self) -> u32 {
        1
    }

    /// The token at `idx`.
    ///
    /// # Panics
    ///
    /// If `idx` exceeds [`token_count`](Self::token_count).
    #[must_use]
    pub fn token(&self, idx: u32) -> &'p Token {
        &self.tokens[idx as usize]
    }

    /// Every token including the index-0 sentinel, in tape order.
    #[must_use]
    pub fn tokens(&self) -> &'p [Token] {
        self.tokens
    }

    /// First child of `idx`, which is simply the following slot. For a
    /// container with children that is its first member; for an empty
    /// container it equals [`next`](Self::next); for the last leaf of the
    /// tape it is one past the end.
    #[must_use]
    pub fn first_child(&self, idx: u32) -> u32 {
        idx + 1
    }

    /// Index of the first token after `idx`'s entire subtree: the recorded
    /// `next` link for containers, the adjacent slot for leaves.
    #[must_use]
    pub fn next(&self, idx: u32) -> u32 {
        let token = self.token(idx);
        if token.is_container() {
            token.next
        } else {
            idx + 1
        }
    }

    /// Iterate the immediate children of `idx`, in document order. Empty
    /// for leaves and empty containers.
    #[must_use]
    pub fn children(&self, idx: u32) -> Children<'p> {
        Children {
            tokens: self.tokens,
            cur: self.first_child(idx),
            end: self.next(idx),
        }
    }

    /// The raw member-name lexeme, escapes intact. Empty for unnamed
    /// tokens.
    #[must_use]
    pub fn raw_name(&self, idx: u32) -> &'src [u8] {
        let token = self.token(idx);
        &self.input[token.name_off as usize..(token.name_off + token.name_len) as usize]
    }

    /// The raw value lexeme of a string (quotes excluded, escapes intact)
    /// or number token. Empty for other kinds.
    #[must_use]
    pub fn raw_string(&self, idx: u32) -> &'src [u8] {
        let token = self.token(idx);
        &self.input[token.str_off as usize..(token.str_off + token.str_len) as usize]
    }

    /// The member name with escapes resolved.
    ///
    /// Decodes into `scratch` only when the name was flagged as escaped;
    /// otherwise the input bytes are returned as they are. The flag is
    /// `false` when a `\u` sequence turned out ill-formed (a lone
    /// surrogate); the returned slice then holds whatever was decoded
    /// before the failure, and the raw lexeme is still available via
    /// [`raw_name`](Self::raw_name).
    pub fn name<'b>(&'b self, idx: u32, scratch: &'b mut Vec<u8>) -> (&'b [u8], bool) {
        let token = self.token(idx);
        if !token.name_esc {
            return (self.raw_name(idx), true);
        }
        let start = scratch.len();
        let ok = unescape_into(self.raw_name(idx), scratch);
        (&scratch[start..], ok)
    }

    /// A string form of any token's value: `null`, `true`/`false`, the
    /// number lexeme, the unescaped string value, or the fixed texts
    /// `object` and `array` for containers.
    ///
    /// Validity follows the same rules as [`name`](Self::name).
    pub fn string<'b>(&'b self, idx: u32, scratch: &'b mut Vec<u8>) -> (&'b [u8], bool) {
        let token = self.token(idx);
        match token.kind {
            Kind::None => (b"", true),
            Kind::Null => (b"null", true),
            Kind::Bool => {
                if token.boolean {
                    (b"true", true)
                } else {
                    (b"false", true)
                }
            }
            Kind::Number => (self.raw_string(idx), true),
            Kind::Str => {
                if !token.value_esc {
                    return (self.raw_string(idx), true);
                }
                let start = scratch.len();
                let ok = unescape_into(self.raw_string(idx), scratch);
                (&scratch[start..], ok)
            }
            Kind::Object => (b"object", true),
            Kind::Array => (b"array", true),
        }
    }
}

/// Iterator over a container's immediate children, yielding token indices.
pub struct Children<'p> {
    tokens: &'p [Token],
    cur: u32,
    end: u32,
}

impl Iterator for Children<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.cur == self.end {
            return None;
        }
        let idx = self.cur;
        let token = &self.tokens[idx as usize];
        self.cur = if token.is_container() {
            token.next
        } else {
            idx + 1
        };
        Some(idx)
    }
}
