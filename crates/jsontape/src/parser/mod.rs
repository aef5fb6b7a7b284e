//! One-pass JSON validation and tokenization.
//!
//! The parser keeps two cursors: a read position in the input and the index
//! of the container the parse position is currently inside. Values are
//! dispatched on their first byte; closing a value *ascends*, consuming any
//! `}`/`]` terminators and recording on each container the index of the
//! first token after its contents. After ascent either the whole text is
//! done or a comma must separate the next sibling.

mod cursor;
mod scan;

use crate::{
    document::Document,
    error::ParseError,
    store::TokenStore,
    token::Kind,
};
use cursor::Cursor;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// The JSON parser.
///
/// Owns a [`TokenStore`] and may be reused for any number of inputs; each
/// [`parse`](Self::parse) rewinds the store and overwrites it. The default
/// parser uses fully dynamic storage.
///
/// ```
/// use jsontape::{Parser, TokenStore, Token};
///
/// // Bounded parsing against a caller-owned slab:
/// let mut slab = [Token::default(); 64];
/// let mut parser = Parser::new(TokenStore::fixed(&mut slab));
/// assert!(parser.parse(b"[1,2,3]").is_ok());
/// ```
pub struct Parser<'slab> {
    store: TokenStore<'slab>,
    /// Index of the innermost open container; 0 when at the root level.
    parent: u32,
}

impl Default for Parser<'_> {
    fn default() -> Self {
        Self::new(TokenStore::dynamic())
    }
}

impl<'slab> Parser<'slab> {
    pub fn new(store: TokenStore<'slab>) -> Self {
        Self { store, parent: 0 }
    }

    /// Index of the most recently allocated token. After a successful parse
    /// this equals the token count; after [`ParseError::NoSpace`] it equals
    /// [`capacity`](Self::capacity).
    #[must_use]
    pub fn high_water(&self) -> u32 {
        self.store.high_water()
    }

    /// Current token-slot capacity, the index-0 sentinel included.
    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.store.capacity()
    }

    /// Gives the store back, e.g. to [`release`](TokenStore::release) its
    /// owned storage.
    #[must_use]
    pub fn into_store(self) -> TokenStore<'slab> {
        self.store
    }

    /// Parse one JSON text.
    ///
    /// Accepts exactly the RFC 8259 grammar, preceded by at most one UTF-8
    /// byte-order mark and followed by nothing but whitespace. On success
    /// the returned [`Document`] views the token tape and the input; the
    /// parser is borrowed until it is dropped.
    ///
    /// On failure the error distinguishes a grammar violation (with the
    /// offset of the offending byte) from token-store exhaustion, and
    /// [`high_water`](Self::high_water) reports how far tokenization got.
    pub fn parse<'p, 'src>(
        &'p mut self,
        input: &'src [u8],
    ) -> Result<Document<'p, 'src>, ParseError> {
        if input.len() as u64 > u64::from(u32::MAX) {
            return Err(ParseError::Oversize);
        }
        self.store.reset();
        self.parent = 0;
        let mut cur = Cursor::new(input);
        cur.eat_slice(UTF8_BOM);
        self.run(&mut cur)?;
        Ok(Document::new(self.store.parsed(), input))
    }

    /// Drive the grammar until the root value closes, then require the
    /// remainder to be whitespace.
    fn run(&mut self, cur: &mut Cursor) -> Result<(), ParseError> {
        self.store.alloc(0)?;
        loop {
            cur.skip_ws();
            self.value(cur)?;
            self.ascend(cur);
            if self.parent == 0 {
                break;
            }
            cur.skip_ws();
            // Exactly one comma between siblings. None is expected before
            // the first member, in which case the container token is still
            // the newest allocation.
            if self.parent != self.store.high_water() && !cur.eat(b',') {
                return Err(cur.reject());
            }
            if cur.at_end() {
                // Report before allocating, so an input that breaks off at a
                // member boundary leaves no half-built token behind.
                return Err(cur.reject());
            }
            let idx = self.store.alloc(self.parent)?;
            if self.store.get(self.parent).kind == Kind::Object {
                cur.skip_ws();
                self.member_name(cur, idx)?;
            }
        }
        cur.skip_ws();
        if !cur.at_end() {
            return Err(cur.reject());
        }
        Ok(())
    }

    /// One JSON value, dispatched on its first byte. The value's token is
    /// the newest allocation; containers descend by making it the parent.
    fn value(&mut self, cur: &mut Cursor) -> Result<(), ParseError> {
        let idx = self.store.high_water();
        match cur.peek() {
            Some(b'"') => {
                let lex = scan::string(cur)?;
                let token = self.store.at_mut(idx);
                token.kind = Kind::Str;
                token.str_off = lex.off;
                token.str_len = lex.len;
                token.value_esc = lex.escaped;
            }
            Some(b'{') => {
                cur.bump();
                self.store.at_mut(idx).kind = Kind::Object;
                self.parent = idx;
            }
            Some(b'[') => {
                cur.bump();
                self.store.at_mut(idx).kind = Kind::Array;
                self.parent = idx;
            }
            Some(b't') => {
                if !cur.eat_slice(b"true") {
                    return Err(cur.reject());
                }
                let token = self.store.at_mut(idx);
                token.kind = Kind::Bool;
                token.boolean = true;
            }
            Some(b'f') => {
                if !cur.eat_slice(b"false") {
                    return Err(cur.reject());
                }
                self.store.at_mut(idx).kind = Kind::Bool;
            }
            Some(b'n') => {
                if !cur.eat_slice(b"null") {
                    return Err(cur.reject());
                }
                self.store.at_mut(idx).kind = Kind::Null;
            }
            Some(b'-' | b'0'..=b'9') => {
                let (off, len) = scan::number(cur)?;
                let token = self.store.at_mut(idx);
                token.kind = Kind::Number;
                token.str_off = off;
                token.str_len = len;
            }
            _ => return Err(cur.reject()),
        }
        Ok(())
    }

    /// An object member's name string and the separating colon. The name is
    /// recorded on the member's token; the value that follows shares it.
    fn member_name(&mut self, cur: &mut Cursor, idx: u32) -> Result<(), ParseError> {
        let lex = scan::string(cur)?;
        cur.skip_ws();
        if !cur.eat(b':') {
            return Err(cur.reject());
        }
        let token = self.store.at_mut(idx);
        token.name_off = lex.off;
        token.name_len = lex.len;
        token.name_esc = lex.escaped;
        Ok(())
    }

    /// Close every container whose terminator follows the completed value.
    /// Each closure records `next`, the index of the first token after the
    /// container's contents, and pops the parent cursor one level up.
    fn ascend(&mut self, cur: &mut Cursor) {
        while self.parent != 0 {
            cur.skip_ws();
            let close = match self.store.get(self.parent).kind {
                Kind::Object => b'}',
                Kind::Array => b']',
                _ => unreachable!("the parent cursor always points at a container"),
            };
            if !cur.eat(close) {
                break;
            }
            let next = self.store.high_water() + 1;
            let token = self.store.at_mut(self.parent);
            token.next = next;
            self.parent = token.parent;
        }
    }
}
