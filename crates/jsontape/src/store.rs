//! Token storage.
//!
//! The store is an array indexed from 1. Slot 0 is a zeroed sentinel whose
//! only job is to parent the root token and terminate upward walks. Storage
//! comes in three flavours, chosen at construction:
//!
//! - a caller-supplied fixed slab (bounded parse, never grows),
//! - policy-owned storage that grows on demand,
//! - a fixed slab that spills into policy-owned storage when it overflows.
//!
//! A caller-supplied slab is borrowed and never freed here. Growth preserves
//! previously recorded tokens, which is what makes index links safe across
//! reallocation.

use alloc::{boxed::Box, vec::Vec};

use crate::{error::ParseError, token::Token};

/// Chooses capacities for a growing [`TokenStore`].
///
/// The store asks the policy for a new capacity and performs the copy and
/// swap itself. Whatever the policy returns is clamped to at least
/// `max(required, current + 1, 2)`; returning `None` refuses growth and
/// fails the parse with [`ParseError::NoSpace`].
///
/// Any `FnMut(u32, u32) -> Option<u32>` closure is a policy.
pub trait GrowthPolicy {
    /// Choose a capacity for a store that currently has `current` slots and
    /// needs at least `required`.
    fn grow(&mut self, current: u32, required: u32) -> Option<u32>;
}

impl<F> GrowthPolicy for F
where
    F: FnMut(u32, u32) -> Option<u32>,
{
    fn grow(&mut self, current: u32, required: u32) -> Option<u32> {
        self(current, required)
    }
}

/// The default policy: the next power of two that satisfies the request,
/// so a parse performs at most log(n) reallocations.
#[derive(Clone, Copy, Debug, Default)]
pub struct Doubling;

impl GrowthPolicy for Doubling {
    fn grow(&mut self, _current: u32, required: u32) -> Option<u32> {
        required
            .max(2)
            .checked_next_power_of_two()
            .or(Some(u32::MAX))
    }
}

/// Contiguous token tape with a high-water mark and pluggable growth.
pub struct TokenStore<'slab> {
    /// Caller-supplied storage; used until it overflows.
    fixed: Option<&'slab mut [Token]>,
    /// Policy-owned storage; active once `spilled` is set.
    owned: Vec<Token>,
    spilled: bool,
    /// Index of the most recently allocated token; 0 before any allocation.
    last: u32,
    policy: Option<Box<dyn GrowthPolicy + 'slab>>,
}

impl Default for TokenStore<'_> {
    fn default() -> Self {
        Self::dynamic()
    }
}

impl<'slab> TokenStore<'slab> {
    /// A store bounded by a caller-supplied slab. Parsing fails with
    /// [`ParseError::NoSpace`] once the slab is full.
    pub fn fixed(slab: &'slab mut [Token]) -> Self {
        Self {
            fixed: Some(slab),
            owned: Vec::new(),
            spilled: false,
            last: 0,
            policy: None,
        }
    }

    /// A fully dynamic store growing via [`Doubling`].
    #[must_use]
    pub fn dynamic() -> Self {
        Self::with_policy(Box::new(Doubling))
    }

    /// A fully dynamic store growing via the given policy.
    #[must_use]
    pub fn with_policy(policy: Box<dyn GrowthPolicy + 'slab>) -> Self {
        Self {
            fixed: None,
            owned: Vec::new(),
            spilled: false,
            last: 0,
            policy: Some(policy),
        }
    }

    /// A store that uses `slab` first and falls back to the policy when the
    /// slab overflows. The slab's contents are carried over on spill.
    pub fn fixed_with_spill(
        slab: &'slab mut [Token],
        policy: Box<dyn GrowthPolicy + 'slab>,
    ) -> Self {
        Self {
            fixed: Some(slab),
            owned: Vec::new(),
            spilled: false,
            last: 0,
            policy: Some(policy),
        }
    }

    /// Total number of token slots, the sentinel included.
    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.active().len().min(u32::MAX as usize) as u32
    }

    /// Index of the most recently allocated token. After a successful parse
    /// this is the token count; after [`ParseError::NoSpace`] it equals
    /// [`capacity`](Self::capacity).
    #[must_use]
    pub fn high_water(&self) -> u32 {
        self.last
    }

    /// Drops policy-owned storage and falls back to the caller slab, if
    /// any. The slab itself is never freed here.
    pub fn release(&mut self) {
        self.owned = Vec::new();
        self.spilled = false;
        self.last = 0;
    }

    fn active(&self) -> &[Token] {
        if self.spilled {
            &self.owned
        } else {
            self.fixed.as_deref().unwrap_or(&[])
        }
    }

    fn active_mut(&mut self) -> &mut [Token] {
        if self.spilled {
            &mut self.owned
        } else {
            self.fixed.as_deref_mut().unwrap_or(&mut [])
        }
    }

    /// Rewind for a new parse. Storage is kept; only the sentinel is
    /// re-zeroed, since each allocation zeroes its own slot.
    pub(crate) fn reset(&mut self) {
        self.last = 0;
        if let Some(sentinel) = self.active_mut().first_mut() {
            *sentinel = Token::EMPTY;
        }
    }

    /// Allocate the next token, growing storage if allowed. The new slot is
    /// zeroed, parented to `parent`, and counted as `parent`'s child.
    pub(crate) fn alloc(&mut self, parent: u32) -> Result<u32, ParseError> {
        let idx = self.last + 1;
        if idx as usize >= self.active().len() {
            if !self.grow_to(idx + 1) {
                // Leave the mark at the capacity: high_water == capacity is
                // how exhaustion is told apart from rejection.
                self.last = self.capacity();
                return Err(ParseError::NoSpace);
            }
        }
        self.last = idx;
        let slots = self.active_mut();
        slots[idx as usize] = Token::EMPTY;
        slots[idx as usize].parent = parent;
        if parent != 0 {
            slots[parent as usize].children += 1;
        }
        Ok(idx)
    }

    fn grow_to(&mut self, required: u32) -> bool {
        let current = self.capacity();
        let Some(policy) = self.policy.as_mut() else {
            return false;
        };
        let Some(chosen) = policy.grow(current, required) else {
            return false;
        };
        let new_cap = chosen
            .max(required)
            .max(current.saturating_add(1))
            .max(2);
        self.owned.resize(new_cap as usize, Token::EMPTY);
        if !self.spilled {
            if let Some(slab) = self.fixed.as_deref() {
                self.owned[..slab.len()].copy_from_slice(slab);
            }
            self.spilled = true;
        }
        true
    }

    pub(crate) fn get(&self, idx: u32) -> &Token {
        &self.active()[idx as usize]
    }

    pub(crate) fn at_mut(&mut self, idx: u32) -> &mut Token {
        &mut self.active_mut()[idx as usize]
    }

    /// The populated prefix of the tape: sentinel plus tokens `1..=last`.
    pub(crate) fn parsed(&self) -> &[Token] {
        &self.active()[..=self.last as usize]
    }
}
