//! Error-code allocation for authorization denials.
//!
//! Each authorization-bearing group owns a block of 100 codes starting at
//! `2000 + 100 * group_index`; the route at position `i` inside the group gets
//! `base + i + 1`. `group_index` counts authorization-bearing groups only, in
//! graph order, and is handed out by [`CodeAllocator::open_block`] so that every
//! consumer sees the same assignment.

use crate::error::GenError;
use std::collections::BTreeMap;

/// First code of block 0.
pub const ERROR_CODE_BASE: u32 = 2000;
/// Width of one group's block.
pub const CODE_BLOCK_SIZE: u32 = 100;
/// Routes a single block can hold (offset 0 is the block base itself, never issued).
pub const CODE_BLOCK_CAPACITY: u32 = CODE_BLOCK_SIZE - 1;

/// Base code of a group's block, `None` past the end of the `u32` range.
pub fn block_base(group_index: usize) -> Option<u32> {
    u32::try_from(group_index)
        .ok()?
        .checked_mul(CODE_BLOCK_SIZE)?
        .checked_add(ERROR_CODE_BASE)
}

/// Code of the action at `action_index` inside the group at `group_index`.
pub fn error_code(group_index: usize, action_index: usize) -> Option<u32> {
    block_base(group_index)?
        .checked_add(u32::try_from(action_index).ok()?)?
        .checked_add(1)
}

/// Hands out group blocks and codes, refusing to issue any code twice.
#[derive(Debug, Default)]
pub struct CodeAllocator {
    next_group: usize,
    blocks: BTreeMap<usize, String>,
    issued: BTreeMap<u32, String>,
}

impl CodeAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next block in encounter order and return its group index.
    ///
    /// # Errors
    ///
    /// See [`CodeAllocator::open_block_at`].
    pub fn open_block(&mut self, subject: &str, routes: usize) -> Result<usize, GenError> {
        let index = self.next_group;
        self.open_block_at(index, subject, routes)
    }

    /// Claim the block at an explicit group index.
    ///
    /// # Errors
    ///
    /// - [`GenError::CodeBlockOverflow`] if `routes` does not fit in one block
    /// - [`GenError::CodeRangeExhausted`] if the block lies past the `u32` range
    /// - [`GenError::DuplicateCode`] if the block is already owned by another group
    pub fn open_block_at(
        &mut self,
        group_index: usize,
        subject: &str,
        routes: usize,
    ) -> Result<usize, GenError> {
        if routes > CODE_BLOCK_CAPACITY as usize {
            return Err(GenError::CodeBlockOverflow {
                subject: subject.to_string(),
                routes,
                capacity: CODE_BLOCK_CAPACITY,
            });
        }
        let base = error_code(group_index, CODE_BLOCK_CAPACITY as usize - 1)
            .and(block_base(group_index))
            .ok_or_else(|| GenError::CodeRangeExhausted {
                subject: subject.to_string(),
                group_index,
            })?;
        if let Some(owner) = self.blocks.get(&group_index) {
            return Err(GenError::DuplicateCode {
                code: base,
                first: format!("block of '{owner}'"),
                second: format!("block of '{subject}'"),
            });
        }
        self.blocks.insert(group_index, subject.to_string());
        self.next_group = self.next_group.max(group_index + 1);
        Ok(group_index)
    }

    /// Issue the code for one action, recording `owner` for collision reports.
    ///
    /// # Errors
    ///
    /// - [`GenError::CodeBlockOverflow`] if `action_index` falls outside the block
    /// - [`GenError::CodeRangeExhausted`] if the code lies past the `u32` range
    /// - [`GenError::DuplicateCode`] if the code was already issued
    pub fn issue(
        &mut self,
        group_index: usize,
        action_index: usize,
        owner: impl Into<String>,
    ) -> Result<u32, GenError> {
        let owner = owner.into();
        if action_index >= CODE_BLOCK_CAPACITY as usize {
            return Err(GenError::CodeBlockOverflow {
                subject: owner,
                routes: action_index + 1,
                capacity: CODE_BLOCK_CAPACITY,
            });
        }
        let Some(code) = error_code(group_index, action_index) else {
            return Err(GenError::CodeRangeExhausted {
                subject: owner,
                group_index,
            });
        };
        if let Some(first) = self.issued.get(&code) {
            return Err(GenError::DuplicateCode {
                code,
                first: first.clone(),
                second: owner,
            });
        }
        self.issued.insert(code, owner);
        Ok(code)
    }

    /// Every issued code with its owner, ascending.
    pub fn issued(&self) -> impl Iterator<Item = (u32, &str)> {
        self.issued.iter().map(|(code, owner)| (*code, owner.as_str()))
    }
}
