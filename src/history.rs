//! Last-in, first-out stack of game snapshots.
//!
//! Snapshots are owned [`GameState`] values: pushing stores an independent
//! copy and nothing on the stack is ever handed out mutably, so the top only
//! changes through `push` and `pop`.

use crate::error::{GameError, Result};
use crate::game::GameState;

#[derive(Clone, Debug, Default)]
pub struct HistoryStack {
    snapshots: Vec<GameState>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a copy of `state` on top of the stack.
    pub fn push(&mut self, state: &GameState) {
        self.snapshots.push(state.clone());
    }

    /// Remove and return the top snapshot.
    pub fn pop(&mut self) -> Result<GameState> {
        self.snapshots.pop().ok_or(GameError::EmptyHistory)
    }

    /// The top snapshot, left in place.
    pub fn peek(&self) -> Result<&GameState> {
        self.snapshots.last().ok_or(GameError::EmptyHistory)
    }

    /// Pop twice: the state produced by the last move, then the state before it.
    ///
    /// Returns `(discarded, restored)`. Needs at least two snapshots; with fewer
    /// the stack is left unchanged.
    pub fn rewind(&mut self) -> Result<(GameState, GameState)> {
        if self.snapshots.len() < 2 {
            return Err(GameError::EmptyHistory);
        }
        let discarded = self.pop()?;
        let restored = self.pop()?;
        Ok((discarded, restored))
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
