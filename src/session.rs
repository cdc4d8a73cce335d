//! A game together with its undo and redo history.
//!
//! The top of the undo stack always equals the live state. Each accepted
//! action pushes a snapshot and forgets any redo states; undo rewinds the
//! stack by one action and keeps what it dropped for redo.

use tracing::debug;

use crate::board::Color;
use crate::config::GameConfig;
use crate::error::Result;
use crate::flood::{Connectivity, Topology};
use crate::game::{GameState, MoveResult, new_game};
use crate::history::HistoryStack;

pub struct Session {
    config: GameConfig,
    state: GameState,
    undo: HistoryStack,
    redo: HistoryStack,
}

impl Session {
    pub fn new(config: GameConfig) -> Result<Self> {
        let state = new_game(&config)?;
        Ok(Self::with_state(config, state))
    }

    /// Continue an existing game, e.g. one loaded from disk. History starts
    /// at `state`.
    pub fn with_state(mut config: GameConfig, state: GameState) -> Self {
        config.size = state.size();
        config.num_colors = state.num_colors();
        config.topology = state.topology();
        config.connectivity = state.connectivity();
        let mut undo = HistoryStack::new();
        undo.push(&state);
        Self {
            config,
            state,
            undo,
            redo: HistoryStack::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn pick_initial_cell(&mut self, row: usize, column: usize) -> Result<()> {
        self.state.pick_initial_cell(row, column)?;
        self.record();
        Ok(())
    }

    pub fn choose_color(&mut self, color: Color) -> Result<MoveResult> {
        let result = self.state.choose_color(color)?;
        if result.is_played() {
            self.record();
        }
        Ok(result)
    }

    pub fn set_topology(&mut self, topology: Topology) {
        self.config.topology = topology;
        if self.state.topology() != topology {
            self.state.set_topology(topology);
            self.record();
        }
    }

    pub fn set_connectivity(&mut self, connectivity: Connectivity) {
        self.config.connectivity = connectivity;
        if self.state.connectivity() != connectivity {
            self.state.set_connectivity(connectivity);
            self.record();
        }
    }

    /// Start a new game, optionally with a new configuration.
    ///
    /// Without one, the stored settings are reused; a seeded config moves on
    /// to its next seed so every reset deals a different board.
    pub fn reset(&mut self, config: Option<GameConfig>) -> Result<()> {
        let config = config.unwrap_or_else(|| {
            let mut next = self.config.clone();
            next.advance_seed();
            next
        });
        let state = new_game(&config)?;
        *self = Self::with_state(config, state);
        Ok(())
    }

    /// Replace the game with `state` and start a fresh history.
    pub fn restore(&mut self, state: GameState) {
        *self = Self::with_state(self.config.clone(), state);
    }

    /// Revert the last accepted action.
    pub fn undo(&mut self) -> Result<()> {
        let (undone, restored) = self.undo.rewind()?;
        self.undo.push(&restored);
        self.redo.push(&undone);
        self.state = restored;
        debug!(
            depth = self.undo.len(),
            steps = self.state.steps_played(),
            "undo"
        );
        Ok(())
    }

    /// Re-apply the last undone action.
    pub fn redo(&mut self) -> Result<()> {
        let next = self.redo.pop()?;
        self.undo.push(&next);
        self.state = next;
        debug!(
            depth = self.undo.len(),
            steps = self.state.steps_played(),
            "redo"
        );
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.undo.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    fn record(&mut self) {
        self.undo.push(&self.state);
        self.redo.clear();
    }
}
