use alloc::string::String;
use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

/// Turn phase of a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    OneSelected(Position),
    /// Two cards face up, input locked until the pending resolution runs.
    Resolving(Position, Position),
    Won,
}

impl Phase {
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Resolving(..) | Self::Won)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Match,
    Mismatch,
}

/// Resolution delays in milliseconds. A match always resolves faster than a mismatch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    match_delay_ms: u32,
    mismatch_delay_ms: u32,
}

impl Timing {
    pub const fn new_unchecked(match_delay_ms: u32, mismatch_delay_ms: u32) -> Self {
        Self {
            match_delay_ms,
            mismatch_delay_ms,
        }
    }

    pub fn new(match_delay_ms: u32, mismatch_delay_ms: u32) -> Self {
        if match_delay_ms < mismatch_delay_ms {
            return Self::new_unchecked(match_delay_ms, mismatch_delay_ms);
        }

        log::warn!(
            "match delay {}ms not below mismatch delay {}ms, reordering",
            match_delay_ms,
            mismatch_delay_ms
        );
        let high = match_delay_ms.max(mismatch_delay_ms).max(1);
        let low = match_delay_ms.min(mismatch_delay_ms).min(high - 1);
        Self::new_unchecked(low, high)
    }

    pub const fn match_delay_ms(&self) -> u32 {
        self.match_delay_ms
    }

    pub const fn mismatch_delay_ms(&self) -> u32 {
        self.mismatch_delay_ms
    }

    pub const fn delay_ms(&self, verdict: Verdict) -> u32 {
        match verdict {
            Verdict::Match => self.match_delay_ms,
            Verdict::Mismatch => self.mismatch_delay_ms,
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::new_unchecked(300, 900)
    }
}

/// A comparison waiting to be applied. The host schedules it after
/// [`PendingResolution::delay_ms`] and hands it back to [`PlaySession::resolve`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PendingResolution {
    epoch: u32,
    first: Position,
    second: Position,
    verdict: Verdict,
}

impl PendingResolution {
    pub const fn first(&self) -> Position {
        self.first
    }

    pub const fn second(&self) -> Position {
        self.second
    }

    pub const fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub const fn delay_ms(&self, timing: &Timing) -> u32 {
        timing.delay_ms(self.verdict)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    NoChange,
    Flipped,
    Pending(PendingResolution),
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// Issued for a board that was since replaced or already resolved.
    Stale,
    Matched,
    Unflipped,
    Won,
}

impl ResolveOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Stale)
    }

    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }
}

/// Live numbers shown next to the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionStats {
    pub moves: u32,
    pub matches: PairCount,
    pub total_pairs: PairCount,
    pub elapsed: String,
    pub won: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlaySession {
    difficulty: Difficulty,
    board: Board,
    phase: Phase,
    moves: Saturating<u32>,
    matches: PairCount,
    timer: SessionTimer,
    epoch: u32,
}

impl PlaySession {
    pub fn new(board: Board, difficulty: Difficulty) -> Self {
        let mut timer = SessionTimer::new();
        timer.start();
        log::debug!(
            "session created: {:?}, {} pairs",
            difficulty,
            board.pair_count()
        );
        Self {
            difficulty,
            board,
            phase: Phase::Idle,
            moves: Saturating(0),
            matches: 0,
            timer,
            epoch: 0,
        }
    }

    /// Replaces the board and starts over. Any resolution issued before the
    /// reset becomes stale.
    pub fn reset(&mut self, board: Board, difficulty: Difficulty) {
        self.epoch = self.epoch.wrapping_add(1);
        self.difficulty = difficulty;
        self.board = board;
        self.phase = Phase::Idle;
        self.moves = Saturating(0);
        self.matches = 0;
        self.timer.restart();
        log::debug!("session reset: {:?}, epoch {}", difficulty, self.epoch);
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn card(&self, position: Position) -> Option<&Card> {
        self.board.get(position)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_locked(&self) -> bool {
        self.phase.is_locked()
    }

    pub fn is_won(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn moves(&self) -> u32 {
        self.moves.0
    }

    pub fn matches(&self) -> PairCount {
        self.matches
    }

    pub fn pair_count(&self) -> PairCount {
        self.board.pair_count()
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            moves: self.moves(),
            matches: self.matches,
            total_pairs: self.pair_count(),
            elapsed: self.timer.display(),
            won: self.is_won(),
        }
    }

    /// Advances the session clock by one second.
    pub fn tick(&mut self) -> bool {
        self.timer.tick()
    }

    /// Whether a click on `position` would currently be accepted.
    pub fn can_select(&self, position: Position) -> bool {
        let Some(card) = self.board.get(position) else {
            return false;
        };
        match self.phase {
            Phase::Idle => !card.state().is_face_up(),
            Phase::OneSelected(first) => first != position && !card.state().is_face_up(),
            Phase::Resolving(..) | Phase::Won => false,
        }
    }

    pub fn select(&mut self, position: Position) -> Result<SelectOutcome> {
        use SelectOutcome::*;

        let position = self.board.validate_position(position)?;
        self.check_not_finished()?;

        if self.board[position].state().is_matched() {
            return Ok(NoChange);
        }

        Ok(match self.phase {
            Phase::Idle => {
                self.board.set_state(position, CardState::Flipped);
                self.phase = Phase::OneSelected(position);
                log::trace!("first card {} flipped", position);
                Flipped
            }
            Phase::OneSelected(first) if first == position => NoChange,
            Phase::OneSelected(first) => {
                self.board.set_state(position, CardState::Flipped);
                self.moves += 1;
                self.phase = Phase::Resolving(first, position);

                let verdict = self.compare(first, position);
                log::trace!(
                    "second card {} flipped, move {}, {:?}",
                    position,
                    self.moves.0,
                    verdict
                );
                Pending(PendingResolution {
                    epoch: self.epoch,
                    first,
                    second: position,
                    verdict,
                })
            }
            Phase::Resolving(..) | Phase::Won => NoChange,
        })
    }

    pub fn resolve(&mut self, pending: PendingResolution) -> ResolveOutcome {
        let PendingResolution {
            epoch,
            first,
            second,
            ..
        } = pending;

        if epoch != self.epoch || self.phase != Phase::Resolving(first, second) {
            log::warn!(
                "dropping stale resolution for ({}, {}) from epoch {}",
                first,
                second,
                epoch
            );
            return ResolveOutcome::Stale;
        }

        match self.compare(first, second) {
            Verdict::Match => {
                self.board.set_state(first, CardState::Matched);
                self.board.set_state(second, CardState::Matched);
                self.matches = self.matches.saturating_add(1);

                if self.matches >= self.pair_count() {
                    self.end();
                    ResolveOutcome::Won
                } else {
                    self.phase = Phase::Idle;
                    ResolveOutcome::Matched
                }
            }
            Verdict::Mismatch => {
                self.board.set_state(first, CardState::Hidden);
                self.board.set_state(second, CardState::Hidden);
                self.phase = Phase::Idle;
                ResolveOutcome::Unflipped
            }
        }
    }

    /// Records the result of a won session, returns `None` while still in play.
    pub fn submit_best<S: BestStore + ?Sized>(&self, store: &mut S) -> Option<BestUpdate> {
        self.is_won()
            .then(|| record_best(store, self.difficulty, self.moves()))
    }

    fn end(&mut self) {
        if self.phase.is_finished() {
            return;
        }
        self.phase = Phase::Won;
        self.timer.stop();
        log::debug!(
            "session won in {} moves, {}",
            self.moves.0,
            self.timer.display()
        );
    }

    fn compare(&self, first: Position, second: Position) -> Verdict {
        if self.board[first].face() == self.board[second].face() {
            Verdict::Match
        } else {
            Verdict::Mismatch
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.phase.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
