use crate::board::{Board, CellRef};
use crate::score::Coins;

/// Why a finished word was not placed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    TooShort,
    BoardFull,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed { cell: CellRef, coins: u32 },
    Rejected(RejectReason),
}

/// Decides whether a finished word is kept, and keeps it.
/// There is no dictionary: length is the only rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordCommitter {
    min_word_len: usize,
}

impl WordCommitter {
    pub const DEFAULT_MIN_WORD_LEN: usize = 3;

    pub fn new(min_word_len: usize) -> Self {
        Self { min_word_len }
    }

    pub fn min_word_len(&self) -> usize {
        self.min_word_len
    }

    pub fn is_valid_word(&self, word: &str) -> bool {
        word.chars().count() >= self.min_word_len
    }

    pub fn can_fit_in_grid(&self, board: &Board) -> bool {
        board.has_space()
    }

    /// Place `word` in the first empty cell. No-op on a full board.
    pub fn commit(&self, board: &mut Board, word: &str) -> Option<CellRef> {
        board.place(word)
    }

    /// Validity and capacity check, then commit and pay out.
    pub fn try_commit(&self, board: &mut Board, coins: &mut Coins, word: &str) -> CommitOutcome {
        if !self.is_valid_word(word) {
            return CommitOutcome::Rejected(RejectReason::TooShort);
        }
        if !self.can_fit_in_grid(board) {
            return CommitOutcome::Rejected(RejectReason::BoardFull);
        }
        match self.commit(board, word) {
            Some(cell) => CommitOutcome::Committed {
                cell,
                coins: coins.award(word),
            },
            None => CommitOutcome::Rejected(RejectReason::BoardFull),
        }
    }
}

impl Default for WordCommitter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_WORD_LEN)
    }
}
