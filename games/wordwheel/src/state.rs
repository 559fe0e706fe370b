//! The single owned state container for one game session.
//!
//! Input handlers call into `GameState`; the rendering layer subscribes and
//! redraws when notified. Every mutation is announced synchronously, in the
//! order it happened.

use glam::Vec2;
use serde::Serialize;

use crate::board::{Board, CellRef};
use crate::commit::{CommitOutcome, RejectReason, WordCommitter};
use crate::gesture::{GestureStep, GestureTracker};
use crate::ring::{LetterRing, LetterVisual, RingEvent};
use crate::score::Coins;
use crate::settings::WheelSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u32);

#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    Activated,
    Deactivated { dropped_gesture: bool },
    /// Letters were added to or removed from the current path.
    SelectionChanged { word: String },
    LineMoved,
    GestureEnded,
    WordCommitted { cell: CellRef, word: String },
    WordRejected { word: String, reason: RejectReason },
    CoinsChanged { coins: u32 },
    ShuffleStarted,
    LettersReordered,
    ShuffleSettled,
}

type Observer = Box<dyn FnMut(&StateChange)>;

pub struct GameState {
    ring: LetterRing,
    tracker: GestureTracker,
    committer: WordCommitter,
    board: Board,
    coins: Coins,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u32,
}

impl GameState {
    /// Build a fresh session. `settings` are expected to be validated.
    pub fn new(settings: &WheelSettings) -> Self {
        Self {
            ring: LetterRing::from_settings(settings),
            tracker: GestureTracker::new(),
            committer: WordCommitter::new(settings.min_word_len),
            board: Board::new(settings.board_rows, settings.board_cols),
            coins: Coins::new(),
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&StateChange) + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(other, _)| *other != id);
        self.observers.len() != before
    }

    fn notify(&mut self, change: StateChange) {
        for (_, observer) in &mut self.observers {
            observer(&change);
        }
    }

    // ---- Lifecycle ----

    pub fn activate(&mut self) {
        if self.tracker.is_active() {
            return;
        }
        self.tracker.activate();
        self.notify(StateChange::Activated);
    }

    pub fn deactivate(&mut self) {
        if !self.tracker.is_active() {
            return;
        }
        let dropped_gesture = self.tracker.deactivate();
        self.notify(StateChange::Deactivated { dropped_gesture });
    }

    pub fn is_active(&self) -> bool {
        self.tracker.is_active()
    }

    // ---- Input ----

    pub fn pointer_down(&mut self, pos: Vec2) -> GestureStep {
        let step = self.tracker.pointer_down(pos, &self.ring);
        if step == GestureStep::Started {
            let word = self.tracker.word().to_string();
            self.notify(StateChange::SelectionChanged { word });
        }
        step
    }

    pub fn pointer_move(&mut self, pos: Vec2) -> GestureStep {
        let step = self.tracker.pointer_move(pos, &self.ring);
        match step {
            GestureStep::Extended | GestureStep::Backtracked => {
                let word = self.tracker.word().to_string();
                self.notify(StateChange::SelectionChanged { word });
            }
            GestureStep::LineMoved => self.notify(StateChange::LineMoved),
            _ => {}
        }
        step
    }

    /// End the gesture. Returns the commit outcome when a gesture was running.
    pub fn pointer_up(&mut self) -> Option<CommitOutcome> {
        let GestureStep::Finished(word) = self.tracker.pointer_up() else {
            return None;
        };

        let outcome = self.committer.try_commit(&mut self.board, &mut self.coins, &word);
        match &outcome {
            CommitOutcome::Committed { cell, coins } => {
                log::info!("committed {word:?} at ({}, {}), coins {coins}", cell.row, cell.col);
                let coins = *coins;
                self.notify(StateChange::WordCommitted { cell: *cell, word });
                self.notify(StateChange::CoinsChanged { coins });
            }
            CommitOutcome::Rejected(reason) => {
                log::debug!("discarded {word:?}: {reason:?}");
                self.notify(StateChange::WordRejected { word, reason: *reason });
            }
        }
        self.notify(StateChange::GestureEnded);
        Some(outcome)
    }

    // ---- Commands ----

    /// Start reordering the ring. False while a shuffle is still running.
    pub fn shuffle(&mut self) -> bool {
        let started = self.ring.shuffle();
        if started {
            self.notify(StateChange::ShuffleStarted);
        }
        started
    }

    /// Advance timed state by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        match self.ring.update(dt) {
            Some(RingEvent::Reordered) => self.notify(StateChange::LettersReordered),
            Some(RingEvent::Settled) => self.notify(StateChange::ShuffleSettled),
            None => {}
        }
    }

    // ---- Read access ----

    pub fn ring(&self) -> &LetterRing {
        &self.ring
    }

    pub fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn coins(&self) -> u32 {
        self.coins.get()
    }

    pub fn committer(&self) -> &WordCommitter {
        &self.committer
    }

    pub fn is_shuffling(&self) -> bool {
        self.ring.in_transition()
    }

    pub fn snapshot(&self) -> StateSnapshot {
        let letters = self
            .ring
            .placements()
            .map(|(letter, center)| LetterView {
                letter: letter.ch,
                slot: letter.slot,
                x: center.x,
                y: center.y,
                selected: self.tracker.contains(letter.ch),
            })
            .collect();

        StateSnapshot {
            letters,
            path: self.tracker.selected().iter().map(|s| s.pos.to_array()).collect(),
            current_word: self.tracker.word().to_string(),
            current_line: self.tracker.line().map(|l| [l.from.to_array(), l.to.to_array()]),
            board: self.board.to_rows(),
            coins: self.coins.get(),
            shuffling: self.ring.in_transition(),
            visual: self.ring.visual(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&WheelSettings::default())
    }
}

/// Everything the rendering layer needs to paint one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSnapshot {
    pub letters: Vec<LetterView>,
    /// Centers of the selected letters, in selection order.
    pub path: Vec<[f32; 2]>,
    pub current_word: String,
    pub current_line: Option<[[f32; 2]; 2]>,
    pub board: Vec<Vec<String>>,
    pub coins: u32,
    pub shuffling: bool,
    pub visual: LetterVisual,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetterView {
    pub letter: char,
    pub slot: usize,
    pub x: f32,
    pub y: f32,
    /// Highlighted by character, so every tile showing a selected letter lights up.
    pub selected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorded(state: &mut GameState) -> Rc<RefCell<Vec<StateChange>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        state.subscribe(move |change| sink.borrow_mut().push(change.clone()));
        log
    }

    fn center(state: &GameState, ch: char) -> Vec2 {
        let slot = state.ring().letters().iter().position(|&c| c == ch).unwrap();
        state.ring().position_of(slot).unwrap()
    }

    #[test]
    fn observers_see_changes_in_order() {
        let mut state = GameState::default();
        let log = recorded(&mut state);
        state.activate();

        state.pointer_down(center(&state, 'C'));
        state.pointer_move(Vec2::new(0.0, 0.0));
        state.pointer_move(center(&state, 'A'));
        state.pointer_move(center(&state, 'D'));
        state.pointer_up();

        assert_eq!(
            *log.borrow(),
            vec![
                StateChange::Activated,
                StateChange::SelectionChanged { word: "C".into() },
                StateChange::LineMoved,
                StateChange::SelectionChanged { word: "CA".into() },
                StateChange::SelectionChanged { word: "CAD".into() },
                StateChange::WordCommitted { cell: CellRef { row: 0, col: 0 }, word: "CAD".into() },
                StateChange::CoinsChanged { coins: 3 },
                StateChange::GestureEnded,
            ]
        );
    }

    #[test]
    fn rejected_word_is_announced_and_state_resets() {
        let mut state = GameState::default();
        state.activate();
        let log = recorded(&mut state);

        state.pointer_down(center(&state, 'A'));
        state.pointer_move(center(&state, 'B'));
        let outcome = state.pointer_up();

        assert_eq!(outcome, Some(CommitOutcome::Rejected(RejectReason::TooShort)));
        assert_eq!(state.coins(), 0);
        assert_eq!(state.board().filled_count(), 0);
        assert_eq!(state.tracker().word(), "");
        assert!(log.borrow().contains(&StateChange::WordRejected {
            word: "AB".into(),
            reason: RejectReason::TooShort,
        }));
    }

    #[test]
    fn unsubscribed_observer_hears_nothing() {
        let mut state = GameState::default();
        let hits = Rc::new(RefCell::new(0));
        let counter = hits.clone();
        let id = state.subscribe(move |_| *counter.borrow_mut() += 1);

        state.activate();
        assert!(state.unsubscribe(id));
        assert!(!state.unsubscribe(id));
        state.shuffle();

        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn inactive_state_ignores_input() {
        let mut state = GameState::default();
        assert_eq!(state.pointer_down(center(&state, 'A')), GestureStep::Ignored);
        assert_eq!(state.pointer_up(), None);
    }

    #[test]
    fn deactivate_mid_gesture_discards_without_commit() {
        let mut state = GameState::default();
        state.activate();
        let log = recorded(&mut state);
        for ch in ['A', 'B', 'C'] {
            let pos = center(&state, ch);
            if ch == 'A' {
                state.pointer_down(pos);
            } else {
                state.pointer_move(pos);
            }
        }
        state.deactivate();
        state.deactivate();

        assert_eq!(state.board().filled_count(), 0);
        assert_eq!(
            log.borrow().last(),
            Some(&StateChange::Deactivated { dropped_gesture: true })
        );
        let deactivations = log
            .borrow()
            .iter()
            .filter(|c| matches!(c, StateChange::Deactivated { .. }))
            .count();
        assert_eq!(deactivations, 1);
    }

    #[test]
    fn shuffle_is_announced_through_its_phases() {
        let mut state = GameState::default();
        state.activate();
        let log = recorded(&mut state);

        assert!(state.shuffle());
        assert!(!state.shuffle());
        assert!(state.is_shuffling());
        state.tick(0.5);
        state.tick(0.05);
        assert!(!state.is_shuffling());

        assert_eq!(
            *log.borrow(),
            vec![
                StateChange::ShuffleStarted,
                StateChange::LettersReordered,
                StateChange::ShuffleSettled,
            ]
        );
    }

    #[test]
    fn snapshot_reports_live_gesture() {
        let mut state = GameState::default();
        state.activate();
        let a = center(&state, 'A');
        let b = center(&state, 'B');
        state.pointer_down(a);
        state.pointer_move(b);
        state.pointer_move(Vec2::new(10.0, 20.0));

        let snap = state.snapshot();
        assert_eq!(snap.current_word, "AB");
        assert_eq!(snap.path, vec![a.to_array(), b.to_array()]);
        assert_eq!(snap.current_line, Some([b.to_array(), [10.0, 20.0]]));
        let selected: Vec<char> = snap.letters.iter().filter(|l| l.selected).map(|l| l.letter).collect();
        assert_eq!(selected, vec!['A', 'B']);
        assert_eq!(snap.board.len(), 4);
        assert!(!snap.shuffling);
    }

    #[test]
    fn snapshot_serializes_for_the_host() {
        let state = GameState::default();
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["letters"][0]["letter"], "A");
        assert_eq!(json["coins"], 0);
        assert_eq!(json["current_line"], serde_json::Value::Null);
        assert_eq!(json["visual"]["opacity"], 1.0);
    }
}
