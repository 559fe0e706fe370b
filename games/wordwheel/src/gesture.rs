//! Drag-gesture tracking over the letter ring.
//!
//! The tracker turns pointer events into an ordered letter path and the word
//! it spells. It never decides whether that word is kept; `pointer_up` hands
//! the finished word back to the caller and resets.

use glam::Vec2;

use crate::ring::Letter;

/// Hit-testing capability supplied by whoever knows where letters are drawn.
/// A `None` from either method means "no letter here".
pub trait LetterLocator {
    /// The letter under `pos`, if any.
    fn resolve_letter_at(&self, pos: Vec2) -> Option<Letter>;
    /// Where `letter` is currently drawn.
    fn center_of(&self, letter: &Letter) -> Option<Vec2>;
}

/// A letter on the current path, pinned at the center it had when entered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedLetter {
    pub ch: char,
    pub pos: Vec2,
}

/// Rubber-band line from the last selected letter to the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Dragging,
}

/// What a single pointer event did to the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureStep {
    /// A new path began at a letter.
    Started,
    /// A letter was appended to the path.
    Extended,
    /// The last letter was removed by re-entering its predecessor.
    Backtracked,
    /// Only the rubber-band line changed.
    LineMoved,
    /// The gesture ended; carries the spelled word (possibly empty).
    Finished(String),
    /// Nothing changed.
    Ignored,
}

pub struct GestureTracker {
    phase: GesturePhase,
    selected: Vec<SelectedLetter>,
    word: String,
    line: Option<Segment>,
    active: bool,
}

impl GestureTracker {
    /// A tracker starts inactive; call `activate` before feeding events.
    pub fn new() -> Self {
        Self {
            phase: GesturePhase::Idle,
            selected: Vec::with_capacity(16),
            word: String::new(),
            line: None,
            active: false,
        }
    }

    /// Start accepting pointer events.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Stop accepting pointer events. An in-flight gesture is dropped without
    /// producing a word. Returns true if one was dropped.
    pub fn deactivate(&mut self) -> bool {
        let dropped = self.phase == GesturePhase::Dragging;
        self.active = false;
        self.reset();
        dropped
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == GesturePhase::Dragging
    }

    pub fn selected(&self) -> &[SelectedLetter] {
        &self.selected
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn line(&self) -> Option<Segment> {
        self.line
    }

    /// Whether `ch` is already on the path. Matching is by character value.
    pub fn contains(&self, ch: char) -> bool {
        self.selected.iter().any(|s| s.ch == ch)
    }

    /// Press. Starts a path when the pointer lands on a letter; a press on a
    /// letter mid-drag starts over from that letter.
    pub fn pointer_down(&mut self, pos: Vec2, locator: &impl LetterLocator) -> GestureStep {
        if !self.active {
            return GestureStep::Ignored;
        }
        let Some((letter, center)) = resolve(locator, pos) else {
            return GestureStep::Ignored;
        };

        self.selected.clear();
        self.selected.push(SelectedLetter { ch: letter.ch, pos: center });
        self.word.clear();
        self.word.push(letter.ch);
        self.line = None;
        self.phase = GesturePhase::Dragging;
        GestureStep::Started
    }

    pub fn pointer_move(&mut self, pos: Vec2, locator: &impl LetterLocator) -> GestureStep {
        if !self.active || self.phase != GesturePhase::Dragging {
            return GestureStep::Ignored;
        }
        let Some(last) = self.selected.last() else {
            return GestureStep::Ignored;
        };
        self.line = Some(Segment { from: last.pos, to: pos });

        match resolve(locator, pos) {
            Some((letter, center)) if !self.contains(letter.ch) => {
                self.selected.push(SelectedLetter { ch: letter.ch, pos: center });
                self.word.push(letter.ch);
                self.line = None;
                GestureStep::Extended
            }
            Some((letter, _)) if self.is_predecessor(letter.ch) => {
                self.selected.pop();
                self.word.pop();
                GestureStep::Backtracked
            }
            _ => GestureStep::LineMoved,
        }
    }

    /// Release, anywhere on screen. Always returns to idle.
    pub fn pointer_up(&mut self) -> GestureStep {
        if !self.active || self.phase != GesturePhase::Dragging {
            return GestureStep::Ignored;
        }
        let word = std::mem::take(&mut self.word);
        self.reset();
        GestureStep::Finished(word)
    }

    fn is_predecessor(&self, ch: char) -> bool {
        let n = self.selected.len();
        n > 1 && self.selected[n - 2].ch == ch
    }

    fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
        self.selected.clear();
        self.word.clear();
        self.line = None;
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve(locator: &impl LetterLocator, pos: Vec2) -> Option<(Letter, Vec2)> {
    let letter = locator.resolve_letter_at(pos)?;
    let center = locator.center_of(&letter)?;
    Some((letter, center))
}
