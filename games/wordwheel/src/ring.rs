use std::f32::consts::TAU;

use glam::Vec2;
use serde::Serialize;
use wordwheel_engine::{ease, Countdown, Easing, Rng};

use crate::gesture::LetterLocator;
use crate::settings::WheelSettings;

/// A ring tile: its character and the angular slot it currently occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Letter {
    pub ch: char,
    pub slot: usize,
}

/// Shuffle transition phases. Letters are unselectable in both moving phases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RingTransition {
    Steady,
    /// Letters fade and shrink; they are reordered when this elapses.
    FadingOut(Countdown),
    /// Reordered but still suspended.
    Settling(Countdown),
}

/// Edges reported by `LetterRing::update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingEvent {
    Reordered,
    Settled,
}

/// How the rendering layer should draw the letters right now.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LetterVisual {
    pub opacity: f32,
    pub scale: f32,
}

impl LetterVisual {
    pub const SHOWN: Self = Self { opacity: 1.0, scale: 1.0 };
    pub const HIDDEN: Self = Self { opacity: 0.0, scale: 0.5 };
}

/// Letters placed at equal angles around a circle.
pub struct LetterRing {
    letters: Vec<char>,
    center: Vec2,
    radius: f32,
    tile_radius: f32,
    fade_out_secs: f32,
    fade_easing: Easing,
    settle_secs: f32,
    transition: RingTransition,
    rng: Rng,
}

impl LetterRing {
    pub fn new(letters: Vec<char>, center: Vec2, radius: f32, tile_radius: f32) -> Self {
        let defaults = WheelSettings::default();
        Self {
            letters,
            center,
            radius,
            tile_radius,
            fade_out_secs: defaults.fade_out_secs,
            fade_easing: defaults.fade_easing,
            settle_secs: defaults.settle_secs,
            transition: RingTransition::Steady,
            rng: Rng::new(defaults.seed),
        }
    }

    pub fn from_settings(settings: &WheelSettings) -> Self {
        Self {
            fade_out_secs: settings.fade_out_secs,
            fade_easing: settings.fade_easing,
            settle_secs: settings.settle_secs,
            rng: Rng::new(settings.seed),
            ..Self::new(
                settings.letter_chars(),
                settings.center(),
                settings.radius,
                settings.tile_radius,
            )
        }
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn letter_at(&self, slot: usize) -> Option<Letter> {
        self.letters.get(slot).map(|&ch| Letter { ch, slot })
    }

    pub fn contains(&self, ch: char) -> bool {
        self.letters.contains(&ch)
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn tile_radius(&self) -> f32 {
        self.tile_radius
    }

    /// Slot `index` sits at angle `index / N * 2π`, measured clockwise from
    /// the positive x axis in y-down world space.
    pub fn position_of(&self, index: usize) -> Option<Vec2> {
        if index >= self.letters.len() {
            return None;
        }
        let angle = index as f32 / self.letters.len() as f32 * TAU;
        Some(Vec2::new(angle.cos(), angle.sin()) * self.radius + self.center)
    }

    /// Every letter with its current center, in slot order.
    pub fn placements(&self) -> impl Iterator<Item = (Letter, Vec2)> + '_ {
        (0..self.letters.len()).filter_map(move |slot| {
            let letter = self.letter_at(slot)?;
            Some((letter, self.position_of(slot)?))
        })
    }

    pub fn transition(&self) -> RingTransition {
        self.transition
    }

    pub fn in_transition(&self) -> bool {
        self.transition != RingTransition::Steady
    }

    /// Begin a shuffle. Returns false if one is already running.
    pub fn shuffle(&mut self) -> bool {
        if self.in_transition() {
            return false;
        }
        self.transition = RingTransition::FadingOut(Countdown::new(self.fade_out_secs));
        true
    }

    /// Advance the shuffle transition by `dt` seconds.
    pub fn update(&mut self, dt: f32) -> Option<RingEvent> {
        match &mut self.transition {
            RingTransition::Steady => None,
            RingTransition::FadingOut(countdown) => {
                if !countdown.tick(dt) {
                    return None;
                }
                self.rng.shuffle(&mut self.letters);
                self.transition = RingTransition::Settling(Countdown::new(self.settle_secs));
                Some(RingEvent::Reordered)
            }
            RingTransition::Settling(countdown) => {
                if !countdown.tick(dt) {
                    return None;
                }
                self.transition = RingTransition::Steady;
                Some(RingEvent::Settled)
            }
        }
    }

    pub fn visual(&self) -> LetterVisual {
        match self.transition {
            RingTransition::Steady => LetterVisual::SHOWN,
            RingTransition::FadingOut(countdown) => {
                let t = countdown.progress();
                LetterVisual {
                    opacity: ease(1.0, 0.0, t, self.fade_easing).clamp(0.0, 1.0),
                    scale: ease(1.0, 0.5, t, self.fade_easing),
                }
            }
            RingTransition::Settling(_) => LetterVisual::HIDDEN,
        }
    }
}

impl LetterLocator for LetterRing {
    /// Nearest letter whose center is within `tile_radius` of `pos`.
    /// Nothing is selectable during a shuffle.
    fn resolve_letter_at(&self, pos: Vec2) -> Option<Letter> {
        if self.in_transition() {
            return None;
        }
        self.placements()
            .map(|(letter, center)| (letter, center.distance(pos)))
            .filter(|(_, dist)| *dist <= self.tile_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(letter, _)| letter)
    }

    fn center_of(&self, letter: &Letter) -> Option<Vec2> {
        self.position_of(letter.slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> LetterRing {
        LetterRing::new(vec!['A', 'B', 'C', 'D'], Vec2::new(128.0, 128.0), 100.0, 16.0)
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        a.distance(b) < 1e-3
    }

    #[test]
    fn slots_are_evenly_spaced() {
        let r = ring();
        assert!(close(r.position_of(0).unwrap(), Vec2::new(228.0, 128.0)));
        assert!(close(r.position_of(1).unwrap(), Vec2::new(128.0, 228.0)));
        assert!(close(r.position_of(2).unwrap(), Vec2::new(28.0, 128.0)));
        assert!(close(r.position_of(3).unwrap(), Vec2::new(128.0, 28.0)));
        assert_eq!(r.position_of(4), None);
    }

    #[test]
    fn hit_test_finds_letter_within_tile_radius() {
        let r = ring();
        let hit = r.resolve_letter_at(Vec2::new(220.0, 135.0));
        assert_eq!(hit, Some(Letter { ch: 'A', slot: 0 }));
        assert_eq!(r.resolve_letter_at(Vec2::new(128.0, 128.0)), None);
        assert_eq!(r.resolve_letter_at(Vec2::new(128.0, 245.0)), None);
    }

    #[test]
    fn center_of_uses_current_slot() {
        let r = ring();
        let c = r.letter_at(2).unwrap();
        assert_eq!(c.ch, 'C');
        assert!(close(r.center_of(&c).unwrap(), Vec2::new(28.0, 128.0)));
        assert_eq!(r.center_of(&Letter { ch: 'Z', slot: 9 }), None);
    }

    #[test]
    fn shuffle_runs_fade_then_settle() {
        let mut r = ring();
        assert!(r.shuffle());
        assert!(r.in_transition());
        assert!(!r.shuffle(), "second shuffle while moving is refused");

        assert_eq!(r.update(0.3), None);
        assert!(r.visual().opacity < 1.0);
        assert_eq!(r.update(0.3), Some(RingEvent::Reordered));
        assert_eq!(r.visual(), LetterVisual::HIDDEN);
        assert!(r.in_transition());

        assert_eq!(r.update(0.06), Some(RingEvent::Settled));
        assert!(!r.in_transition());
        assert_eq!(r.visual(), LetterVisual::SHOWN);
        assert_eq!(r.update(1.0), None);
    }

    #[test]
    fn shuffle_keeps_letter_multiset() {
        let mut r = LetterRing::new(vec!['A', 'B', 'B', 'C', 'D'], Vec2::ZERO, 50.0, 8.0);
        for _ in 0..10 {
            r.shuffle();
            r.update(1.0);
            r.update(1.0);
            let mut letters = r.letters().to_vec();
            letters.sort();
            assert_eq!(letters, vec!['A', 'B', 'B', 'C', 'D']);
        }
    }

    #[test]
    fn letters_unselectable_during_transition() {
        let mut r = ring();
        let on_slot0 = r.position_of(0).unwrap();
        r.shuffle();
        assert_eq!(r.resolve_letter_at(on_slot0), None);
        r.update(0.5);
        assert_eq!(r.resolve_letter_at(on_slot0), None);
        r.update(0.05);
        assert!(r.resolve_letter_at(on_slot0).is_some());
    }

    #[test]
    fn settings_drive_timing_and_seed() {
        let settings = WheelSettings {
            fade_out_secs: 0.0,
            settle_secs: 0.0,
            ..WheelSettings::default()
        };
        let mut a = LetterRing::from_settings(&settings);
        let mut b = LetterRing::from_settings(&settings);
        for r in [&mut a, &mut b] {
            r.shuffle();
            assert_eq!(r.update(0.0), Some(RingEvent::Reordered));
            assert_eq!(r.update(0.0), Some(RingEvent::Settled));
        }
        assert_eq!(a.letters(), b.letters());
    }
}
