use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wordwheel_engine::Easing;

/// Reasons a settings document is refused.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("the ring needs at least {min} letters, got {got}")]
    TooFewLetters { min: usize, got: usize },
    #[error("ring entry {0:?} is not a single character")]
    NotALetter(String),
    #[error("radius {radius} and tile radius {tile_radius} must both be positive")]
    InvalidRadius { radius: f32, tile_radius: f32 },
    #[error("board must have between 1 and {max} cells with no empty dimension, got {rows}x{cols}", max = WheelSettings::MAX_BOARD_CELLS)]
    InvalidBoard { rows: usize, cols: usize },
    #[error("transition durations must be finite and non-negative")]
    InvalidDuration,
    #[error("minimum word length must be at least 1")]
    MinWordLength,
}

/// Host-tunable game settings. Every field has a default, so `{}` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelSettings {
    /// Ring letters in their initial order. One character per entry.
    pub letters: Vec<String>,
    /// Ring center in world units.
    pub center: [f32; 2],
    pub radius: f32,
    /// Hit radius around each letter center.
    pub tile_radius: f32,
    pub min_word_len: usize,
    pub board_rows: usize,
    pub board_cols: usize,
    /// Seconds the letters spend fading out before they are reordered.
    pub fade_out_secs: f32,
    /// Curve for the fade-out, e.g. `"quad_out"` or `"linear"`.
    pub fade_easing: Easing,
    /// Seconds after reordering before letters accept input again.
    pub settle_secs: f32,
    pub seed: u64,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            letters: ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect(),
            center: [128.0, 128.0],
            radius: 100.0,
            tile_radius: 16.0,
            min_word_len: 3,
            board_rows: 4,
            board_cols: 4,
            fade_out_secs: 0.5,
            fade_easing: Easing::QuadOut,
            settle_secs: 0.05,
            seed: 42,
        }
    }
}

impl WheelSettings {
    /// Smallest ring that can still spell a word by dragging.
    pub const MIN_LETTERS: usize = 2;
    /// Upper bound on `board_rows * board_cols`.
    pub const MAX_BOARD_CELLS: usize = 1024;

    /// Parse and validate a JSON settings document.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.letters.len() < Self::MIN_LETTERS {
            return Err(SettingsError::TooFewLetters {
                min: Self::MIN_LETTERS,
                got: self.letters.len(),
            });
        }
        if let Some(bad) = self.letters.iter().find(|l| l.chars().count() != 1) {
            return Err(SettingsError::NotALetter(bad.clone()));
        }
        if !(self.radius > 0.0 && self.tile_radius > 0.0) {
            return Err(SettingsError::InvalidRadius {
                radius: self.radius,
                tile_radius: self.tile_radius,
            });
        }
        let cells = self.board_rows.checked_mul(self.board_cols).unwrap_or(usize::MAX);
        if cells == 0 || cells > Self::MAX_BOARD_CELLS {
            return Err(SettingsError::InvalidBoard {
                rows: self.board_rows,
                cols: self.board_cols,
            });
        }
        let durations = [self.fade_out_secs, self.settle_secs];
        if durations.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Err(SettingsError::InvalidDuration);
        }
        if self.min_word_len == 0 {
            return Err(SettingsError::MinWordLength);
        }
        Ok(())
    }

    /// Ring letters as characters. Entries are single characters once validated.
    pub fn letter_chars(&self) -> Vec<char> {
        self.letters.iter().filter_map(|l| l.chars().next()).collect()
    }

    pub fn center(&self) -> Vec2 {
        Vec2::from(self.center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let settings = WheelSettings::from_json("{}").unwrap();
        assert_eq!(settings, WheelSettings::default());
        assert_eq!(settings.letter_chars(), vec!['A', 'B', 'C', 'D']);
        assert_eq!(settings.center(), Vec2::new(128.0, 128.0));
    }

    #[test]
    fn partial_document_overrides_fields() {
        let json = r#"{ "letters": ["W", "O", "R", "D", "S"], "radius": 80, "seed": 7 }"#;
        let settings = WheelSettings::from_json(json).unwrap();
        assert_eq!(settings.letters.len(), 5);
        assert_eq!(settings.radius, 80.0);
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.board_rows, 4);
    }

    #[test]
    fn easing_is_named_in_snake_case() {
        let settings = WheelSettings::from_json(r#"{ "fade_easing": "back_out" }"#).unwrap();
        assert_eq!(settings.fade_easing, Easing::BackOut);
        assert!(matches!(
            WheelSettings::from_json(r#"{ "fade_easing": "bounce" }"#),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = WheelSettings::from_json("{ letters: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn rejects_bad_values() {
        let one_letter = r#"{ "letters": ["A"] }"#;
        assert!(matches!(
            WheelSettings::from_json(one_letter),
            Err(SettingsError::TooFewLetters { min: 2, got: 1 })
        ));

        let digraph = r#"{ "letters": ["A", "CH"] }"#;
        assert!(matches!(
            WheelSettings::from_json(digraph),
            Err(SettingsError::NotALetter(ref s)) if s == "CH"
        ));

        let flat = r#"{ "radius": 0 }"#;
        assert!(matches!(
            WheelSettings::from_json(flat),
            Err(SettingsError::InvalidRadius { .. })
        ));

        let no_board = r#"{ "board_cols": 0 }"#;
        assert!(matches!(
            WheelSettings::from_json(no_board),
            Err(SettingsError::InvalidBoard { rows: 4, cols: 0 })
        ));

        let negative = r#"{ "settle_secs": -1.0 }"#;
        assert!(matches!(
            WheelSettings::from_json(negative),
            Err(SettingsError::InvalidDuration)
        ));

        let zero_len = r#"{ "min_word_len": 0 }"#;
        assert!(matches!(
            WheelSettings::from_json(zero_len),
            Err(SettingsError::MinWordLength)
        ));
    }

    #[test]
    fn oversized_boards_are_refused() {
        let overflowing = r#"{ "board_rows": 8589934592, "board_cols": 8589934592 }"#;
        // Out of range for a 32-bit usize, so wasm refuses it while parsing
        assert!(matches!(
            WheelSettings::from_json(overflowing),
            Err(SettingsError::InvalidBoard { .. } | SettingsError::Parse(_))
        ));

        let huge = r#"{ "board_rows": 100000, "board_cols": 3 }"#;
        assert!(matches!(
            WheelSettings::from_json(huge),
            Err(SettingsError::InvalidBoard { rows: 100000, cols: 3 })
        ));

        let at_limit = r#"{ "board_rows": 32, "board_cols": 32 }"#;
        assert!(WheelSettings::from_json(at_limit).is_ok());
    }

    #[test]
    fn error_messages_are_readable() {
        let err = WheelSettings::from_json(r#"{ "letters": [] }"#).unwrap_err();
        assert_eq!(err.to_string(), "the ring needs at least 2 letters, got 0");
    }
}
