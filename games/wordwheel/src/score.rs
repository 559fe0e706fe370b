/// Running coin total. Only ever grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coins(u32);

impl Coins {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Add one coin per character of `word`. Returns the new total.
    pub fn award(&mut self, word: &str) -> u32 {
        let earned = u32::try_from(word.chars().count()).unwrap_or(u32::MAX);
        self.0 = self.0.saturating_add(earned);
        self.0
    }
}
