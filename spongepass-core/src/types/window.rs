//! Quantized time window.

use serde::{Deserialize, Serialize};

use crate::constants::WINDOW_SIZE;

/// Index of a time window: `floor(timestamp / granularity)` modulo 2^32.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeWindow(u32);

impl TimeWindow {
    /// Wraps a raw window index.
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw window index.
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Serializes the window for absorption (little-endian).
    pub const fn to_le_bytes(self) -> [u8; WINDOW_SIZE] {
        self.0.to_le_bytes()
    }

    /// The following window, wrapping at `u32::MAX`.
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl From<u32> for TimeWindow {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_le_serialization() {
        let window = TimeWindow::new(0x0403_0201);
        assert_eq!(window.to_le_bytes(), [0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_next_wraps() {
        assert_eq!(TimeWindow::new(u32::MAX).next(), TimeWindow::new(0));
        assert_eq!(TimeWindow::new(9).next().index(), 10);
    }

    #[test]
    fn test_display_hex() {
        assert_eq!(TimeWindow::new(0xabc).to_string(), "0x00000abc");
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&TimeWindow::new(56_666_666)).unwrap();
        assert_eq!(json, "56666666");
        let back: TimeWindow = serde_json::from_str(&json).unwrap();
        assert_eq!(back.index(), 56_666_666);
    }
}
