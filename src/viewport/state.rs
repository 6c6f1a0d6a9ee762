//! Position of the visible window within the file

/// Offset and height of the window, plus the furthest offset it may scroll to
///
/// `offset` is always the first byte of a line and never exceeds `offset_max`.
/// `offset_max` is the start of the last `height` lines of the file, or 0 when the
/// file has fewer lines than the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewportState {
    /// Byte position of the first visible line
    pub offset: u64,

    /// Number of visible lines
    pub height: usize,

    /// Largest valid `offset` for the current height
    pub offset_max: u64,
}

impl ViewportState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamp `offset` into `[0, offset_max]`
    pub fn clamp(&self, offset: u64) -> u64 {
        offset.min(self.offset_max)
    }

    pub fn at_bottom(&self) -> bool {
        self.offset >= self.offset_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_and_edges() {
        let state = ViewportState {
            offset: 0,
            height: 3,
            offset_max: 20,
        };
        assert_eq!(state.clamp(5), 5);
        assert_eq!(state.clamp(21), 20);
        assert!(!state.at_bottom());

        let bottom = ViewportState {
            offset: 20,
            ..state
        };
        assert!(bottom.at_bottom());
    }
}
