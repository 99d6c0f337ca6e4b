use chartplay_types::MapTime;

/// Time window in which objects may become active.
///
/// `end` of `None` leaves the window open forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRange {
    pub begin: MapTime,
    pub end: Option<MapTime>,
}

impl Default for ViewRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl ViewRange {
    pub fn new(begin: MapTime, end: Option<MapTime>) -> Self {
        Self { begin, end }
    }

    pub fn unbounded() -> Self {
        Self::new(MapTime::MIN, None)
    }

    /// Window starting at `begin` and open forward.
    pub fn starting_at(begin: MapTime) -> Self {
        Self::new(begin, None)
    }

    pub fn has_end(&self) -> bool {
        self.end.is_some()
    }

    /// Whether `time` lies in the window. The end bound is exclusive unless
    /// `inclusive_end` is set.
    pub fn includes(&self, time: MapTime, inclusive_end: bool) -> bool {
        if time < self.begin {
            return false;
        }
        match self.end {
            None => true,
            Some(end) if inclusive_end => time <= end,
            Some(end) => time < end,
        }
    }

    /// Clamp `[begin, end)` to this window.
    pub fn clamp(&self, begin: MapTime, end: MapTime) -> (MapTime, MapTime) {
        let begin = begin.max(self.begin);
        let end = match self.end {
            Some(limit) => end.min(limit),
            None => end,
        };
        (begin, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_includes_everything() {
        let range = ViewRange::unbounded();
        assert!(range.includes(MapTime::MIN, false));
        assert!(range.includes(MapTime::MAX, false));
    }

    #[test]
    fn end_bound() {
        let range = ViewRange::new(1000, Some(2000));
        assert!(!range.includes(999, false));
        assert!(range.includes(1000, false));
        assert!(range.includes(1999, false));
        assert!(!range.includes(2000, false));
        assert!(range.includes(2000, true));
        assert!(!range.includes(2001, true));
    }

    #[test]
    fn clamp_to_bounds() {
        let range = ViewRange::new(1000, Some(2000));
        assert_eq!(range.clamp(500, 5000), (1000, 2000));
        assert_eq!(range.clamp(1200, 1500), (1200, 1500));
        assert_eq!(ViewRange::starting_at(0).clamp(-50, 9000), (0, 9000));
    }
}
