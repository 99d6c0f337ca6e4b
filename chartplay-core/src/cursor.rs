//! Forward-only cursors over time-sorted slices.
//!
//! A cursor is a plain index; `items.len()` is the end position. Under
//! non-decreasing query times a cursor only moves forward, so the cost of a
//! playback tick is bounded by what it sweeps rather than by chart size.

use chartplay_types::{MapTime, Timed};

/// Position in a time-sorted slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cursor(usize);

impl Cursor {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn is_end<T>(self, items: &[T]) -> bool {
        self.0 >= items.len()
    }

    /// Move to the last point whose time is at or before `time`.
    ///
    /// A cursor at the first point stays there when that point lies ahead of
    /// `time`. With `allow_reset`, a cursor that has overshot `time` restarts
    /// from the first point.
    pub fn seek_point<T: Timed>(self, items: &[T], time: MapTime, allow_reset: bool) -> Self {
        if self.is_end(items) {
            return self;
        }

        let mut index = self.0;
        if allow_reset && items[index].time() > time {
            index = 0;
        }
        while index + 1 < items.len() && items[index + 1].time() <= time {
            index += 1;
        }
        Self(index)
    }

    /// Move past every object starting strictly before `time`.
    ///
    /// The cursor ends on the first object at or after `time`, or on the end
    /// position.
    pub fn seek_object<T: Timed>(self, items: &[T], time: MapTime, allow_reset: bool) -> Self {
        if self.is_end(items) {
            return self;
        }

        let mut index = self.0;
        if allow_reset && items[index].time() > time {
            index = 0;
        }
        while index < items.len() && items[index].time() < time {
            index += 1;
        }
        Self(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct At(MapTime);

    impl Timed for At {
        fn time(&self) -> MapTime {
            self.0
        }
    }

    fn items(times: &[MapTime]) -> Vec<At> {
        times.iter().map(|&t| At(t)).collect()
    }

    fn next_random(state: &mut u64) -> u64 {
        *state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        *state >> 33
    }

    #[test]
    fn seek_point_stays_on_first_before_start() {
        let points = items(&[100, 200, 300]);
        let cursor = Cursor::default().seek_point(&points, 50, false);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn seek_point_inclusive_boundary() {
        let points = items(&[0, 200, 300]);
        assert_eq!(Cursor::default().seek_point(&points, 199, false).index(), 0);
        assert_eq!(Cursor::default().seek_point(&points, 200, false).index(), 1);
        assert_eq!(Cursor::default().seek_point(&points, 10_000, false).index(), 2);
    }

    #[test]
    fn seek_point_reset() {
        let points = items(&[0, 200, 300]);
        let cursor = Cursor::new(2);
        assert_eq!(cursor.seek_point(&points, 100, false).index(), 2);
        assert_eq!(cursor.seek_point(&points, 100, true).index(), 0);
        assert_eq!(cursor.seek_point(&points, 250, true).index(), 1);
    }

    #[test]
    fn seek_object_exclusive_boundary() {
        let objects = items(&[100, 100, 200]);
        assert_eq!(Cursor::default().seek_object(&objects, 100, false).index(), 0);
        assert_eq!(Cursor::default().seek_object(&objects, 101, false).index(), 2);
        assert_eq!(Cursor::default().seek_object(&objects, 201, false).index(), 3);
    }

    #[test]
    fn end_cursor_never_moves() {
        let objects = items(&[100]);
        let end = Cursor::new(1);
        assert!(end.is_end(&objects));
        assert_eq!(end.seek_object(&objects, 0, true), end);

        let empty: Vec<At> = Vec::new();
        assert!(Cursor::default().is_end(&empty));
        assert_eq!(Cursor::default().seek_point(&empty, 100, true).index(), 0);
        assert_eq!(Cursor::default().seek_object(&empty, 100, true).index(), 0);
    }

    #[test]
    fn monotonic_queries_never_move_back_or_skip() {
        let mut rng = 0x5eed_u64;
        let mut times = Vec::new();
        let mut t = 0;
        for _ in 0..200 {
            t += (next_random(&mut rng) % 50) as MapTime;
            times.push(t);
        }
        let objects = items(&times);

        let mut cursor = Cursor::default();
        let mut query = -10;
        let mut swept = 0;
        while !cursor.is_end(&objects) {
            query += (next_random(&mut rng) % 120) as MapTime;
            let next = cursor.seek_object(&objects, query, false);
            assert!(next >= cursor);
            for object in &objects[cursor.index()..next.index()] {
                assert!(object.0 < query);
            }
            if let Some(object) = objects.get(next.index()) {
                assert!(object.0 >= query);
            }
            swept += next.index() - cursor.index();
            cursor = next;
        }
        assert_eq!(swept, objects.len());
    }
}
