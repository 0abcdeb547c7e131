use std::ops::Range;

use crate::shared::{MINUTES_PER_DAY, MinuteOfDay, TimeFilter, WINDOW_RADIUS};

const DAY: usize = MINUTES_PER_DAY as usize;

/// The bucket slots a [`TimeFilter`] selects, as at most two half-open ranges.
/// The second range is only non-empty when the window straddles midnight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    ranges: [Range<usize>; 2],
}

impl Window {
    pub fn new(filter: TimeFilter) -> Self {
        let center = match filter {
            TimeFilter::Any => {
                return Self {
                    ranges: [0..DAY, 0..0],
                };
            }
            TimeFilter::Around(center) => center,
        };
        let min = (center - WINDOW_RADIUS).as_index();
        let max = (center + WINDOW_RADIUS).as_index();
        if min <= max {
            Self {
                ranges: [min..max, 0..0],
            }
        } else {
            Self {
                ranges: [min..DAY, 0..max],
            }
        }
    }

    pub fn ranges(&self) -> &[Range<usize>; 2] {
        &self.ranges
    }

    /// Slot indexes in filter order: the late-evening part first when wrapping.
    pub fn slots(self) -> impl Iterator<Item = usize> {
        self.ranges.into_iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.ranges.iter().map(|range| range.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, minute: MinuteOfDay) -> bool {
        let index = minute.as_index();
        self.ranges.iter().any(|range| range.contains(&index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn around(minute: u16) -> Window {
        Window::new(TimeFilter::Around(MinuteOfDay::new(minute).unwrap()))
    }

    #[test]
    fn every_center_selects_120_distinct_slots() {
        for minute in 0..MINUTES_PER_DAY {
            let window = around(minute);
            let mut seen = [false; DAY];
            for slot in window.clone().slots() {
                assert!(!seen[slot], "slot {slot} repeated for center {minute}");
                seen[slot] = true;
            }
            assert_eq!(window.len(), 120, "center {minute}");
            assert_eq!(seen.iter().filter(|hit| **hit).count(), 120);
        }
    }

    #[test]
    fn window_is_contiguous_around_center() {
        for minute in [0, 60, 700, 1380, 1439] {
            let center = MinuteOfDay::new(minute).unwrap();
            let window = around(minute);
            assert!(window.contains(center));
            assert!(window.contains(center - 60));
            assert!(window.contains(center + 59));
            assert!(!window.contains(center + 60));
            assert!(!window.contains(center - 61));
        }
    }

    #[test]
    fn midnight_wraps() {
        assert_eq!(around(0).ranges(), &[1380..1440, 0..60]);
        assert_eq!(around(1439).ranges(), &[1379..1440, 0..59]);
    }

    #[test]
    fn edges_without_wrap() {
        assert_eq!(around(60).ranges(), &[0..120, 0..0]);
        assert_eq!(around(1380).ranges(), &[1320..1440, 0..0]);
    }

    #[test]
    fn any_covers_the_day() {
        let window = Window::new(TimeFilter::Any);
        assert_eq!(window.len(), DAY);
        assert!(window.slots().eq(0..DAY));
    }
}
