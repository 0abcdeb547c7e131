use crate::{
    repository::Trip,
    shared::{MINUTES_PER_DAY, MinuteOfDay, TimeFilter},
    traffic::Window,
};

/// One slot per minute of the day, values kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinuteBuckets<T> {
    slots: Box<[Vec<T>]>,
}

impl<T> Default for MinuteBuckets<T> {
    fn default() -> Self {
        Self {
            slots: (0..MINUTES_PER_DAY).map(|_| Vec::new()).collect(),
        }
    }
}

impl<T> FromIterator<(MinuteOfDay, T)> for MinuteBuckets<T> {
    fn from_iter<I: IntoIterator<Item = (MinuteOfDay, T)>>(iter: I) -> Self {
        let mut buckets = Self::default();
        iter.into_iter()
            .for_each(|(minute, value)| buckets.push(minute, value));
        buckets
    }
}

impl<T> MinuteBuckets<T> {
    pub fn new() -> Self {
        Default::default()
    }

    fn push(&mut self, minute: MinuteOfDay, value: T) {
        self.slots[minute.as_index()].push(value);
    }

    pub fn slot(&self, minute: MinuteOfDay) -> &[T] {
        &self.slots[minute.as_index()]
    }

    /// Non-empty slots in minute order.
    pub fn slots(&self) -> impl Iterator<Item = (MinuteOfDay, &[T])> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.is_empty())
            .filter_map(|(i, slot)| Some((MinuteOfDay::new(i as u16)?, slot.as_slice())))
    }

    /// Total number of values across all slots.
    pub fn len(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Vec::is_empty)
    }

    /// Values whose minute falls inside `filter`'s window, flattened slot by slot.
    pub fn filter(&self, filter: TimeFilter) -> impl Iterator<Item = &T> {
        Window::new(filter)
            .slots()
            .flat_map(move |slot| self.slots[slot].iter())
    }
}

/// Trip indexes bucketed by start minute (departures) and end minute (arrivals).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    departures: MinuteBuckets<u32>,
    arrivals: MinuteBuckets<u32>,
}

impl Buckets {
    pub fn build(trips: &[Trip]) -> Self {
        let departures = trips
            .iter()
            .enumerate()
            .map(|(i, trip)| (trip.start_minute(), i as u32))
            .collect();
        let arrivals = trips
            .iter()
            .enumerate()
            .map(|(i, trip)| (trip.end_minute(), i as u32))
            .collect();
        Self {
            departures,
            arrivals,
        }
    }

    pub fn departures(&self) -> &MinuteBuckets<u32> {
        &self.departures
    }

    pub fn arrivals(&self) -> &MinuteBuckets<u32> {
        &self.arrivals
    }
}
