/*! Rolling window of recent readings.

Timestamps and temperatures are kept in two parallel sequences of equal length.
Once the window is full, recording a reading evicts the oldest pair.
 */

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

/// Fixed-capacity, insertion-ordered history of readings.
#[derive(Clone, Debug)]
pub struct History {
    capacity: usize,
    timestamps: VecDeque<DateTime<Utc>>,
    temperatures: VecDeque<f64>,
}

impl History {
    /// Create an empty history holding at most `capacity` readings.
    pub fn new(capacity: usize) -> History {
        History {
            capacity,
            timestamps: VecDeque::with_capacity(capacity),
            temperatures: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a reading, evicting the oldest one if the window is full.
    pub fn record(&mut self, timestamp: DateTime<Utc>, temperature: f64) {
        if self.capacity == 0 {
            return;
        }
        if self.temperatures.len() == self.capacity {
            self.timestamps.pop_front();
            self.temperatures.pop_front();
        }
        self.timestamps.push_back(timestamp);
        self.temperatures.push_back(temperature);
    }

    /// Maximum number of readings kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of readings currently held.
    pub fn len(&self) -> usize {
        self.temperatures.len()
    }

    /// Returns true if no readings are held.
    pub fn is_empty(&self) -> bool {
        self.temperatures.is_empty()
    }

    /// Timestamps, oldest first.
    pub fn timestamps(&self) -> impl Iterator<Item = &DateTime<Utc>> + '_ {
        self.timestamps.iter()
    }

    /// Temperatures, oldest first.
    pub fn temperatures(&self) -> impl Iterator<Item = f64> + '_ {
        self.temperatures.iter().copied()
    }

    /// Most recent reading.
    pub fn latest(&self) -> Option<(DateTime<Utc>, f64)> {
        self.timestamps.back().copied()
            .zip(self.temperatures.back().copied())
    }

    /// Lowest temperature held.
    pub fn min(&self) -> Option<f64> {
        self.temperatures().fold(None, |acc, t| match acc {
            Some(m) if m <= t => Some(m),
            _ => Some(t),
        })
    }

    /// Highest temperature held.
    pub fn max(&self) -> Option<f64> {
        self.temperatures().fold(None, |acc, t| match acc {
            Some(m) if m >= t => Some(m),
            _ => Some(t),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn evicts_oldest_past_capacity() {
        let mut history = History::new(60);
        for i in 0..61 {
            history.record(at(i), i as f64);
        }

        assert_eq!(history.len(), 60);
        let temps: Vec<f64> = history.temperatures().collect();
        let expected: Vec<f64> = (1..61).map(|i| i as f64).collect();
        assert_eq!(temps, expected);
        assert_eq!(history.timestamps().next(), Some(&at(1)));
        assert_eq!(history.latest(), Some((at(60), 60.0)));
    }

    #[test]
    fn sequences_stay_aligned() {
        let mut history = History::new(5);
        for i in 0..12 {
            history.record(at(i), (i * 2) as f64);
            assert_eq!(history.timestamps().count(), history.temperatures().count());
        }

        let pairs: Vec<(i64, f64)> = history.timestamps()
            .map(|t| t.timestamp() - 1_700_000_000)
            .zip(history.temperatures())
            .collect();
        assert_eq!(pairs, vec![(7, 14.0), (8, 16.0), (9, 18.0), (10, 20.0), (11, 22.0)]);
    }

    #[test]
    fn extremes_of_empty_history() {
        let history = History::new(60);
        assert!(history.is_empty());
        assert_eq!(history.min(), None);
        assert_eq!(history.max(), None);
        assert_eq!(history.latest(), None);
    }

    #[test]
    fn extremes_track_window() {
        let mut history = History::new(3);
        for (i, t) in [5.0, 30.0, 10.0, 20.0].iter().enumerate() {
            history.record(at(i as i64), *t);
        }

        assert_eq!(history.min(), Some(10.0));
        assert_eq!(history.max(), Some(30.0));
    }
}
