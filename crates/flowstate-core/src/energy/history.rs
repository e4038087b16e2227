//! Rolling history of daily energy scores and the demo history generator.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use super::calculator::calculate_burnout_risk;
use super::calculator::BurnoutRisk;

/// Days kept by the dashboard history.
pub const DEFAULT_HISTORY_WINDOW: usize = 7;

/// Trailing days used for burnout classification.
pub const DEFAULT_BURNOUT_WINDOW: usize = 5;

pub const MOCK_MIN_ENERGY: f64 = 20.0;
pub const MOCK_MAX_ENERGY: f64 = 100.0;

/// Generate `days` believable daily scores using the thread rng.
pub fn generate_mock_energy_data(days: usize) -> Vec<f64> {
    generate_mock_energy_data_with_rng(days, &mut rand::thread_rng())
}

/// Generate `days` daily scores, oldest first.
///
/// Day `i` back from today is `60 + 15 * sin(i / 3)` plus uniform noise in
/// `[-5, 5]`, clamped to `[20, 100]`. Index 0 (today) ends up last.
pub fn generate_mock_energy_data_with_rng<R: Rng>(days: usize, rng: &mut R) -> Vec<f64> {
    let mut data = Vec::with_capacity(days);
    for i in 0..days {
        let base_energy = 60.0 + (i as f64 / 3.0).sin() * 15.0;
        let noise: f64 = rng.gen_range(-5.0..=5.0);
        data.push((base_energy + noise).clamp(MOCK_MIN_ENERGY, MOCK_MAX_ENERGY));
    }
    data.reverse();
    data
}

/// Ordered daily scores, oldest first, bounded to `capacity` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredHistory")]
pub struct EnergyHistory {
    scores: VecDeque<f64>,
    capacity: usize,
}

/// Wire shape of [`EnergyHistory`]; rebuilt through `from_scores` so the
/// capacity bound holds for deserialized values too.
#[derive(Deserialize)]
struct StoredHistory {
    scores: Vec<f64>,
    capacity: usize,
}

impl From<StoredHistory> for EnergyHistory {
    fn from(stored: StoredHistory) -> Self {
        Self::from_scores(stored.scores, stored.capacity)
    }
}

impl Default for EnergyHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_WINDOW)
    }
}

impl EnergyHistory {
    /// Empty history. A zero capacity is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            scores: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// History holding the newest `capacity` values of `scores`.
    pub fn from_scores(scores: impl IntoIterator<Item = f64>, capacity: usize) -> Self {
        let mut history = Self::new(capacity);
        history.extend(scores);
        history
    }

    /// Mock history of `days` values from the thread rng.
    pub fn mock(days: usize, capacity: usize) -> Self {
        Self::from_scores(generate_mock_energy_data(days), capacity)
    }

    /// Reproducible mock history.
    pub fn seeded(days: usize, capacity: usize, seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);
        Self::from_scores(generate_mock_energy_data_with_rng(days, &mut rng), capacity)
    }

    /// Append today's score, evicting the oldest value when full.
    pub fn push(&mut self, score: f64) {
        while self.scores.len() >= self.capacity {
            self.scores.pop_front();
        }
        self.scores.push_back(score);
        tracing::debug!(score, len = self.scores.len(), "recorded energy score");
    }

    pub fn extend(&mut self, scores: impl IntoIterator<Item = f64>) {
        for score in scores {
            self.push(score);
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Newest score.
    pub fn latest(&self) -> Option<f64> {
        self.scores.back().copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.scores.iter().copied().collect()
    }

    /// The newest `n` scores, oldest first.
    pub fn recent(&self, n: usize) -> Vec<f64> {
        let skip = self.scores.len().saturating_sub(n);
        self.scores.iter().skip(skip).copied().collect()
    }

    /// Mean of the newest `n` scores, or 0 when empty.
    pub fn average_recent(&self, n: usize) -> f64 {
        let recent = self.recent(n);
        if recent.is_empty() {
            return 0.0;
        }
        recent.iter().sum::<f64>() / recent.len() as f64
    }

    /// Burnout risk over the newest `window` scores.
    pub fn burnout_risk(&self, window: usize) -> BurnoutRisk {
        calculate_burnout_risk(&self.recent(window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_data_length_and_range() {
        for days in [0, 1, 7, 30, 365] {
            let data = generate_mock_energy_data(days);
            assert_eq!(data.len(), days);
            assert!(data.iter().all(|v| (20.0..=100.0).contains(v)));
        }
    }

    #[test]
    fn test_mock_data_is_oldest_first() {
        // Noise is bounded by 5, so the sine shape is visible: today (i = 0) is last.
        let mut rng = Pcg64::seed_from_u64(7);
        let data = generate_mock_energy_data_with_rng(7, &mut rng);
        let today = *data.last().unwrap();
        assert!((today - 60.0).abs() <= 5.0);
        let oldest = data[0];
        let expected_oldest = 60.0 + (6.0f64 / 3.0).sin() * 15.0;
        assert!((oldest - expected_oldest).abs() <= 5.0);
    }

    #[test]
    fn test_seeded_history_is_reproducible() {
        let a = EnergyHistory::seeded(7, 7, 42);
        let b = EnergyHistory::seeded(7, 7, 42);
        assert_eq!(a, b);
        assert_eq!(a.len(), 7);
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut history = EnergyHistory::from_scores([10.0, 20.0, 30.0], 3);
        history.push(40.0);
        assert_eq!(history.to_vec(), vec![20.0, 30.0, 40.0]);
        assert_eq!(history.latest(), Some(40.0));
    }

    #[test]
    fn test_from_scores_keeps_newest() {
        let history = EnergyHistory::from_scores((1..=10).map(f64::from), 7);
        assert_eq!(history.to_vec(), vec![4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut history = EnergyHistory::new(0);
        history.push(1.0);
        history.push(2.0);
        assert_eq!(history.to_vec(), vec![2.0]);
    }

    #[test]
    fn test_deserialize_enforces_capacity() {
        let history: EnergyHistory =
            serde_json::from_str(r#"{"scores":[1.0,2.0,3.0,4.0],"capacity":2}"#).unwrap();
        assert_eq!(history.to_vec(), vec![3.0, 4.0]);

        let mut history: EnergyHistory =
            serde_json::from_str(r#"{"scores":[1.0,2.0],"capacity":0}"#).unwrap();
        assert_eq!(history.capacity(), 1);
        history.push(5.0);
        assert_eq!(history.to_vec(), vec![5.0]);
    }

    #[test]
    fn test_recent_and_average() {
        let history = EnergyHistory::from_scores([90.0, 90.0, 40.0, 40.0, 40.0, 40.0, 40.0], 7);
        assert_eq!(history.recent(5), vec![40.0; 5]);
        assert_eq!(history.average_recent(5), 40.0);
        assert_eq!(history.burnout_risk(5), BurnoutRisk::High);
        assert_eq!(history.burnout_risk(7), BurnoutRisk::Moderate);
    }

    #[test]
    fn test_empty_history() {
        let history = EnergyHistory::default();
        assert!(history.is_empty());
        assert_eq!(history.average_recent(5), 0.0);
        assert_eq!(history.burnout_risk(5), BurnoutRisk::Low);
        assert_eq!(history.capacity(), DEFAULT_HISTORY_WINDOW);
    }
}
