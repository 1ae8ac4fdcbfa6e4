//! Per-event-type totals and the IPC derived from them.

use crate::ingress::Sample;
use crate::utils::config::{CYCLE_EVENTS, INSTRUCTION_EVENTS};
use crate::utils::error::AnalysisError;
use log::debug;
use std::collections::HashMap;

/// Aggregate for one event type
#[derive(Debug, Clone, Default)]
pub struct EventBucket {
    /// Sum of all sampled periods for this event type
    pub total_weight: u64,

    /// Samples in arrival order
    pub samples: Vec<Sample>,
}

impl EventBucket {
    fn push(&mut self, sample: Sample) {
        self.total_weight = self.total_weight.saturating_add(sample.weight);
        self.samples.push(sample);
    }
}

/// Running totals keyed by event name.
///
/// Buckets are kept in first-observed order so the summary lists events in
/// the order they appeared in the stream.
#[derive(Debug, Default)]
pub struct EventAggregator {
    buckets: Vec<(String, EventBucket)>,
    index: HashMap<String, usize>,
}

impl EventAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one sample into the bucket for its event type
    pub fn record(&mut self, sample: Sample) {
        let slot = match self.index.get(&sample.event_name) {
            Some(&slot) => slot,
            None => {
                debug!("First sample for event {}", sample.event_name);
                self.buckets.push((sample.event_name.clone(), EventBucket::default()));
                self.index.insert(sample.event_name.clone(), self.buckets.len() - 1);
                self.buckets.len() - 1
            }
        };
        self.buckets[slot].1.push(sample);
    }

    pub fn bucket(&self, event_name: &str) -> Option<&EventBucket> {
        self.index.get(event_name).map(|&slot| &self.buckets[slot].1)
    }

    /// Total weight for `event_name`, 0 if never observed
    pub fn total_for(&self, event_name: &str) -> u64 {
        self.bucket(event_name).map_or(0, |b| b.total_weight)
    }

    /// Samples of one event type in arrival order, empty if never observed
    pub fn samples_for(&self, event_name: &str) -> &[Sample] {
        self.bucket(event_name)
            .map(|b| b.samples.as_slice())
            .unwrap_or(&[])
    }

    pub fn for_each<F>(&self, event_name: &str, f: F)
    where
        F: FnMut(&Sample),
    {
        self.samples_for(event_name).iter().for_each(f);
    }

    /// (event name, total) per observed event type, first-observed order
    pub fn summarize(&self) -> Vec<(String, u64)> {
        self.buckets
            .iter()
            .map(|(name, bucket)| (name.clone(), bucket.total_weight))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EventBucket)> {
        self.buckets.iter().map(|(name, bucket)| (name.as_str(), bucket))
    }

    pub fn event_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Instruction total, "instructions" first, "instructions:pp" if that is zero
    pub fn total_instructions(&self) -> u64 {
        self.first_nonzero(INSTRUCTION_EVENTS)
    }

    /// Cycle total, "cycles" first, "cycles:pp" if that is zero
    pub fn total_cycles(&self) -> u64 {
        self.first_nonzero(CYCLE_EVENTS)
    }

    /// Instructions per cycle over the whole run.
    ///
    /// # Errors
    /// * `AnalysisError::DivisionByZero` - no cycle-bearing event was recorded
    pub fn ipc(&self) -> Result<f64, AnalysisError> {
        let cycles = self.total_cycles();
        if cycles == 0 {
            return Err(AnalysisError::DivisionByZero);
        }
        Ok(self.total_instructions() as f64 / cycles as f64)
    }

    fn first_nonzero(&self, events: &[&str]) -> u64 {
        events
            .iter()
            .map(|event| self.total_for(event))
            .find(|&total| total != 0)
            .unwrap_or(0)
    }
}
