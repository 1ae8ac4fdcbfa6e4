//! One analysis run: the reducers fed sample by sample, then finalized.

use super::call_graph::CallGraph;
use super::events::EventAggregator;
use crate::ingress::Sample;
use crate::utils::error::AnalysisError;
use log::{debug, info};

/// Owns every piece of state accumulated over a run.
///
/// Feed it with `process` once per sample, then call `finalize` once after
/// the last sample to obtain the `Report`.
#[derive(Debug)]
pub struct Session {
    events: EventAggregator,
    graph: CallGraph,
    unhandled_records: u64,
}

impl Session {
    pub fn new(target_symbol: impl Into<String>, target_event: impl Into<String>) -> Self {
        Self {
            events: EventAggregator::new(),
            graph: CallGraph::new(target_symbol, target_event),
            unhandled_records: 0,
        }
    }

    /// Route one sample to the call graph and the event totals
    pub fn process(&mut self, sample: Sample) {
        if self.graph.process(&sample) {
            debug!(
                "Sample absorbed into call graph ({} frames, weight {})",
                sample.call_chain.len(),
                sample.weight
            );
        }
        self.events.record(sample);
    }

    /// Count records the ingress could not turn into samples
    pub fn note_unhandled(&mut self, count: u64) {
        self.unhandled_records += count;
    }

    pub fn events(&self) -> &EventAggregator {
        &self.events
    }

    pub fn graph(&self) -> &CallGraph {
        &self.graph
    }

    /// End the run
    pub fn finalize(self) -> Report {
        info!(
            "Finalizing: {} event types, call graph has {} nodes",
            self.events.event_count(),
            self.graph.node_count()
        );

        Report {
            events: self.events,
            call_graph: self.graph,
            unhandled_records: self.unhandled_records,
        }
    }
}

/// Everything a finished run produced
#[derive(Debug)]
pub struct Report {
    pub events: EventAggregator,
    pub call_graph: CallGraph,
    pub unhandled_records: u64,
}

impl Report {
    pub fn ipc(&self) -> Result<f64, AnalysisError> {
        self.events.ipc()
    }
}
