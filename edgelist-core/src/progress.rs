//! Progress observation for long-running generations.

use std::path::Path;

use tracing::{debug, info};

/// Number of newly accepted edges between progress notifications.
pub const PROGRESS_INTERVAL: usize = 1_000;

/// Receives progress notifications while an edge list is generated.
///
/// All methods default to no-ops so observers only implement what they need.
pub trait ProgressObserver {
    /// Called once before sampling begins.
    fn on_sampling_started(&mut self, _node_count: usize, _edge_count: usize) {}

    /// Called every [`PROGRESS_INTERVAL`] accepted edges and once when
    /// sampling completes.
    fn on_edges_accepted(&mut self, _accepted: usize, _requested: usize) {}

    /// Called once sampling has finished and rows are about to be written.
    fn on_write_started(&mut self, _path: &Path) {}
}

/// Observer that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

/// Observer that forwards notifications as `tracing` events.
///
/// Intermediate updates are emitted at `DEBUG`; start, completion and write
/// notifications at `INFO`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingProgress;

impl ProgressObserver for TracingProgress {
    fn on_sampling_started(&mut self, node_count: usize, edge_count: usize) {
        info!(node_count, edge_count, "generating network");
    }

    fn on_edges_accepted(&mut self, accepted: usize, requested: usize) {
        if accepted == requested {
            info!(accepted, requested, "edge sampling complete");
        } else {
            debug!(accepted, requested, "edge sampling progress");
        }
    }

    fn on_write_started(&mut self, path: &Path) {
        info!(path = %path.display(), "writing CSV file");
    }
}

impl<T: ProgressObserver + ?Sized> ProgressObserver for &mut T {
    fn on_sampling_started(&mut self, node_count: usize, edge_count: usize) {
        (**self).on_sampling_started(node_count, edge_count);
    }

    fn on_edges_accepted(&mut self, accepted: usize, requested: usize) {
        (**self).on_edges_accepted(accepted, requested);
    }

    fn on_write_started(&mut self, path: &Path) {
        (**self).on_write_started(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use edgelist_test_support::tracing::RecordingLayer;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn tracing_progress_levels_follow_completion() {
        let layer = RecordingLayer::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());

        tracing::subscriber::with_default(subscriber, || {
            let mut observer = TracingProgress;
            observer.on_edges_accepted(1_000, 3_000);
            observer.on_edges_accepted(3_000, 3_000);
        });

        let events = layer.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events.first().map(|event| event.level), Some(Level::DEBUG));
        assert_eq!(events.get(1).map(|event| event.level), Some(Level::INFO));
        assert!(layer.has_event("edge sampling complete"));
    }
}
