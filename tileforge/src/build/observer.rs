//! Build progress observation.
//!
//! The builder reports tile-level events through an injected observer
//! instead of writing to process-wide state. The default observer forwards
//! to `tracing`; tests substitute recording observers.

use crate::tile::Tile;

use super::BuildError;

/// Receives tile-level progress events during a build.
pub trait BuildObserver {
    /// A tile's pass is about to start.
    fn tile_started(&mut self, tile: &Tile);

    /// A pending tile was skipped and contributes no further children.
    fn tile_skipped(&mut self, tile: &Tile, reason: &str);

    /// A tile's pass failed; the build aborts after this event.
    fn tile_failed(&mut self, tile: &Tile, error: &BuildError);
}

/// Observer that logs through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl BuildObserver for TracingObserver {
    fn tile_started(&mut self, tile: &Tile) {
        tracing::info!(zoom = tile.zoom, x = tile.x, y = tile.y, "Building tile");
    }

    fn tile_skipped(&mut self, tile: &Tile, reason: &str) {
        tracing::warn!(
            zoom = tile.zoom,
            x = tile.x,
            y = tile.y,
            reason = reason,
            "Skipping tile"
        );
    }

    fn tile_failed(&mut self, tile: &Tile, error: &BuildError) {
        tracing::error!(
            zoom = tile.zoom,
            x = tile.x,
            y = tile.y,
            error = %error,
            "Tile build failed"
        );
    }
}

/// Observer that discards all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl BuildObserver for NoopObserver {
    fn tile_started(&mut self, _tile: &Tile) {}

    fn tile_skipped(&mut self, _tile: &Tile, _reason: &str) {}

    fn tile_failed(&mut self, _tile: &Tile, _error: &BuildError) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_observer_accepts_events() {
        let mut observer = NoopObserver;
        let tile = Tile::new(1, 0, 0);
        observer.tile_started(&tile);
        observer.tile_skipped(&tile, "node extract missing");
    }
}
