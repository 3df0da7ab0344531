//! Quadtree tile coordinates.
//!
//! Provides the [`Tile`] value type identifying one quadrant of the map at a
//! given zoom level, together with the Web Mercator projection that places a
//! geographic coordinate into the tile grid. The same projection is used by
//! every processing pass, so a node, the ways referencing it, and any client
//! consuming the produced tiles all agree on tile ownership.

mod error;

pub use error::TileError;

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum latitude representable in Web Mercator.
pub const MIN_LAT: f64 = -85.05112878;

/// Maximum latitude representable in Web Mercator.
pub const MAX_LAT: f64 = 85.05112878;

/// Minimum longitude.
pub const MIN_LON: f64 = -180.0;

/// Maximum longitude.
pub const MAX_LON: f64 = 180.0;

/// Maximum supported zoom level.
pub const MAX_ZOOM: u8 = 18;

/// One quadrant of the map at a given zoom level.
///
/// A tile is identified by `(zoom, x, y)` with `0 <= x, y < 2^zoom`. Tiles
/// are created by the partitioning passes and never mutated; equality and
/// ordering are by the coordinate triple.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Tile {
    /// Zoom level.
    pub zoom: u8,

    /// Column, increasing eastward from the antimeridian.
    pub x: u32,

    /// Row, increasing southward from the north Mercator limit.
    pub y: u32,
}

impl Tile {
    /// The root tile covering the whole map.
    pub const ROOT: Tile = Tile {
        zoom: 0,
        x: 0,
        y: 0,
    };

    /// Creates a tile from its coordinate triple.
    pub fn new(zoom: u8, x: u32, y: u32) -> Self {
        Self { zoom, x, y }
    }

    /// Returns the four children of this tile at `zoom + 1`.
    ///
    /// Children are ordered north-west, north-east, south-west, south-east,
    /// i.e. `(2x, 2y), (2x+1, 2y), (2x, 2y+1), (2x+1, 2y+1)`.
    pub fn children(&self) -> [Tile; 4] {
        let zoom = self.zoom + 1;
        let x = self.x * 2;
        let y = self.y * 2;
        [
            Tile::new(zoom, x, y),
            Tile::new(zoom, x + 1, y),
            Tile::new(zoom, x, y + 1),
            Tile::new(zoom, x + 1, y + 1),
        ]
    }

    /// Returns the parent tile, or `None` for the root.
    pub fn parent(&self) -> Option<Tile> {
        if self.zoom == 0 {
            return None;
        }
        Some(Tile::new(self.zoom - 1, self.x / 2, self.y / 2))
    }

    /// Returns the tile containing the given coordinate at the given zoom.
    ///
    /// Uses the standard Web Mercator lon/lat → tile grid projection.
    ///
    /// # Arguments
    ///
    /// * `lon` - Longitude in degrees (-180.0 to 180.0)
    /// * `lat` - Latitude in degrees (-85.05112878 to 85.05112878)
    /// * `zoom` - Zoom level (0 to 18)
    ///
    /// # Errors
    ///
    /// Returns a [`TileError`] if the coordinate lies outside the
    /// representable range. Out-of-range input is never clamped.
    #[inline]
    pub fn containing(lon: f64, lat: f64, zoom: u8) -> Result<Tile, TileError> {
        if !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(TileError::InvalidLatitude(lat));
        }
        if !(MIN_LON..=MAX_LON).contains(&lon) {
            return Err(TileError::InvalidLongitude(lon));
        }
        if zoom > MAX_ZOOM {
            return Err(TileError::InvalidZoom(zoom));
        }

        let n = 2.0_f64.powi(zoom as i32);
        let max = (1u32 << zoom) - 1;

        let x = ((lon + 180.0) / 360.0 * n) as u32;

        let lat_rad = lat * PI / 180.0;
        let y = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n) as u32;

        // The east and south edges are inclusive: lon = 180 falls in the
        // last column, lat = MIN_LAT in the last row.
        Ok(Tile::new(zoom, x.min(max), y.min(max)))
    }

    /// Returns the child quadrant at `zoom + 1` containing the coordinate.
    ///
    /// Callers feed coordinates that lie within this tile; the result is
    /// then one of [`Tile::children`].
    #[inline]
    pub fn child_containing(&self, lon: f64, lat: f64) -> Result<Tile, TileError> {
        Tile::containing(lon, lat, self.zoom + 1)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}
