//! Error types for tile coordinate operations.

use std::fmt;

/// Errors that can occur when deriving tile coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum TileError {
    /// Latitude outside the Web Mercator range.
    InvalidLatitude(f64),
    /// Longitude outside the valid range.
    InvalidLongitude(f64),
    /// Zoom level beyond the supported maximum.
    InvalidZoom(u8),
}

impl fmt::Display for TileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileError::InvalidLatitude(lat) => {
                write!(f, "latitude {} outside Web Mercator range", lat)
            }
            TileError::InvalidLongitude(lon) => {
                write!(f, "longitude {} outside valid range", lon)
            }
            TileError::InvalidZoom(zoom) => {
                write!(f, "zoom level {} beyond supported maximum", zoom)
            }
        }
    }
}

impl std::error::Error for TileError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_latitude_display() {
        let err = TileError::InvalidLatitude(91.5);
        assert!(err.to_string().contains("91.5"));
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn test_invalid_longitude_display() {
        let err = TileError::InvalidLongitude(-200.0);
        assert!(err.to_string().contains("-200"));
        assert!(err.to_string().contains("longitude"));
    }

    #[test]
    fn test_invalid_zoom_display() {
        let err = TileError::InvalidZoom(42);
        assert!(err.to_string().contains("42"));
    }
}
