use std::fmt;

use thiserror::Error;

/// Which of the two scan directions a parameter belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("horizontal"),
            Axis::Vertical => f.write_str("vertical"),
        }
    }
}

/// The two windows a sync generator decodes from its counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    Sync,
    Active,
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowKind::Sync => f.write_str("sync"),
            WindowKind::Active => f.write_str("active"),
        }
    }
}

/// A timing parameter set that cannot describe a working raster.
///
/// Raised only at construction. Once a counter, sync generator or timing
/// core exists, every operation on it is infallible.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("counter max value {max_value} leaves no room for a period of max_value + 1")]
    PeriodOverflow { max_value: u32 },

    #[error("{kind} window [{start}, {end}) is empty or inverted")]
    EmptyWindow {
        kind: WindowKind,
        start: u32,
        end: u32,
    },

    #[error("{kind} window ends at {end}, past the counter max value {max_value}")]
    WindowOutOfRange {
        kind: WindowKind,
        end: u32,
        max_value: u32,
    },

    #[error("{axis} regions {widths:?} (active, front porch, sync, back porch) sum past u32::MAX")]
    RegionOverflow { axis: Axis, widths: [u32; 4] },

    #[error("{axis} {region} has zero width")]
    EmptyRegion { axis: Axis, region: &'static str },

    #[error("{axis} axis: {source}")]
    Axis {
        axis: Axis,
        #[source]
        source: Box<ConfigurationError>,
    },
}

impl ConfigurationError {
    pub(crate) fn on_axis(self, axis: Axis) -> Self {
        ConfigurationError::Axis {
            axis,
            source: Box::new(self),
        }
    }

    /// Strips any axis context and returns the underlying failure.
    pub fn root(&self) -> &ConfigurationError {
        match self {
            ConfigurationError::Axis { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_context_message() {
        let err = ConfigurationError::EmptyWindow {
            kind: WindowKind::Sync,
            start: 5,
            end: 5,
        }
        .on_axis(Axis::Vertical);
        assert_eq!(
            err.to_string(),
            "vertical axis: sync window [5, 5) is empty or inverted"
        );
        assert!(matches!(
            err.root(),
            ConfigurationError::EmptyWindow { start: 5, end: 5, .. }
        ));
    }
}
