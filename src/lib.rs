//! Cycle-accurate model of a VGA raster timing core.
//!
//! A [`Counter`] is the leaf register. A [`SyncGenerator`] decodes a counter
//! value into sync and active-video windows. A [`TimingCore`] chains a
//! horizontal and a vertical pair into a 2D raster that produces one
//! [`TickOutput`] per clock.

pub mod error;
pub mod machine;

pub use error::{Axis, ConfigurationError, WindowKind};
pub use machine::generic::counter::{Counter, WrapEvent};
pub use machine::generic::sync_generator::{SyncGenerator, SyncPolarity, SyncState, SyncWindows};
pub use machine::generic::vga::{
    AxisConfig, FrameStats, PinLevels, TickOutput, TimingConfig, TimingCore,
};
pub use machine::modes::{Mode, Timing};
