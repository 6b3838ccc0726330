//! Raster timing core: a horizontal and a vertical counter, each decoded by
//! its own [`SyncGenerator`], chained so the vertical counter advances only
//! when the horizontal one wraps.

use tracing::{debug, trace};

use crate::error::{Axis, ConfigurationError};
use crate::machine::generic::counter::Counter;
use crate::machine::generic::sync_generator::{SyncGenerator, SyncPolarity, SyncWindows};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisConfig {
    pub max_value: u32,
    pub windows: SyncWindows,
    pub polarity: SyncPolarity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    pub horizontal: AxisConfig,
    pub vertical: AxisConfig,
}

impl TimingConfig {
    /// Build a configuration from the flat generic list, with active-low
    /// sync on both axes.
    #[allow(clippy::too_many_arguments)]
    pub fn from_values(
        h_max_value: u32,
        v_max_value: u32,
        h_sync_start: u32,
        h_sync_end: u32,
        h_active_start: u32,
        h_active_end: u32,
        v_sync_start: u32,
        v_sync_end: u32,
        v_active_start: u32,
        v_active_end: u32,
    ) -> Self {
        Self {
            horizontal: AxisConfig {
                max_value: h_max_value,
                windows: SyncWindows {
                    sync_start: h_sync_start,
                    sync_end: h_sync_end,
                    active_start: h_active_start,
                    active_end: h_active_end,
                },
                polarity: SyncPolarity::default(),
            },
            vertical: AxisConfig {
                max_value: v_max_value,
                windows: SyncWindows {
                    sync_start: v_sync_start,
                    sync_end: v_sync_end,
                    active_start: v_active_start,
                    active_end: v_active_end,
                },
                polarity: SyncPolarity::default(),
            },
        }
    }
}

/// Snapshot of the outputs for one clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutput {
    pub h_pos: u32,
    pub v_pos: u32,
    pub h_sync: bool,
    pub v_sync: bool,
    pub video_active: bool,
    /// The horizontal counter wraps on this clock.
    pub line_end: bool,
    /// Both counters wrap on this clock.
    pub frame_end: bool,
}

impl TickOutput {
    /// XOR composite sync, logical sense.
    pub fn composite_sync(&self) -> bool {
        self.h_sync != self.v_sync
    }
}

/// Sync line levels after polarity is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinLevels {
    pub hsync: bool,
    pub vsync: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub ticks: u64,
    pub h_sync_pulses: u64,
    pub v_sync_pulses: u64,
    pub active_ticks: u64,
}

#[derive(Debug)]
struct Scan {
    counter: Counter,
    sync: SyncGenerator,
    polarity: SyncPolarity,
}

impl Scan {
    fn new(config: &AxisConfig, axis: Axis) -> Result<Self, ConfigurationError> {
        let build = || -> Result<Self, ConfigurationError> {
            Ok(Self {
                counter: Counter::new(config.max_value)?,
                sync: SyncGenerator::new(config.windows, config.max_value)?,
                polarity: config.polarity,
            })
        };
        build().map_err(|e| e.on_axis(axis))
    }

    fn at_max(&self) -> bool {
        self.counter.value() == self.counter.max_value()
    }

    /// Counter value one clock earlier, wrapping below zero.
    fn previous(&self) -> u32 {
        match self.counter.value() {
            0 => self.counter.max_value(),
            v => v - 1,
        }
    }
}

#[derive(Debug)]
pub struct TimingCore {
    config: TimingConfig,
    h: Scan,
    v: Scan,
}

impl TimingCore {
    pub fn new(config: TimingConfig) -> Result<Self, ConfigurationError> {
        let h = Scan::new(&config.horizontal, Axis::Horizontal)?;
        let v = Scan::new(&config.vertical, Axis::Vertical)?;
        debug!(
            "timing core {}x{} clocks, hsync {:?} vsync {:?}",
            h.counter.period(),
            v.counter.period(),
            config.horizontal.windows,
            config.vertical.windows
        );
        Ok(Self { config, h, v })
    }

    /// Outputs for the current position, without clocking.
    pub fn peek(&self) -> TickOutput {
        let h_pos = self.h.counter.value();
        let v_pos = self.v.counter.value();
        let h_state = self.h.sync.evaluate(h_pos);
        let v_state = self.v.sync.evaluate(v_pos);
        let line_end = self.h.at_max();
        TickOutput {
            h_pos,
            v_pos,
            h_sync: h_state.sync_active,
            v_sync: v_state.sync_active,
            video_active: h_state.video_active && v_state.video_active,
            line_end,
            frame_end: line_end && self.v.at_max(),
        }
    }

    /// Clock once. Returns the outputs for the position that was current on
    /// the edge, then moves to the next position.
    pub fn tick(&mut self) -> TickOutput {
        let out = self.peek();
        if self.h.counter.tick().is_wrap() {
            trace!("line {} complete", out.v_pos);
            if self.v.counter.tick().is_wrap() {
                trace!("frame complete");
            }
        }
        out
    }

    pub fn reset(&mut self) {
        self.h.counter.reset();
        self.v.counter.reset();
    }

    pub fn position(&self) -> (u32, u32) {
        (self.h.counter.value(), self.v.counter.value())
    }

    pub fn pin_levels(&self, out: &TickOutput) -> PinLevels {
        PinLevels {
            hsync: self.h.polarity.level(out.h_sync),
            vsync: self.v.polarity.level(out.v_sync),
        }
    }

    pub fn frame_ticks(&self) -> u64 {
        self.h.counter.period() * self.v.counter.period()
    }

    pub fn config(&self) -> &TimingConfig {
        &self.config
    }

    /// Clock through one whole frame, counting sync pulse onsets and active
    /// video clocks. Starts from wherever the raster currently is.
    pub fn run_frame(&mut self) -> FrameStats {
        let mut prev_h_sync = self.h.sync.evaluate(self.h.previous()).sync_active;
        let prev_v = if self.h.counter.value() == 0 {
            self.v.previous()
        } else {
            self.v.counter.value()
        };
        let mut prev_v_sync = self.v.sync.evaluate(prev_v).sync_active;

        let mut stats = FrameStats::default();
        for _ in 0..self.frame_ticks() {
            let out = self.tick();
            stats.ticks += 1;
            if out.h_sync && !prev_h_sync {
                stats.h_sync_pulses += 1;
            }
            if out.v_sync && !prev_v_sync {
                stats.v_sync_pulses += 1;
            }
            if out.video_active {
                stats.active_ticks += 1;
            }
            prev_h_sync = out.h_sync;
            prev_v_sync = out.v_sync;
        }
        debug!("frame stats: {stats:?}");
        stats
    }
}
