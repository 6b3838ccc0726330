//! Standard display modes, described the way monitor timing tables list
//! them: visible width plus front porch, sync and back porch, per axis.
//!
//! Within one period the raster runs active video first, then front porch,
//! sync pulse and back porch, so position 0 is the first visible pixel.

use crate::error::{Axis, ConfigurationError};
use crate::machine::generic::sync_generator::{SyncPolarity, SyncWindows};
use crate::machine::generic::vga::{AxisConfig, TimingConfig};

pub const VGA_640X480_60: Timing = Timing {
    h_active: 640,
    h_fp: 16,
    h_sync: 96,
    h_bp: 48, // Htot = 800
    v_active: 480,
    v_fp: 10,
    v_sync: 2,
    v_bp: 33, // Vtot = 525
    h_polarity: SyncPolarity::ActiveLow,
    v_polarity: SyncPolarity::ActiveLow,
};

/// Text mode timing; the polarity pair tells the monitor to use 400 lines.
pub const VGA_720X400_70: Timing = Timing {
    h_active: 720,
    h_fp: 18,
    h_sync: 108,
    h_bp: 54, // Htot = 900
    v_active: 400,
    v_fp: 12,
    v_sync: 2,
    v_bp: 35, // Vtot = 449
    h_polarity: SyncPolarity::ActiveLow,
    v_polarity: SyncPolarity::ActiveHigh,
};

pub const SVGA_800X600_60: Timing = Timing {
    h_active: 800,
    h_fp: 40,
    h_sync: 128,
    h_bp: 88, // Htot = 1056
    v_active: 600,
    v_fp: 1,
    v_sync: 4,
    v_bp: 23, // Vtot = 628
    h_polarity: SyncPolarity::ActiveHigh,
    v_polarity: SyncPolarity::ActiveHigh,
};

pub const XGA_1024X768_60: Timing = Timing {
    h_active: 1024,
    h_fp: 24,
    h_sync: 136,
    h_bp: 160, // Htot = 1344
    v_active: 768,
    v_fp: 3,
    v_sync: 6,
    v_bp: 29, // Vtot = 806
    h_polarity: SyncPolarity::ActiveLow,
    v_polarity: SyncPolarity::ActiveLow,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    #[value(name = "640x480")]
    Vga640x480,
    #[value(name = "720x400")]
    Vga720x400,
    #[value(name = "800x600")]
    Svga800x600,
    #[value(name = "1024x768")]
    Xga1024x768,
}

impl Mode {
    pub fn timing(self) -> Timing {
        match self {
            Mode::Vga640x480 => VGA_640X480_60,
            Mode::Vga720x400 => VGA_720X400_70,
            Mode::Svga800x600 => SVGA_800X600_60,
            Mode::Xga1024x768 => XGA_1024X768_60,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub h_active: u32,
    pub h_fp: u32,
    pub h_sync: u32,
    pub h_bp: u32, // h_active + h_fp + h_sync + h_bp = Htot

    pub v_active: u32,
    pub v_fp: u32,
    pub v_sync: u32,
    pub v_bp: u32, // v_active + v_fp + v_sync + v_bp = Vtot

    pub h_polarity: SyncPolarity,
    pub v_polarity: SyncPolarity,
}

impl Timing {
    pub fn htot(&self) -> u32 {
        self.h_active + self.h_fp + self.h_sync + self.h_bp
    }

    pub fn vtot(&self) -> u32 {
        self.v_active + self.v_fp + self.v_sync + self.v_bp
    }

    pub fn pixel_tot(&self) -> u64 {
        self.htot() as u64 * self.vtot() as u64
    }

    /// Lay the regions out on counter positions.
    pub fn config(&self) -> Result<TimingConfig, ConfigurationError> {
        Ok(TimingConfig {
            horizontal: axis(
                Axis::Horizontal,
                [self.h_active, self.h_fp, self.h_sync, self.h_bp],
                self.h_polarity,
            )?,
            vertical: axis(
                Axis::Vertical,
                [self.v_active, self.v_fp, self.v_sync, self.v_bp],
                self.v_polarity,
            )?,
        })
    }
}

fn axis(
    axis: Axis,
    [active, fp, sync, bp]: [u32; 4],
    polarity: SyncPolarity,
) -> Result<AxisConfig, ConfigurationError> {
    for (width, region) in [(active, "active"), (sync, "sync"), (bp, "back porch")] {
        if width == 0 {
            return Err(ConfigurationError::EmptyRegion { axis, region });
        }
    }
    let overflow = || ConfigurationError::RegionOverflow {
        axis,
        widths: [active, fp, sync, bp],
    };
    let sync_start = active.checked_add(fp).ok_or_else(overflow)?;
    let total = sync_start
        .checked_add(sync)
        .and_then(|t| t.checked_add(bp))
        .ok_or_else(overflow)?;
    Ok(AxisConfig {
        max_value: total - 1,
        windows: SyncWindows {
            sync_start,
            sync_end: sync_start + sync,
            active_start: 0,
            active_end: active,
        },
        polarity,
    })
}
