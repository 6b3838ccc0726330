use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use clap::Parser;
use tracing::{Level, debug, info};

use vga_timing::{Counter, Mode, TimingConfig, TimingCore};

mod host;

use crate::host::logging::{setup_logging_file, setup_logging_stdio};

/// VGA timing simulator
/// Clocks a raster timing core, or sweeps standalone counters
#[derive(Parser)]
#[command(name = "vga-timing")]
#[command(about = "A cycle-accurate VGA raster timing simulator")]
struct Args {
    /// Preset display mode
    #[arg(long, value_enum, default_value = "640x480")]
    mode: Mode,

    /// Custom core instead of a preset
    #[arg(
        long,
        num_args = 10,
        conflicts_with = "mode",
        value_names = [
            "H_MAX", "V_MAX",
            "H_SYNC_START", "H_SYNC_END", "H_ACTIVE_START", "H_ACTIVE_END",
            "V_SYNC_START", "V_SYNC_END", "V_ACTIVE_START", "V_ACTIVE_END",
        ]
    )]
    custom: Vec<u32>,

    /// Number of frames to clock
    #[arg(long, default_value_t = 1)]
    frames: u64,

    /// Sweep a standalone counter with this max value, repeatable
    #[arg(long = "counter-max", value_name = "MAX")]
    counter_max: Vec<u32>,

    /// Full counter periods per sweep configuration
    #[arg(long, default_value_t = 2, requires = "counter_max")]
    cycles: u64,

    /// Write logs to this file instead of stdout
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable per-line tracing
    #[arg(long)]
    trace: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug)]
struct SweepResult {
    max_value: u32,
    ticks: u64,
    wraps: u64,
    final_value: u32,
}

fn sweep_counter(
    max_value: u32,
    cycles: u64,
) -> Result<SweepResult, Box<dyn std::error::Error + Send + Sync>> {
    let mut counter = Counter::new(max_value)?;
    let ticks = cycles.checked_mul(counter.period()).ok_or_else(|| {
        format!("counter_max={max_value}: {cycles} cycles overflow the tick count")
    })?;
    let mut wraps = 0;
    for _ in 0..ticks {
        if counter.tick().is_wrap() {
            wraps += 1;
        }
    }
    Ok(SweepResult {
        max_value,
        ticks,
        wraps,
        final_value: counter.value(),
    })
}

fn run_sweep(
    max_values: &[u32],
    cycles: u64,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Each configuration owns its counter, so they clock in parallel
    let results = thread::scope(|s| {
        let handles: Vec<_> = max_values
            .iter()
            .map(|&max_value| s.spawn(move || sweep_counter(max_value, cycles)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().map_err(|_| "sweep thread panicked"))
            .collect::<Result<Vec<_>, _>>()
    })?;

    for result in results {
        let result = result?;
        info!(
            "counter_max={}: {} ticks, {} wraps, final value {}",
            result.max_value, result.ticks, result.wraps, result.final_value
        );
        if result.wraps != cycles || result.final_value != 0 {
            return Err(format!("counter_max={} drifted: {result:?}", result.max_value).into());
        }
    }
    Ok(())
}

fn run_core(
    config: TimingConfig,
    frames: u64,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut core = TimingCore::new(config)?;
    info!(
        "Raster: {}x{} clocks ({} per frame)",
        config.horizontal.max_value as u64 + 1,
        config.vertical.max_value as u64 + 1,
        core.frame_ticks()
    );

    let start_time = Instant::now();
    let mut total_ticks = 0;
    for frame in 0..frames {
        let stats = core.run_frame();
        total_ticks += stats.ticks;
        info!(
            "Frame {frame}: {} hsync pulses, {} vsync pulses, {} active clocks",
            stats.h_sync_pulses, stats.v_sync_pulses, stats.active_ticks
        );
    }

    let elapsed = start_time.elapsed();
    info!("Clocked {} ticks in {:?}", total_ticks, elapsed);
    if elapsed.as_secs_f64() > 0.0 {
        debug!(
            "Ticks per second: {:.0}",
            total_ticks as f64 / elapsed.as_secs_f64()
        );
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    let level = if args.trace {
        Level::TRACE
    } else if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match &args.log_file {
        Some(path) => setup_logging_file(level, path)?,
        None => setup_logging_stdio(level),
    }

    if !args.counter_max.is_empty() {
        return run_sweep(&args.counter_max, args.cycles);
    }

    let config = if let &[h_max, v_max, hs0, hs1, ha0, ha1, vs0, vs1, va0, va1] =
        args.custom.as_slice()
    {
        TimingConfig::from_values(h_max, v_max, hs0, hs1, ha0, ha1, vs0, vs1, va0, va1)
    } else {
        info!("Mode: {:?}", args.mode);
        args.mode.timing().config()?
    };
    run_core(config, args.frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_two_full_cycles() {
        let result = sweep_counter(800, 2).unwrap();
        assert_eq!(result.ticks, 1602);
        assert_eq!(result.wraps, 2);
        assert_eq!(result.final_value, 0);
    }

    #[test]
    fn test_sweep_tick_count_overflow() {
        let err = sweep_counter(u32::MAX - 1, u64::MAX).unwrap_err();
        assert!(err.to_string().contains("overflow"), "{err}");
        assert!(run_sweep(&[u32::MAX - 1], u64::MAX).is_err());
    }

    #[test]
    fn test_sweep_rejects_unrepresentable_counter() {
        assert!(sweep_counter(u32::MAX, 2).is_err());
    }
}
