//! Decodes one counter's value into a sync pulse and an active-video window.
//!
//! Both windows are half-open, `start <= value < end`, so adjacent regions
//! of a period (active, front porch, sync, back porch) tile without sharing
//! a boundary position.

use crate::error::{ConfigurationError, WindowKind};

/// Electrical sense of a sync line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPolarity {
    /// Line is pulled low during the pulse (the classic VGA default).
    #[default]
    ActiveLow,
    ActiveHigh,
}

impl SyncPolarity {
    /// Pin level for a logical sync state.
    pub fn level(self, sync_active: bool) -> bool {
        match self {
            SyncPolarity::ActiveLow => !sync_active,
            SyncPolarity::ActiveHigh => sync_active,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncWindows {
    pub sync_start: u32,
    pub sync_end: u32,
    pub active_start: u32,
    pub active_end: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncState {
    pub sync_active: bool,
    pub video_active: bool,
}

#[derive(Debug, Clone)]
pub struct SyncGenerator {
    windows: SyncWindows,
}

impl SyncGenerator {
    /// Validate `windows` against the counter that will drive this generator.
    pub fn new(windows: SyncWindows, max_value: u32) -> Result<Self, ConfigurationError> {
        check_window(
            WindowKind::Sync,
            windows.sync_start,
            windows.sync_end,
            max_value,
        )?;
        check_window(
            WindowKind::Active,
            windows.active_start,
            windows.active_end,
            max_value,
        )?;
        Ok(Self { windows })
    }

    pub fn evaluate(&self, counter_value: u32) -> SyncState {
        let w = &self.windows;
        SyncState {
            sync_active: (w.sync_start..w.sync_end).contains(&counter_value),
            video_active: (w.active_start..w.active_end).contains(&counter_value),
        }
    }

    pub fn windows(&self) -> SyncWindows {
        self.windows
    }

    pub fn sync_width(&self) -> u32 {
        self.windows.sync_end - self.windows.sync_start
    }

    pub fn active_width(&self) -> u32 {
        self.windows.active_end - self.windows.active_start
    }
}

fn check_window(
    kind: WindowKind,
    start: u32,
    end: u32,
    max_value: u32,
) -> Result<(), ConfigurationError> {
    if start >= end {
        return Err(ConfigurationError::EmptyWindow { kind, start, end });
    }
    if end > max_value {
        return Err(ConfigurationError::WindowOutOfRange {
            kind,
            end,
            max_value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn windows(sync_start: u32, sync_end: u32, active_start: u32, active_end: u32) -> SyncWindows {
        SyncWindows {
            sync_start,
            sync_end,
            active_start,
            active_end,
        }
    }

    #[test]
    fn test_empty_sync_window_rejected() {
        let err = SyncGenerator::new(windows(5, 5, 0, 4), 15).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::EmptyWindow {
                kind: WindowKind::Sync,
                start: 5,
                end: 5
            }
        );
    }

    #[test]
    fn test_single_position_window_accepted() {
        let sync_gen = SyncGenerator::new(windows(0, 1, 0, 4), 15).unwrap();
        assert!(sync_gen.evaluate(0).sync_active);
        assert!(!sync_gen.evaluate(1).sync_active);
        assert_eq!(sync_gen.sync_width(), 1);
    }

    #[test]
    fn test_inverted_active_window_rejected() {
        let err = SyncGenerator::new(windows(0, 2, 9, 3), 15).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::EmptyWindow {
                kind: WindowKind::Active,
                ..
            }
        ));
    }

    #[test]
    fn test_window_past_max_rejected() {
        let err = SyncGenerator::new(windows(10, 17, 0, 8), 16).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::WindowOutOfRange {
                kind: WindowKind::Sync,
                end: 17,
                max_value: 16
            }
        );
        // Ending exactly on max_value is fine
        assert!(SyncGenerator::new(windows(10, 16, 0, 16), 16).is_ok());
    }

    #[rstest]
    #[case(15, 11, 13)]
    #[case(16, 0, 16)]
    #[case(800, 656, 752)]
    fn test_sync_width_per_period(#[case] max_value: u32, #[case] start: u32, #[case] end: u32) {
        let sync_gen = SyncGenerator::new(windows(start, end, 0, 1), max_value).unwrap();
        let active: Vec<u32> = (0..=max_value)
            .filter(|&v| sync_gen.evaluate(v).sync_active)
            .collect();
        assert_eq!(active.len() as u32, end - start);
        // One contiguous run
        assert!(active.windows(2).all(|w| w[1] == w[0] + 1));
        assert_eq!(active.first(), Some(&start));
    }

    #[test]
    fn test_overlapping_windows_are_independent() {
        let sync_gen = SyncGenerator::new(windows(2, 6, 4, 8), 9).unwrap();
        let states: Vec<(bool, bool)> = (0..=9)
            .map(|v| {
                let s = sync_gen.evaluate(v);
                (s.sync_active, s.video_active)
            })
            .collect();
        assert_eq!(
            states,
            vec![
                (false, false),
                (false, false),
                (true, false),
                (true, false),
                (true, true),
                (true, true),
                (false, true),
                (false, true),
                (false, false),
                (false, false),
            ]
        );
    }

    #[test]
    fn test_window_widths() {
        let w = windows(656, 752, 0, 640);
        let sync_gen = SyncGenerator::new(w, 799).unwrap();
        assert_eq!(sync_gen.windows(), w);
        assert_eq!(sync_gen.sync_width(), 96);
        assert_eq!(sync_gen.active_width(), 640);
        let active = (0..=799)
            .filter(|&v| sync_gen.evaluate(v).video_active)
            .count();
        assert_eq!(active as u32, sync_gen.active_width());
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let sync_gen = SyncGenerator::new(windows(3, 5, 0, 3), 7).unwrap();
        for v in 0..=7 {
            assert_eq!(sync_gen.evaluate(v), sync_gen.evaluate(v));
        }
    }

    #[test]
    fn test_polarity_levels() {
        assert!(!SyncPolarity::ActiveLow.level(true));
        assert!(SyncPolarity::ActiveLow.level(false));
        assert!(SyncPolarity::ActiveHigh.level(true));
        assert!(!SyncPolarity::ActiveHigh.level(false));
    }
}
