use tracing::trace;

use crate::error::ConfigurationError;

/// Whether a call to [`Counter::tick`] rolled the counter over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapEvent {
    None,
    Wrapped,
}

impl WrapEvent {
    pub fn is_wrap(self) -> bool {
        self == WrapEvent::Wrapped
    }
}

/// Free-running modulo counter covering `0..=max_value`.
#[derive(Debug, Clone)]
pub struct Counter {
    max_value: u32,
    current: u32,
}

impl Counter {
    /// `max_value = 0` is allowed and wraps on every tick. The period is
    /// `max_value + 1`, so `u32::MAX` is rejected.
    pub fn new(max_value: u32) -> Result<Self, ConfigurationError> {
        if max_value.checked_add(1).is_none() {
            return Err(ConfigurationError::PeriodOverflow { max_value });
        }
        Ok(Self {
            max_value,
            current: 0,
        })
    }

    /// Advance by one clock.
    pub fn tick(&mut self) -> WrapEvent {
        if self.current == self.max_value {
            self.current = 0;
            trace!("counter wrapped after {}", self.max_value);
            WrapEvent::Wrapped
        } else {
            self.current += 1;
            WrapEvent::None
        }
    }

    /// Synchronous clear. Does not count as a wrap.
    pub fn reset(&mut self) {
        self.current = 0;
    }

    pub fn value(&self) -> u32 {
        self.current
    }

    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    /// Number of distinct values, `max_value + 1`.
    pub fn period(&self) -> u64 {
        self.max_value as u64 + 1
    }
}
