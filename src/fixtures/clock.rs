//! Clock fixtures - read a clock twice and take the difference

use chrono::{Local, Utc};
use std::time::{Instant, SystemTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSource {
    /// `chrono::Local::now`, includes the timezone lookup
    LocalDateTime,
    /// `chrono::Utc::now`
    UtcDateTime,
    /// Start an `Instant` and ask for its elapsed time
    ElapsedTimer,
    /// Wall clock, `std::time::SystemTime`
    SystemTime,
    /// Monotonic clock, `std::time::Instant`
    Instant,
}

impl ClockSource {
    pub const ALL: [ClockSource; 5] = [
        Self::LocalDateTime,
        Self::UtcDateTime,
        Self::ElapsedTimer,
        Self::SystemTime,
        Self::Instant,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::LocalDateTime => "chrono_local",
            Self::UtcDateTime => "chrono_utc",
            Self::ElapsedTimer => "elapsed_timer",
            Self::SystemTime => "std_system_time",
            Self::Instant => "std_instant",
        }
    }

    /// Whether two reads can never go backwards
    pub fn is_monotonic(self) -> bool {
        matches!(self, Self::ElapsedTimer | Self::Instant)
    }

    /// Read the clock twice; microseconds between the reads.
    ///
    /// Wall clocks may step backwards, in which case the result is negative.
    #[inline(never)]
    pub fn sample_pair(self) -> i64 {
        match self {
            Self::LocalDateTime => {
                let a = core::hint::black_box(Local::now());
                let b = Local::now();
                (b - a).num_microseconds().unwrap_or(i64::MAX)
            }
            Self::UtcDateTime => {
                let a = core::hint::black_box(Utc::now());
                let b = Utc::now();
                (b - a).num_microseconds().unwrap_or(i64::MAX)
            }
            Self::ElapsedTimer => {
                let timer = core::hint::black_box(Instant::now());
                micros(timer.elapsed().as_micros())
            }
            Self::SystemTime => {
                let a = core::hint::black_box(SystemTime::now());
                let b = SystemTime::now();
                match b.duration_since(a) {
                    Ok(d) => micros(d.as_micros()),
                    Err(e) => -micros(e.duration().as_micros()),
                }
            }
            Self::Instant => {
                let a = core::hint::black_box(Instant::now());
                let b = Instant::now();
                micros(b.duration_since(a).as_micros())
            }
        }
    }
}

#[inline]
fn micros(value: u128) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
