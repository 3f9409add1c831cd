use chrono::{DateTime, Duration, Utc};

use crate::constants::MAX_REFRESH_INTERVAL_MINUTES;
use crate::error::BriefingError;
use crate::models::BriefingReport;

/// Auto-refresh bookkeeping. An interval of zero disables auto-refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshState {
    pub last_refresh: DateTime<Utc>,
    pub interval_minutes: u32,
    /// Briefings generated because the interval had elapsed
    pub refresh_count: u32,
}

impl RefreshState {
    pub fn new(now: DateTime<Utc>, interval_minutes: u32) -> Self {
        Self {
            last_refresh: now,
            interval_minutes,
            refresh_count: 0,
        }
    }

    pub fn set_interval(&mut self, interval_minutes: u32) -> Result<(), BriefingError> {
        if interval_minutes > MAX_REFRESH_INTERVAL_MINUTES {
            return Err(BriefingError::validation(format!(
                "refresh interval must be between 0 and {MAX_REFRESH_INTERVAL_MINUTES} minutes"
            )));
        }
        self.interval_minutes = interval_minutes;
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        self.interval_minutes > 0
    }

    fn interval(&self) -> Duration {
        Duration::minutes(i64::from(self.interval_minutes))
    }

    /// Whether a new briefing is due at `now`
    pub fn should_refresh(&self, now: DateTime<Utc>) -> bool {
        self.is_enabled() && now - self.last_refresh >= self.interval()
    }

    /// Records a briefing generated at `now`. Only briefings made once the
    /// interval had elapsed count as refreshes.
    pub fn mark_refreshed(&mut self, now: DateTime<Utc>) {
        if self.should_refresh(now) {
            self.refresh_count += 1;
        }
        self.last_refresh = now;
    }

    /// Fraction of the interval elapsed, clamped to 0..=1
    pub fn progress(&self, now: DateTime<Utc>) -> f64 {
        if !self.is_enabled() {
            return 0.0;
        }
        let elapsed = (now - self.last_refresh).num_seconds().max(0) as f64;
        (elapsed / self.interval().num_seconds() as f64).min(1.0)
    }

    /// Whole minutes left until the next refresh, `None` when disabled
    pub fn minutes_until_next(&self, now: DateTime<Utc>) -> Option<i64> {
        if !self.is_enabled() {
            return None;
        }
        let remaining = self.interval() - (now - self.last_refresh);
        Some(remaining.num_minutes().max(0))
    }
}

/// Presentation state kept between tool calls
#[derive(Debug)]
pub struct Session {
    pub last_report: Option<BriefingReport>,
    pub refresh: RefreshState,
}

impl Session {
    pub fn new(now: DateTime<Utc>, interval_minutes: u32) -> Self {
        Self {
            last_report: None,
            refresh: RefreshState::new(now, interval_minutes),
        }
    }

    pub fn record(&mut self, report: BriefingReport, now: DateTime<Utc>) {
        self.refresh.mark_refreshed(now);
        self.last_report = Some(report);
    }
}
