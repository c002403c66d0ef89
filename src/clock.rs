use chrono::{Local, NaiveDate, Utc};
use serde::Deserialize;

/// Which calendar the identifier date is read from.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatePolicy {
    #[default]
    Utc,
    Local,
}

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    policy: DatePolicy,
}

impl SystemClock {
    pub fn new(policy: DatePolicy) -> Self {
        Self { policy }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        match self.policy {
            DatePolicy::Utc => Utc::now().date_naive(),
            DatePolicy::Local => Local::now().date_naive(),
        }
    }
}

/// Always reports the same day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
