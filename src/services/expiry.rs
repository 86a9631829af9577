//! Expiry: delete the cluster automatically at a given date.

use super::ask::ask_string;
use super::{field_error, TypedService};
use crate::error::CliError;
use crate::lifecycle::SpecError;
use crate::prompt::Prompter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpirySpec {
    /// RFC 3339 timestamp
    #[serde(default)]
    pub date: String,
}

impl ExpirySpec {
    pub fn expires_at(&self) -> Result<DateTime<Utc>, SpecError> {
        DateTime::parse_from_rfc3339(&self.date)
            .map(|date| date.with_timezone(&Utc))
            .map_err(|e| field_error("date", format!("{:?} is not an RFC 3339 date: {}", self.date, e)))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExpiryService;

impl ExpiryService {
    fn check_at(spec: &ExpirySpec, now: DateTime<Utc>) -> Result<(), SpecError> {
        let expires_at = spec.expires_at()?;
        if expires_at <= now {
            return Err(field_error("date", "must be in the future"));
        }
        Ok(())
    }
}

impl TypedService for ExpiryService {
    type Spec = ExpirySpec;

    const READABLE_NAME: &'static str = "Expiry";
    const SERVICE_NAME: &'static str = "expiry";

    fn check(spec: &ExpirySpec) -> Result<(), SpecError> {
        Self::check_at(spec, Utc::now())
    }

    fn ask(&self, prompter: &dyn Prompter, mut spec: ExpirySpec) -> Result<ExpirySpec, CliError> {
        spec.date = ask_string(
            prompter,
            "Expiry date (RFC 3339, e.g. 2030-01-31T18:00:00Z)",
            &spec.date,
        )?;
        Ok(spec)
    }
}
