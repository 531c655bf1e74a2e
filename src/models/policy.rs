//! Company policy model.
//!
//! A [`CompanyPolicy`] governs one company's nominal daily work window and the
//! penalties applied to attendance events. Administrative edits arrive as a
//! [`PolicyUpdate`] and are merged over the existing (or default) policy.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Default work start (08:00).
pub const DEFAULT_WORK_START: (u32, u32) = (8, 0);

/// Default work end (16:00).
pub const DEFAULT_WORK_END: (u32, u32) = (16, 0);

/// Default grace period in minutes.
pub const DEFAULT_GRACE_PERIOD_MINUTES: u32 = 15;

/// Default penalty deducted per late arrival, in whole currency units.
pub const DEFAULT_LATE_PENALTY_AMOUNT: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Largest salary or penalty amount the engine accepts (10^12).
pub const MAX_MONETARY_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Default absence penalty rate. Stored with the policy but not applied by
/// the payroll calculation.
pub const DEFAULT_ABSENCE_PENALTY_RATE: Decimal = Decimal::ONE;

/// Per-company attendance configuration.
///
/// # Example
///
/// ```
/// use attendance_engine::models::CompanyPolicy;
/// use chrono::NaiveTime;
///
/// let policy = CompanyPolicy::default_for("acme");
/// assert_eq!(policy.work_start, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
/// assert_eq!(policy.work_end, NaiveTime::from_hms_opt(16, 0, 0).unwrap());
/// assert_eq!(policy.grace_period_minutes, 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyPolicy {
    /// The company this policy belongs to.
    pub company_id: String,
    /// Nominal start of the working day.
    #[serde(with = "time_of_day")]
    pub work_start: NaiveTime,
    /// Nominal end of the working day.
    #[serde(with = "time_of_day")]
    pub work_end: NaiveTime,
    /// Minutes after `work_start` during which an arrival still counts as on time.
    pub grace_period_minutes: u32,
    /// Amount deducted from net pay for each late arrival.
    pub late_penalty_amount: Decimal,
    /// Multiplier reserved for absence penalties.
    pub absence_penalty_rate: Decimal,
}

impl CompanyPolicy {
    /// Returns the documented default policy bound to `company_id`.
    pub fn default_for(company_id: impl Into<String>) -> Self {
        Self {
            company_id: company_id.into(),
            work_start: hm(DEFAULT_WORK_START),
            work_end: hm(DEFAULT_WORK_END),
            grace_period_minutes: DEFAULT_GRACE_PERIOD_MINUTES,
            late_penalty_amount: DEFAULT_LATE_PENALTY_AMOUNT,
            absence_penalty_rate: DEFAULT_ABSENCE_PENALTY_RATE,
        }
    }

    /// Returns a copy of this policy with the fields present in `update`
    /// replaced. Fields absent from `update` keep their current value.
    pub fn merged(&self, update: &PolicyUpdate) -> Self {
        Self {
            company_id: self.company_id.clone(),
            work_start: update.work_start.unwrap_or(self.work_start),
            work_end: update.work_end.unwrap_or(self.work_end),
            grace_period_minutes: update
                .grace_period_minutes
                .unwrap_or(self.grace_period_minutes),
            late_penalty_amount: update
                .late_penalty_amount
                .unwrap_or(self.late_penalty_amount),
            absence_penalty_rate: update
                .absence_penalty_rate
                .unwrap_or(self.absence_penalty_rate),
        }
    }

    /// Checks the policy's internal consistency.
    ///
    /// The work window must be non-empty (`work_start < work_end`) and the
    /// monetary fields must be non-negative. The late penalty is capped at
    /// [`MAX_MONETARY_AMOUNT`].
    pub fn validate(&self) -> EngineResult<()> {
        if self.company_id.trim().is_empty() {
            return Err(EngineError::validation("company_id", "must not be empty"));
        }
        if self.work_start >= self.work_end {
            return Err(EngineError::validation(
                "work_end",
                format!(
                    "{} must be after work_start {}",
                    self.work_end.format("%H:%M"),
                    self.work_start.format("%H:%M")
                ),
            ));
        }
        if self.late_penalty_amount.is_sign_negative() {
            return Err(EngineError::validation(
                "late_penalty_amount",
                "must not be negative",
            ));
        }
        if self.late_penalty_amount > MAX_MONETARY_AMOUNT {
            return Err(EngineError::validation(
                "late_penalty_amount",
                format!("must not exceed {MAX_MONETARY_AMOUNT}"),
            ));
        }
        if self.absence_penalty_rate.is_sign_negative() {
            return Err(EngineError::validation(
                "absence_penalty_rate",
                "must not be negative",
            ));
        }
        Ok(())
    }

    /// The latest on-time arrival on `date`: `work_start + grace_period_minutes`.
    pub fn late_limit(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.work_start) + Duration::minutes(i64::from(self.grace_period_minutes))
    }

    /// Nominal start of the working day on `date`.
    pub fn start_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.work_start)
    }

    /// Nominal end of the working day on `date`.
    pub fn end_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.work_end)
    }
}

/// A partial policy edit. `None` fields are left untouched by an upsert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyUpdate {
    /// New work start.
    #[serde(default, with = "time_of_day::option", skip_serializing_if = "Option::is_none")]
    pub work_start: Option<NaiveTime>,
    /// New work end.
    #[serde(default, with = "time_of_day::option", skip_serializing_if = "Option::is_none")]
    pub work_end: Option<NaiveTime>,
    /// New grace period in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grace_period_minutes: Option<u32>,
    /// New late penalty amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub late_penalty_amount: Option<Decimal>,
    /// New absence penalty rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absence_penalty_rate: Option<Decimal>,
}

fn hm((hour, minute): (u32, u32)) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Serializes a time of day as `HH:MM`, accepting `HH:MM` or `HH:MM:SS` on input.
pub(crate) mod time_of_day {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn parse(value: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(value, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(|e| D::Error::custom(format!("invalid time of day '{raw}': {e}")))
    }

    pub mod option {
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer, Serializer, de::Error};

        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(t) => super::serialize(t, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            raw.map(|value| {
                super::parse(&value)
                    .map_err(|e| D::Error::custom(format!("invalid time of day '{value}': {e}")))
            })
            .transpose()
        }
    }
}
