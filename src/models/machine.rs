//! Machine records as served by the management API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::id::RawId;

/// Operating state of a machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineStatus {
    Operational,
    Idle,
    Maintenance,
    Broken,
    Unrecognized(String),
}

/// Normalization table: upper-cased label to status.
const STATUS_TABLE: &[(&str, MachineStatus)] = &[
    ("OPERATIONAL", MachineStatus::Operational),
    ("IDLE", MachineStatus::Idle),
    ("MAINTENANCE", MachineStatus::Maintenance),
    ("UNDER MAINTENANCE", MachineStatus::Maintenance),
    ("BROKEN", MachineStatus::Broken),
    ("BROKE DOWN", MachineStatus::Broken),
];

impl MachineStatus {
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return MachineStatus::Unrecognized(String::new());
        };
        let upper = label.to_uppercase();
        STATUS_TABLE
            .iter()
            .find(|(key, _)| *key == upper)
            .map(|(_, status)| status.clone())
            .unwrap_or_else(|| MachineStatus::Unrecognized(label.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineRecord {
    pub id: RawId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Operator user id. Only an integer id can match the viewing user.
    #[serde(default)]
    pub operator: Option<RawId>,
    #[serde(default)]
    pub next_maintenance_date: Option<String>,
}

impl MachineRecord {
    pub fn status(&self) -> MachineStatus {
        MachineStatus::from_label(self.status.as_deref())
    }

    /// Next maintenance as an instant. Plain dates are taken as UTC midnight.
    pub fn next_maintenance_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.next_maintenance_date.as_deref()?;
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
        match DateTime::parse_from_rfc3339(raw) {
            Ok(dt) => Some(dt.with_timezone(&Utc)),
            Err(_) => {
                tracing::debug!(machine_id = %self.id, value = raw, "Unparseable maintenance date");
                None
            }
        }
    }

    /// Maintenance is due when the scheduled date is present and not in the future.
    pub fn maintenance_due(&self, now: DateTime<Utc>) -> bool {
        self.next_maintenance_at().is_some_and(|at| at <= now)
    }

    /// Whether `user_id` operates this machine.
    pub fn is_operated_by(&self, user_id: i64) -> bool {
        self.operator.as_ref().is_some_and(|op| op.is_int(user_id))
    }

    /// Name shown on the operator's card.
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Machine ID {}", self.id),
        }
    }
}
