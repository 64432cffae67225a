//! Workshop records.

use serde::{Deserialize, Serialize};

use crate::models::id::RawId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkshopStatus {
    Active,
    Inactive,
    Maintenance,
    Unrecognized(String),
}

const STATUS_TABLE: &[(&str, WorkshopStatus)] = &[
    ("ACTIVE", WorkshopStatus::Active),
    ("OPERATIONAL", WorkshopStatus::Active),
    ("INACTIVE", WorkshopStatus::Inactive),
    ("MAINTENANCE", WorkshopStatus::Maintenance),
    ("UNDER MAINTENANCE", WorkshopStatus::Maintenance),
];

impl WorkshopStatus {
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return WorkshopStatus::Unrecognized(String::new());
        };
        let upper = label.to_uppercase();
        STATUS_TABLE
            .iter()
            .find(|(key, _)| *key == upper)
            .map(|(_, status)| status.clone())
            .unwrap_or_else(|| WorkshopStatus::Unrecognized(label.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkshopRecord {
    pub id: RawId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub operational_status: Option<String>,
}

impl WorkshopRecord {
    pub fn status(&self) -> WorkshopStatus {
        WorkshopStatus::from_label(self.operational_status.as_deref())
    }
}
