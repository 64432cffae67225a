//! Department records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::id::RawId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentRecord {
    pub id: RawId,
    #[serde(default)]
    pub name: Option<String>,
    /// Supervisor reference; an id or a nested user object depending on the serializer.
    #[serde(default)]
    pub supervisor: Option<Value>,
}

impl DepartmentRecord {
    pub fn has_supervisor(&self) -> bool {
        self.supervisor.is_some()
    }
}
