//! Pure aggregation of fetched collections into dashboard statistics.

use chrono::{DateTime, Utc};

use crate::models::dashboard::{
    DashboardData, DepartmentStats, LoadStatus, MachineStats, MaterialStats, StatsSummary,
    StockChart, WorkshopStats,
};
use crate::models::department::DepartmentRecord;
use crate::models::machine::{MachineRecord, MachineStatus};
use crate::models::material::{MaterialRecord, StockLevel};
use crate::models::user::UserRole;
use crate::models::workshop::{WorkshopRecord, WorkshopStatus};
use crate::services::resource_client::FetchBatch;

/// Who the dashboard is being computed for.
#[derive(Debug, Clone, Copy)]
pub struct Viewer<'a> {
    pub user_id: i64,
    pub role: &'a UserRole,
}

/// Count machines by status and maintenance due date.
pub fn machine_stats(machines: &[MachineRecord], now: DateTime<Utc>) -> MachineStats {
    let mut stats = MachineStats {
        total: machines.len() as u64,
        ..MachineStats::default()
    };
    for machine in machines {
        if machine.maintenance_due(now) {
            stats.maintenance_due += 1;
        }
        match machine.status() {
            MachineStatus::Operational => stats.operational += 1,
            MachineStatus::Idle => stats.idle += 1,
            MachineStatus::Maintenance => stats.maintenance += 1,
            MachineStatus::Broken => stats.broken += 1,
            MachineStatus::Unrecognized(label) => {
                tracing::debug!(machine_id = %machine.id, status = %label, "Unrecognized machine status");
            }
        }
    }
    stats
}

/// Bucket materials by stock level. Low stock also counts as in stock.
pub fn material_stats(materials: &[MaterialRecord]) -> MaterialStats {
    let mut stats = MaterialStats {
        total: materials.len() as u64,
        ..MaterialStats::default()
    };
    for material in materials {
        match material.stock_level() {
            Some(StockLevel::OutOfStock) => stats.out_of_stock += 1,
            Some(StockLevel::Low) => {
                stats.low_stock += 1;
                stats.in_stock += 1;
            }
            Some(StockLevel::InStock) => stats.in_stock += 1,
            None => {
                tracing::debug!(material_id = %material.id, "Unparseable material quantity");
            }
        }
    }
    stats
}

pub fn workshop_stats(workshops: &[WorkshopRecord]) -> WorkshopStats {
    let mut stats = WorkshopStats {
        total: workshops.len() as u64,
        ..WorkshopStats::default()
    };
    for workshop in workshops {
        match workshop.status() {
            WorkshopStatus::Active => stats.active += 1,
            WorkshopStatus::Inactive => stats.inactive += 1,
            WorkshopStatus::Maintenance => stats.maintenance += 1,
            WorkshopStatus::Unrecognized(label) => {
                tracing::debug!(workshop_id = %workshop.id, status = %label, "Unrecognized workshop status");
            }
        }
    }
    stats
}

pub fn department_stats(departments: &[DepartmentRecord]) -> DepartmentStats {
    DepartmentStats {
        total: departments.len() as u64,
        without_supervisor: departments.iter().filter(|d| !d.has_supervisor()).count() as u64,
    }
}

/// First machine operated by `viewer`; only operators have one.
pub fn find_assigned_machine(
    machines: &[MachineRecord],
    viewer: Viewer<'_>,
) -> Option<MachineRecord> {
    if *viewer.role != UserRole::Operator {
        return None;
    }
    machines
        .iter()
        .find(|m| m.is_operated_by(viewer.user_id))
        .cloned()
}

/// Aggregate a fetch batch. Failed collections contribute nothing.
pub fn aggregate(batch: &FetchBatch, viewer: Viewer<'_>, now: DateTime<Utc>) -> DashboardData {
    let machines = batch.machines.as_deref().unwrap_or_default();
    let materials = batch.materials.as_deref().unwrap_or_default();
    let workshops = batch.workshops.as_deref().unwrap_or_default();
    let departments = batch.departments.as_deref().unwrap_or_default();

    let summary = StatsSummary {
        machines: machine_stats(machines, now),
        workshops: workshop_stats(workshops),
        departments: department_stats(departments),
        materials: material_stats(materials),
    };

    let failed_resources = batch.failed();

    DashboardData {
        stock_chart: Some(StockChart::from_stats(&summary.materials)),
        assigned_machine: find_assigned_machine(machines, viewer),
        status: LoadStatus::from_failures(&failed_resources),
        failed_resources,
        summary,
    }
}
