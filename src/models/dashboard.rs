//! Dashboard statistics, load outcome, and the role-gated view model.

use serde::Serialize;

use crate::models::machine::MachineRecord;
use crate::models::user::UserRole;

/// The four upstream collections behind the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Machines,
    Materials,
    Workshops,
    Departments,
}

impl ResourceKind {
    /// Upstream list path, relative to the API root.
    pub fn path(self) -> &'static str {
        match self {
            ResourceKind::Machines => "machine/",
            ResourceKind::Materials => "material/",
            ResourceKind::Workshops => "workshop/",
            ResourceKind::Departments => "department/",
        }
    }

    /// Machines and materials are core data.
    pub fn is_core(self) -> bool {
        matches!(self, ResourceKind::Machines | ResourceKind::Materials)
    }
}

/// Machine counts, including how many are due for maintenance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MachineStats {
    pub total: u64,
    pub operational: u64,
    pub idle: u64,
    pub maintenance: u64,
    pub broken: u64,
    pub maintenance_due: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkshopStats {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
    pub maintenance: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DepartmentStats {
    pub total: u64,
    pub without_supervisor: u64,
}

/// Material counts. `low_stock` is a subset of `in_stock`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MaterialStats {
    pub total: u64,
    pub in_stock: u64,
    pub low_stock: u64,
    pub out_of_stock: u64,
}

/// Aggregated counts over the four collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSummary {
    pub machines: MachineStats,
    pub workshops: WorkshopStats,
    pub departments: DepartmentStats,
    pub materials: MaterialStats,
}

/// One bar-chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDataset {
    pub label: String,
    pub data: [u64; 3],
    pub background_color: [&'static str; 3],
    pub border_color: [&'static str; 3],
    pub border_width: u32,
}

/// Material stock bar chart: in stock, low stock, out of stock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockChart {
    pub labels: [&'static str; 3],
    pub datasets: Vec<ChartDataset>,
}

impl StockChart {
    pub fn from_stats(materials: &MaterialStats) -> Self {
        Self {
            labels: ["In Stock", "Low Stock", "Out of Stock"],
            datasets: vec![ChartDataset {
                label: "Material Stock Status".to_string(),
                data: [
                    materials.in_stock,
                    materials.low_stock,
                    materials.out_of_stock,
                ],
                background_color: [
                    "rgba(34, 197, 94, 0.6)",
                    "rgba(249, 115, 22, 0.6)",
                    "rgba(239, 68, 68, 0.6)",
                ],
                border_color: [
                    "rgba(22, 163, 74, 1)",
                    "rgba(217, 70, 29, 1)",
                    "rgba(220, 38, 38, 1)",
                ],
                border_width: 1,
            }],
        }
    }
}

/// Overall result of a dashboard load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    Complete,
    /// Only peripheral collections failed.
    PartialFailure,
    /// Machines or materials failed.
    CoreDataFailure,
    /// The batch itself failed; all counts were reset.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl LoadStatus {
    /// Derive the status from the set of failed collections.
    pub fn from_failures(failed: &[ResourceKind]) -> Self {
        if failed.iter().any(|kind| kind.is_core()) {
            LoadStatus::CoreDataFailure
        } else if failed.is_empty() {
            LoadStatus::Complete
        } else {
            LoadStatus::PartialFailure
        }
    }

    pub fn message(self) -> Option<&'static str> {
        match self {
            LoadStatus::Complete => None,
            LoadStatus::PartialFailure => Some("Some dashboard data failed to load."),
            LoadStatus::CoreDataFailure => Some("Core dashboard data failed to load."),
            LoadStatus::Failed => {
                Some("Failed to load dashboard data. Please try again later.")
            }
        }
    }

    pub fn severity(self) -> Option<Severity> {
        match self {
            LoadStatus::Complete => None,
            LoadStatus::PartialFailure => Some(Severity::Warning),
            LoadStatus::CoreDataFailure | LoadStatus::Failed => Some(Severity::Error),
        }
    }
}

/// Everything computed for one dashboard load.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub summary: StatsSummary,
    pub assigned_machine: Option<MachineRecord>,
    pub stock_chart: Option<StockChart>,
    pub status: LoadStatus,
    pub failed_resources: Vec<ResourceKind>,
}

impl DashboardData {
    /// Zeroed data, used when nothing could be loaded.
    pub fn empty(status: LoadStatus) -> Self {
        Self {
            summary: StatsSummary::default(),
            assigned_machine: None,
            stock_chart: None,
            status,
            failed_resources: Vec::new(),
        }
    }
}

// ── View model ──────────────────────────────────────────────────────

/// Emphasis applied to a card or alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    None,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatLine {
    pub label: String,
    pub value: Option<u64>,
    pub highlight: Highlight,
}

impl StatLine {
    pub fn count(label: &str, value: u64) -> Self {
        Self {
            label: label.to_string(),
            value: Some(value),
            highlight: Highlight::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub title: String,
    pub value: u64,
    pub link: String,
    pub highlight: Highlight,
    pub lines: Vec<StatLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

impl Link {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

/// Alert box: either a set of actionable links or a quiet message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub title: String,
    pub highlight: Highlight,
    pub items: Vec<Link>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPanel {
    pub title: String,
    pub chart: StockChart,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkPanel {
    pub title: String,
    pub description: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

/// Role-gated dashboard as rendered for one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub greeting: String,
    pub role: Option<UserRole>,
    pub notice: Option<Notice>,
    pub stat_cards: Vec<StatCard>,
    pub alerts: Vec<Alert>,
    pub chart: Option<ChartPanel>,
    pub panels: Vec<LinkPanel>,
}
