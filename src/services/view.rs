//! Role-gated dashboard view: which cards, alerts, charts and links a user sees.

use crate::models::dashboard::{
    Alert, ChartPanel, DashboardData, DashboardView, Highlight, Link, LinkPanel, Notice,
    StatCard, StatLine, StatsSummary,
};
use crate::models::machine::MachineRecord;
use crate::models::user::UserRole;

/// Build the view for a user with `role` and display `name`.
pub fn build(role: Option<&UserRole>, name: Option<&str>, data: &DashboardData) -> DashboardView {
    let greeting = format!("Welcome back, {}!", name.unwrap_or("User"));
    let notice = data
        .status
        .message()
        .zip(data.status.severity())
        .map(|(message, severity)| Notice {
            severity,
            message: message.to_string(),
        });

    let Some(role) = role else {
        return DashboardView {
            greeting,
            role: None,
            notice,
            stat_cards: Vec::new(),
            alerts: Vec::new(),
            chart: None,
            panels: Vec::new(),
        };
    };

    let summary = &data.summary;
    let management = role.is_management();

    let stat_cards = if management {
        stat_cards(summary)
    } else {
        Vec::new()
    };

    let mut alerts = Vec::new();
    if *role == UserRole::Technician && !management {
        alerts.push(maintenance_alert(summary));
    }
    if *role == UserRole::Purchasing && !management {
        alerts.push(inventory_alert(summary));
    }

    let chart = data
        .stock_chart
        .as_ref()
        .filter(|_| role.can_view(&[UserRole::Admin, UserRole::Manager, UserRole::Purchasing]))
        .map(|chart| ChartPanel {
            title: "Material Inventory Overview".to_string(),
            chart: chart.clone(),
        });

    DashboardView {
        greeting,
        role: Some(role.clone()),
        notice,
        stat_cards,
        alerts,
        chart,
        panels: panels(role, summary, data.assigned_machine.as_ref()),
    }
}

fn stat_cards(summary: &StatsSummary) -> Vec<StatCard> {
    let machines = &summary.machines;
    let machine_highlight = if machines.broken > 0 {
        Highlight::Critical
    } else if machines.maintenance > 0 {
        Highlight::Warning
    } else {
        Highlight::None
    };

    let workshops = &summary.workshops;
    let mut workshop_lines = vec![
        StatLine::count("Active", workshops.active),
        StatLine::count("Inactive", workshops.inactive),
    ];
    if workshops.maintenance > 0 {
        workshop_lines.push(StatLine::count("Maintenance", workshops.maintenance));
    }

    let departments = &summary.departments;
    let (department_highlight, department_line) = if departments.without_supervisor > 0 {
        (
            Highlight::Warning,
            StatLine {
                label: "Needs Supervisor".to_string(),
                value: Some(departments.without_supervisor),
                highlight: Highlight::Warning,
            },
        )
    } else {
        (
            Highlight::None,
            StatLine {
                label: "All Assigned".to_string(),
                value: None,
                highlight: Highlight::None,
            },
        )
    };

    let materials = &summary.materials;
    let material_highlight = if materials.out_of_stock > 0 {
        Highlight::Critical
    } else if materials.low_stock > 0 {
        Highlight::Warning
    } else {
        Highlight::None
    };

    vec![
        StatCard {
            title: "Total Machines".to_string(),
            value: machines.total,
            link: "/machines".to_string(),
            highlight: machine_highlight,
            lines: vec![
                StatLine::count("Operational", machines.operational),
                StatLine::count("Idle", machines.idle),
                StatLine::count("Maintenance", machines.maintenance),
                StatLine::count("Broken", machines.broken),
            ],
        },
        StatCard {
            title: "Workshops".to_string(),
            value: workshops.total,
            link: "/workshops".to_string(),
            highlight: Highlight::None,
            lines: workshop_lines,
        },
        StatCard {
            title: "Departments".to_string(),
            value: departments.total,
            link: "/departments".to_string(),
            highlight: department_highlight,
            lines: vec![department_line],
        },
        StatCard {
            title: "Total Materials".to_string(),
            value: materials.total,
            link: "/materials".to_string(),
            highlight: material_highlight,
            lines: vec![
                StatLine::count("In Stock", materials.in_stock),
                StatLine::count("Low Stock", materials.low_stock),
                StatLine::count("Out of Stock", materials.out_of_stock),
            ],
        },
    ]
}

fn maintenance_alert(summary: &StatsSummary) -> Alert {
    let due = summary.machines.maintenance_due;
    if due > 0 {
        Alert {
            title: "Maintenance Alerts".to_string(),
            highlight: Highlight::Warning,
            items: vec![Link::new(
                format!("{due} machine(s) need maintenance."),
                "/machines?status=maintenance_due",
            )],
            message: None,
        }
    } else {
        Alert {
            title: "Maintenance Alerts".to_string(),
            highlight: Highlight::None,
            items: Vec::new(),
            message: Some("No maintenance currently required.".to_string()),
        }
    }
}

fn inventory_alert(summary: &StatsSummary) -> Alert {
    let low = summary.materials.low_stock;
    let out = summary.materials.out_of_stock;
    let mut items = Vec::new();
    if low > 0 {
        items.push(Link::new(
            format!("{low} material(s) low on stock."),
            "/materials?status=low_stock",
        ));
    }
    if out > 0 {
        items.push(Link::new(
            format!("{out} material(s) out of stock."),
            "/materials?status=out_of_stock",
        ));
    }
    let quiet = items.is_empty();
    Alert {
        title: "Inventory Alerts".to_string(),
        highlight: if quiet { Highlight::None } else { Highlight::Warning },
        items,
        message: quiet.then(|| "Material stock levels are adequate.".to_string()),
    }
}

fn panels(
    role: &UserRole,
    summary: &StatsSummary,
    assigned: Option<&MachineRecord>,
) -> Vec<LinkPanel> {
    let management = role.is_management();
    let mut panels = Vec::new();

    if management {
        let mut links = vec![
            Link::new("Departments", "/departments"),
            Link::new("Workshops", "/workshops"),
            Link::new("Machines", "/machines"),
            Link::new("Materials", "/materials"),
            Link::new("Suppliers", "/suppliers"),
            Link::new("Skills", "/skills"),
        ];
        if *role == UserRole::Admin {
            links.push(Link::new("Register User", "/register"));
        }
        panels.push(LinkPanel {
            title: "Management Quick Links".to_string(),
            description: None,
            links,
        });
    }

    if *role == UserRole::Supervisor {
        panels.push(LinkPanel {
            title: "Supervisor Area".to_string(),
            description: Some("Quick links for your team.".to_string()),
            links: vec![
                Link::new("View Machines", "/machines"),
                Link::new("View Skill Matrix", "/skills"),
            ],
        });
    }

    if *role == UserRole::Operator {
        panels.push(match assigned {
            Some(machine) => {
                let href = format!("/machines/{}", machine.id);
                LinkPanel {
                    title: "Your Assigned Machine".to_string(),
                    description: Some(format!("Assigned to: {}", machine.display_name())),
                    links: vec![
                        Link::new(machine.display_name(), href.clone()),
                        Link::new("View Details", href),
                    ],
                }
            }
            None => LinkPanel {
                title: "Your Assigned Machine".to_string(),
                description: Some(
                    "You are not currently assigned to a specific machine.".to_string(),
                ),
                links: Vec::new(),
            },
        });
    }

    if *role == UserRole::Technician && !management {
        panels.push(LinkPanel {
            title: "Technician Area".to_string(),
            description: Some("Quick access to maintenance information.".to_string()),
            links: vec![
                Link::new("View All Machines", "/machines"),
                Link::new(
                    format!("Maintenance Due ({})", summary.machines.maintenance_due),
                    "/machines?status=maintenance_due",
                ),
            ],
        });
    }

    if *role == UserRole::Purchasing && !management {
        panels.push(LinkPanel {
            title: "Purchasing Area".to_string(),
            description: Some("Manage materials and suppliers.".to_string()),
            links: vec![
                Link::new("View Materials", "/materials"),
                Link::new("View Suppliers", "/suppliers"),
                Link::new(
                    format!("Low Stock ({})", summary.materials.low_stock),
                    "/materials?status=low_stock",
                ),
            ],
        });
    }

    panels
}
