//! Dashboard loading: fetch the four collections, then aggregate.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::middleware::auth::CurrentUser;
use crate::models::dashboard::{DashboardData, LoadStatus};
use crate::services::aggregator::{self, Viewer};
use crate::services::resource_client::ResourceClient;

/// Load dashboard data for `user`.
///
/// Users without a role get empty data and no upstream requests. If the
/// batch misses `deadline`, every count is reset to zero and the status is
/// [`LoadStatus::Failed`].
pub async fn load(
    client: &ResourceClient,
    user: &CurrentUser,
    deadline: Duration,
    now: DateTime<Utc>,
) -> DashboardData {
    let Some(role) = user.role.as_ref() else {
        tracing::debug!(user_id = user.id, "No role on token, skipping dashboard fetch");
        return DashboardData::empty(LoadStatus::Complete);
    };

    let batch = match tokio::time::timeout(deadline, client.fetch_all(&user.token)).await {
        Ok(batch) => batch,
        Err(_) => {
            tracing::error!(
                user_id = user.id,
                timeout_secs = deadline.as_secs(),
                "Dashboard fetch batch timed out"
            );
            return DashboardData::empty(LoadStatus::Failed);
        }
    };

    let data = aggregator::aggregate(
        &batch,
        Viewer {
            user_id: user.id,
            role,
        },
        now,
    );

    tracing::info!(
        user_id = user.id,
        role = role.label(),
        status = ?data.status,
        failed = ?data.failed_resources,
        machines = data.summary.machines.total,
        materials = data.summary.materials.total,
        "Dashboard loaded"
    );

    data
}
