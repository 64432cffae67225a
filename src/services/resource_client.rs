//! HTTP client for the upstream manufacturing management API.
//!
//! Every list call forwards the caller's bearer token and returns its own
//! `Result`, so one failing collection never poisons the others.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::errors::ClientError;
use crate::models::dashboard::ResourceKind;
use crate::models::department::DepartmentRecord;
use crate::models::machine::MachineRecord;
use crate::models::material::MaterialRecord;
use crate::models::workshop::WorkshopRecord;

/// Outcome of one collection fetch.
pub type Fetched<T> = Result<Vec<T>, ClientError>;

/// Outcomes of the four dashboard collections, in no particular failure state.
#[derive(Debug)]
pub struct FetchBatch {
    pub machines: Fetched<MachineRecord>,
    pub materials: Fetched<MaterialRecord>,
    pub workshops: Fetched<WorkshopRecord>,
    pub departments: Fetched<DepartmentRecord>,
}

impl FetchBatch {
    /// Collections whose fetch failed, in fixed order.
    pub fn failed(&self) -> Vec<ResourceKind> {
        [
            (ResourceKind::Machines, self.machines.is_err()),
            (ResourceKind::Materials, self.materials.is_err()),
            (ResourceKind::Workshops, self.workshops.is_err()),
            (ResourceKind::Departments, self.departments.is_err()),
        ]
        .into_iter()
        .filter_map(|(kind, failed)| failed.then_some(kind))
        .collect()
    }
}

/// Shared client; cheap to clone.
#[derive(Debug, Clone)]
pub struct ResourceClient {
    http: reqwest::Client,
    base_url: String,
}

impl ResourceClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, kind: ResourceKind) -> String {
        format!("{}/{}", self.base_url, kind.path())
    }

    /// Parse an API response, mapping HTTP errors to `ClientError`.
    async fn parse<R: DeserializeOwned>(resp: reqwest::Response) -> Result<R, ClientError> {
        let status = resp.status();
        if !status.is_success() {
            let code = status.as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status: code,
                message: body,
            });
        }
        resp.json::<R>()
            .await
            .map_err(|e| ClientError::Decode(format!("response body: {e}")))
    }

    async fn list<T: DeserializeOwned>(&self, kind: ResourceKind, token: &str) -> Fetched<T> {
        let resp = self
            .http
            .get(self.collection_url(kind))
            .bearer_auth(token)
            .send()
            .await?;
        let items: Vec<T> = Self::parse(resp).await?;
        tracing::debug!(resource = ?kind, count = items.len(), "Fetched collection");
        Ok(items)
    }

    pub async fn list_machines(&self, token: &str) -> Fetched<MachineRecord> {
        self.list(ResourceKind::Machines, token).await
    }

    pub async fn list_materials(&self, token: &str) -> Fetched<MaterialRecord> {
        self.list(ResourceKind::Materials, token).await
    }

    pub async fn list_workshops(&self, token: &str) -> Fetched<WorkshopRecord> {
        self.list(ResourceKind::Workshops, token).await
    }

    pub async fn list_departments(&self, token: &str) -> Fetched<DepartmentRecord> {
        self.list(ResourceKind::Departments, token).await
    }

    /// Issue all four list requests concurrently and wait for every outcome.
    pub async fn fetch_all(&self, token: &str) -> FetchBatch {
        let (machines, materials, workshops, departments) = tokio::join!(
            self.list_machines(token),
            self.list_materials(token),
            self.list_workshops(token),
            self.list_departments(token),
        );

        for (kind, err) in [
            (ResourceKind::Machines, machines.as_ref().err()),
            (ResourceKind::Materials, materials.as_ref().err()),
            (ResourceKind::Workshops, workshops.as_ref().err()),
            (ResourceKind::Departments, departments.as_ref().err()),
        ] {
            if let Some(e) = err {
                tracing::warn!(resource = ?kind, error = %e, "Failed to fetch collection");
            }
        }

        FetchBatch {
            machines,
            materials,
            workshops,
            departments,
        }
    }

    /// Reachability probe: any HTTP response counts as reachable.
    pub async fn ping(&self) -> Result<u16, ClientError> {
        let resp = self.http.get(format!("{}/", self.base_url)).send().await?;
        Ok(resp.status().as_u16())
    }
}
