//! # Flavor Service
//!
//! Manages the global flavor catalog. Flavors are shared across all
//! businesses; deleting one leaves any historical weight entries that
//! reference it in place.

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::info;
use shared::{CreateFlavorRequest, Flavor, FlavorListResponse};
use uuid::Uuid;

use crate::backend::storage::{Connection, FlavorStorage};

#[derive(Clone)]
pub struct FlavorService<C: Connection> {
    repository: C::FlavorRepository,
}

impl<C: Connection> FlavorService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            repository: connection.create_flavor_repository(),
        }
    }

    pub async fn create_flavor(&self, request: CreateFlavorRequest) -> Result<Flavor> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(anyhow!("Flavor name cannot be empty"));
        }

        let flavor = Flavor {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            icon: request.icon,
            color: request.color,
            created_at: Utc::now().to_rfc3339(),
        };

        self.repository.store_flavor(&flavor).await?;
        info!("Created flavor: {} ({})", flavor.name, flavor.id);
        Ok(flavor)
    }

    /// List flavors in creation order.
    pub async fn list_flavors(&self) -> Result<FlavorListResponse> {
        let flavors = self.repository.list_flavors().await?;
        Ok(FlavorListResponse { flavors })
    }

    pub async fn delete_flavor(&self, flavor_id: &str) -> Result<()> {
        self.repository.delete_flavor(flavor_id).await?;
        info!("Deleted flavor: {}", flavor_id);
        Ok(())
    }
}
