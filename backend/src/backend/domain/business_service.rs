//! # Business Service
//!
//! CRUD for businesses (sales locations). Each business scopes its own
//! weight entries and daily tallies; deleting one here is a soft delete so
//! historical data stays queryable.

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::info;
use shared::{Business, BusinessListResponse, CreateBusinessRequest, UpdateBusinessRequest};
use uuid::Uuid;

use crate::backend::storage::{BusinessStorage, Connection};

#[derive(Clone)]
pub struct BusinessService<C: Connection> {
    repository: C::BusinessRepository,
}

impl<C: Connection> BusinessService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            repository: connection.create_business_repository(),
        }
    }

    pub async fn create_business(&self, request: CreateBusinessRequest) -> Result<Business> {
        if request.name.trim().is_empty() {
            return Err(anyhow!("Business name cannot be empty"));
        }

        let now = Utc::now().to_rfc3339();
        let business = Business {
            id: Uuid::new_v4().to_string(),
            name: request.name.trim().to_string(),
            description: request.description,
            color: request.color,
            icon: request.icon,
            is_active: request.is_active,
            created_at: now.clone(),
            updated_at: now,
        };

        self.repository.store_business(&business).await?;
        info!("Created business: {} ({})", business.name, business.id);
        Ok(business)
    }

    pub async fn get_business(&self, business_id: &str) -> Result<Option<Business>> {
        self.repository.get_business(business_id).await
    }

    /// List active businesses in creation order.
    pub async fn list_businesses(&self) -> Result<BusinessListResponse> {
        let businesses = self.repository.list_businesses().await?;
        Ok(BusinessListResponse { businesses })
    }

    pub async fn update_business(
        &self,
        business_id: &str,
        request: UpdateBusinessRequest,
    ) -> Result<Business> {
        if request.name.trim().is_empty() {
            return Err(anyhow!("Business name cannot be empty"));
        }

        let mut business = self
            .repository
            .get_business(business_id)
            .await?
            .ok_or_else(|| anyhow!("Business not found: {}", business_id))?;

        business.name = request.name.trim().to_string();
        business.description = request.description;
        business.color = request.color;
        business.icon = request.icon;
        business.is_active = request.is_active;
        business.updated_at = Utc::now().to_rfc3339();

        self.repository.update_business(&business).await?;
        info!("Updated business: {}", business_id);
        Ok(business)
    }

    /// Soft-delete a business by marking it inactive.
    pub async fn deactivate_business(&self, business_id: &str) -> Result<()> {
        let mut business = self
            .repository
            .get_business(business_id)
            .await?
            .ok_or_else(|| anyhow!("Business not found: {}", business_id))?;

        business.is_active = false;
        business.updated_at = Utc::now().to_rfc3339();
        self.repository.update_business(&business).await?;
        info!("Deactivated business: {}", business_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::DbConnection;

    async fn setup_service() -> BusinessService<DbConnection> {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        BusinessService::new(&db)
    }

    fn create_request(name: &str) -> CreateBusinessRequest {
        CreateBusinessRequest {
            name: name.to_string(),
            description: "Kiosk at the lake".to_string(),
            color: "from-sky-200 to-sky-300".to_string(),
            icon: "🏖️".to_string(),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let service = setup_service().await;
        let created = service.create_business(create_request("Strandkiosk")).await.unwrap();
        assert_eq!(created.name, "Strandkiosk");
        assert!(created.is_active);

        let listed = service.list_businesses().await.unwrap();
        assert_eq!(listed.businesses.len(), 1);
        assert_eq!(listed.businesses[0].id, created.id);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let service = setup_service().await;
        let result = service.create_business(create_request("   ")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_update_changes_fields() {
        let service = setup_service().await;
        let created = service.create_business(create_request("Strandkiosk")).await.unwrap();

        let updated = service
            .update_business(
                &created.id,
                UpdateBusinessRequest {
                    name: "Stadtkiosk".to_string(),
                    description: created.description.clone(),
                    color: created.color.clone(),
                    icon: created.icon.clone(),
                    is_active: true,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Stadtkiosk");
    }

    #[tokio::test]
    async fn test_deactivate_hides_from_listing() {
        let service = setup_service().await;
        let created = service.create_business(create_request("Strandkiosk")).await.unwrap();

        service.deactivate_business(&created.id).await.unwrap();
        let listed = service.list_businesses().await.unwrap();
        assert!(listed.businesses.is_empty());

        // Record itself is retained
        let fetched = service.get_business(&created.id).await.unwrap().unwrap();
        assert!(!fetched.is_active);
    }

    #[tokio::test]
    async fn test_update_missing_business_errors() {
        let service = setup_service().await;
        let result = service
            .update_business(
                "no-such-id",
                UpdateBusinessRequest {
                    name: "X".to_string(),
                    description: String::new(),
                    color: String::new(),
                    icon: String::new(),
                    is_active: true,
                },
            )
            .await;
        assert!(result.is_err());
    }
}
