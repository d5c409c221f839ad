use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::addresses::dtos::{
    AddressResponseDto, CreateAddressDto, NearbyQuery, UpdateAddressDto,
};
use crate::features::addresses::models::Address;
use crate::modules::store::{Fields, Filter, RecordStore};
use crate::shared::geo::within_radius;
use crate::shared::types::PaginationQuery;

/// Address CRUD and radius search.
///
/// Owns field validation and the rule that no two addresses share the exact
/// same `(latitude, longitude)`.
pub struct AddressService {
    store: Arc<dyn RecordStore<Address>>,
}

impl AddressService {
    pub fn new(store: Arc<dyn RecordStore<Address>>) -> Self {
        Self { store }
    }

    async fn find_existing(&self, id: i64) -> Result<Address> {
        self.store
            .get(&Filter::by_id(id))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Address with id `{}` not found", id)))
    }

    /// Fails with `DuplicateCoordinate` when another row already sits on the
    /// coordinates. `current_id` is the row being updated, which may keep its own.
    async fn ensure_unique_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
        current_id: Option<i64>,
    ) -> Result<()> {
        let filter = Filter::new()
            .eq("latitude", latitude)
            .eq("longitude", longitude);

        match self.store.get(&filter).await? {
            Some(existing) if Some(existing.id) == current_id => Ok(()),
            Some(existing) => {
                tracing::warn!(
                    "Rejected duplicate coordinates ({}, {}) already used by address {}",
                    latitude,
                    longitude,
                    existing.id
                );
                Err(AppError::DuplicateCoordinate {
                    latitude,
                    longitude,
                })
            }
            None => Ok(()),
        }
    }

    /// Create a new address
    pub async fn create(&self, dto: CreateAddressDto) -> Result<AddressResponseDto> {
        dto.validate()?;
        let (latitude, longitude) = (dto.latitude, dto.longitude);

        self.ensure_unique_coordinates(latitude, longitude, None).await?;

        let address = self
            .store
            .create(&Fields::from(dto))
            .await
            .map_err(|e| lost_race(e, latitude, longitude))?;

        tracing::info!(
            "Address created: id={}, coordinates=({}, {})",
            address.id,
            address.latitude,
            address.longitude
        );

        Ok(address.into())
    }

    /// Get address by ID
    pub async fn get_by_id(&self, id: i64) -> Result<AddressResponseDto> {
        Ok(self.find_existing(id).await?.into())
    }

    /// List addresses page by page, with the total row count
    pub async fn list(&self, params: &PaginationQuery) -> Result<(Vec<AddressResponseDto>, i64)> {
        params.validate()?;

        let addresses = self.store.list(None, Some(params)).await?;
        let total = self.store.count(None).await?;

        Ok((
            addresses.into_iter().map(AddressResponseDto::from).collect(),
            total,
        ))
    }

    /// Merge the provided fields over an existing address
    pub async fn update(&self, id: i64, dto: UpdateAddressDto) -> Result<AddressResponseDto> {
        dto.validate()?;

        let existing = self.find_existing(id).await?;
        let latitude = dto.latitude.unwrap_or(existing.latitude);
        let longitude = dto.longitude.unwrap_or(existing.longitude);

        self.ensure_unique_coordinates(latitude, longitude, Some(existing.id)).await?;

        let address = self
            .store
            .update(Some(existing), &Fields::from(dto))
            .await
            .map_err(|e| lost_race(e, latitude, longitude))?
            .ok_or_else(|| AppError::NotFound(format!("Address with id `{}` not found", id)))?;

        tracing::info!("Address updated: id={}", address.id);

        Ok(address.into())
    }

    /// Hard delete
    pub async fn delete(&self, id: i64) -> Result<()> {
        let existing = self.find_existing(id).await?;
        self.store.delete(existing.id).await?;

        tracing::info!("Address deleted: id={}", id);
        Ok(())
    }

    /// Addresses within `radius` km of the target, excluding one sitting exactly on it
    pub async fn find_nearby(&self, query: &NearbyQuery) -> Result<Vec<AddressResponseDto>> {
        query.validate()?;

        // Radius search scans every row
        let addresses = self.store.list(None, None).await?;
        let nearby = within_radius(query.latitude, query.longitude, addresses, query.radius);

        if nearby.is_empty() {
            return Err(AppError::NotFound(
                "No addresses found within the specified radius".to_string(),
            ));
        }

        tracing::debug!(
            "Found {} addresses within {} km of ({}, {})",
            nearby.len(),
            query.radius,
            query.latitude,
            query.longitude
        );

        Ok(nearby.into_iter().map(AddressResponseDto::from).collect())
    }
}

/// A concurrent writer can claim the coordinates between the pre-check and the
/// write; the unique index then reports a conflict.
fn lost_race(error: AppError, latitude: f64, longitude: f64) -> AppError {
    match error {
        AppError::Conflict(_) => AppError::DuplicateCoordinate {
            latitude,
            longitude,
        },
        other => other,
    }
}
