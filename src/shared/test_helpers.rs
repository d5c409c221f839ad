use fake::faker::address::en::{CityName, CountryName, StateName, StreetName};
use fake::Fake;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::core::database::run_migrations;
use crate::features::addresses::dtos::CreateAddressDto;
use crate::features::addresses::models::Address;
use crate::features::addresses::AddressService;
use crate::modules::store::{Fields, SqlRecordStore};

/// Fresh in-memory database with migrations applied.
///
/// Each SQLite memory connection is its own database, so the pool is pinned
/// to one connection that never expires.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory sqlite");

    run_migrations(&pool).await.expect("failed to run migrations");
    pool
}

pub async fn test_service() -> AddressService {
    let store = SqlRecordStore::<Address>::new(test_pool().await);
    AddressService::new(Arc::new(store))
}

pub fn create_address_dto(latitude: f64, longitude: f64) -> CreateAddressDto {
    CreateAddressDto {
        street: StreetName().fake(),
        city: CityName().fake(),
        state: StateName().fake(),
        country: CountryName().fake(),
        latitude,
        longitude,
    }
}

pub fn address_fields(latitude: f64, longitude: f64) -> Fields {
    Fields::from(create_address_dto(latitude, longitude))
}
