use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::modules::store::Entity;
use crate::shared::geo::GeoPoint;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Entity for Address {
    const TABLE: &'static str = "addresses";
    const COLUMNS: &'static [&'static str] =
        &["street", "city", "state", "country", "latitude", "longitude"];

    fn id(&self) -> i64 {
        self.id
    }
}

impl GeoPoint for Address {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}
