use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::addresses::models::Address;
use crate::modules::store::Fields;
use crate::shared::validation::{
    validate_city, validate_country, validate_latitude, validate_longitude, validate_radius,
    validate_state, validate_street,
};

// Create request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAddressDto {
    #[validate(custom(function = "validate_street"))]
    pub street: String,

    #[validate(custom(function = "validate_city"))]
    pub city: String,

    #[validate(custom(function = "validate_state"))]
    pub state: String,

    #[validate(custom(function = "validate_country"))]
    pub country: String,

    /// Decimal degrees, -90 to 90
    #[validate(custom(function = "validate_latitude"))]
    pub latitude: f64,

    /// Decimal degrees, -180 to 180
    #[validate(custom(function = "validate_longitude"))]
    pub longitude: f64,
}

// Update request; omitted fields keep their stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAddressDto {
    #[validate(custom(function = "validate_street"))]
    pub street: Option<String>,

    #[validate(custom(function = "validate_city"))]
    pub city: Option<String>,

    #[validate(custom(function = "validate_state"))]
    pub state: Option<String>,

    #[validate(custom(function = "validate_country"))]
    pub country: Option<String>,

    #[validate(custom(function = "validate_latitude"))]
    pub latitude: Option<f64>,

    #[validate(custom(function = "validate_longitude"))]
    pub longitude: Option<f64>,
}

/// Radius search parameters
#[derive(Debug, Clone, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct NearbyQuery {
    /// Target latitude in decimal degrees
    #[serde(alias = "lat")]
    #[validate(custom(function = "validate_latitude"))]
    pub latitude: f64,

    /// Target longitude in decimal degrees
    #[serde(alias = "lon")]
    #[validate(custom(function = "validate_longitude"))]
    pub longitude: f64,

    /// Search radius in kilometers
    #[validate(custom(function = "validate_radius"))]
    pub radius: f64,
}

// Response DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AddressResponseDto {
    pub id: i64,
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Address> for AddressResponseDto {
    fn from(a: Address) -> Self {
        Self {
            id: a.id,
            street: a.street,
            city: a.city,
            state: a.state,
            country: a.country,
            latitude: a.latitude,
            longitude: a.longitude,
        }
    }
}

impl From<CreateAddressDto> for Fields {
    fn from(dto: CreateAddressDto) -> Self {
        Fields::new()
            .set("street", dto.street)
            .set("city", dto.city)
            .set("state", dto.state)
            .set("country", dto.country)
            .set("latitude", dto.latitude)
            .set("longitude", dto.longitude)
    }
}

impl From<UpdateAddressDto> for Fields {
    fn from(dto: UpdateAddressDto) -> Self {
        Fields::new()
            .set_opt("street", dto.street)
            .set_opt("city", dto.city)
            .set_opt("state", dto.state)
            .set_opt("country", dto.country)
            .set_opt("latitude", dto.latitude)
            .set_opt("longitude", dto.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::store::Value;

    fn valid_create() -> CreateAddressDto {
        CreateAddressDto {
            street: "1 Infinite Loop".to_string(),
            city: "Cupertino".to_string(),
            state: "CA".to_string(),
            country: "USA".to_string(),
            latitude: 37.3318,
            longitude: -122.0312,
        }
    }

    #[test]
    fn test_create_dto_valid() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn test_create_dto_rejects_blank_text_and_bad_coordinates() {
        let dto = CreateAddressDto {
            street: "  ".to_string(),
            latitude: 91.0,
            longitude: -181.0,
            ..valid_create()
        };
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("street"));
        assert!(fields.contains_key("latitude"));
        assert!(fields.contains_key("longitude"));
        assert!(!fields.contains_key("city"));
    }

    #[test]
    fn test_update_dto_only_checks_present_fields() {
        assert!(UpdateAddressDto::default().validate().is_ok());

        let dto = UpdateAddressDto {
            city: Some(String::new()),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_nearby_query_accepts_short_aliases() {
        let query: NearbyQuery =
            serde_json::from_str(r#"{"lat": 1.5, "lon": 2.5, "radius": 10}"#).unwrap();
        assert_eq!(query.latitude, 1.5);
        assert_eq!(query.longitude, 2.5);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_update_fields_skip_missing_values() {
        let dto = UpdateAddressDto {
            latitude: Some(12.0),
            ..Default::default()
        };
        let fields = Fields::from(dto);

        assert_eq!(fields.get("latitude"), Some(&Value::Real(12.0)));
        assert_eq!(fields.get("longitude"), None);
        assert_eq!(fields.get("street"), None);
    }
}
