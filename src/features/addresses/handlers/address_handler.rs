use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::addresses::dtos::{
    AddressResponseDto, CreateAddressDto, NearbyQuery, UpdateAddressDto,
};
use crate::features::addresses::services::AddressService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List addresses with pagination
#[utoipa::path(
    get,
    path = "/addresses/",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Addresses retrieved successfully", body = ApiResponse<Vec<AddressResponseDto>>),
        (status = 422, description = "Invalid pagination parameters")
    ),
    tag = "addresses"
)]
pub async fn list_addresses(
    State(service): State<Arc<AddressService>>,
    AppQuery(params): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<AddressResponseDto>>>> {
    let (addresses, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::success(
        Some(addresses),
        None,
        Some(Meta {
            total,
            page: params.page,
            limit: params.limit,
        }),
    )))
}

/// Get a single address
#[utoipa::path(
    get,
    path = "/addresses/{id}",
    params(
        ("id" = i64, Path, description = "Address ID")
    ),
    responses(
        (status = 200, description = "Address retrieved successfully", body = ApiResponse<AddressResponseDto>),
        (status = 404, description = "Address not found")
    ),
    tag = "addresses"
)]
pub async fn get_address(
    State(service): State<Arc<AddressService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<AddressResponseDto>>> {
    let address = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(address), None, None)))
}

/// Find addresses within a radius (km) of a coordinate
///
/// An address located exactly at the requested coordinate is not returned.
#[utoipa::path(
    get,
    path = "/address/near",
    params(NearbyQuery),
    responses(
        (status = 200, description = "Addresses within the radius", body = ApiResponse<Vec<AddressResponseDto>>),
        (status = 404, description = "No addresses found within the specified radius"),
        (status = 422, description = "Validation error")
    ),
    tag = "addresses"
)]
pub async fn find_nearby_addresses(
    State(service): State<Arc<AddressService>>,
    AppQuery(query): AppQuery<NearbyQuery>,
) -> Result<Json<ApiResponse<Vec<AddressResponseDto>>>> {
    let addresses = service.find_nearby(&query).await?;
    Ok(Json(ApiResponse::success(Some(addresses), None, None)))
}

/// Create a new address
#[utoipa::path(
    post,
    path = "/addresses/",
    request_body = CreateAddressDto,
    responses(
        (status = 201, description = "Address created successfully", body = ApiResponse<AddressResponseDto>),
        (status = 409, description = "An address with the same coordinates already exists"),
        (status = 422, description = "Validation error")
    ),
    tag = "addresses"
)]
pub async fn create_address(
    State(service): State<Arc<AddressService>>,
    AppJson(dto): AppJson<CreateAddressDto>,
) -> Result<(StatusCode, Json<ApiResponse<AddressResponseDto>>)> {
    let address = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(address),
            Some("The address was created successfully".to_string()),
            None,
        )),
    ))
}

/// Update an existing address
#[utoipa::path(
    put,
    path = "/addresses/{id}",
    params(
        ("id" = i64, Path, description = "Address ID")
    ),
    request_body = UpdateAddressDto,
    responses(
        (status = 200, description = "Address updated successfully", body = ApiResponse<AddressResponseDto>),
        (status = 404, description = "Address not found"),
        (status = 409, description = "An address with the same coordinates already exists"),
        (status = 422, description = "Validation error")
    ),
    tag = "addresses"
)]
pub async fn update_address(
    State(service): State<Arc<AddressService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdateAddressDto>,
) -> Result<Json<ApiResponse<AddressResponseDto>>> {
    let address = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(address),
        Some("address updated successfully".to_string()),
        None,
    )))
}

/// Delete an address
#[utoipa::path(
    delete,
    path = "/addresses/{id}",
    params(
        ("id" = i64, Path, description = "Address ID")
    ),
    responses(
        (status = 200, description = "Address deleted successfully"),
        (status = 404, description = "Address not found")
    ),
    tag = "addresses"
)]
pub async fn delete_address(
    State(service): State<Arc<AddressService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Address deleted successfully".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;

    use crate::features::addresses::routes;
    use crate::shared::test_helpers::test_service;

    async fn server() -> TestServer {
        let service = Arc::new(test_service().await);
        TestServer::new(routes::routes(service)).unwrap()
    }

    fn body(latitude: f64, longitude: f64) -> Value {
        json!({
            "street": "742 Evergreen Terrace",
            "city": "Springfield",
            "state": "Oregon",
            "country": "USA",
            "latitude": latitude,
            "longitude": longitude,
        })
    }

    #[tokio::test]
    async fn test_create_returns_201_with_record() {
        let server = server().await;

        let response = server.post("/addresses/").json(&body(10.0, 20.0)).await;

        response.assert_status(StatusCode::CREATED);
        let json: Value = response.json();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["id"], 1);
        assert_eq!(json["data"]["city"], "Springfield");
        assert_eq!(json["message"], "The address was created successfully");
    }

    #[tokio::test]
    async fn test_create_duplicate_returns_409_envelope() {
        let server = server().await;
        server.post("/addresses").json(&body(10.0, 20.0)).await;

        let response = server.post("/addresses/").json(&body(10.0, 20.0)).await;

        response.assert_status(StatusCode::CONFLICT);
        let json: Value = response.json();
        assert_eq!(json["success"], false);
        assert_eq!(json["status"], 409);
        assert_eq!(json["type"], "DuplicateCoordinate");
    }

    #[tokio::test]
    async fn test_create_invalid_returns_422_with_field_errors() {
        let server = server().await;
        let mut payload = body(120.0, 20.0);
        payload["street"] = json!("");

        let response = server.post("/addresses/").json(&payload).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let json: Value = response.json();
        assert_eq!(json["type"], "ValidationError");
        assert_eq!(json["message"], "Schema validation error");
        assert_eq!(json["errors"][0]["field"], "latitude");
        assert_eq!(json["errors"][1]["field"], "street");
        assert_eq!(json["errors"][1]["error"], "Street cannot be empty");
    }

    #[tokio::test]
    async fn test_create_missing_field_returns_422() {
        let server = server().await;
        let response = server
            .post("/addresses/")
            .json(&json!({ "street": "x", "city": "y" }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_get_missing_returns_404() {
        let server = server().await;

        let response = server.get("/addresses/99").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let json: Value = response.json();
        assert_eq!(json["type"], "NotFound");
        assert_eq!(json["message"], "Address with id `99` not found");
    }

    #[tokio::test]
    async fn test_get_non_numeric_id_returns_422() {
        let server = server().await;
        let response = server.get("/addresses/abc").await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_list_returns_page_and_meta() {
        let server = server().await;
        for i in 0..3 {
            server
                .post("/addresses/")
                .json(&body(1.0, i as f64))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let response = server
            .get("/addresses/")
            .add_query_param("page", 2)
            .add_query_param("limit", 2)
            .await;

        response.assert_status_ok();
        let json: Value = response.json();
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
        assert_eq!(json["data"][0]["id"], 3);
        assert_eq!(json["meta"]["total"], 3);
        assert_eq!(json["meta"]["page"], 2);
    }

    #[tokio::test]
    async fn test_list_with_huge_page_returns_empty_page() {
        let server = server().await;
        server.post("/addresses/").json(&body(1.0, 1.0)).await;

        let response = server
            .get("/addresses/")
            .add_query_param("page", "1000000000000000000")
            .add_query_param("limit", 10)
            .await;

        response.assert_status_ok();
        let json: Value = response.json();
        assert!(json["data"].as_array().unwrap().is_empty());
        assert_eq!(json["meta"]["total"], 1);
    }

    #[tokio::test]
    async fn test_list_with_zero_limit_returns_422() {
        let server = server().await;
        let response = server.get("/addresses").add_query_param("limit", 0).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_update_then_delete() {
        let server = server().await;
        server.post("/addresses/").json(&body(10.0, 20.0)).await;

        let response = server
            .put("/addresses/1")
            .json(&json!({ "city": "Shelbyville" }))
            .await;
        response.assert_status_ok();
        let json: Value = response.json();
        assert_eq!(json["data"]["city"], "Shelbyville");
        assert_eq!(json["data"]["street"], "742 Evergreen Terrace");
        assert_eq!(json["message"], "address updated successfully");

        let response = server.delete("/addresses/1").await;
        response.assert_status_ok();
        let json: Value = response.json();
        assert_eq!(json["message"], "Address deleted successfully");

        server
            .delete("/addresses/1")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_missing_returns_404() {
        let server = server().await;
        let response = server
            .put("/addresses/7")
            .json(&json!({ "city": "Nowhere" }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_near_returns_matches_and_404_when_empty() {
        let server = server().await;
        server.post("/addresses/").json(&body(0.0, 0.5)).await;
        server.post("/addresses/").json(&body(0.0, 5.0)).await;

        let response = server
            .get("/address/near")
            .add_query_param("latitude", 0.0)
            .add_query_param("longitude", 0.0)
            .add_query_param("radius", 100.0)
            .await;
        response.assert_status_ok();
        let json: Value = response.json();
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
        assert_eq!(json["data"][0]["longitude"], 0.5);

        let response = server
            .get("/address/near")
            .add_query_param("lat", 50.0)
            .add_query_param("lon", 50.0)
            .add_query_param("radius", 1.0)
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_near_missing_radius_returns_422() {
        let server = server().await;
        let response = server
            .get("/address/near")
            .add_query_param("latitude", 0.0)
            .add_query_param("longitude", 0.0)
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }
}
