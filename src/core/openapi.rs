use utoipa::openapi::server::Server;
use utoipa::{Modify, OpenApi};

use crate::features::addresses::{dtos as addresses_dtos, handlers as addresses_handlers};
use crate::shared::types::{ApiResponse, FieldError, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Addresses
        addresses_handlers::list_addresses,
        addresses_handlers::get_address,
        addresses_handlers::find_nearby_addresses,
        addresses_handlers::create_address,
        addresses_handlers::update_address,
        addresses_handlers::delete_address,
    ),
    components(
        schemas(
            // Shared
            Meta,
            FieldError,
            // Addresses
            addresses_dtos::CreateAddressDto,
            addresses_dtos::UpdateAddressDto,
            addresses_dtos::AddressResponseDto,
            ApiResponse<addresses_dtos::AddressResponseDto>,
            ApiResponse<Vec<addresses_dtos::AddressResponseDto>>,
        )
    ),
    tags(
        (name = "addresses", description = "Address book entries and radius search"),
    ),
    info(
        title = "Address Book API",
        version = "1.0.0",
        description = "CRUD and radius search over stored addresses",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info and server prefix from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
    pub api_prefix: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
        if !self.api_prefix.is_empty() {
            openapi.servers = Some(vec![Server::new(self.api_prefix.clone())]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_address_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == "/addresses/"));
        assert!(paths.iter().any(|p| p.as_str() == "/addresses/{id}"));
        assert!(paths.iter().any(|p| p.as_str() == "/address/near"));
    }

    #[test]
    fn test_modifier_sets_info_and_server() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Custom".to_string(),
            version: "9.9.9".to_string(),
            description: "desc".to_string(),
            api_prefix: "/api/v1".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Custom");
        assert_eq!(doc.info.version, "9.9.9");
        let servers = doc.servers.unwrap();
        assert_eq!(servers[0].url, "/api/v1");
    }
}
