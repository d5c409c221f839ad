//! Address book entries and radius search.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/addresses/` | List addresses (paginated) |
//! | GET | `/addresses/{id}` | Get one address |
//! | GET | `/address/near` | Addresses within a radius of a coordinate |
//! | POST | `/addresses/` | Create an address |
//! | PUT | `/addresses/{id}` | Update an address |
//! | DELETE | `/addresses/{id}` | Delete an address |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::AddressService;
