pub mod address_dto;

pub use address_dto::{AddressResponseDto, CreateAddressDto, NearbyQuery, UpdateAddressDto};
