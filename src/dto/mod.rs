//! Request and response types exchanged over HTTP

pub mod customer_dto;
pub mod pagination_dto;
pub mod patch;
pub mod service_order_dto;
pub mod vehicle_dto;
