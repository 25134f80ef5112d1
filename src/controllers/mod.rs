pub mod customer_controller;
pub mod service_order_controller;
pub mod vehicle_controller;

pub use customer_controller::CustomerController;
pub use service_order_controller::ServiceOrderController;
pub use vehicle_controller::VehicleController;
