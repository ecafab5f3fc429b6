pub mod activity_controller;
pub mod document_controller;
pub mod expense_controller;
pub mod lodging_controller;
pub mod stop_controller;
pub mod transport_controller;
pub mod trip_controller;
