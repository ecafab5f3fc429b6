pub mod activity_repository;
pub mod document_repository;
pub mod expense_repository;
pub mod lodging_repository;
pub mod stop_repository;
pub mod transport_repository;
pub mod trip_repository;
