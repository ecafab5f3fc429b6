//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema PostgreSQL
//! y los datos de inserción que usan los repositorios.

pub mod activity;
pub mod document;
pub mod expense;
pub mod lodging;
pub mod stop;
pub mod transport;
pub mod trip;
