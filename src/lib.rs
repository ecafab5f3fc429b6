//! Planificador de viajes
//!
//! API JSON para viajes con paradas ordenadas, gastos, actividades,
//! documentos, transportes y alojamientos.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod sequencing;
pub mod services;
pub mod state;
pub mod utils;
