//! Domain Layer

pub mod entity;
pub mod ports;
pub mod repository;
pub mod value_object;
