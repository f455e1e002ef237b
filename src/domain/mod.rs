//! Domain layer: entities, the view-model core and collaborator interfaces.
//!
//! # Architecture
//!
//! - [`entities`] - data received from and sent to the backend
//! - [`view_model`] - pure grouping, filtering and time-series building
//! - [`gateways`] - traits implemented by the infrastructure layer
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! code. Data flows one way: backend snapshot, then grouping, then filtering,
//! then presentation.

pub mod entities;
pub mod gateways;
pub mod view_model;
