// Application layer - Use cases over the domain
pub mod dashboard_service;
pub mod export;
pub mod extraction;
pub mod retry;
pub mod vessel_source;
