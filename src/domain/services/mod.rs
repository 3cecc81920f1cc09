pub mod auth_service;
pub mod availability;
pub mod catalog;
pub mod notification_service;
pub mod pricing;
pub mod wizard;
