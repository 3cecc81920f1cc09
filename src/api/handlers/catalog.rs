use axum::{response::IntoResponse, Json};
use crate::api::dtos::responses::{CatalogResponse, ExtensionView};
use crate::domain::services::catalog;

pub async fn list_packages() -> impl IntoResponse {
    Json(CatalogResponse {
        packages: catalog::PACKAGES,
        extensions: catalog::EXTENSION_RATES.iter()
            .map(|(minutes, price)| ExtensionView { minutes: *minutes, price: *price })
            .collect(),
    })
}
