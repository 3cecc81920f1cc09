use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub mail_service_url: String,
    pub mail_service_token: String,
    pub jwt_secret_key: String, // Private key (PEM)
    pub jwt_public_key: String, // Public key (PEM)
    pub auth_issuer: String,
    pub upload_dir: String,
    pub studio_name: String,
    pub studio_address: String,
    pub studio_landmark: String,
    pub business_email: String,
    pub gcash_name: String,
    pub gcash_number: String,
    pub payment_qr_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            mail_service_url: env::var("MAIL_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8000/api/v1/send".to_string()),
            mail_service_token: env::var("MAIL_SERVICE_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
            jwt_secret_key: env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set (Ed25519 Private Key)"),
            jwt_public_key: env::var("JWT_PUBLIC_KEY").expect("JWT_PUBLIC_KEY must be set (Ed25519 Public Key)"),
            auth_issuer: env::var("AUTH_ISSUER").unwrap_or_else(|_| "https://api.studio-booking.local".to_string()),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string()),
            studio_name: env::var("STUDIO_NAME").unwrap_or_else(|_| "it's ouR Studio".to_string()),
            studio_address: env::var("STUDIO_ADDRESS").unwrap_or_else(|_| "FJ Center 15 Tongco Maysan, Valenzuela City".to_string()),
            studio_landmark: env::var("STUDIO_LANDMARK").unwrap_or_else(|_| "PLV, Cebuana, Mr. DIY, and Ever".to_string()),
            business_email: env::var("BUSINESS_EMAIL").unwrap_or_else(|_| "contact@itsourstudio.com".to_string()),
            gcash_name: env::var("GCASH_NAME").unwrap_or_else(|_| "Reggie L.".to_string()),
            gcash_number: env::var("GCASH_NUMBER").unwrap_or_else(|_| "0917 123 4567".to_string()),
            payment_qr_path: env::var("PAYMENT_QR_PATH").ok(),
        }
    }
}
