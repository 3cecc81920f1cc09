use studio_backend::{
    api::router::create_router,
    background::start_background_worker,
    config::Config,
    domain::models::user::User,
    domain::ports::EmailService,
    domain::services::auth_service::AuthService,
    domain::services::notification_service::NotificationService,
    error::AppError,
    infra::factory::load_templates,
    infra::repositories::{
        sqlite_auth_repo::SqliteAuthRepo,
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_draft_repo::SqliteDraftRepo,
        sqlite_feedback_repo::SqliteFeedbackRepo,
        sqlite_job_repo::SqliteJobRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
    infra::uploads::disk_store::DiskStore,
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    Router,
};
use argon2::{password_hash::{PasswordHasher, SaltString}, Argon2};
use async_trait::async_trait;
use chrono::Datelike;
use rand::rngs::OsRng;
use tower::ServiceExt;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub has_attachment: bool,
}

/// Records outgoing mail instead of talking to the relay.
pub struct MockEmailService {
    pub sent: Arc<Mutex<Vec<SentEmail>>>,
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        _html_body: &str,
        attachment_name: Option<&str>,
        _attachment_data: Option<&[u8]>
    ) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(SentEmail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            has_attachment: attachment_name.is_some(),
        });
        Ok(())
    }
}

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub upload_dir: String,
    pub state: Arc<AppState>,
    pub sent_emails: Arc<Mutex<Vec<SentEmail>>>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);
        let upload_dir = format!("test_uploads_{}", Uuid::new_v4());

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let priv_key_pem = include_str!("../tests/keys/test_private.pem");
        let pub_key_pem = include_str!("../tests/keys/test_public.pem");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            jwt_secret_key: priv_key_pem.to_string(),
            jwt_public_key: pub_key_pem.to_string(),
            auth_issuer: "test-issuer".to_string(),
            upload_dir: upload_dir.clone(),
            studio_name: "it's ouR Studio".to_string(),
            studio_address: "FJ Center 15 Tongco Maysan, Valenzuela City".to_string(),
            studio_landmark: "PLV, Cebuana, Mr. DIY, and Ever".to_string(),
            business_email: "contact@itsourstudio.com".to_string(),
            gcash_name: "Reggie L.".to_string(),
            gcash_number: "0917 123 4567".to_string(),
            payment_qr_path: None,
        };

        let sent_emails = Arc::new(Mutex::new(Vec::new()));

        let templates = Arc::new(load_templates());
        let notification_service = Arc::new(NotificationService::new(templates, config.clone()));

        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));

        let state = Arc::new(AppState {
            config: config.clone(),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            auth_repo,
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            draft_repo: Arc::new(SqliteDraftRepo::new(pool.clone())),
            feedback_repo: Arc::new(SqliteFeedbackRepo::new(pool.clone())),
            job_repo: Arc::new(SqliteJobRepo::new(pool.clone())),
            auth_service,
            notification_service,
            email_service: Arc::new(MockEmailService { sent: sent_emails.clone() }),
            file_store: Arc::new(DiskStore::new(&upload_dir)),
        });

        // Start Background Worker
        let worker_state = state.clone();
        tokio::spawn(async move {
            start_background_worker(worker_state).await;
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            upload_dir,
            state,
            sent_emails,
        }
    }

    pub async fn create_admin(&self, username: &str, password: &str) {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .expect("Failed to hash password")
            .to_string();

        let user = User::new(username.to_string(), password_hash);
        self.state.user_repo.create(&user).await.expect("Failed to create admin user");
    }

    pub async fn login(&self, username: &str, password: &str) -> AuthHeaders {
        let payload = serde_json::json!({
            "username": username,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let cookies: Vec<String> = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let access_token_cookie = cookies.iter()
            .find(|c| c.contains("access_token="))
            .expect("No access_token cookie returned");

        let start = access_token_cookie.find("access_token=").unwrap() + 13;
        let end = access_token_cookie[start..].find(';').unwrap_or(access_token_cookie.len() - start);
        let access_token = access_token_cookie[start..start+end].to_string();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
        let csrf_token = body_json["csrf_token"].as_str().expect("No csrf_token in body").to_string();

        AuthHeaders {
            access_token,
            csrf_token
        }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

#[allow(dead_code)]
pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Next Monday strictly in the future, as YYYY-MM-DD. Weekday dates keep
/// the slot grid deterministic (10:00-19:00).
#[allow(dead_code)]
pub fn future_monday() -> String {
    let mut date = chrono::Local::now().date_naive() + chrono::Duration::days(1);
    while date.weekday() != chrono::Weekday::Mon {
        date += chrono::Duration::days(1);
    }
    date.format("%Y-%m-%d").to_string()
}

#[allow(dead_code)]
pub async fn json_request(app: &TestApp, method: &str, uri: &str, payload: Value) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    ).await.unwrap()
}

/// Drives the whole wizard to a submitted booking and returns it.
#[allow(dead_code)]
pub async fn run_wizard_to_booking(
    app: &TestApp,
    package_id: &str,
    extension_min: i32,
    date: &str,
    time: &str,
) -> Value {
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/wizard")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert!(res.status().is_success(), "failed to start wizard");
    let body = parse_body(res).await;
    let token = body["draft"]["token"].as_str().unwrap().to_string();

    let res = json_request(app, "PUT", &format!("/api/v1/wizard/{}", token), serde_json::json!({
        "package_id": package_id,
        "extension_min": extension_min,
        "date": date,
        "time": time
    })).await;
    assert!(res.status().is_success(), "failed to fill service step");

    let res = json_request(app, "POST", &format!("/api/v1/wizard/{}/next", token), serde_json::json!({})).await;
    assert!(res.status().is_success(), "service guard rejected: {:?}", parse_body(res).await);

    let res = json_request(app, "PUT", &format!("/api/v1/wizard/{}", token), serde_json::json!({
        "full_name": "Juan Dela Cruz",
        "email": "juan@example.com",
        "phone": "09171234567"
    })).await;
    assert!(res.status().is_success(), "failed to fill details step");

    let res = json_request(app, "POST", &format!("/api/v1/wizard/{}/next", token), serde_json::json!({})).await;
    assert!(res.status().is_success(), "details guard rejected");

    let res = json_request(app, "PUT", &format!("/api/v1/wizard/{}", token), serde_json::json!({
        "payment_proof_path": "/files/pop/test-proof.png"
    })).await;
    assert!(res.status().is_success(), "failed to attach proof");

    let res = json_request(app, "POST", &format!("/api/v1/wizard/{}/submit", token), serde_json::json!({})).await;
    let status = res.status();
    let body = parse_body(res).await;
    assert!(status.is_success(), "submit failed: {:?}", body);
    body
}
