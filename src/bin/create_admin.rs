use argon2::{password_hash::{PasswordHasher, SaltString}, Argon2};
use chrono::Utc;
use rand::rngs::OsRng;
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::env;
use std::str::FromStr;
use uuid::Uuid;

/// Bootstraps the first admin account. Run once after deploying:
///
///   DATABASE_URL=sqlite://studio.db cargo run --bin create_admin -- admin s3cret
#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: create_admin <username> <password>");
        std::process::exit(1);
    }
    let username = &args[1];
    let password = &args[2];

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .expect("Failed to hash password")
        .to_string();

    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(&database_url)
            .await
            .expect("Failed to connect to Postgres");

        sqlx::migrate!("./migrations/postgres")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        sqlx::query("INSERT INTO users (id, username, password_hash, role, created_at) VALUES ($1, $2, $3, $4, $5)")
            .bind(&id).bind(username).bind(&password_hash).bind("ADMIN").bind(now)
            .execute(&pool)
            .await
            .expect("Failed to insert admin user");
    } else {
        let opts = SqliteConnectOptions::from_str(&database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        sqlx::query("INSERT INTO users (id, username, password_hash, role, created_at) VALUES (?, ?, ?, ?, ?)")
            .bind(&id).bind(username).bind(&password_hash).bind("ADMIN").bind(now)
            .execute(&pool)
            .await
            .expect("Failed to insert admin user");
    }

    println!("Admin user created: {} ({})", username, id);
}
