#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::Claims;
use auth::JwtHandler;
use auth::PasswordHasher;
use restaurant_service::domain::order::service::OrderService;
use restaurant_service::domain::product::service::ProductService;
use restaurant_service::domain::user::models::EmailAddress;
use restaurant_service::domain::user::models::RoleSet;
use restaurant_service::domain::user::ports::UserServicePort;
use restaurant_service::domain::user::service::UserService;
use restaurant_service::inbound::http::router::create_router;
use restaurant_service::inbound::http::router::AppState;
use restaurant_service::outbound::repositories::InMemoryOrderRepository;
use restaurant_service::outbound::repositories::InMemoryProductRepository;
use restaurant_service::outbound::repositories::InMemoryUserRepository;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ADMIN_EMAIL: &str = "admin@localhost";
pub const ADMIN_PASSWORD: &str = "changeme";

/// Test application that spawns a real server backed by in-memory storage
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
    pub admin_id: String,
    pub admin_token: String,
}

/// A user created through the API along with a token for it
pub struct TestUser {
    pub id: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repo = Arc::new(InMemoryUserRepository::new());
        let product_repo = Arc::new(InMemoryProductRepository::new());
        let order_repo = Arc::new(InMemoryOrderRepository::new());

        // Cheap Argon2 parameters keep the suite fast
        let hasher = PasswordHasher::with_params(1024, 1, 1).expect("Failed to build hasher");

        let user_service = Arc::new(UserService::new(Arc::clone(&user_repo), hasher));
        let product_service = Arc::new(ProductService::new(Arc::clone(&product_repo)));
        let order_service = Arc::new(OrderService::new(order_repo, product_repo));

        let admin = user_service
            .ensure_admin(
                EmailAddress::new(ADMIN_EMAIL.to_string()).unwrap(),
                ADMIN_PASSWORD.to_string(),
            )
            .await
            .expect("Failed to create admin")
            .expect("Admin already existed in a fresh store");

        let authenticator = Arc::new(Authenticator::new(JWT_SECRET));

        let state = AppState::new(
            user_service,
            product_service,
            order_service,
            user_repo,
            authenticator,
            RoleSet::all(),
            1,
        );
        let router = create_router(state);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        let jwt_handler = JwtHandler::new(JWT_SECRET);
        let admin_id = admin.id.to_string();
        let admin_token = jwt_handler
            .encode(&Claims::for_user(&admin_id, "admin", 1))
            .expect("Failed to sign admin token");

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            jwt_handler,
            admin_id,
            admin_token,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.put(path).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.delete(path).bearer_auth(token)
    }

    /// Sign a token for an arbitrary subject and role
    pub fn token_for(&self, subject: &str, role: &str) -> String {
        self.jwt_handler
            .encode(&Claims::for_user(subject, role, 1))
            .expect("Failed to sign token")
    }

    /// Sign a token whose expiry is an hour in the past
    pub fn expired_token_for(&self, subject: &str, role: &str) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims::new()
            .with_subject(subject)
            .with_issued_at(now - 7200)
            .with_expiration(now - 3600)
            .with_extra("role", role);

        self.jwt_handler
            .encode(&claims)
            .expect("Failed to sign token")
    }

    /// Create a user through the admin API and sign a token for it
    pub async fn create_user_with_role(&self, email: &str, role: &str) -> TestUser {
        let password = "pass_word!".to_string();

        let response = self
            .post_authenticated("/users", &self.admin_token)
            .json(&json!({
                "email": email,
                "password": password,
                "role": role
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        let id = body["data"]["id"]
            .as_str()
            .expect("Missing user id")
            .to_string();
        let token = self.token_for(&id, role);

        TestUser {
            id,
            email: email.to_string(),
            password,
            token,
        }
    }

    /// Create a product through the admin API and return its JSON
    pub async fn create_product(&self, name: &str, price: f64) -> Value {
        let response = self
            .post_authenticated("/products", &self.admin_token)
            .json(&json!({
                "name": name,
                "price": price,
                "image": format!("https://img.example.com/{}.png", name),
                "type": "Desayuno"
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }
}

/// Read the `error` message from a failed response
pub async fn error_message(response: reqwest::Response) -> String {
    let body: Value = response.json().await.expect("Failed to parse response");
    body["error"]
        .as_str()
        .expect("Missing error message")
        .to_string()
}
