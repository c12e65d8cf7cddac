use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use restaurant_service::config::Config;
use restaurant_service::domain::order::ports::OrderRepository;
use restaurant_service::domain::order::service::OrderService;
use restaurant_service::domain::product::ports::ProductRepository;
use restaurant_service::domain::product::service::ProductService;
use restaurant_service::domain::user::models::EmailAddress;
use restaurant_service::domain::user::models::RoleSet;
use restaurant_service::domain::user::ports::UserRepository;
use restaurant_service::domain::user::service::UserService;
use restaurant_service::inbound::http::router::create_router;
use restaurant_service::inbound::http::router::AppState;
use restaurant_service::outbound::repositories::InMemoryOrderRepository;
use restaurant_service::outbound::repositories::InMemoryProductRepository;
use restaurant_service::outbound::repositories::InMemoryUserRepository;
use restaurant_service::outbound::repositories::PostgresOrderRepository;
use restaurant_service::outbound::repositories::PostgresProductRepository;
use restaurant_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "restaurant_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "restaurant-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let roles = config.roles.role_set()?;

    tracing::info!(
        http_port = config.server.http_port,
        database = config.database.url.is_some(),
        assignable_roles = ?config.roles.assignable,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));

    let state = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_state(
                Arc::new(PostgresUserRepository::new(pg_pool.clone())),
                Arc::new(PostgresProductRepository::new(pg_pool.clone())),
                Arc::new(PostgresOrderRepository::new(pg_pool)),
                authenticator,
                roles,
                config.jwt.expiration_hours,
            )
        }
        None => {
            tracing::warn!("No database configured, data is kept in memory");

            build_state(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryProductRepository::new()),
                Arc::new(InMemoryOrderRepository::new()),
                authenticator,
                roles,
                config.jwt.expiration_hours,
            )
        }
    };

    if let Some(admin) = &config.admin {
        let email = EmailAddress::new(admin.email.clone())?;
        match state
            .user_service
            .ensure_admin(email, admin.password.clone())
            .await?
        {
            Some(user) => tracing::info!(user_id = %user.id, "Admin user created"),
            None => tracing::debug!("Admin user already present"),
        }
    }

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state)).await?;

    Ok(())
}

fn build_state<UR, PR, OR>(
    users: Arc<UR>,
    products: Arc<PR>,
    orders: Arc<OR>,
    authenticator: Arc<Authenticator>,
    roles: RoleSet,
    jwt_expiration_hours: i64,
) -> AppState
where
    UR: UserRepository,
    PR: ProductRepository,
    OR: OrderRepository,
{
    let user_service = Arc::new(UserService::new(
        Arc::clone(&users),
        PasswordHasher::new(),
    ));
    let product_service = Arc::new(ProductService::new(Arc::clone(&products)));
    let order_service = Arc::new(OrderService::new(orders, products));

    AppState::new(
        user_service,
        product_service,
        order_service,
        users,
        authenticator,
        roles,
        jwt_expiration_hours,
    )
}
