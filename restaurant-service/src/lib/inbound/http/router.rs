use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::orders;
use super::handlers::products;
use super::handlers::users;
use super::middleware::require_authenticated;
use super::middleware::resolve_auth_context;
use crate::domain::auth::ports::CredentialStore;
use crate::domain::auth::resolver::AuthContextResolver;
use crate::domain::order::ports::OrderServicePort;
use crate::domain::product::ports::ProductServicePort;
use crate::domain::user::models::RoleSet;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub product_service: Arc<dyn ProductServicePort>,
    pub order_service: Arc<dyn OrderServicePort>,
    pub credentials: Arc<dyn CredentialStore>,
    pub authenticator: Arc<Authenticator>,
    pub resolver: Arc<AuthContextResolver>,
    /// Roles accepted in user write bodies.
    pub roles: RoleSet,
    pub jwt_expiration_hours: i64,
}

impl AppState {
    pub fn new(
        user_service: Arc<dyn UserServicePort>,
        product_service: Arc<dyn ProductServicePort>,
        order_service: Arc<dyn OrderServicePort>,
        credentials: Arc<dyn CredentialStore>,
        authenticator: Arc<Authenticator>,
        roles: RoleSet,
        jwt_expiration_hours: i64,
    ) -> Self {
        let resolver = Arc::new(AuthContextResolver::new(
            Arc::clone(&authenticator),
            Arc::clone(&credentials),
        ));

        Self {
            user_service,
            product_service,
            order_service,
            credentials,
            authenticator,
            resolver,
            roles,
            jwt_expiration_hours,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new().route("/login", post(login));

    let user_routes = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:uid",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        );

    let product_routes = Router::new()
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/:product_id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        );

    let order_routes = Router::new()
        .route(
            "/orders",
            get(orders::list_orders).post(orders::create_order),
        )
        .route(
            "/orders/:order_id",
            get(orders::get_order)
                .put(orders::update_order)
                .delete(orders::delete_order),
        )
        .route_layer(middleware::from_fn(require_authenticated));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(product_routes)
        .merge(order_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            resolve_auth_context,
        ))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::header;
    use axum::http::HeaderValue;
    use axum::http::Method;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::order::service::OrderService;
    use crate::domain::product::service::ProductService;
    use crate::domain::user::service::UserService;
    use crate::outbound::repositories::InMemoryOrderRepository;
    use crate::outbound::repositories::InMemoryProductRepository;
    use crate::outbound::repositories::InMemoryUserRepository;

    fn test_router() -> Router {
        let users = Arc::new(InMemoryUserRepository::new());
        let products = Arc::new(InMemoryProductRepository::new());
        let orders = Arc::new(InMemoryOrderRepository::new());

        let state = AppState::new(
            Arc::new(UserService::new(
                Arc::clone(&users),
                auth::PasswordHasher::new(),
            )),
            Arc::new(ProductService::new(Arc::clone(&products))),
            Arc::new(OrderService::new(orders, products)),
            users,
            Arc::new(Authenticator::new(b"router-test-secret-at-least-32-bytes")),
            RoleSet::all(),
            1,
        );

        create_router(state)
    }

    async fn status_of(request: Request<Body>) -> StatusCode {
        test_router().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_order_routes_reject_anonymous_requests() {
        for (method, uri) in [
            (Method::GET, "/orders"),
            (Method::POST, "/orders"),
            (Method::GET, "/orders/abc"),
            (Method::DELETE, "/orders/abc"),
        ] {
            let request = Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap();

            assert_eq!(status_of(request).await, StatusCode::UNAUTHORIZED, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_garbage_token_is_rejected_before_routing() {
        let request = Request::builder()
            .uri("/login")
            .method(Method::POST)
            .header(header::AUTHORIZATION, "Bearer not.a.jwt")
            .body(Body::empty())
            .unwrap();

        assert_eq!(status_of(request).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_ascii_authorization_header() {
        let login = |value: &'static [u8]| {
            Request::builder()
                .uri("/login")
                .method(Method::POST)
                .header(header::AUTHORIZATION, HeaderValue::from_bytes(value).unwrap())
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"email\":"))
                .unwrap()
        };

        assert_eq!(
            status_of(login(b"Bearer \xc3\xa4bc")).await,
            StatusCode::UNAUTHORIZED
        );
        // Other schemes stay anonymous and reach the handler
        assert_eq!(
            status_of(login(b"Basic \xff\xfe")).await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_malformed_login_body() {
        let request = Request::builder()
            .uri("/login")
            .method(Method::POST)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"email\":"))
            .unwrap();

        assert_eq!(status_of(request).await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let request = Request::builder()
            .uri("/tables")
            .body(Body::empty())
            .unwrap();

        assert_eq!(status_of(request).await, StatusCode::NOT_FOUND);
    }
}
