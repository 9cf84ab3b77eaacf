use adoptme_adapters::{
    Argon2Hasher, ImageStore, JwtTokenService, SessionCookies,
    config::{AllowedOrigins, IMAGE_ROUTE, Settings},
    http::{
        AppState,
        routes::{
            create_adoption, create_pet, create_pet_with_image, current, delete_pet, delete_user,
            generate_data, get_adoption, get_all_adoptions, get_all_pets, get_all_users, get_user,
            login, mocking_pets, mocking_users, register, unprotected_current, unprotected_login,
            update_pet, update_user,
        },
    },
};
use adoptme_core::Store;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, request},
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::tracing::{REQUEST_ID_HEADER, make_span_with_request_id, on_request, on_response};

/// Knobs that change which routes are mounted and how they behave.
#[derive(Debug, Clone, Copy)]
pub struct ServiceOptions {
    pub unprotected_sessions_enabled: bool,
    pub upload_max_bytes: usize,
}

/// The pet-adoption HTTP API: users, pets, adoptions, sessions and mock data.
pub struct AdoptionService {
    router: Router,
}

impl AdoptionService {
    /// Builds the router over `state`.
    ///
    /// Every route receives the whole [`AppState`]; the store inside is a
    /// cheap handle, so cloning it per request is fine.
    pub fn new<S: Store>(state: AppState<S>, options: ServiceOptions) -> Self {
        let images = ServeDir::new(state.images.directory());

        let users = Router::new()
            .route("/", get(get_all_users::<S>))
            .route(
                "/{uid}",
                get(get_user::<S>)
                    .put(update_user::<S>)
                    .delete(delete_user::<S>),
            );

        let pets = Router::new()
            .route("/", get(get_all_pets::<S>).post(create_pet::<S>))
            .route(
                "/withimage",
                post(create_pet_with_image::<S>)
                    .layer(DefaultBodyLimit::max(options.upload_max_bytes)),
            )
            .route("/{pid}", put(update_pet::<S>).delete(delete_pet::<S>));

        let adoptions = Router::new()
            .route("/", get(get_all_adoptions::<S>))
            .route("/{aid}", get(get_adoption::<S>))
            .route("/{uid}/{pid}", post(create_adoption::<S>));

        let mut sessions = Router::new()
            .route("/register", post(register::<S>))
            .route("/login", post(login::<S>))
            .route("/current", get(current::<S>));

        if options.unprotected_sessions_enabled {
            tracing::warn!("Unprotected session routes are enabled");
            sessions = sessions
                .route("/unprotected/login", post(unprotected_login::<S>))
                .route("/unprotected/current", get(unprotected_current::<S>));
        }

        let mocks = Router::new()
            .route("/mockingpets", get(mocking_pets::<S>))
            .route("/mockingusers", get(mocking_users::<S>))
            .route("/generateData", get(generate_data::<S>));

        let router = Router::new()
            .nest("/api/users", users)
            .nest("/api/pets", pets)
            .nest("/api/adoptions", adoptions)
            .nest("/api/sessions", sessions)
            .nest("/api/mocks", mocks)
            .nest_service(IMAGE_ROUTE, images)
            .with_state(state);

        Self { router }
    }

    /// Wires the production adapters from loaded settings around `store`.
    pub fn from_settings<S: Store>(store: S, settings: &Settings) -> Self {
        let state = AppState::new(
            store,
            Argon2Hasher::new(),
            JwtTokenService::new(
                settings.auth.jwt_secret.clone(),
                settings.auth.token_ttl_in_seconds,
            ),
            SessionCookies {
                session: settings.auth.session_cookie_name.clone(),
                unprotected: settings.auth.unprotected_cookie_name.clone(),
            },
            ImageStore::new(settings.uploads.directory.clone()),
        );

        Self::new(
            state,
            ServiceOptions {
                unprotected_sessions_enabled: settings.auth.unprotected_sessions_enabled,
                upload_max_bytes: settings.uploads.max_bytes,
            },
        )
    }

    // Layers run outermost first: request id is set, then propagated, then traced
    fn with_trace_layer(mut self) -> Self {
        self.router = self
            .router
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(make_span_with_request_id)
                    .on_request(on_request)
                    .on_response(on_response),
            )
            .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
            .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid));
        self
    }

    /// Convert the service into a router that can be mounted on another router.
    ///
    /// CORS is only applied when `allowed_origins` is given and not empty.
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins.filter(|origins| !origins.is_empty()) {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Adoption service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
