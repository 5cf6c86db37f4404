use std::sync::Arc;

use anyhow::Context as _;
use sea_orm::Database;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use megalabs_core::middleware::{propagate_request_id_layer, request_id_layer};
use megalabs_core::tracing::init_tracing;
use megalabs_identity::firebase::FirebaseVerifier;
use megalabs_identity::verifier::TokenVerifier;

use megalabs_portal::config::{PortalConfig, VerificationMode};
use megalabs_portal::router::build_router;
use megalabs_portal::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = PortalConfig::from_env()?;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let verifier = match config.verification {
        VerificationMode::Firebase {
            project_id,
            jwks_url,
        } => TokenVerifier::Firebase(Arc::new(
            FirebaseVerifier::new(project_id, jwks_url).context("failed to build JWKS client")?,
        )),
        VerificationMode::Unverified => TokenVerifier::Unverified,
    };
    match &verifier {
        TokenVerifier::Firebase(firebase) => info!(
            project_id = %firebase.project_id(),
            "verifying bearer tokens against Firebase signing keys"
        ),
        TokenVerifier::Unverified => {
            warn!("TOKEN_VERIFICATION=unverified: bearer token signatures are NOT checked")
        }
    }

    let state = AppState { db, verifier };

    let router = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer());

    let addr = format!("0.0.0.0:{}", config.portal_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("portal service listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
