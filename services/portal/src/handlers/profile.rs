use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use megalabs_identity::bearer::BearerToken;

use crate::domain::types::Profile;
use crate::error::PortalError;
use crate::handlers::{JsonBody, authenticate};
use crate::state::AppState;
use crate::usecase::profile::{FetchProfileUseCase, SyncProfileInput, SyncProfileUseCase};

#[derive(Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub profile: Profile,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            success: true,
            profile,
        }
    }
}

// ── GET /api/auth/profile ────────────────────────────────────────────────────

pub async fn get_profile(
    token: BearerToken,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, PortalError> {
    let claims = authenticate(&state, &token).await?;
    let usecase = FetchProfileUseCase {
        repo: state.user_repo(),
    };
    let profile = usecase.execute(&claims).await?;
    Ok(Json(profile.into()))
}

// ── POST /api/auth/sync-user ─────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncUserRequest {
    pub firebase_uid: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub phone: Option<String>,
}

pub async fn sync_user(
    token: BearerToken,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SyncUserRequest>,
) -> Result<Json<ProfileResponse>, PortalError> {
    let claims = authenticate(&state, &token).await?;
    let usecase = SyncProfileUseCase {
        repo: state.user_repo(),
    };
    let profile = usecase
        .execute(
            &claims,
            SyncProfileInput {
                firebase_uid: body.firebase_uid,
                email: body.email,
                username: body.username,
                phone: body.phone,
            },
        )
        .await?;
    Ok(Json(profile.into()))
}
