use sea_orm::DatabaseConnection;

use megalabs_identity::verifier::TokenVerifier;

use crate::infra::db::{DbCatalogRepository, DbChatRepository, DbUserRepository};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub verifier: TokenVerifier,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn catalog_repo(&self) -> DbCatalogRepository {
        DbCatalogRepository {
            db: self.db.clone(),
        }
    }

    pub fn chat_repo(&self) -> DbChatRepository {
        DbChatRepository {
            db: self.db.clone(),
        }
    }
}
