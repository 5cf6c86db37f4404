use tracing::info;

use megalabs_identity::claims::IdentityClaims;

use crate::domain::repository::UserRepository;
use crate::domain::types::{Profile, ProfileChanges, User, email_local_part};
use crate::error::PortalError;

// ── FetchProfile ─────────────────────────────────────────────────────────────

/// Resolve the caller to exactly one account, linking a legacy row by email or
/// creating a new one the first time a subject is seen.
pub struct FetchProfileUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> FetchProfileUseCase<R> {
    pub async fn execute(&self, claims: &IdentityClaims) -> Result<Profile, PortalError> {
        if let Some(user) = self.repo.find_by_subject(&claims.subject).await? {
            return Ok(user.into());
        }
        let Some(email) = claims.email.as_deref() else {
            return Err(PortalError::ProfileNotFound);
        };
        let user = self.recover(claims, email).await?;
        Ok(user.into())
    }

    async fn recover(&self, claims: &IdentityClaims, email: &str) -> Result<User, PortalError> {
        let subject = claims.subject.as_str();

        let legacy = self
            .repo
            .find_unlinked_by_email(email)
            .await
            .map_err(recovery_failed)?;
        if let Some(legacy) = legacy {
            // Lost races fall through to the checks below.
            let attached = self
                .repo
                .attach_subject(legacy.id, subject, &ProfileChanges::default())
                .await
                .map_err(recovery_failed)?;
            if let Some(user) = attached {
                info!(user_id = %user.id, subject, "linked legacy account by email");
                return Ok(user);
            }
        }

        let existing = self
            .repo
            .find_by_email(email)
            .await
            .map_err(recovery_failed)?;
        if let Some(existing) = existing {
            match existing.firebase_uid.as_deref() {
                Some(linked) if linked == subject => return Ok(existing),
                Some(_) => return Err(PortalError::EmailLinkedToOtherAccount),
                None => {}
            }
        }

        let username = claims
            .display_name
            .clone()
            .unwrap_or_else(|| email_local_part(email).to_owned());
        let new_user = User::new_linked(subject, email.to_owned(), username, claims.phone.clone());
        let user = self
            .repo
            .create_or_get(&new_user)
            .await
            .map_err(recovery_failed)?;
        info!(user_id = %user.id, subject, "created account for new subject");
        Ok(user)
    }
}

fn recovery_failed(err: PortalError) -> PortalError {
    match err {
        PortalError::Internal(e) => PortalError::ProfileRecoveryFailed(e),
        other => other,
    }
}

// ── SyncProfile ──────────────────────────────────────────────────────────────

pub struct SyncProfileInput {
    /// Subject the client believes it is signed in as; must match the token.
    pub firebase_uid: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub phone: Option<String>,
}

/// Push client-side profile fields into the caller's account, linking or
/// creating it as needed.
pub struct SyncProfileUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> SyncProfileUseCase<R> {
    pub async fn execute(
        &self,
        claims: &IdentityClaims,
        input: SyncProfileInput,
    ) -> Result<Profile, PortalError> {
        let subject = claims.subject.as_str();
        if input.firebase_uid.as_deref() != Some(subject) {
            return Err(PortalError::SubjectMismatch);
        }
        let changes = ProfileChanges::new(input.email, input.username, input.phone);

        if let Some(user) = self.repo.update_by_subject(subject, &changes).await? {
            return Ok(user.into());
        }

        let email = changes
            .email
            .clone()
            .or_else(|| claims.email.clone())
            .ok_or(PortalError::MissingEmail)?;

        if let Some(existing) = self.repo.find_unlinked_by_email(&email).await? {
            // Lost races fall through to the upsert.
            if let Some(user) = self
                .repo
                .attach_subject(existing.id, subject, &changes)
                .await?
            {
                info!(user_id = %user.id, subject, "linked legacy account by email");
                return Ok(user.into());
            }
        }

        let new_user = User::new_linked(
            subject,
            email.clone(),
            changes
                .username
                .clone()
                .or_else(|| claims.display_name.clone())
                .unwrap_or_else(|| email_local_part(&email).to_owned()),
            changes.phone.clone().or_else(|| claims.phone.clone()),
        );
        let upsert_changes = ProfileChanges {
            email: Some(email),
            ..changes
        };
        let user = self.repo.upsert(&new_user, &upsert_changes).await?;
        info!(user_id = %user.id, subject, "synced account for new subject");
        Ok(user.into())
    }
}
