use anyhow::{Context as _, bail};

use megalabs_identity::firebase::FIREBASE_JWKS_URL;

/// How bearer tokens are checked. Env var: `TOKEN_VERIFICATION`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationMode {
    /// Verify against Firebase's published keys (default).
    Firebase {
        /// Expected `aud`; also the issuer suffix. Env var: `FIREBASE_PROJECT_ID`.
        project_id: String,
        /// Env var: `FIREBASE_JWKS_URL`.
        jwks_url: String,
    },
    /// Decode the payload without checking the signature.
    Unverified,
}

/// Portal service configuration loaded from environment variables.
#[derive(Debug)]
pub struct PortalConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3000). Env var: `PORTAL_PORT`.
    pub portal_port: u16,
    pub verification: VerificationMode,
}

impl PortalConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL")?;
        let portal_port = lookup("PORTAL_PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        let mode = lookup("TOKEN_VERIFICATION").unwrap_or_else(|| "firebase".to_owned());
        let verification = match mode.as_str() {
            "firebase" => VerificationMode::Firebase {
                project_id: lookup("FIREBASE_PROJECT_ID").context("FIREBASE_PROJECT_ID")?,
                jwks_url: lookup("FIREBASE_JWKS_URL")
                    .unwrap_or_else(|| FIREBASE_JWKS_URL.to_owned()),
            },
            "unverified" => VerificationMode::Unverified,
            other => bail!("TOKEN_VERIFICATION must be `firebase` or `unverified`, got `{other}`"),
        };

        Ok(Self {
            database_url,
            portal_port,
            verification,
        })
    }
}
