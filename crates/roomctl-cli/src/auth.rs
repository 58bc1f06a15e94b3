//! Access tokens for the room service.
//!
//! Every request is authorised by a short-lived HS256 JWT signed with the API
//! secret. The `video` claim carries the grant the called method requires.

use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use thiserror::Error;

/// Lifetime of a minted token.
pub(crate) const TOKEN_TTL: Duration = Duration::from_secs(10 * 60);

/// Errors raised while minting a token.
#[derive(Debug, Error)]
pub(crate) enum TokenError {
    /// Claims could not be encoded as JSON.
    #[error("failed to encode token claims")]
    Encode(#[from] serde_json::Error),
    /// The secret was rejected as an HMAC key.
    #[error("API secret cannot be used as a signing key")]
    InvalidKey,
}

/// Permissions requested for a single call.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoGrant {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub(crate) room_create: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub(crate) room_list: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub(crate) room_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) room: Option<String>,
}

impl VideoGrant {
    /// Grant for creating and deleting rooms.
    #[must_use]
    pub(crate) fn room_create() -> Self {
        Self {
            room_create: true,
            ..Self::default()
        }
    }

    /// Grant for listing rooms.
    #[must_use]
    pub(crate) fn room_list() -> Self {
        Self {
            room_list: true,
            ..Self::default()
        }
    }

    /// Grant for administering participants and tracks of one room.
    #[must_use]
    pub(crate) fn room_admin(room: &str) -> Self {
        Self {
            room_admin: true,
            room: Some(room.to_string()),
            ..Self::default()
        }
    }
}

#[derive(Serialize)]
struct Header {
    alg: &'static str,
    typ: &'static str,
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    nbf: u64,
    exp: u64,
    video: &'a VideoGrant,
}

/// Sign an access token valid from `issued_at` (unix seconds) for [`TOKEN_TTL`].
pub(crate) fn sign_token(
    api_key: &str,
    api_secret: &str,
    grant: &VideoGrant,
    issued_at: u64,
) -> Result<String, TokenError> {
    let header = serde_json::to_vec(&Header {
        alg: "HS256",
        typ: "JWT",
    })?;
    let claims = serde_json::to_vec(&Claims {
        iss: api_key,
        nbf: issued_at,
        exp: issued_at.saturating_add(TOKEN_TTL.as_secs()),
        video: grant,
    })?;

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header),
        URL_SAFE_NO_PAD.encode(claims)
    );

    let mut mac = Hmac::<Sha256>::new_from_slice(api_secret.as_bytes())
        .map_err(|_| TokenError::InvalidKey)?;
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{signing_input}.{signature}"))
}
