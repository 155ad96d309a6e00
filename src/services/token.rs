//! Access token construction and signing.
//!
//! Signing itself is done by the LiveKit server SDK; this module only
//! decides what goes into the token.

use crate::{
    config::{LiveKitConfig, LiveKitCredentials, NamingConfig},
    errors::TokenError,
    models::TokenResponse,
    services::identity::{generate_participant_identity, generate_room_name},
};
use livekit_api::access_token::{AccessToken, VideoGrants};
use std::time::Duration;

/// Capabilities granted to a participant inside a single room
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomGrant {
    pub room: String,
    pub room_join: bool,
    pub can_publish: bool,
    pub can_subscribe: bool,
}

impl RoomGrant {
    /// Join, publish and subscribe rights for `room`
    pub fn publisher(room: impl Into<String>) -> Self {
        Self {
            room: room.into(),
            room_join: true,
            can_publish: true,
            can_subscribe: true,
        }
    }
}

impl From<RoomGrant> for VideoGrants {
    fn from(grant: RoomGrant) -> Self {
        VideoGrants {
            room: grant.room,
            room_join: grant.room_join,
            can_publish: grant.can_publish,
            can_subscribe: grant.can_subscribe,
            ..Default::default()
        }
    }
}

/// Signs access tokens with one set of API credentials
#[derive(Clone, Debug)]
pub struct TokenIssuer {
    credentials: LiveKitCredentials,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(credentials: LiveKitCredentials, ttl: Duration) -> Self {
        Self { credentials, ttl }
    }

    pub fn service_url(&self) -> &str {
        &self.credentials.url
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign a token for `identity` carrying `grant`
    pub fn issue(&self, identity: &str, grant: RoomGrant) -> Result<String, TokenError> {
        let token = AccessToken::with_api_key(
            &self.credentials.api_key,
            &self.credentials.api_secret,
        )
        .with_identity(identity)
        .with_ttl(self.ttl)
        .with_grants(grant.into())
        .to_jwt()?;

        Ok(token)
    }
}

/// A freshly signed token together with where and as whom it is valid
#[derive(Clone, Debug)]
pub struct IssuedToken {
    pub token: String,
    pub url: String,
    pub room_name: String,
    pub identity: String,
}

impl From<IssuedToken> for TokenResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            url: issued.url,
            room_name: issued.room_name,
        }
    }
}

/// Check configuration, pick a new room and identity, and sign a publisher
/// token for them.
pub fn issue_room_token(
    livekit: &LiveKitConfig,
    naming: &NamingConfig,
) -> Result<IssuedToken, TokenError> {
    let credentials = livekit.credentials()?;
    let issuer = TokenIssuer::new(credentials, Duration::from_secs(livekit.token_ttl_seconds));

    let room_name = generate_room_name(&naming.room_prefix);
    let identity = generate_participant_identity(&naming.participant_prefix);
    let token = issuer.issue(&identity, RoomGrant::publisher(room_name.as_str()))?;

    Ok(IssuedToken {
        token,
        url: issuer.service_url().to_string(),
        room_name,
        identity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use livekit_api::access_token::TokenVerifier;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(
            LiveKitCredentials {
                api_key: "APIunit".to_string(),
                api_secret: "unit-test-secret-that-is-long-enough".to_string(),
                url: "wss://unit.livekit.cloud".to_string(),
            },
            Duration::from_secs(600),
        )
    }

    #[test]
    fn test_publisher_grant_sets_all_rights() {
        let grant = RoomGrant::publisher("edy-1-abcdefgh");
        assert!(grant.room_join && grant.can_publish && grant.can_subscribe);

        let video: VideoGrants = grant.into();
        assert_eq!(video.room, "edy-1-abcdefgh");
        assert!(video.room_join);
        assert!(video.can_publish);
        assert!(video.can_subscribe);
        assert!(!video.room_admin);
    }

    #[test]
    fn test_issued_token_verifies_and_carries_grant() {
        let issuer = issuer();
        let token = issuer
            .issue("user-abc12345", RoomGrant::publisher("edy-1-abcdefgh"))
            .unwrap();

        let claims = TokenVerifier::with_api_key("APIunit", "unit-test-secret-that-is-long-enough")
            .verify(&token)
            .unwrap();

        assert_eq!(claims.sub, "user-abc12345");
        assert_eq!(claims.video.room, "edy-1-abcdefgh");
        assert!(claims.video.room_join);
        assert!(claims.video.can_publish);
        assert!(claims.video.can_subscribe);
        assert!(claims.exp > claims.nbf);
    }

    #[test]
    fn test_issue_room_token_uses_fresh_names() {
        let livekit = LiveKitConfig::with_credentials(
            "APIunit",
            "unit-test-secret-that-is-long-enough",
            "wss://unit.livekit.cloud",
        );
        let naming = NamingConfig::default();

        let first = issue_room_token(&livekit, &naming).unwrap();
        let second = issue_room_token(&livekit, &naming).unwrap();

        assert_eq!(first.url, "wss://unit.livekit.cloud");
        assert!(crate::services::is_valid_room_name("edy", &first.room_name));
        assert_ne!(first.room_name, second.room_name);
        assert_ne!(first.identity, second.identity);

        let claims = TokenVerifier::with_api_key("APIunit", "unit-test-secret-that-is-long-enough")
            .verify(&first.token)
            .unwrap();
        assert_eq!(claims.sub, first.identity);
        assert_eq!(claims.video.room, first.room_name);
    }

    #[test]
    fn test_issue_room_token_requires_configuration() {
        let livekit = LiveKitConfig::with_credentials("APIunit", "secret", "");
        let err = issue_room_token(&livekit, &NamingConfig::default()).unwrap_err();
        assert!(matches!(err, TokenError::MissingConfiguration(ref missing) if missing == "LIVEKIT_URL"));
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let token = issuer()
            .issue("user-abc12345", RoomGrant::publisher("edy-1-abcdefgh"))
            .unwrap();

        let result = TokenVerifier::with_api_key("APIunit", "some-other-secret").verify(&token);
        assert!(result.is_err());
    }
}
