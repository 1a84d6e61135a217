//! Identity handed over by the external auth service.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized, web};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;

/// Claims of the JWT stored in the identity cookie.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub email: String,
    pub exp: usize,
}

impl AuthenticatedUser {
    /// Decodes and validates a HS256 token signed with `secret`.
    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let key = DecodingKey::from_secret(secret.as_bytes());
        decode::<Self>(token, &key, &Validation::default()).map(|data| data.claims)
    }

    /// Signs the claims; used by tests and local tooling.
    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
            log::error!("Server config is not registered");
            return ready(Err(ErrorUnauthorized("Unauthorized")));
        };

        let token = match req.get_identity().and_then(|identity| identity.id()) {
            Ok(token) => token,
            Err(_) => return ready(Err(ErrorUnauthorized("Unauthorized"))),
        };

        ready(Self::from_jwt(&token, &config.secret).map_err(|err| {
            log::warn!("Rejected auth token: {err}");
            ErrorUnauthorized("Unauthorized")
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn claims(exp: usize) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "42".to_string(),
            email: "agent@example.com".to_string(),
            exp,
        }
    }

    #[test]
    fn token_round_trips_with_the_same_secret() {
        let user = claims(4_102_444_800);
        let token = user.to_jwt(SECRET).expect("token is signed");
        let decoded = AuthenticatedUser::from_jwt(&token, SECRET).expect("token is valid");
        assert_eq!(decoded, user);
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = claims(4_102_444_800).to_jwt("other").expect("token is signed");
        assert!(AuthenticatedUser::from_jwt(&token, SECRET).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = claims(1_000).to_jwt(SECRET).expect("token is signed");
        assert!(AuthenticatedUser::from_jwt(&token, SECRET).is_err());
    }
}
