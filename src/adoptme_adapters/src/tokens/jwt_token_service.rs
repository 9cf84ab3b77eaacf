use adoptme_core::{TokenError, TokenService};
use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HS256 tokens signed with a secret supplied at startup.
#[derive(Clone)]
pub struct JwtTokenService {
    secret: Secret<String>,
    ttl_in_seconds: i64,
}

/// Caller claims plus the registered time claims, flattened into one JSON object.
#[derive(Serialize, Deserialize)]
struct Envelope<C> {
    #[serde(flatten)]
    claims: C,
    iat: i64,
    exp: i64,
}

impl JwtTokenService {
    pub fn new(secret: Secret<String>, ttl_in_seconds: i64) -> Self {
        Self {
            secret,
            ttl_in_seconds,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation
    }
}

impl TokenService for JwtTokenService {
    fn issue<C: Serialize>(&self, claims: &C) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let envelope = Envelope {
            claims,
            iat: now,
            exp: now + self.ttl_in_seconds,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &envelope,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .map_err(|e| TokenError::UnexpectedError(e.to_string()))
    }

    fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, TokenError> {
        decode::<Envelope<C>>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &Self::validation(),
        )
        .map(|data| data.claims.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })
    }

    fn ttl_seconds(&self) -> i64 {
        self.ttl_in_seconds
    }
}
