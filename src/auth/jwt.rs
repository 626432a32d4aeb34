use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::claims::Claims,
    errors::{AppError, AppResult},
    models::domain::user::User,
};

/// Signs and decodes access tokens. Signature, expiry, and claim shape are
/// checked here; revocation is the gate's concern.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiration_minutes: i64,
}

impl JwtService {
    pub fn new(secret: &SecretString, expiration_minutes: i64) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation: Validation::default(),
            expiration_minutes,
        }
    }

    pub fn issue(&self, user: &User) -> AppResult<String> {
        let claims = Claims::new(user, self.expiration_minutes);
        self.encode(&claims)
    }

    /// Issues a token guaranteed to postdate an all-tokens revocation cutoff.
    /// Within the same second as the cutoff, `iat` is nudged past it so the
    /// fresh token is not swallowed by the marker it follows.
    pub fn issue_after(&self, user: &User, cutoff_iat: i64) -> AppResult<String> {
        let mut claims = Claims::new(user, self.expiration_minutes);
        if (claims.iat as i64) <= cutoff_iat {
            let bump = (cutoff_iat + 1 - claims.iat as i64) as usize;
            claims.iat += bump;
            claims.exp += bump;
        }
        self.encode(&claims)
    }

    fn encode(&self, claims: &Claims) -> AppResult<String> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to create JWT: {}", e)))
    }

    pub fn decode(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::Unauthorized("Token has expired".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::Unauthorized("Token signature is invalid".to_string())
                }
                _ => AppError::Unauthorized(format!("Invalid token: {}", e)),
            },
        )?;

        let claims = token_data.claims;

        // Malformed-token policy: reject rather than default.
        if claims.sub.is_empty() || claims.user_id.is_empty() || claims.jti.is_empty() {
            return Err(AppError::Unauthorized(
                "Token is missing required claims".to_string(),
            ));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::domain::user::UserRole;

    fn service(minutes: i64) -> JwtService {
        let config = Config::test_config();
        JwtService::new(&config.jwt_secret, minutes)
    }

    #[test]
    fn test_issue_and_decode_round_trip() {
        let jwt = service(30);
        let user = User::test_user("johndoe", UserRole::Creator);

        let token = jwt.issue(&user).unwrap();
        assert!(!token.is_empty());

        let claims = jwt.decode(&token).unwrap();
        assert_eq!(claims.sub, user.email);
        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.role, UserRole::Creator);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_decode_garbage_token() {
        let jwt = service(30);
        let result = jwt.decode("invalid.token.here");
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Issued five minutes in the past, beyond the default leeway.
        let jwt = service(-5);
        let user = User::test_user("johndoe", UserRole::Solver);
        let token = jwt.issue(&user).unwrap();

        match jwt.decode(&token) {
            Err(AppError::Unauthorized(msg)) => assert!(msg.contains("expired")),
            other => panic!("expected Unauthorized, got {:?}", other.map(|c| c.sub)),
        }
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let jwt = service(30);
        let other = JwtService::new(&SecretString::from("another_secret_key".to_string()), 30);
        let user = User::test_user("johndoe", UserRole::Solver);

        let token = other.issue(&user).unwrap();
        assert!(jwt.decode(&token).is_err());
    }
}
