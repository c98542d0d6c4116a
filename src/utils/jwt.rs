//! JWT 签发与校验
//!
//! access token 放在 `Authorization: Bearer` 头中，refresh token 只通过 HttpOnly Cookie 传递。

use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::errors::{Result, SchoolError};

pub const REFRESH_COOKIE_NAME: &str = "school_refresh_token";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub role: String,
    pub kind: TokenKind,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    fn secret() -> &'static [u8] {
        AppConfig::get().jwt.secret.as_bytes()
    }

    pub fn sign(
        user_id: i64,
        role: &str,
        kind: TokenKind,
        expiry: chrono::Duration,
    ) -> std::result::Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id,
            role: role.to_string(),
            kind,
            exp: (now + expiry).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(Self::secret()),
        )
    }

    pub fn generate_access_token(
        user_id: i64,
        role: &str,
    ) -> std::result::Result<String, jsonwebtoken::errors::Error> {
        let minutes = AppConfig::get().jwt.access_token_expiry;
        Self::sign(
            user_id,
            role,
            TokenKind::Access,
            chrono::Duration::minutes(minutes),
        )
    }

    /// `refresh_expiry` 为 None 时使用默认刷新有效期
    pub fn generate_token_pair(
        user_id: i64,
        role: &str,
        refresh_expiry: Option<chrono::Duration>,
    ) -> std::result::Result<TokenPair, jsonwebtoken::errors::Error> {
        let refresh_expiry = refresh_expiry.unwrap_or_else(|| {
            chrono::Duration::days(AppConfig::get().jwt.refresh_token_expiry)
        });
        Ok(TokenPair {
            access_token: Self::generate_access_token(user_id, role)?,
            refresh_token: Self::sign(user_id, role, TokenKind::Refresh, refresh_expiry)?,
        })
    }

    /// 校验签名、过期时间与 token 类型
    pub fn verify(token: &str, expected: TokenKind) -> Result<Claims> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(Self::secret()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| SchoolError::authentication(format!("Invalid token: {e}")))?;

        if claims.kind != expected {
            return Err(SchoolError::authentication("Invalid token type"));
        }
        Ok(claims)
    }

    pub fn refresh_cookie(refresh_token: &str, max_age_days: i64) -> Cookie<'static> {
        Cookie::build(REFRESH_COOKIE_NAME, refresh_token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::days(max_age_days))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(AppConfig::get().is_production())
            .finish()
    }

    /// 注销时下发的过期 Cookie
    pub fn expired_refresh_cookie() -> Cookie<'static> {
        Cookie::build(REFRESH_COOKIE_NAME, "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(AppConfig::get().is_production())
            .finish()
    }

    pub fn refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_COOKIE_NAME)
            .map(|cookie| cookie.value().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify_kind() {
        let pair = JwtUtils::generate_token_pair(7, "teacher", None).unwrap();
        let claims = JwtUtils::verify(&pair.access_token, TokenKind::Access).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, "teacher");

        assert!(JwtUtils::verify(&pair.access_token, TokenKind::Refresh).is_err());
        assert!(JwtUtils::verify(&pair.refresh_token, TokenKind::Refresh).is_ok());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = JwtUtils::sign(
            1,
            "admin",
            TokenKind::Access,
            chrono::Duration::minutes(-10),
        )
        .unwrap();
        assert!(JwtUtils::verify(&token, TokenKind::Access).is_err());
    }
}
