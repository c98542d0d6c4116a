use crate::config::AppConfig;
use crate::errors::{Result, SchoolError};
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

fn argon2() -> Result<Argon2<'static>> {
    let config = &AppConfig::get().argon2;
    let params = Params::new(
        config.memory_cost,
        config.time_cost,
        config.parallelism,
        None,
    )
    .map_err(|e| SchoolError::validation(format!("Argon2 参数错误: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// 哈希密码（Argon2id）
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| SchoolError::validation(format!("密码哈希失败: {e}")))?;
    Ok(hash.to_string())
}

/// 验证密码；参数取自哈希串本身
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Kwame2024!").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("Kwame2024!", &hash));
        assert!(!verify_password("kwame2024!", &hash));
        assert!(!verify_password("Kwame2024!", "not-a-hash"));
    }
}
