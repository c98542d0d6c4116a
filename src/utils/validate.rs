use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.@+-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{9,15}$").expect("Invalid phone regex"));

static ACADEMIC_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})/(\d{4})$").expect("Invalid academic year regex"));

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：5 <= x <= 30
    if username.len() < 5 || username.len() > 30 {
        return Err("Username length must be between 5 and 30 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username may contain only letters, numbers and _ . @ + -");
    }
    Ok(())
}

/// 电话号码：可选 `+` 前缀，9 到 15 位数字
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if !PHONE_RE.is_match(phone) {
        return Err("Phone number must be 9 to 15 digits with an optional leading +");
    }
    Ok(())
}

/// 学年格式 `YYYY/YYYY`，且后一年等于前一年加一
pub fn validate_academic_year(year: &str) -> Result<(), &'static str> {
    let caps = ACADEMIC_YEAR_RE
        .captures(year)
        .ok_or("Academic year must be in the format YYYY/YYYY")?;
    let first: i32 = caps[1].parse().map_err(|_| "Invalid academic year")?;
    let second: i32 = caps[2].parse().map_err(|_| "Invalid academic year")?;
    if second != first + 1 {
        return Err("Academic year must span two consecutive years");
    }
    Ok(())
}

/// 学期编号 1..=3
pub fn validate_term_number(term: i16) -> Result<(), &'static str> {
    if !(1..=3).contains(&term) {
        return Err("Term must be 1, 2 or 3");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
/// - 可选：特殊字符（增强安全性）
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    // 1. 长度检查：至少 8 个字符
    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    // 2. 大写字母检查
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }

    // 3. 小写字母检查
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }

    // 4. 数字检查
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    // 5. 常见弱密码检查
    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "password1",
        "Password1",
        "Qwerty123",
        "Abcd1234",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 简化的密码验证（返回 Result）
pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("kofi.boateng").is_ok());
        assert!(validate_username("ama@school+1").is_ok());
        assert!(validate_username("abcd").is_err());
        assert!(validate_username(&"a".repeat(31)).is_err());
        assert!(validate_username("bad name").is_err());
    }

    #[test]
    fn test_academic_year() {
        assert!(validate_academic_year("2024/2025").is_ok());
        assert!(validate_academic_year("2024/2026").is_err());
        assert!(validate_academic_year("2024-2025").is_err());
        assert!(validate_term_number(3).is_ok());
        assert!(validate_term_number(0).is_err());
    }

    #[test]
    fn test_phone_and_email() {
        assert!(validate_phone("+233244123456").is_ok());
        assert!(validate_phone("0244123456").is_ok());
        assert!(validate_phone("12ab").is_err());
        assert!(validate_email("parent@example.com").is_ok());
        assert!(validate_email("parent@").is_err());
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("MyP@ssw0rd").is_valid);
        assert!(validate_password("SecurePass123").is_valid);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("Ab1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
    }

    #[test]
    fn test_no_uppercase() {
        let result = validate_password("abcd1234");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );
    }

    #[test]
    fn test_no_lowercase() {
        let result = validate_password("ABCD1234");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one lowercase letter")
        );
    }

    #[test]
    fn test_no_digit() {
        let result = validate_password("AbcdEfgh");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one digit")
        );
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Password1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }
}
