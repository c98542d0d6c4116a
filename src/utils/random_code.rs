//! 随机编号生成：收据号、学号、初始密码、用户名

use rand::Rng;
use rand::distr::Alphanumeric;

use crate::models::common::ClassLevel;

/// 收据号：`RCPT-` + 10 位数字
pub fn generate_receipt_number() -> String {
    let mut rng = rand::rng();
    let digits: String = (0..10)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect();
    format!("RCPT-{digits}")
}

/// 学号前缀：`STUD{入学年份}{年级}`
pub fn student_id_prefix(year: i32, level: ClassLevel) -> String {
    format!("STUD{year}{}", level.as_str())
}

/// 在前缀后拼接三位序号
pub fn format_student_id(prefix: &str, seq: u32) -> String {
    format!("{prefix}{seq:03}")
}

/// 随机初始密码，保证同时包含大小写字母和数字
pub fn generate_initial_password(len: usize) -> String {
    let len = len.max(8);
    let mut rng = rand::rng();
    loop {
        let candidate: String = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect();
        let has_upper = candidate.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = candidate.chars().any(|c| c.is_ascii_lowercase());
        let has_digit = candidate.chars().any(|c| c.is_ascii_digit());
        if has_upper && has_lower && has_digit {
            return candidate;
        }
    }
}

/// 由邮箱本地部分生成用户名基础，只保留合法字符，不足 5 位时补齐
pub fn username_base_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let mut base: String = local
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '+' | '-'))
        .take(24)
        .collect::<String>()
        .to_lowercase();
    if base.is_empty() {
        base.push_str("parent");
    }
    while base.len() < 5 {
        base.push('0');
    }
    base
}

/// 用户名去重时追加的数字后缀
pub fn username_with_suffix(base: &str, n: u32) -> String {
    if n == 0 {
        base.to_string()
    } else {
        format!("{base}{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_number_format() {
        let receipt = generate_receipt_number();
        assert_eq!(receipt.len(), 15);
        assert!(receipt.starts_with("RCPT-"));
        assert!(receipt[5..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_student_id_format() {
        let prefix = student_id_prefix(2025, ClassLevel::P1);
        assert_eq!(prefix, "STUD2025P1");
        assert_eq!(format_student_id(&prefix, 7), "STUD2025P1007");
    }

    #[test]
    fn test_initial_password_strength() {
        let password = generate_initial_password(12);
        assert_eq!(password.len(), 12);
        assert!(crate::utils::validate::validate_password(&password).is_valid);
    }

    #[test]
    fn test_username_from_email() {
        assert_eq!(username_base_from_email("Kofi.Mensah@example.com"), "kofi.mensah");
        assert_eq!(username_base_from_email("ab@example.com"), "ab000");
        assert_eq!(username_base_from_email("@example.com"), "parent");
        assert_eq!(username_with_suffix("kofi.mensah", 2), "kofi.mensah2");
    }
}
