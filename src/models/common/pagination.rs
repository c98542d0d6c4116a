use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

/// 单页最大条数
pub const MAX_PAGE_SIZE: i64 = 100;

// 分页查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "pagination.ts")]
pub struct PaginationQuery {
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub page: i64,
    #[serde(
        default = "default_size",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub size: i64,
}

impl PaginationQuery {
    /// 规范化为 (页码, 每页条数)，页码从 1 开始
    pub fn normalized(&self) -> (u64, u64) {
        (
            self.page.max(1) as u64,
            self.size.clamp(1, MAX_PAGE_SIZE) as u64,
        )
    }
}

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

// 分页列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "pagination.ts")]
pub struct PaginatedResponse<T: TS> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

/// 查询串经 `#[serde(flatten)]` 后所有值都以字符串形式到达，
/// 数值与布尔字段需要同时接受字符串与原生类型。
struct I64Visitor;

impl<'de> serde::de::Visitor<'de> for I64Visitor {
    type Value = i64;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("an integer or a string containing an integer")
    }

    fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<i64, E> {
        Ok(value)
    }

    fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<i64, E> {
        i64::try_from(value)
            .map_err(|_| E::invalid_value(serde::de::Unexpected::Unsigned(value), &self))
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<i64, E> {
        value
            .trim()
            .parse()
            .map_err(|_| E::invalid_value(serde::de::Unexpected::Str(value), &self))
    }
}

fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(I64Visitor)
}

/// 可选整数参数；空字符串视为未提供
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Str(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Int(v)) => Ok(Some(v)),
        Some(Raw::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Str(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid integer: '{s}'"))),
    }
}

/// 可选布尔参数，接受 true/false/1/0
pub fn deserialize_optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Str(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Bool(v)) => Ok(Some(v)),
        Some(Raw::Str(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            _ => Err(serde::de::Error::custom(format!("invalid boolean: '{s}'"))),
        },
    }
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self { page: 1, size: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Filter {
        #[serde(flatten)]
        pagination: PaginationQuery,
        #[serde(default, deserialize_with = "deserialize_optional_i64")]
        term_id: Option<i64>,
        #[serde(default, deserialize_with = "deserialize_optional_bool")]
        is_active: Option<bool>,
    }

    #[test]
    fn test_flattened_query_string() {
        let f: Filter =
            serde_json::from_str(r#"{"page":"2","size":"500","term_id":"7","is_active":"0"}"#)
                .unwrap();
        assert_eq!(f.pagination.normalized(), (2, MAX_PAGE_SIZE as u64));
        assert_eq!(f.term_id, Some(7));
        assert_eq!(f.is_active, Some(false));
    }

    #[test]
    fn test_missing_and_empty_values() {
        let f: Filter = serde_json::from_str(r#"{"term_id":""}"#).unwrap();
        assert_eq!(f.pagination.normalized(), (1, 10));
        assert_eq!(f.term_id, None);
        assert_eq!(f.is_active, None);

        assert!(serde_json::from_str::<Filter>(r#"{"term_id":"abc"}"#).is_err());
    }
}
