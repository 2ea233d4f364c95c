//! 日期时间序列化与展示格式化工具
//!
//! - 序列化: Option<`DateTime`<Utc>> -> Option<RFC3339 字符串>
//! - 反序列化: RFC3339 字符串 -> Option<`DateTime`<Utc>>
//! - 展示转换: RFC3339 字符串 -> 固定展示时区 (UTC-4) 的 `MM/DD/YY HH:MM AM/PM`

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// 展示时区与 UTC 的偏移秒数（UTC-4）
const DISPLAY_OFFSET_SECS: i32 = 4 * 3600;

/// 序列化 Option<`DateTime`<Utc>> 为 Option<RFC3339 字符串>
pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

/// 反序列化 RFC3339 字符串为 Option<`DateTime`<Utc>>
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<String>::deserialize(deserializer)? {
        Some(s) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| Error::custom(format!("Invalid RFC3339 timestamp: {e}"))),
        None => Ok(None),
    }
}

/// 将 RFC3339 时间戳转换为展示时区的 `MM/DD/YY HH:MM AM/PM` 格式。
///
/// 空字符串返回空字符串；无法解析的输入原样返回（缓存不丢数据）。
#[must_use]
pub fn to_display_time(iso_datetime: &str) -> String {
    if iso_datetime.is_empty() {
        return String::new();
    }

    let Some(offset) = FixedOffset::west_opt(DISPLAY_OFFSET_SECS) else {
        return iso_datetime.to_string();
    };

    match DateTime::parse_from_rfc3339(iso_datetime) {
        Ok(dt) => dt
            .with_timezone(&offset)
            .format("%m/%d/%y %I:%M %p")
            .to_string(),
        Err(e) => {
            log::warn!("Failed to parse datetime '{iso_datetime}': {e}");
            iso_datetime.to_string()
        }
    }
}
