//! 日期模块
//!
//! 后端日期统一使用 `chrono::NaiveDate`：
//! - `flexible`: serde 适配，兼容 `2024-01-10` 与带时间部分的 ISO 8601 字符串
//! - `optional`: 同上，但缺失、`null` 或无法识别的日期解析为 `None`
//! - `format_date` 等: 界面展示用的格式化函数

use chrono::NaiveDate;

/// 日期在界面上的展示格式
const DISPLAY_FORMAT: &str = "%d %b %Y";
/// `<input type="date">` 使用的格式
const FORM_FORMAT: &str = "%Y-%m-%d";

/// 解析日期字符串
///
/// 只取前 10 个字符，因此 `2024-01-10T09:30:00Z` 也能解析。
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let head = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(head, FORM_FORMAT).ok()
}

/// 解析表单日期输入，空串返回 None
pub fn parse_form_date(s: &str) -> Option<NaiveDate> {
    if s.trim().is_empty() {
        None
    } else {
        parse_date(s)
    }
}

/// 转换为表单日期输入的值
pub fn to_form_value(date: NaiveDate) -> String {
    date.format(FORM_FORMAT).to_string()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| "N/A".to_string())
}

/// serde 适配模块：序列化为 `YYYY-MM-DD`，反序列化时兼容带时间部分的字符串
pub mod flexible {
    use super::{FORM_FORMAT, parse_date};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORM_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid date: {}", raw)))
    }
}

/// 可缺失日期的 serde 适配
///
/// 单条记录的日期异常不应导致整个列表解析失败，界面上显示为 `N/A`。
pub mod optional {
    use super::{FORM_FORMAT, parse_date};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.collect_str(&date.format(FORM_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(serde_json::Value::String(s)) => parse_date(&s),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_date_and_datetime() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 10);
        assert_eq!(parse_date("2024-01-10"), expected);
        assert_eq!(parse_date("2024-01-10T09:30:00.000+00:00"), expected);
        assert_eq!(parse_date("10/01/2024"), None);
        assert_eq!(parse_form_date(""), None);
    }

    #[test]
    fn formats_for_display_and_forms() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(format_date(date), "10 Jan 2024");
        assert_eq!(to_form_value(date), "2024-01-10");
        assert_eq!(format_optional_date(None), "N/A");
        assert_eq!(format_optional_date(Some(date)), "10 Jan 2024");
    }

    #[derive(Debug, serde::Deserialize)]
    struct Dated {
        #[serde(default, with = "optional")]
        date: Option<NaiveDate>,
    }

    #[test]
    fn optional_dates_tolerate_gaps() {
        let parse = |raw: &str| serde_json::from_str::<Dated>(raw).unwrap().date;
        assert_eq!(parse(r#"{"date":"2024-01-10T08:00:00"}"#), NaiveDate::from_ymd_opt(2024, 1, 10));
        assert_eq!(parse(r#"{"date":null}"#), None);
        assert_eq!(parse("{}"), None);
        assert_eq!(parse(r#"{"date":"soon"}"#), None);
    }
}
