use crate::shared::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 金額表示に付ける通貨記号
pub const CURRENCY_SUFFIX: &str = "円";

/// 金額が不明な場合の表示
pub const MISSING_AMOUNT: &str = "-";

/// 数値を3桁区切りで整形する
///
/// 小数部は最大3桁まで（末尾の0は省略）。
///
/// # 例
/// `1234567.5` → `"1,234,567.5"`
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return MISSING_AMOUNT.to_string();
    }

    let text = format!("{:.3}", amount.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');
    // 丸めて0になった負数には符号を付けない
    let negative = amount < 0.0 && text.bytes().any(|b| b.is_ascii_digit() && b != b'0');

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    if negative {
        grouped.push('-');
    }
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }
    if !frac_part.is_empty() {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

/// 金額を通貨記号付きで整形する（不明な金額は `-`）
pub fn format_currency(amount: Option<f64>) -> String {
    match amount {
        Some(value) if value.is_finite() => format!("{}{CURRENCY_SUFFIX}", format_amount(value)),
        _ => MISSING_AMOUNT.to_string(),
    }
}

/// 承認日時を `YYYY-MM-DD HH:MM` に整形する
///
/// RFC 3339 / RFC 2822 / ISO形式（タイムゾーンなし）を受け付け、
/// どれにも当てはまらない場合は元の文字列をそのまま返す。
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%Y-%m-%d %H:%M";
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.naive_local().format(DISPLAY).to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return dt.naive_local().format(DISPLAY).to_string();
    }
    for pattern in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return dt.format(DISPLAY).to_string();
        }
    }

    trimmed.to_string()
}

/// テキストをHTML本文用にエスケープする
pub fn escape_text(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// テキストをダブルクォート属性値用にエスケープする
pub fn escape_attribute(text: &str) -> String {
    html_escape::encode_double_quoted_attribute(text).into_owned()
}

/// 任意のテキストを表示用に整える（空・未設定は `N/A`）
pub fn display_or_na(text: Option<&str>) -> String {
    match text.map(str::trim) {
        Some(value) if !value.is_empty() => escape_text(value),
        _ => "N/A".to_string(),
    }
}

/// 必須フィールドのバリデーション
pub fn validate_required_field(text: &str, field_name: &str) -> AppResult<()> {
    if text.trim().is_empty() {
        return Err(AppError::validation(format!("{field_name}は必須項目です")));
    }
    Ok(())
}

/// ファイル名の拡張子からContent-Typeを推定する
pub fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// 金額フィールドのデシリアライザー
///
/// 数値・数値文字列（`"12000.00"`）・`null` を受け付ける。
/// 解析できない値は `None` になる。
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(amount_from_value))
}

fn amount_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    }
}
