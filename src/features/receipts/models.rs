// 領収書機能のデータモデル

use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::deserialize_amount;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 領収書の購入品目
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReceiptItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub price: Option<f64>,
}

/// 承認待ちの領収書
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UnverifiedReceipt {
    pub id: String,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub items: Vec<ReceiptItem>,
}

/// 承認済みの領収書
///
/// 承認待ちとはフィールド名が異なり、品目はJSON文字列（`items_json`）で届く。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VerifiedReceipt {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub receipt_id: Option<String>,
    #[serde(default)]
    pub vendor_name: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<String>,
    #[serde(default)]
    pub approved_at: Option<String>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub items_json: Option<Value>,
}

impl VerifiedReceipt {
    /// `items_json` を品目の配列として解析する
    ///
    /// 未設定・空文字列は空配列として扱う。
    pub fn try_items(&self) -> AppResult<Vec<ReceiptItem>> {
        match &self.items_json {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::String(raw)) if raw.trim().is_empty() => Ok(Vec::new()),
            Some(Value::String(raw)) => serde_json::from_str::<Vec<ReceiptItem>>(raw)
                .map_err(|e| AppError::decode(format!("items_json の解析に失敗しました: {e}"))),
            Some(value @ Value::Array(_)) => serde_json::from_value(value.clone())
                .map_err(|e| AppError::decode(format!("items_json の解析に失敗しました: {e}"))),
            Some(other) => Err(AppError::decode(format!(
                "items_json が配列ではありません: {other}"
            ))),
        }
    }

    /// 品目一覧を取得する（解析できない場合は空）
    pub fn items(&self) -> Vec<ReceiptItem> {
        self.try_items().unwrap_or_else(|e| {
            log::warn!(
                "品目を表示できないため空として扱います: receipt_id={:?}, error={e}",
                self.receipt_id
            );
            Vec::new()
        })
    }
}
