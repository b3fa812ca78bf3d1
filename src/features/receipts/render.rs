// 領収書カードのHTML生成

use crate::features::receipts::models::{ReceiptItem, UnverifiedReceipt, VerifiedReceipt};
use crate::shared::dom::{Card, Control};
use crate::shared::utils::{display_or_na, escape_text, format_currency, format_timestamp};

pub const RECEIPT_CARD_CLASS: &str = "receipt-card";
pub const APPROVE_BUTTON_CLASS: &str = "approve-btn";

pub const UNVERIFIED_HEADING: &str = "<h3>承認待ちの領収書</h3>";
pub const VERIFIED_HEADING: &str = "<h3>承認済みの領収書</h3>";
pub const NO_UNVERIFIED_PLACEHOLDER: &str = "<p>承認待ちの領収書はありません。</p>";
pub const NO_VERIFIED_PLACEHOLDER: &str = "<p>承認済みの領収書はありません。</p>";

/// 品目リスト（`<ul>`）を生成
pub fn render_items(items: &[ReceiptItem]) -> String {
    let lines: String = items
        .iter()
        .map(|item| {
            format!(
                "<li>{} ({}): {}</li>",
                display_or_na(item.name.as_deref()),
                display_or_na(item.category.as_deref()),
                format_currency(item.price)
            )
        })
        .collect();
    format!("<ul>{lines}</ul>")
}

/// 承認待ち領収書のカード（承認ボタン付き）
pub fn render_unverified_card(receipt: &UnverifiedReceipt) -> Card {
    let body = format!(
        "<strong>店舗名:</strong> {}<br><strong>日付:</strong> {}<br><strong>合計:</strong> {}<br>{}",
        display_or_na(receipt.vendor.as_deref()),
        display_or_na(receipt.purchase_date.as_deref()),
        format_currency(receipt.total_amount),
        render_items(&receipt.items)
    );

    Card::new(RECEIPT_CARD_CLASS, body)
        .with_control(Control::button(APPROVE_BUTTON_CLASS, "承認").with_data("id", &receipt.id))
}

/// 承認済み領収書のカード
pub fn render_verified_card(receipt: &VerifiedReceipt) -> Card {
    let approved_at = receipt
        .approved_at
        .as_deref()
        .map(format_timestamp)
        .filter(|s| !s.is_empty())
        .map(|s| escape_text(&s))
        .unwrap_or_else(|| "N/A".to_string());

    let body = format!(
        "<strong>店舗名:</strong> {}<br><strong>日付:</strong> {}<br><strong>承認日時:</strong> {approved_at}<br><strong>合計:</strong> {}<br>{}",
        display_or_na(receipt.vendor_name.as_deref()),
        display_or_na(receipt.purchase_date.as_deref()),
        format_currency(receipt.total_amount),
        render_items(&receipt.items())
    );

    Card::new(RECEIPT_CARD_CLASS, body)
}
