// 領収書機能モジュール（承認待ち・承認済み一覧と承認操作）

pub mod commands;
pub mod models;
pub mod render;

// モデル
pub use models::{ReceiptItem, UnverifiedReceipt, VerifiedReceipt};

// コマンド
pub use commands::{
    approve_receipt, approve_target, fetch_unverified_receipts, fetch_verified_receipts,
    handle_unverified_click,
};
