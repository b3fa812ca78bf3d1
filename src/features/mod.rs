/// 機能別モジュール
///
/// 各機能モジュールは、その機能に関連するモデル・表示・コマンドを含む。
pub mod categories;
pub mod receipts;
pub mod uploads;
