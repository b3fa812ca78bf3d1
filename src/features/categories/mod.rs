/// カテゴリー機能モジュール
///
/// カテゴリー一覧の表示と追加フォームの処理を提供します。
pub mod commands;
pub mod models;

pub use commands::{add_category, fetch_categories};
pub use models::{Category, CategoryForm, NewCategory};
