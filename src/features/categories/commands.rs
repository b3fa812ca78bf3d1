use crate::features::categories::models::{Category, CategoryForm};
use crate::shared::backend::ReceiptBackend;
use crate::shared::dom::{Notifier, Region, SubmitEvent};
use crate::shared::utils::{escape_text, validate_required_field};
use log::{error, info, warn};

pub const CATEGORIES_HEADING: &str = "<h3>カテゴリー一覧</h3>";
pub const NO_CATEGORIES_PLACEHOLDER: &str = "<p>登録されたカテゴリーはありません。</p>";
pub const NO_DESCRIPTION: &str = "説明なし";
pub const CATEGORIES_FETCH_FAILED: &str = "サーバーからカテゴリー一覧を取得できませんでした。";

/// カテゴリー1件を `名前 (説明)` の形式で表示
pub fn render_category_item(category: &Category) -> String {
    let description = category
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(NO_DESCRIPTION);
    format!(
        "<li>{} ({})</li>",
        escape_text(&category.name),
        escape_text(description)
    )
}

/// カテゴリー一覧を取得して表示する
///
/// # 引数
/// * `backend` - APIバックエンド
/// * `region` - カテゴリー一覧の表示領域
pub async fn fetch_categories<B>(backend: &B, region: &mut Region)
where
    B: ReceiptBackend + ?Sized,
{
    match backend.list_categories().await {
        Ok(categories) => {
            region.set_inner_html(CATEGORIES_HEADING);
            if categories.is_empty() {
                region.push_html(NO_CATEGORIES_PLACEHOLDER);
                return;
            }

            let items: String = categories.iter().map(render_category_item).collect();
            region.push_html(&format!("<ul class=\"category-list\">{items}</ul>"));
            info!("カテゴリー一覧を表示しました: count={}", categories.len());
        }
        Err(e) => {
            error!(
                "カテゴリー一覧の取得に失敗しました: region={}, error={e}",
                region.selector()
            );
            let message = if e.is_status_failure() {
                CATEGORIES_FETCH_FAILED.to_string()
            } else {
                e.user_message()
            };
            region.show_error(&message);
        }
    }
}

/// カテゴリー追加フォームの送信を処理する
///
/// 成功時は入力欄を空にして一覧を1回だけ再取得する。
/// 失敗時は入力内容をそのまま残す。
///
/// # 引数
/// * `backend` - APIバックエンド
/// * `notifier` - 結果の通知先
/// * `event` - フォーム送信イベント（既定の送信は必ず止める）
/// * `form` - カテゴリー追加フォームの入力値
/// * `region` - カテゴリー一覧の表示領域
///
/// # 戻り値
/// 追加に成功した場合はtrue
pub async fn add_category<B, N>(
    backend: &B,
    notifier: &N,
    event: &mut SubmitEvent,
    form: &mut CategoryForm,
    region: &mut Region,
) -> bool
where
    B: ReceiptBackend + ?Sized,
    N: Notifier + ?Sized,
{
    event.prevent_default();

    if let Err(e) = validate_required_field(&form.name, "カテゴリー名") {
        warn!("カテゴリー追加の入力が不正です: {e}");
        notifier.alert(&e.user_message());
        return false;
    }

    let request = form.to_request();
    info!("カテゴリーを追加します: name={}", request.name);

    match backend.create_category(&request).await {
        Ok(()) => {
            notifier.alert("新しいカテゴリーを追加しました。");
            form.clear();
            fetch_categories(backend, region).await;
            true
        }
        Err(e) => {
            error!("カテゴリーの追加に失敗しました: {e}");
            notifier.alert(&format!(
                "カテゴリーの追加に失敗しました: {}",
                e.user_message()
            ));
            false
        }
    }
}
