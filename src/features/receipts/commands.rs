use crate::features::receipts::render::*;
use crate::shared::backend::ReceiptBackend;
use crate::shared::dom::{ClickEvent, Notifier, Region};
use crate::shared::errors::AppError;
use log::{error, info};

pub const UNVERIFIED_FETCH_FAILED: &str = "サーバーから承認待ち一覧を取得できませんでした。";
pub const VERIFIED_FETCH_FAILED: &str = "サーバーから承認済み一覧を取得できませんでした。";

/// 一覧取得失敗時にリージョンへ表示するメッセージ
///
/// ステータスエラーは操作ごとの固定メッセージ、それ以外はエラー内容を表示する。
pub fn list_failure_message(status_message: &str, error: &AppError) -> String {
    if error.is_status_failure() {
        status_message.to_string()
    } else {
        error.user_message()
    }
}

/// 承認待ちの領収書一覧を取得して表示する
///
/// # 引数
/// * `backend` - APIバックエンド
/// * `region` - 承認待ち一覧の表示領域
pub async fn fetch_unverified_receipts<B>(backend: &B, region: &mut Region)
where
    B: ReceiptBackend + ?Sized,
{
    match backend.list_unverified().await {
        Ok(receipts) => {
            region.set_inner_html(UNVERIFIED_HEADING);
            if receipts.is_empty() {
                region.push_html(NO_UNVERIFIED_PLACEHOLDER);
                info!("承認待ちの領収書はありません");
                return;
            }

            for receipt in &receipts {
                region.append_card(render_unverified_card(receipt));
            }
            info!("承認待ち一覧を表示しました: count={}", receipts.len());
        }
        Err(e) => {
            error!(
                "承認待ち一覧の取得に失敗しました: region={}, error={e}",
                region.selector()
            );
            region.show_error(&list_failure_message(UNVERIFIED_FETCH_FAILED, &e));
        }
    }
}

/// 承認済みの領収書一覧を取得して表示する
///
/// 品目は `items_json` から復元し、解析できないカードは品目なしで表示する。
///
/// # 引数
/// * `backend` - APIバックエンド
/// * `region` - 承認済み一覧の表示領域
pub async fn fetch_verified_receipts<B>(backend: &B, region: &mut Region)
where
    B: ReceiptBackend + ?Sized,
{
    match backend.list_verified().await {
        Ok(receipts) => {
            region.set_inner_html(VERIFIED_HEADING);
            if receipts.is_empty() {
                region.push_html(NO_VERIFIED_PLACEHOLDER);
                info!("承認済みの領収書はありません");
                return;
            }

            for receipt in &receipts {
                region.append_card(render_verified_card(receipt));
            }
            info!("承認済み一覧を表示しました: count={}", receipts.len());
        }
        Err(e) => {
            error!(
                "承認済み一覧の取得に失敗しました: region={}, error={e}",
                region.selector()
            );
            region.show_error(&list_failure_message(VERIFIED_FETCH_FAILED, &e));
        }
    }
}

/// クリック対象が承認ボタンなら、その領収書IDを返す
pub fn approve_target(event: &ClickEvent) -> Option<&str> {
    if event.target.has_class(APPROVE_BUTTON_CLASS) {
        event.target.data("id")
    } else {
        None
    }
}

/// 領収書を承認し、承認待ち・承認済みの両方を再取得する
///
/// 承認は一方の一覧からもう一方へレコードを移すため、成功時は必ず両方を更新する。
/// 失敗時はどちらの表示も変更しない。
///
/// # 引数
/// * `backend` - APIバックエンド
/// * `notifier` - 結果の通知先
/// * `receipt_id` - 承認する領収書のID
/// * `unverified` - 承認待ち一覧の表示領域
/// * `verified` - 承認済み一覧の表示領域
///
/// # 戻り値
/// 承認に成功した場合はtrue
pub async fn approve_receipt<B, N>(
    backend: &B,
    notifier: &N,
    receipt_id: &str,
    unverified: &mut Region,
    verified: &mut Region,
) -> bool
where
    B: ReceiptBackend + ?Sized,
    N: Notifier + ?Sized,
{
    info!("領収書を承認します: receipt_id={receipt_id}");

    match backend.approve(receipt_id).await {
        Ok(()) => {
            notifier.alert("領収書を承認しました。");
            futures::join!(
                fetch_unverified_receipts(backend, unverified),
                fetch_verified_receipts(backend, verified)
            );
            info!("領収書の承認が完了しました: receipt_id={receipt_id}");
            true
        }
        Err(e) => {
            error!("領収書の承認に失敗しました: receipt_id={receipt_id}, error={e}");
            notifier.alert(&format!("承認に失敗しました: {}", e.user_message()));
            false
        }
    }
}

/// 承認待ちリージョンのクリックを処理する（イベント委譲）
///
/// 承認ボタン以外のクリックは無視する。送信前に必ずユーザーの確認を取る。
///
/// # 戻り値
/// 承認を送信して成功した場合はtrue（キャンセル・対象外のクリックはfalse）
pub async fn handle_unverified_click<B, N>(
    backend: &B,
    notifier: &N,
    event: &ClickEvent,
    unverified: &mut Region,
    verified: &mut Region,
) -> bool
where
    B: ReceiptBackend + ?Sized,
    N: Notifier + ?Sized,
{
    let Some(receipt_id) = approve_target(event) else {
        return false;
    };

    if !notifier.confirm(&format!("ID: {receipt_id}\nこの領収書を承認しますか？")) {
        info!("承認がキャンセルされました: receipt_id={receipt_id}");
        return false;
    }

    approve_receipt(backend, notifier, receipt_id, unverified, verified).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::receipts::models::{UnverifiedReceipt, VerifiedReceipt};
    use crate::shared::dom::Control;
    use crate::shared::testing::{Failure, FakeBackend, RecordingNotifier};
    use quickcheck_macros::quickcheck;

    fn unverified(id: &str, vendor: &str) -> UnverifiedReceipt {
        UnverifiedReceipt {
            id: id.to_string(),
            vendor: Some(vendor.to_string()),
            purchase_date: Some("2024-03-01".to_string()),
            total_amount: Some(1000.0),
            items: Vec::new(),
        }
    }

    fn verified(vendor: &str) -> VerifiedReceipt {
        VerifiedReceipt {
            id: Some(1),
            receipt_id: Some("r".to_string()),
            vendor_name: Some(vendor.to_string()),
            purchase_date: None,
            approved_at: None,
            total_amount: Some(1000.0),
            items_json: None,
        }
    }

    fn regions() -> (Region, Region) {
        (
            Region::new("#q2 .content-area"),
            Region::new("#q4 .content-area"),
        )
    }

    #[tokio::test]
    async fn test_fetch_unverified_renders_cards_in_order() {
        let backend = FakeBackend::new();
        *backend.unverified.lock().unwrap() = Ok(vec![
            unverified("a", "一番目"),
            unverified("b", "二番目"),
            unverified("c", "三番目"),
        ]);
        let (mut region, _) = regions();

        fetch_unverified_receipts(&backend, &mut region).await;

        let ids: Vec<_> = region
            .cards()
            .iter()
            .map(|card| card.controls[0].data("id").unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        let html = region.inner_html();
        assert!(html.starts_with(UNVERIFIED_HEADING));
        assert!(html.find("一番目").unwrap() < html.find("三番目").unwrap());
        assert!(!html.contains(NO_UNVERIFIED_PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_fetch_unverified_empty_shows_placeholder() {
        let backend = FakeBackend::new();
        let (mut region, _) = regions();

        fetch_unverified_receipts(&backend, &mut region).await;

        assert!(region.cards().is_empty());
        assert_eq!(
            region.inner_html(),
            format!("{UNVERIFIED_HEADING}{NO_UNVERIFIED_PLACEHOLDER}")
        );
    }

    #[tokio::test]
    async fn test_fetch_unverified_failure_replaces_previous_list() {
        let backend = FakeBackend::new();
        *backend.unverified.lock().unwrap() = Ok(vec![unverified("a", "前回")]);
        let (mut region, _) = regions();
        fetch_unverified_receipts(&backend, &mut region).await;
        assert_eq!(region.cards().len(), 1);

        *backend.unverified.lock().unwrap() = Err(Failure::Status(500, None));
        fetch_unverified_receipts(&backend, &mut region).await;

        assert!(region.cards().is_empty());
        let html = region.inner_html();
        assert!(html.contains(UNVERIFIED_FETCH_FAILED));
        assert!(!html.contains("前回"));
    }

    #[tokio::test]
    async fn test_fetch_verified_network_error_message() {
        let backend = FakeBackend::new();
        *backend.verified.lock().unwrap() = Err(Failure::Network);
        let (_, mut region) = regions();

        fetch_verified_receipts(&backend, &mut region).await;

        assert!(region
            .inner_html()
            .contains("APIサーバーへの接続に失敗しました"));
    }

    #[tokio::test]
    async fn test_fetch_verified_renders_cards_in_order() {
        let backend = FakeBackend::new();
        *backend.verified.lock().unwrap() = Ok(vec![
            verified("ローソン"),
            verified("マツキヨ"),
            verified("ダイソー"),
        ]);
        let (_, mut region) = regions();

        fetch_verified_receipts(&backend, &mut region).await;

        assert_eq!(region.cards().len(), 3);
        for (card, vendor) in region.cards().iter().zip(["ローソン", "マツキヨ", "ダイソー"]) {
            assert!(card.body_html.contains(vendor));
        }

        let html = region.inner_html();
        assert!(html.starts_with(VERIFIED_HEADING));
        let lawson = html.find("ローソン").unwrap();
        let matsukiyo = html.find("マツキヨ").unwrap();
        let daiso = html.find("ダイソー").unwrap();
        assert!(lawson < matsukiyo && matsukiyo < daiso);
        assert!(!html.contains(NO_VERIFIED_PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_fetch_verified_empty_shows_placeholder() {
        let backend = FakeBackend::new();
        let (_, mut region) = regions();

        fetch_verified_receipts(&backend, &mut region).await;

        assert!(region.cards().is_empty());
        assert_eq!(
            region.inner_html(),
            format!("{VERIFIED_HEADING}{NO_VERIFIED_PLACEHOLDER}")
        );
    }

    #[test]
    fn test_approve_target_dispatch() {
        let approve = Control::button(APPROVE_BUTTON_CLASS, "承認").with_data("id", "r-9");
        assert_eq!(approve_target(&ClickEvent::on(&approve)), Some("r-9"));

        let other = Control::button("detail-btn", "詳細").with_data("id", "r-9");
        assert_eq!(approve_target(&ClickEvent::on(&other)), None);

        let no_id = Control::button(APPROVE_BUTTON_CLASS, "承認");
        assert_eq!(approve_target(&ClickEvent::on(&no_id)), None);
    }

    #[tokio::test]
    async fn test_approve_success_refreshes_both_once() {
        let backend = FakeBackend::new();
        let notifier = RecordingNotifier::answering(true);
        let (mut unverified_region, mut verified_region) = regions();

        let approved = approve_receipt(
            &backend,
            &notifier,
            "r-1",
            &mut unverified_region,
            &mut verified_region,
        )
        .await;

        assert!(approved);
        assert_eq!(backend.count("approve"), 1);
        assert_eq!(backend.count("list_unverified"), 1);
        assert_eq!(backend.count("list_verified"), 1);
        assert_eq!(notifier.alerts.borrow().as_slice(), ["領収書を承認しました。"]);
    }

    #[tokio::test]
    async fn test_approve_failure_leaves_regions_unchanged() {
        let backend = FakeBackend::new();
        *backend.approve_result.lock().unwrap() =
            Err(Failure::Status(404, Some("Receipt not found in Redis".to_string())));
        let notifier = RecordingNotifier::answering(true);
        let (mut unverified_region, mut verified_region) = regions();
        unverified_region.set_inner_html("<h3>前回の表示</h3>");
        verified_region.set_inner_html("<h3>前回の表示</h3>");

        let approved = approve_receipt(
            &backend,
            &notifier,
            "r-1",
            &mut unverified_region,
            &mut verified_region,
        )
        .await;

        assert!(!approved);
        assert_eq!(backend.count("list_unverified"), 0);
        assert_eq!(backend.count("list_verified"), 0);
        assert_eq!(unverified_region.inner_html(), "<h3>前回の表示</h3>");
        assert_eq!(verified_region.inner_html(), "<h3>前回の表示</h3>");
        assert_eq!(
            notifier.alerts.borrow().as_slice(),
            ["承認に失敗しました: Receipt not found in Redis"]
        );
    }

    #[tokio::test]
    async fn test_click_requires_confirmation() {
        let backend = FakeBackend::new();
        let notifier = RecordingNotifier::answering(false);
        let (mut unverified_region, mut verified_region) = regions();
        let button = Control::button(APPROVE_BUTTON_CLASS, "承認").with_data("id", "r-5");

        let approved = handle_unverified_click(
            &backend,
            &notifier,
            &ClickEvent::on(&button),
            &mut unverified_region,
            &mut verified_region,
        )
        .await;

        assert!(!approved);
        assert!(backend.calls().is_empty());
        assert_eq!(
            notifier.confirms.borrow().as_slice(),
            ["ID: r-5\nこの領収書を承認しますか？"]
        );
    }

    #[tokio::test]
    async fn test_click_confirmed_sends_approve() {
        let backend = FakeBackend::new();
        let notifier = RecordingNotifier::answering(true);
        let (mut unverified_region, mut verified_region) = regions();
        let button = Control::button(APPROVE_BUTTON_CLASS, "承認").with_data("id", "r-5");

        let approved = handle_unverified_click(
            &backend,
            &notifier,
            &ClickEvent::on(&button),
            &mut unverified_region,
            &mut verified_region,
        )
        .await;

        assert!(approved);
        assert_eq!(backend.calls()[0], "approve:r-5");
    }

    #[tokio::test]
    async fn test_click_on_other_element_is_ignored() {
        let backend = FakeBackend::new();
        let notifier = RecordingNotifier::answering(true);
        let (mut unverified_region, mut verified_region) = regions();
        let other = Control::button("detail-btn", "詳細").with_data("id", "r-5");

        let approved = handle_unverified_click(
            &backend,
            &notifier,
            &ClickEvent::on(&other),
            &mut unverified_region,
            &mut verified_region,
        )
        .await;

        assert!(!approved);
        assert!(notifier.confirms.borrow().is_empty());
        assert!(backend.calls().is_empty());
    }

    #[quickcheck]
    fn prop_one_verified_card_per_receipt(vendors: Vec<String>) -> bool {
        let receipts: Vec<VerifiedReceipt> = vendors.iter().map(|vendor| verified(vendor)).collect();
        let backend = FakeBackend::new();
        *backend.verified.lock().unwrap() = Ok(receipts.clone());
        let mut region = Region::new("#q4 .content-area");

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        runtime.block_on(fetch_verified_receipts(&backend, &mut region));

        let expected: Vec<String> = receipts
            .iter()
            .map(|receipt| render_verified_card(receipt).to_html())
            .collect();
        let rendered: Vec<String> = region.cards().iter().map(|card| card.to_html()).collect();
        rendered == expected
    }

    #[quickcheck]
    fn prop_one_card_per_receipt(vendors: Vec<String>) -> bool {
        let receipts: Vec<UnverifiedReceipt> = vendors
            .iter()
            .enumerate()
            .map(|(i, vendor)| unverified(&format!("id-{i}"), vendor))
            .collect();
        let backend = FakeBackend::new();
        *backend.unverified.lock().unwrap() = Ok(receipts.clone());
        let mut region = Region::new("#q2 .content-area");

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        runtime.block_on(fetch_unverified_receipts(&backend, &mut region));

        let rendered_ids: Vec<String> = region
            .cards()
            .iter()
            .filter_map(|card| card.controls.first())
            .filter_map(|control| control.data("id").map(str::to_string))
            .collect();
        let expected_ids: Vec<String> = receipts.iter().map(|r| r.id.clone()).collect();

        rendered_ids == expected_ids && region.cards().len() == receipts.len()
    }
}
