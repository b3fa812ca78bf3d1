/// 画面全体とクライアント本体
///
/// 起動時に一度だけ作成し、4つのリージョンとフォームの状態を保持する。
use crate::features::categories::{self, CategoryForm};
use crate::features::receipts::{self, render::APPROVE_BUTTON_CLASS};
use crate::features::uploads::{self, UploadFile, UploadForm, UploadState};
use crate::shared::backend::ReceiptBackend;
use crate::shared::dom::{ClickEvent, Notifier, Region, StatusLine, SubmitEvent};
use crate::shared::utils::escape_attribute;
use log::{info, warn};

/// 画面（4つの領域とフォーム）
#[derive(Debug, Clone)]
pub struct Page {
    /// [画面1] ファイルアップロード
    pub upload_form: UploadForm,
    pub upload_status: StatusLine,
    /// [画面2] 承認待ち一覧
    pub unverified: Region,
    /// [画面3] カテゴリー管理
    pub categories: Region,
    pub category_form: CategoryForm,
    /// [画面4] 承認済み一覧
    pub verified: Region,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self {
            upload_form: UploadForm::default(),
            upload_status: StatusLine::default(),
            unverified: Region::new("#q2 .content-area"),
            categories: Region::new("#q3 .content-area"),
            category_form: CategoryForm::default(),
            verified: Region::new("#q4 .content-area"),
        }
    }

    /// 画面全体をHTML文書として出力する
    pub fn to_html(&self) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="ja">
<head>
    <meta charset="UTF-8">
    <title>領収書管理</title>
</head>
<body>
    <section id="q1">
        <form id="upload-form">
            <input type="file" id="receipt-file-input" name="receipts" multiple>
            <button type="submit">アップロード</button>
        </form>
        {upload_status}
    </section>
    <section id="q2"><div class="content-area">{unverified}</div></section>
    <section id="q3">
        <form id="category-form">
            <input type="text" name="category-name" value="{category_name}" required>
            <input type="text" name="category-desc" value="{category_desc}">
            <button type="submit">追加</button>
        </form>
        <div class="content-area">{categories}</div>
    </section>
    <section id="q4"><div class="content-area">{verified}</div></section>
</body>
</html>
"#,
            upload_status = self.upload_status.to_html(),
            unverified = self.unverified.inner_html(),
            category_name = escape_attribute(&self.category_form.name),
            category_desc = escape_attribute(&self.category_form.description),
            categories = self.categories.inner_html(),
            verified = self.verified.inner_html(),
        )
    }
}

/// 領収書クライアント
pub struct ReceiptClient<B, N> {
    backend: B,
    notifier: N,
    page: Page,
}

impl<B, N> ReceiptClient<B, N>
where
    B: ReceiptBackend,
    N: Notifier,
{
    pub fn new(backend: B, notifier: N) -> Self {
        Self {
            backend,
            notifier,
            page: Page::new(),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// 初期表示：3つの一覧を並行して取得する
    ///
    /// 各取得はそれぞれ別のリージョンにだけ書き込む。
    pub async fn initialize_app(&mut self) {
        info!("画面の初期表示を開始します");
        let backend = &self.backend;
        let page = &mut self.page;

        futures::join!(
            receipts::fetch_unverified_receipts(backend, &mut page.unverified),
            receipts::fetch_verified_receipts(backend, &mut page.verified),
            categories::fetch_categories(backend, &mut page.categories)
        );
        info!("画面の初期表示が完了しました");
    }

    /// 承認待ちリージョンで発生したクリックを処理する
    pub async fn click_unverified(&mut self, event: &ClickEvent) -> bool {
        let page = &mut self.page;
        receipts::handle_unverified_click(
            &self.backend,
            &self.notifier,
            event,
            &mut page.unverified,
            &mut page.verified,
        )
        .await
    }

    /// 表示中の承認ボタンをIDで探してクリックする
    pub async fn approve_by_id(&mut self, receipt_id: &str) -> bool {
        let Some(control) = self
            .page
            .unverified
            .find_control(APPROVE_BUTTON_CLASS, receipt_id)
            .cloned()
        else {
            warn!("承認待ち一覧に見つかりません: receipt_id={receipt_id}");
            self.notifier.alert(&format!(
                "ID: {receipt_id} の領収書は承認待ち一覧にありません。"
            ));
            return false;
        };

        self.click_unverified(&ClickEvent::on(&control)).await
    }

    /// カテゴリー追加フォームに入力して送信する
    pub async fn submit_category(&mut self, name: &str, description: &str) -> bool {
        self.page.category_form = CategoryForm::new(name, description);

        let page = &mut self.page;
        let mut event = SubmitEvent::new();
        categories::add_category(
            &self.backend,
            &self.notifier,
            &mut event,
            &mut page.category_form,
            &mut page.categories,
        )
        .await
    }

    /// ファイルを選択してアップロードフォームを送信する
    pub async fn submit_upload(&mut self, files: Vec<UploadFile>) -> UploadState {
        self.page.upload_form.select(files);

        let page = &mut self.page;
        let mut event = SubmitEvent::new();
        uploads::handle_upload(
            &self.backend,
            &mut event,
            &mut page.upload_form,
            &mut page.upload_status,
        )
        .await
    }
}
