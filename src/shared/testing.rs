// テスト用のバックエンドと通知の差し替え実装

use crate::features::categories::models::{Category, NewCategory};
use crate::features::receipts::models::{UnverifiedReceipt, VerifiedReceipt};
use crate::features::uploads::models::{UploadFile, UploadResponse};
use crate::shared::backend::ReceiptBackend;
use crate::shared::dom::Notifier;
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use std::cell::RefCell;
use std::sync::Mutex;

/// 失敗の種類
#[derive(Debug, Clone)]
pub enum Failure {
    /// 接続失敗
    Network,
    /// 2xx以外（サーバーメッセージ任意）
    Status(u16, Option<String>),
}

impl Failure {
    fn into_error(self) -> AppError {
        match self {
            Failure::Network => AppError::network("connection refused"),
            Failure::Status(status, server_message) => AppError::Http {
                status,
                server_message,
            },
        }
    }
}

/// 呼び出しを記録するバックエンド
pub struct FakeBackend {
    pub unverified: Mutex<Result<Vec<UnverifiedReceipt>, Failure>>,
    pub verified: Mutex<Result<Vec<VerifiedReceipt>, Failure>>,
    pub categories: Mutex<Result<Vec<Category>, Failure>>,
    pub approve_result: Mutex<Result<(), Failure>>,
    pub create_category_result: Mutex<Result<(), Failure>>,
    pub upload_result: Mutex<Result<UploadResponse, Failure>>,
    calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            unverified: Mutex::new(Ok(Vec::new())),
            verified: Mutex::new(Ok(Vec::new())),
            categories: Mutex::new(Ok(Vec::new())),
            approve_result: Mutex::new(Ok(())),
            create_category_result: Mutex::new(Ok(())),
            upload_result: Mutex::new(Ok(UploadResponse::default())),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// 指定の呼び出し名の回数
    pub fn count(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.split(':').next() == Some(name))
            .count()
    }
}

#[async_trait]
impl ReceiptBackend for FakeBackend {
    async fn list_unverified(&self) -> AppResult<Vec<UnverifiedReceipt>> {
        self.record("list_unverified".to_string());
        self.unverified.lock().unwrap().clone().map_err(Failure::into_error)
    }

    async fn list_verified(&self) -> AppResult<Vec<VerifiedReceipt>> {
        self.record("list_verified".to_string());
        self.verified.lock().unwrap().clone().map_err(Failure::into_error)
    }

    async fn approve(&self, receipt_id: &str) -> AppResult<()> {
        self.record(format!("approve:{receipt_id}"));
        self.approve_result.lock().unwrap().clone().map_err(Failure::into_error)
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.record("list_categories".to_string());
        self.categories.lock().unwrap().clone().map_err(Failure::into_error)
    }

    async fn create_category(&self, category: &NewCategory) -> AppResult<()> {
        self.record(format!("create_category:{}", category.name));
        self.create_category_result
            .lock()
            .unwrap()
            .clone()
            .map_err(Failure::into_error)
    }

    async fn upload_receipts(&self, files: &[UploadFile]) -> AppResult<UploadResponse> {
        self.record(format!("upload_receipts:{}", files.len()));
        self.upload_result.lock().unwrap().clone().map_err(Failure::into_error)
    }
}

/// 通知を記録し、確認には決まった答えを返す
pub struct RecordingNotifier {
    pub answer: bool,
    pub alerts: RefCell<Vec<String>>,
    pub confirms: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            alerts: RefCell::new(Vec::new()),
            confirms: RefCell::new(Vec::new()),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.answer
    }
}
