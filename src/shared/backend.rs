/// 領収書APIのエンドポイント定義
///
/// コマンド層はこのトレイト越しにAPIを呼び出す。
use crate::features::categories::models::{Category, NewCategory};
use crate::features::receipts::models::{UnverifiedReceipt, VerifiedReceipt};
use crate::features::uploads::models::{UploadFile, UploadResponse};
use crate::shared::api_client::ApiClient;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

pub const UNVERIFIED_RECEIPTS_ENDPOINT: &str = "/unverified-receipts";
pub const VERIFIED_RECEIPTS_ENDPOINT: &str = "/verified-receipts";
pub const CATEGORIES_ENDPOINT: &str = "/categories";
pub const UPLOAD_RECEIPTS_ENDPOINT: &str = "/upload-receipts";

/// 承認エンドポイント（IDはパスの1セグメントとしてエンコード）
pub fn approve_endpoint(receipt_id: &str) -> String {
    format!("/approve-receipt/{}", urlencoding::encode(receipt_id))
}

#[async_trait]
pub trait ReceiptBackend: Send + Sync {
    async fn list_unverified(&self) -> AppResult<Vec<UnverifiedReceipt>>;
    async fn list_verified(&self) -> AppResult<Vec<VerifiedReceipt>>;
    async fn approve(&self, receipt_id: &str) -> AppResult<()>;
    async fn list_categories(&self) -> AppResult<Vec<Category>>;
    async fn create_category(&self, category: &NewCategory) -> AppResult<()>;
    async fn upload_receipts(&self, files: &[UploadFile]) -> AppResult<UploadResponse>;
}

#[async_trait]
impl ReceiptBackend for ApiClient {
    async fn list_unverified(&self) -> AppResult<Vec<UnverifiedReceipt>> {
        self.get(UNVERIFIED_RECEIPTS_ENDPOINT).await
    }

    async fn list_verified(&self) -> AppResult<Vec<VerifiedReceipt>> {
        self.get(VERIFIED_RECEIPTS_ENDPOINT).await
    }

    async fn approve(&self, receipt_id: &str) -> AppResult<()> {
        self.post_empty(&approve_endpoint(receipt_id)).await
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.get(CATEGORIES_ENDPOINT).await
    }

    async fn create_category(&self, category: &NewCategory) -> AppResult<()> {
        self.post_json(CATEGORIES_ENDPOINT, category).await
    }

    async fn upload_receipts(&self, files: &[UploadFile]) -> AppResult<UploadResponse> {
        self.post_multipart(UPLOAD_RECEIPTS_ENDPOINT, files).await
    }
}
