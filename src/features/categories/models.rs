use serde::{Deserialize, Serialize};

/// カテゴリーデータモデル
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Category {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// カテゴリー作成リクエスト
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}

/// カテゴリー追加フォームの入力値
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
}

impl CategoryForm {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// 入力値から作成リクエストを組み立てる
    pub fn to_request(&self) -> NewCategory {
        NewCategory {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }

    /// 入力欄を空にする
    pub fn clear(&mut self) {
        self.name.clear();
        self.description.clear();
    }
}
