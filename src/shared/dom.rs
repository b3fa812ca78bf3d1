/// 画面要素のモデル
///
/// 各領域（リージョン）はひとつのレンダラーだけが書き込むHTMLバッファを持つ。
/// 動的に生成されたカード内のボタンはリージョンに登録され、
/// クリックはリージョン単位で受け取って対象の属性で振り分ける。
use crate::shared::utils::{escape_attribute, escape_text};
use std::collections::BTreeMap;

/// カード内のクリック可能な要素
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub class_list: Vec<String>,
    pub dataset: BTreeMap<String, String>,
    pub label: String,
}

impl Control {
    pub fn button(class_name: &str, label: &str) -> Self {
        Self {
            class_list: vec![class_name.to_string()],
            dataset: BTreeMap::new(),
            label: label.to_string(),
        }
    }

    pub fn with_data(mut self, key: &str, value: &str) -> Self {
        self.dataset.insert(key.to_string(), value.to_string());
        self
    }

    pub fn has_class(&self, class_name: &str) -> bool {
        self.class_list.iter().any(|c| c == class_name)
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.dataset.get(key).map(String::as_str)
    }

    /// `<button>` 要素としてHTML化する
    pub fn to_html(&self) -> String {
        let data_attrs: String = self
            .dataset
            .iter()
            .map(|(key, value)| format!(" data-{key}=\"{}\"", escape_attribute(value)))
            .collect();
        format!(
            "<button class=\"{}\"{data_attrs}>{}</button>",
            escape_attribute(&self.class_list.join(" ")),
            escape_text(&self.label)
        )
    }
}

/// リージョン内に描画される1件分のカード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub class_name: String,
    /// カード本文（エスケープ済みHTML）
    pub body_html: String,
    pub controls: Vec<Control>,
}

impl Card {
    pub fn new(class_name: &str, body_html: String) -> Self {
        Self {
            class_name: class_name.to_string(),
            body_html,
            controls: Vec::new(),
        }
    }

    pub fn with_control(mut self, control: Control) -> Self {
        self.controls.push(control);
        self
    }

    pub fn to_html(&self) -> String {
        let controls: String = self.controls.iter().map(Control::to_html).collect();
        format!(
            "<div class=\"{}\">{}{controls}</div>",
            escape_attribute(&self.class_name),
            self.body_html
        )
    }
}

/// クリックイベント
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub target: Control,
}

impl ClickEvent {
    pub fn on(target: &Control) -> Self {
        Self {
            target: target.clone(),
        }
    }
}

/// フォーム送信イベント
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// 送信によるページ再読み込みを止める
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// 画面上の1領域
///
/// 中身は「先頭のHTML（見出し・プレースホルダー・エラー）」と
/// 「カードの並び」で構成される。
#[derive(Debug, Clone)]
pub struct Region {
    selector: &'static str,
    html: String,
    cards: Vec<Card>,
}

impl Region {
    pub fn new(selector: &'static str) -> Self {
        Self {
            selector,
            html: String::new(),
            cards: Vec::new(),
        }
    }

    pub fn selector(&self) -> &'static str {
        self.selector
    }

    /// 領域の中身をすべて置き換える（カードも消える）
    pub fn set_inner_html(&mut self, html: impl Into<String>) {
        self.html = html.into();
        self.cards.clear();
    }

    /// 先頭HTMLの末尾に追記する
    pub fn push_html(&mut self, html: &str) {
        self.html.push_str(html);
    }

    pub fn append_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// 指定クラスと `data-id` を持つコントロールを探す
    pub fn find_control(&self, class_name: &str, id: &str) -> Option<&Control> {
        self.cards
            .iter()
            .flat_map(|card| card.controls.iter())
            .find(|control| control.has_class(class_name) && control.data("id") == Some(id))
    }

    pub fn inner_html(&self) -> String {
        let mut html = self.html.clone();
        for card in &self.cards {
            html.push_str(&card.to_html());
        }
        html
    }

    /// エラーメッセージだけを表示する
    pub fn show_error(&mut self, message: &str) {
        self.set_inner_html(format!(
            "<p style=\"color: red;\">{}</p>",
            escape_text(message)
        ));
    }
}

/// ステータス表示の色分け
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Warning,
    Info,
    Success,
    Error,
}

impl StatusTone {
    pub fn color(&self) -> &'static str {
        match self {
            StatusTone::Warning => "orange",
            StatusTone::Info => "blue",
            StatusTone::Success => "green",
            StatusTone::Error => "red",
        }
    }
}

/// 1行のステータス表示
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub tone: Option<StatusTone>,
}

impl StatusLine {
    pub fn set(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.text = text.into();
        self.tone = Some(tone);
    }

    pub fn to_html(&self) -> String {
        match self.tone {
            Some(tone) => format!(
                "<p id=\"upload-status\" style=\"color: {};\">{}</p>",
                tone.color(),
                escape_text(&self.text)
            ),
            None => "<p id=\"upload-status\"></p>".to_string(),
        }
    }
}

/// ユーザーへの通知と確認
pub trait Notifier {
    /// ブロッキングな通知
    fn alert(&self, message: &str);
    /// はい/いいえの確認
    fn confirm(&self, message: &str) -> bool;
}
