//! User-facing messages in English and Chinese
//!
//! The language is a plain value carried in [`crate::AppConfig`]; nothing
//! here reads global state.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Display language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    #[inline]
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }

    /// Localized text for `message`
    #[must_use]
    pub fn text(self, message: &Message) -> String {
        match (self, message) {
            (Self::En, Message::EnterId) => "Enter an ID to generate".to_string(),
            (Self::Zh, Message::EnterId) => "输入ID以生成二维码".to_string(),
            (Self::En, Message::IdAlreadySaved) => "ID already saved.".to_string(),
            (Self::Zh, Message::IdAlreadySaved) => "该ID已保存。".to_string(),
            (Self::En, Message::CouldNotDecode) => "Could not decode QR code.".to_string(),
            (Self::Zh, Message::CouldNotDecode) => "无法识别二维码。".to_string(),
            (Self::En, Message::Imported(n)) => format!("Imported {n} tags successfully."),
            (Self::Zh, Message::Imported(n)) => format!("成功导入{n}个标签。"),
            (Self::En, Message::NothingImported) => "No tags imported.".to_string(),
            (Self::Zh, Message::NothingImported) => "未导入任何标签。".to_string(),
            (Self::En, Message::Saved(label)) => format!("Saved '{label}'."),
            (Self::Zh, Message::Saved(label)) => format!("已保存「{label}」。"),
            (Self::En, Message::NoSavedTags) => "No saved tags. Add one above.".to_string(),
            (Self::Zh, Message::NoSavedTags) => "暂无已保存标签，请先添加。".to_string(),
            (Self::En, Message::ShareLink) => "Share link:".to_string(),
            (Self::Zh, Message::ShareLink) => "分享链接：".to_string(),
            (Self::En, Message::AutoRefreshing(secs)) => format!("Auto-refreshing ({secs}s)"),
            (Self::Zh, Message::AutoRefreshing(secs)) => format!("自动刷新（{secs}秒）"),
            (Self::En, Message::Exported(n)) => format!("Saved {n} images."),
            (Self::Zh, Message::Exported(n)) => format!("已保存{n}张图片。"),
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "zh" => Ok(Self::Zh),
            other => Err(format!("unsupported language: {other} (expected en or zh)")),
        }
    }
}

/// Notices shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    EnterId,
    IdAlreadySaved,
    CouldNotDecode,
    Imported(usize),
    NothingImported,
    Saved(String),
    NoSavedTags,
    ShareLink,
    AutoRefreshing(u64),
    Exported(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes() {
        assert_eq!("ZH".parse::<Language>().unwrap(), Language::Zh);
        assert_eq!(" en ".parse::<Language>().unwrap(), Language::En);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn imported_count_is_interpolated() {
        assert_eq!(
            Language::En.text(&Message::Imported(3)),
            "Imported 3 tags successfully."
        );
        assert_eq!(Language::Zh.text(&Message::Imported(3)), "成功导入3个标签。");
    }
}
