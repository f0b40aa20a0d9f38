use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Index of the category column in a [`LogEntry`]
pub const CATEGORY_COLUMN: usize = 4;

/// A single log entry.
///
/// - `[0]`: Date (`31.12.23`)
/// - `[1]`: Time (`23:59:59`)
/// - `[2]`: Message
/// - `[3]`: Message ID
/// - `[4]`: Category ID
/// - `[5]`: Link to help page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogEntry(pub Vec<String>);

impl LogEntry {
    fn column(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }
    pub fn date(&self) -> Option<&str> {
        self.column(0)
    }
    pub fn time(&self) -> Option<&str> {
        self.column(1)
    }
    pub fn message(&self) -> Option<&str> {
        self.column(2)
    }
    pub fn message_id(&self) -> Option<&str> {
        self.column(3)
    }
    pub fn category(&self) -> Option<&str> {
        self.column(CATEGORY_COLUMN)
    }
    pub fn help_link(&self) -> Option<&str> {
        self.column(5)
    }
}

impl Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} {}] ({}) {}",
            self.date().unwrap_or("?"),
            self.time().unwrap_or("?"),
            self.category().unwrap_or("?"),
            self.message().unwrap_or_default()
        )
    }
}

/// Log categories as used by the `filter` parameter of the log page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogCategory {
    /// German: `Alle`
    All,
    /// German: `System`
    System,
    /// German: `Internetverbindung`
    Internet,
    /// German: `Telefonie`
    Phone,
    /// German: `WLAN`
    Wlan,
    /// German: `USB-Geräte`
    Usb,
}

impl LogCategory {
    pub fn id(self) -> i64 {
        match self {
            LogCategory::All => 0,
            LogCategory::System => 1,
            LogCategory::Internet => 2,
            LogCategory::Phone => 3,
            LogCategory::Wlan => 4,
            LogCategory::Usb => 5,
        }
    }

    pub fn from_id(id: i64) -> Option<LogCategory> {
        match id {
            0 => Some(LogCategory::All),
            1 => Some(LogCategory::System),
            2 => Some(LogCategory::Internet),
            3 => Some(LogCategory::Phone),
            4 => Some(LogCategory::Wlan),
            5 => Some(LogCategory::Usb),
            _ => None,
        }
    }
}

/// The log table, newest entry first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Logs(pub Vec<LogEntry>);

impl Logs {
    /// Keep the entries of one category.
    ///
    /// `0` keeps everything, `1..=5` keep entries whose category column is that
    /// number and anything else keeps nothing.
    pub fn filter(&self, category: i64) -> Logs {
        match LogCategory::from_id(category) {
            Some(category) => self.filter_category(category),
            None => Logs::default(),
        }
    }

    pub fn filter_category(&self, category: LogCategory) -> Logs {
        if category == LogCategory::All {
            return self.clone();
        }

        let id = category.id().to_string();
        Logs(
            self.0
                .iter()
                .filter(|entry| entry.category() == Some(id.as_str()))
                .cloned()
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.0.iter()
    }
}

impl IntoIterator for Logs {
    type Item = LogEntry;
    type IntoIter = std::vec::IntoIter<LogEntry>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
