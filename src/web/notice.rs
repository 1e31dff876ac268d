// src/web/notice.rs

//! Transient status messages attached to responses — the JSON stand-in for
//! server-rendered flash messages.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
  Success,
  Info,
  Warning,
  Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notice {
  pub level: Level,
  pub message: String,
}

impl Notice {
  pub fn success(message: impl Into<String>) -> Self {
    Self {
      level: Level::Success,
      message: message.into(),
    }
  }

  pub fn info(message: impl Into<String>) -> Self {
    Self {
      level: Level::Info,
      message: message.into(),
    }
  }

  pub fn warning(message: impl Into<String>) -> Self {
    Self {
      level: Level::Warning,
      message: message.into(),
    }
  }
}
