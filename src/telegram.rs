// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::utils::http_client;

// Long poll: the server holds the request up to POLL_WAIT_SECS; the client
// timeout must sit above it.
const POLL_WAIT_SECS: u64 = 50;
const CLIENT_TIMEOUT_SECS: u64 = 70;

/// Minimal blocking Bot API client: long-poll updates in, Markdown replies
/// (optionally with an inline keyboard) out.
pub struct Client {
    http: reqwest::blocking::Client,
    base: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub data: Option<String>,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboard {
    pub inline_keyboard: Vec<Vec<InlineButton>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineButton {
    pub text: String,
    pub callback_data: String,
}

impl InlineKeyboard {
    /// One button per row, the layout every choice set in the bot uses.
    pub fn rows(buttons: Vec<(String, String)>) -> Self {
        Self {
            inline_keyboard: buttons
                .into_iter()
                .map(|(text, callback_data)| {
                    vec![InlineButton {
                        text,
                        callback_data,
                    }]
                })
                .collect(),
        }
    }
}

/// What every handler produces; the dispatcher turns it into a sendMessage.
#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<InlineKeyboard>,
}

impl Reply {
    pub fn text(s: impl Into<String>) -> Self {
        Self {
            text: s.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(s: impl Into<String>, keyboard: InlineKeyboard) -> Self {
        Self {
            text: s.into(),
            keyboard: Some(keyboard),
        }
    }
}

impl Client {
    pub fn new(token: &str) -> Result<Self> {
        Ok(Self {
            http: http_client(CLIENT_TIMEOUT_SECS)?,
            base: format!("https://api.telegram.org/bot{}", token),
        })
    }

    fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        let resp = self
            .http
            .post(format!("{}/{}", self.base, method))
            .json(body)
            .send()?;
        let parsed: ApiResponse<T> = resp.json()?;
        if !parsed.ok {
            return Err(anyhow!(
                "telegram {} failed: {}",
                method,
                parsed.description.unwrap_or_else(|| "unknown error".into())
            ));
        }
        parsed
            .result
            .ok_or_else(|| anyhow!("telegram {} returned no result", method))
    }

    pub fn get_updates(&self, offset: i64) -> Result<Vec<Update>> {
        self.call(
            "getUpdates",
            &json!({
                "offset": offset,
                "timeout": POLL_WAIT_SECS,
                "allowed_updates": ["message", "callback_query"],
            }),
        )
    }

    pub fn send_reply(&self, chat_id: i64, reply: &Reply) -> Result<()> {
        let mut body = json!({
            "chat_id": chat_id,
            "text": reply.text,
            "parse_mode": "Markdown",
        });
        if let Some(ref kb) = reply.keyboard {
            body["reply_markup"] = serde_json::to_value(kb)?;
        }
        let _: Message = self.call("sendMessage", &body)?;
        Ok(())
    }

    pub fn edit_message_text(&self, chat_id: i64, message_id: i64, text: &str) -> Result<()> {
        let _: serde_json::Value = self.call(
            "editMessageText",
            &json!({
                "chat_id": chat_id,
                "message_id": message_id,
                "text": text,
                "parse_mode": "Markdown",
            }),
        )?;
        Ok(())
    }

    pub fn answer_callback(&self, callback_id: &str) -> Result<()> {
        let _: serde_json::Value =
            self.call("answerCallbackQuery", &json!({ "callback_query_id": callback_id }))?;
        Ok(())
    }
}
