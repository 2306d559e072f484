//! Outbound notifications to the one configured Telegram chat.
use anyhow::Result;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ChatId;
use tracing::{debug, error};

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<()>;
}

pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    pub fn new(token: &str, chat_id: i64) -> Self {
        Self {
            bot: Bot::new(token),
            chat_id: ChatId(chat_id),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        self.bot.send_message(self.chat_id, text).await?;
        Ok(())
    }
}

/// Delivery failures are logged and swallowed, never retried.
pub async fn send_best_effort(notifier: &dyn Notifier, text: &str) {
    match notifier.send(text).await {
        Ok(()) => debug!(text, "notification sent"),
        Err(err) => error!(?err, "failed to send notification"),
    }
}
