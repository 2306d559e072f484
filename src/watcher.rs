//! The poll-and-notify loop: fetch, validate, compare, notify, sleep.
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::model::{self, SchemaError};
use crate::practicum::{ApiError, HomeworkApi};
use crate::telegram::{self, Notifier};

/// Fixed sleep between poll cycles.
pub const RETRY_PERIOD: Duration = Duration::from_secs(600);

#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// In-memory loop state. Nothing survives a restart.
#[derive(Debug, Clone)]
pub struct PollState {
    /// Status of the most recent notification, the change-detection baseline.
    pub last_status: String,
    /// Set after the first failure is relayed to the chat; never reset, so
    /// only the first failure in the process lifetime is ever messaged.
    pub error_reported: bool,
}

impl Default for PollState {
    fn default() -> Self {
        Self {
            last_status: "reviewing".to_owned(),
            error_reported: false,
        }
    }
}

/// One poll cycle. Errors are recovered here at the loop boundary: logged
/// every occurrence, relayed to the chat only once per process lifetime.
#[instrument(skip_all)]
pub async fn run_cycle(
    api: &dyn HomeworkApi,
    notifier: &dyn Notifier,
    state: &mut PollState,
    from_date: i64,
) {
    if let Err(err) = poll_once(api, notifier, state, from_date).await {
        let message = format!("Сбой в работе программы: {err}");
        error!("{message}");
        if !state.error_reported {
            state.error_reported = true;
            telegram::send_best_effort(notifier, &message).await;
        }
    }
}

async fn poll_once(
    api: &dyn HomeworkApi,
    notifier: &dyn Notifier,
    state: &mut PollState,
    from_date: i64,
) -> Result<(), CycleError> {
    let body = api.fetch(from_date).await?;
    let homeworks = model::validate_response(&body)?;
    let Some(latest) = homeworks.first() else {
        debug!("no homeworks in response; nothing to report");
        return Ok(());
    };

    let status = latest
        .get("status")
        .and_then(Value::as_str)
        .ok_or(SchemaError::MissingStatus)?;
    if status == state.last_status {
        debug!(status, "status unchanged");
        return Ok(());
    }

    let message = model::parse_status(latest)?;
    telegram::send_best_effort(notifier, &message).await;
    state.last_status = status.to_owned();
    Ok(())
}

/// Run forever. The sleep is unconditional: success and failure both wait
/// the full period before the next cycle. The cursor is fixed at the value
/// computed at startup.
pub async fn run(
    api: &dyn HomeworkApi,
    notifier: &dyn Notifier,
    state: &mut PollState,
    from_date: i64,
    period: Duration,
) {
    loop {
        run_cycle(api, notifier, state, from_date).await;
        tokio::time::sleep(period).await;
    }
}
