use std::sync::Arc;

use actix_web::{error::BlockingError, rt::time::timeout, web};
use anyhow::anyhow;

use crate::{database::AppointmentStore, error::ApiError, AppState};

pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>().map_err(|_| ApiError::InvalidId)
}

/// Runs a store call on the blocking pool, bounded by the request deadline.
///
/// On timeout the response is sent immediately; the statement itself keeps
/// running on its worker thread until the store returns.
pub async fn call_store<F, T>(state: &AppState, context: &'static str, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&dyn AppointmentStore) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    let task = web::block(move || f(&*store));

    match timeout(state.request_timeout, task).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(BlockingError::Error(cause))) => Err(ApiError::Storage { context, cause }),
        Ok(Err(BlockingError::Canceled)) => Err(ApiError::Storage {
            context,
            cause: anyhow!("blocking task was canceled"),
        }),
        Err(_) => Err(ApiError::Timeout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_integers_only() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("-3").unwrap(), -3);
        assert!(matches!(parse_id("abc"), Err(ApiError::InvalidId)));
        assert!(matches!(parse_id("4.2"), Err(ApiError::InvalidId)));
        assert!(matches!(parse_id(""), Err(ApiError::InvalidId)));
        assert!(matches!(parse_id("99999999999"), Err(ApiError::InvalidId)));
    }
}
