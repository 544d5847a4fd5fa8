//! Per-connection deadline.
//!
//! Every suspension point of a connection (socket read, socket write, flush)
//! goes through [`with_deadline`], so an expired deadline surfaces as
//! [`HttpError::Timeout`] wherever the connection happens to be blocked.

use std::future::Future;
use std::io;

use tokio::time::{Instant, timeout_at};

use crate::http::error::{HttpError, HttpResult};

pub async fn with_deadline<F, T>(deadline: Option<Instant>, fut: F) -> HttpResult<T>
where
    F: Future<Output = io::Result<T>>,
{
    match deadline {
        Some(at) => match timeout_at(at, fut).await {
            Ok(res) => res.map_err(HttpError::Stream),
            Err(_) => Err(HttpError::Timeout),
        },
        None => fut.await.map_err(HttpError::Stream),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn no_deadline_passes_result_through() {
        let value = with_deadline(None, async { Ok::<_, io::Error>(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn expired_deadline_is_timeout() {
        let at = Instant::now() + Duration::from_millis(10);
        let res = with_deadline(Some(at), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, io::Error>(())
        })
        .await;
        assert!(matches!(res, Err(HttpError::Timeout)));
    }

    #[tokio::test]
    async fn io_error_maps_to_stream() {
        let res: HttpResult<()> = with_deadline(None, async {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        })
        .await;
        assert!(matches!(res, Err(HttpError::Stream(_))));
    }
}
