//! Cooperative scheduling helpers for long-running work on the UI thread.

/// Hands control back to the event loop once before resuming.
#[cfg(target_arch = "wasm32")]
pub async fn yield_now() {
    gloo_timers::future::TimeoutFuture::new(0).await;
}

/// Hands control back to the event loop once before resuming.
#[cfg(not(target_arch = "wasm32"))]
pub async fn yield_now() {
    tokio::task::yield_now().await;
}
