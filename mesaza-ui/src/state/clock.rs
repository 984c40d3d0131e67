//! Browser clock for the reveal sequencer

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use mesaza::Clock;

/// Wall clock on `Date.now()` with `setTimeout` sleeps
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

#[async_trait(?Send)]
impl Clock for BrowserClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    async fn sleep_ms(&self, ms: u64) {
        TimeoutFuture::new(ms.min(u32::MAX as u64) as u32).await;
    }
}
