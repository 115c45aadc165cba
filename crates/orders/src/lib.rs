//! Otomono Orders - order persistence cascade.
//!
//! Given a raw order submission, produce a durably stored, uniquely
//! identified order, or fail loudly only when every fallback is exhausted.
//!
//! The cascade tries an ordered list of storage tiers, each exposing the
//! uniform [`OrderStore`] capability:
//!
//! 1. [`DocumentStore`] - hosted document store (primary)
//! 2. [`RealtimeStore`] - hosted realtime store (secondary)
//! 3. [`LocalQueue`] - durable local JSON queue (last resort)
//!
//! Each tier is attempted with up to three tries and a doubling backoff
//! before the cascade falls through to the next. Records stranded in the
//! local queue are promoted back to the primary store by
//! [`OrderService::sync_pending`], one record at a time.
//!
//! Tiers are strictly sequential: no two backend writes are ever in flight
//! for the same order.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod error;
pub mod retry;
pub mod service;
pub mod store;

pub use analytics::{Analytics, AnalyticsEvent};
pub use error::{OrderError, StoreError};
pub use retry::{RetryPolicy, retry_with_backoff};
pub use service::{OrderService, SyncReport};
pub use store::{
    DocumentStore, DocumentStoreConfig, LocalQueue, OrderStore, RealtimeStore, RealtimeStoreConfig,
};
