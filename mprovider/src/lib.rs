//! Resilient dispatch of prompts to a generative-language API.
//!
//! The crate exposes a credential pool with a shared rotation cursor, a typed
//! error taxonomy, a retry loop that walks the pool, and (behind the
//! `provider-gemini` feature) a Gemini `generateContent` adapter.
//!
//! ```rust
//! use mprovider::{CredentialPool, RetryPolicy};
//!
//! let pool = CredentialPool::new(["key-a", "key-b"]).expect("non-empty pool");
//! let policy = RetryPolicy::for_pool(&pool);
//! assert_eq!(policy.max_attempts, 2);
//! ```

pub mod adapters;
pub mod credentials;
pub mod error;
pub mod model;
pub mod prelude;
pub mod provider;
pub mod resilience;

pub use credentials::{CredentialLease, CredentialPool, SecretString};
pub use error::{ProviderError, ProviderErrorKind};
pub use model::{Attachment, DispatchReply, DispatchRequest};
pub use provider::{ProviderFuture, TextDispatcher};
pub use resilience::{
    DEFAULT_RETRY_DELAY, NoopOperationHooks, ProviderOperationHooks, RetryPolicy,
    execute_with_rotation,
};
