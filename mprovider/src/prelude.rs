//! Common `mprovider` imports for downstream crates.

pub use crate::{
    Attachment, CredentialLease, CredentialPool, DispatchReply, DispatchRequest,
    NoopOperationHooks, ProviderError, ProviderErrorKind, ProviderFuture, ProviderOperationHooks,
    RetryPolicy, SecretString, TextDispatcher, execute_with_rotation,
};
pub use mcommon::{BoxFuture, GenerationOptions};
