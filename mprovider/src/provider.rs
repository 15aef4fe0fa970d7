use mcommon::BoxFuture;

use crate::{DispatchReply, DispatchRequest, ProviderError};

pub type ProviderFuture<'a, T> = BoxFuture<'a, T>;

/// Seam between the entry points and whatever resolves a prompt to text.
pub trait TextDispatcher: Send + Sync {
    fn dispatch<'a>(
        &'a self,
        request: DispatchRequest,
    ) -> ProviderFuture<'a, Result<DispatchReply, ProviderError>>;
}
