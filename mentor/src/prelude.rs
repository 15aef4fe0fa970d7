//! Common imports for most mentor applications.

pub use crate::{
    Attachment, ChatError, ChatErrorKind, ConfigError, DispatchReply, DispatchRequest,
    GenerationOptions, MentorConfig, MentorService, MentorServiceBuilder, Notices,
    PromptTemplates, ProviderError, ProviderErrorKind, TextDispatcher, build_dispatcher,
    build_mentor_service, init_tracing, mentor_service_from_env,
};
