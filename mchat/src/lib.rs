//! Mentor conversation entry points over a [`TextDispatcher`].
//!
//! `send_message` always answers with something displayable, while
//! `generate_outline` reports failure as `None`.

mod error;
mod notices;
mod prompts;
mod service;

pub mod prelude {
    pub use crate::{
        ChatError, ChatErrorKind, MentorService, MentorServiceBuilder, Notices, PromptTemplates,
    };
    pub use mprovider::{Attachment, TextDispatcher};
}

pub use error::{ChatError, ChatErrorKind};
pub use notices::Notices;
pub use prompts::PromptTemplates;
pub use service::{CHAT_OPERATION, MentorService, MentorServiceBuilder, OUTLINE_OPERATION};
pub use mprovider::{Attachment, TextDispatcher};
