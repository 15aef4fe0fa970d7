/// Fixed texts handed back to the user in place of a model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notices {
    /// Returned when the model refused the prompt on content-safety grounds.
    pub safety_block: String,
    /// Returned by `send_message` when every attempt failed.
    pub connectivity_failure: String,
}

impl Notices {
    pub fn with_safety_block(mut self, text: impl Into<String>) -> Self {
        self.safety_block = text.into();
        self
    }

    pub fn with_connectivity_failure(mut self, text: impl Into<String>) -> Self {
        self.connectivity_failure = text.into();
        self
    }
}

impl Default for Notices {
    fn default() -> Self {
        Self {
            safety_block: "\u{26a0}\u{fe0f} This message was blocked by the model's safety \
                filters. Try rephrasing it less explicitly."
                .to_string(),
            connectivity_failure: "CONNECTION ERROR: check that your API keys are valid and \
                that you are online. The mentor could not reach the model servers."
                .to_string(),
        }
    }
}
