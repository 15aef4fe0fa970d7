//! Prompt assembly for the chat and outline entry points.
//!
//! ```rust
//! use mchat::PromptTemplates;
//!
//! let templates = PromptTemplates::default().with_system_instruction("Be brief.");
//! assert_eq!(
//!     templates.chat_prompt("hi"),
//!     "Be brief.\n\n---\n\nUSER: hi\n\nMENTOR:"
//! );
//! ```

/// Placeholder replaced by the topic in [`PromptTemplates::outline_template`].
pub const TOPIC_PLACEHOLDER: &str = "{topic}";

const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a pragmatic mentor. Answer with direct, \
actionable guidance. Prefer concrete next steps over theory, keep answers short, and ask \
a clarifying question only when the request is genuinely ambiguous.";

const DEFAULT_OUTLINE_TEMPLATE: &str = "ACT AS AN ELITE STRATEGIST.
Build a hierarchical mind map (indented plain text) that untangles this problem: \"{topic}\".

RULES:
1. Use plain text only.
2. Show the hierarchy with the markers -, * and +.
3. Be ruthlessly practical. No theory, only actions.

Return ONLY the map.";

/// System instruction and templates used to build outbound prompts.
///
/// The system instruction is inlined at the top of every chat prompt rather
/// than sent as a separate API field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplates {
    pub system_instruction: String,
    pub user_label: String,
    pub mentor_label: String,
    /// Must contain [`TOPIC_PLACEHOLDER`].
    pub outline_template: String,
}

impl PromptTemplates {
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    pub fn with_labels(mut self, user: impl Into<String>, mentor: impl Into<String>) -> Self {
        self.user_label = user.into();
        self.mentor_label = mentor.into();
        self
    }

    pub fn with_outline_template(mut self, template: impl Into<String>) -> Self {
        self.outline_template = template.into();
        self
    }

    pub fn chat_prompt(&self, message: &str) -> String {
        format!(
            "{}\n\n---\n\n{}: {}\n\n{}:",
            self.system_instruction, self.user_label, message, self.mentor_label
        )
    }

    pub fn outline_prompt(&self, topic: &str) -> String {
        self.outline_template.replace(TOPIC_PLACEHOLDER, topic)
    }
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
            user_label: "USER".to_string(),
            mentor_label: "MENTOR".to_string(),
            outline_template: DEFAULT_OUTLINE_TEMPLATE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_prompt_places_message_between_labels() {
        let prompt = PromptTemplates::default().chat_prompt("How do I start?");

        assert!(prompt.starts_with(DEFAULT_SYSTEM_INSTRUCTION));
        assert!(prompt.ends_with("\n\n---\n\nUSER: How do I start?\n\nMENTOR:"));
    }

    #[test]
    fn outline_prompt_substitutes_topic() {
        let prompt = PromptTemplates::default().outline_prompt("launching a side project");

        assert!(prompt.contains("\"launching a side project\""));
        assert!(!prompt.contains(TOPIC_PLACEHOLDER));
        assert!(prompt.contains("-, * and +"));
    }

    #[test]
    fn labels_are_configurable() {
        let prompt = PromptTemplates::default()
            .with_system_instruction("sys")
            .with_labels("USUARIO", "MENTOR")
            .chat_prompt("oi");

        assert_eq!(prompt, "sys\n\n---\n\nUSUARIO: oi\n\nMENTOR:");
    }
}
