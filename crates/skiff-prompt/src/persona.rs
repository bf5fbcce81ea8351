use crate::classifier::is_code_request;

const CODE_SYSTEM_MESSAGE: &str = "You are a helpful coding assistant. When providing code examples:
1. Include clear comments explaining the code
2. Use proper formatting with markdown code blocks (```)
3. Specify the programming language
4. Add brief explanations before and after the code
5. Follow best practices and conventions";

const GENERAL_SYSTEM_MESSAGE: &str = "You are a helpful AI assistant. Provide clear and concise responses. \
Keep your answers natural and conversational. Only use code blocks when specifically \
discussing code or technical concepts that require them.";

/// The static system-message template selected per request. Not stored in
/// history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persona {
    CodeAssistant,
    GeneralAssistant,
}

impl Persona {
    /// Classify the fully assembled user text (message plus file
    /// sections).
    pub fn for_message(text: &str) -> Self {
        if is_code_request(text) {
            Persona::CodeAssistant
        } else {
            Persona::GeneralAssistant
        }
    }

    pub fn system_message(&self) -> &'static str {
        match self {
            Persona::CodeAssistant => CODE_SYSTEM_MESSAGE,
            Persona::GeneralAssistant => GENERAL_SYSTEM_MESSAGE,
        }
    }
}
