mod formatting;
mod template;

pub use formatting::{formatting_template, render_formatting_prompt, DEFAULT_ASSISTANT_NAME};
pub use template::PromptTemplate;
