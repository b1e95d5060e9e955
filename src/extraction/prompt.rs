//! Fixed instruction prompt wrapped around the historical document

use crate::io::error::Result;
use minijinja::{Environment, context};

const CLUE_EXTRACTION_TEMPLATE: &str = include_str!("clue_extraction.md");
const TEMPLATE_NAME: &str = "clue_extraction.md";

/// Compiled clue-extraction prompt
pub struct PromptTemplate {
    env: Environment<'static>,
}

impl PromptTemplate {
    /// Compile the built-in template
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded template fails to parse
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, CLUE_EXTRACTION_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Embed `document` verbatim; no truncation or token budgeting is applied
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails
    pub fn render(&self, document: &str) -> Result<String> {
        let template = self.env.get_template(TEMPLATE_NAME)?;
        Ok(template.render(context! { document => document })?)
    }
}
