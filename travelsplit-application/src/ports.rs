use crate::{error::DocumentParseError, model::InputDocument};

pub trait DocumentParser: Send + Sync {
    fn parse(&self, content: &str) -> Result<InputDocument, DocumentParseError>;
}
