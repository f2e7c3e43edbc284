use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unbalanced brackets in variation record {record}")]
    UnbalancedBrackets { record: usize },

    #[error("variation record {record} has a {found} name, expected text")]
    InvalidVariationName { record: usize, found: &'static str },

    #[error("attribute at byte {offset} has an empty name")]
    EmptyAttributeName { offset: usize },
}
