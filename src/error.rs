#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BagError {
    #[error("bag elements cannot be nil")]
    InvalidElement,
    #[error("can't convert {type_name} to Bag")]
    UnsupportedOperand { type_name: &'static str },
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },
}

impl BagError {
    pub fn error_code(&self) -> &'static str {
        match self {
            BagError::InvalidElement => "BAG-E001",
            BagError::UnsupportedOperand { .. } => "BAG-E002",
            BagError::InvalidArgument { .. } => "BAG-E003",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BagError;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(BagError::InvalidElement.to_string(), "bag elements cannot be nil");
        assert_eq!(
            BagError::UnsupportedOperand { type_name: "Integer" }.to_string(),
            "can't convert Integer to Bag"
        );
        assert_eq!(
            BagError::InvalidArgument { reason: "negative array size" }.to_string(),
            "invalid argument: negative array size"
        );
    }

    #[test]
    fn codes_are_distinct() {
        let codes = [
            BagError::InvalidElement.error_code(),
            BagError::UnsupportedOperand { type_name: "Symbol" }.error_code(),
            BagError::InvalidArgument { reason: "x" }.error_code(),
        ];
        assert_ne!(codes[0], codes[1]);
        assert_ne!(codes[1], codes[2]);
        assert_ne!(codes[0], codes[2]);
    }
}
