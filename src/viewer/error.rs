use thiserror::Error;

/// A failure while drawing an ingredient.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render fault: {0}")]
    Fault(String),

    #[error("failed to render ingredient {ingredient}")]
    Ingredient {
        ingredient: String,
        #[source]
        source: Box<RenderError>,
    },
}

impl RenderError {
    pub fn fault(message: impl Into<String>) -> Self {
        Self::Fault(message.into())
    }
}

/// A failure while building or drawing a tooltip. Always logged, never fatal.
#[derive(Debug, Error)]
pub enum TooltipError {
    #[error("no tooltip for {ingredient}: {reason}")]
    Lines { ingredient: String, reason: String },

    #[error("tooltip callback failed: {0}")]
    Callback(String),
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_ingredient_error_keeps_source() {
        let err = RenderError::Ingredient {
            ingredient: "Cube x2".into(),
            source: Box::new(RenderError::fault("texture missing")),
        };
        assert_eq!(err.to_string(), "failed to render ingredient Cube x2");
        assert_eq!(
            err.source().map(|s| s.to_string()).as_deref(),
            Some("render fault: texture missing")
        );
    }
}
