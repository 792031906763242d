use thiserror::Error;

/// One tone the input text is rephrased into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDescriptor {
    pub key: String,
    pub label: String,
}

impl StyleDescriptor {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleSetError {
    #[error("at least one style must be configured")]
    Empty,
    #[error("style key must not be blank")]
    BlankKey,
    #[error("duplicate style key {0:?}")]
    DuplicateKey(String),
}

/// Ordered, non-empty set of styles with unique keys. Order is render order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSet {
    styles: Vec<StyleDescriptor>,
}

impl StyleSet {
    pub fn new(styles: Vec<StyleDescriptor>) -> Result<Self, StyleSetError> {
        if styles.is_empty() {
            return Err(StyleSetError::Empty);
        }
        for (idx, style) in styles.iter().enumerate() {
            if style.key.trim().is_empty() {
                return Err(StyleSetError::BlankKey);
            }
            if styles[..idx].iter().any(|earlier| earlier.key == style.key) {
                return Err(StyleSetError::DuplicateKey(style.key.clone()));
            }
        }
        Ok(Self { styles })
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleDescriptor> {
        self.styles.iter()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.styles.iter().position(|style| style.key == key)
    }
}

impl Default for StyleSet {
    fn default() -> Self {
        Self {
            styles: vec![
                StyleDescriptor::new("professional", "Professional"),
                StyleDescriptor::new("casual", "Casual"),
                StyleDescriptor::new("polite", "Polite"),
                StyleDescriptor::new("social", "Social-media"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_keeps_render_order() {
        let keys: Vec<_> = StyleSet::default().iter().map(|s| s.key.clone()).collect();
        assert_eq!(keys, ["professional", "casual", "polite", "social"]);
    }

    #[test]
    fn rejects_empty_and_duplicate_sets() {
        assert_eq!(StyleSet::new(Vec::new()), Err(StyleSetError::Empty));
        assert_eq!(
            StyleSet::new(vec![
                StyleDescriptor::new("a", "A"),
                StyleDescriptor::new("a", "Again"),
            ]),
            Err(StyleSetError::DuplicateKey("a".to_string()))
        );
        assert_eq!(
            StyleSet::new(vec![StyleDescriptor::new("  ", "Blank")]),
            Err(StyleSetError::BlankKey)
        );
    }
}
