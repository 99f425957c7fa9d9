/*
 * Responsibility
 * - Decide whether a request path needs a bearer token
 * - Exemption is literal substring containment on the raw path (no normalization)
 */

#[derive(Debug, Clone, Default)]
pub struct RouteClassifier {
    open_fragments: Vec<String>,
}

impl RouteClassifier {
    pub fn new<I, S>(open_fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            open_fragments: open_fragments.into_iter().map(Into::into).collect(),
        }
    }

    /// `false` when any exemption fragment occurs anywhere in `path`.
    pub fn requires_auth(&self, path: &str) -> bool {
        !self
            .open_fragments
            .iter()
            .any(|fragment| path.contains(fragment.as_str()))
    }

    pub fn open_fragments(&self) -> &[String] {
        &self.open_fragments
    }
}
