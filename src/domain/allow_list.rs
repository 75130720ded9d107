/// Recipients permitted to receive messages.
///
/// An empty list disables the restriction entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList(Vec<String>);

impl AllowList {
    pub fn new<I, S>(recipients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(recipients.into_iter().map(Into::into).collect())
    }

    /// Exact string match; no normalization is applied to either side.
    pub fn is_allowed(&self, phone: &str) -> bool {
        self.0.is_empty() || self.0.iter().any(|allowed| allowed == phone)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for AllowList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
