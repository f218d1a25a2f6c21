/// A request to be sent to the model provider.
///
/// The message is the raw user text. Providers decide how to wrap it,
/// the advisor never rewrites it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModelRequest {
    /// The user message, verbatim.
    pub message: String,
}

impl ModelRequest {
    /// Creates a request carrying the given message.
    #[inline]
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}
