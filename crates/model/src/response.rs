/// A complete reply from the model provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModelReply {
    /// The generated text, to be shown to the user as is.
    pub text: String,
}

impl ModelReply {
    /// Creates a reply with the given text.
    #[inline]
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }
}

impl From<ModelReply> for String {
    #[inline]
    fn from(reply: ModelReply) -> Self {
        reply.text
    }
}
