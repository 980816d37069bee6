use std::fmt::{Debug, Display};

#[derive(Debug, Clone, thiserror::Error)]
pub enum AgentError<E: Debug + Display> {
    #[error("{context}: {inner}")]
    Scope { context: String, inner: E },
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("Network request for {url} failed and it isn't cached: {inner}")]
    Offline { url: String, inner: E },
}

pub trait ResultContext<T, E: Debug + Display> {
    fn context<S: Into<String>>(self, context: S) -> Result<T, AgentError<E>>;
    fn with_context<S: Into<String>, F: FnOnce() -> S>(self, context: F)
        -> Result<T, AgentError<E>>;
}

impl<T, E: Debug + Display> ResultContext<T, E> for Result<T, E> {
    fn context<S: Into<String>>(self, context: S) -> Result<T, AgentError<E>> {
        self.map_err(|inner| AgentError::Scope {
            context: context.into(),
            inner,
        })
    }

    fn with_context<S: Into<String>, F: FnOnce() -> S>(
        self,
        context: F,
    ) -> Result<T, AgentError<E>> {
        self.map_err(|inner| AgentError::Scope {
            context: context().into(),
            inner,
        })
    }
}
