// CompletionService trait: the contract the demos talk to.

use std::future::Future;
use std::pin::Pin;

use crate::completion::Completion;
use crate::error::Error;
use crate::message::Message;

/// A boxed future that is Send.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Turns a conversation history into generated text.
///
/// Returns `BoxFuture` rather than using `async fn` so the trait can be
/// used as `Arc<dyn CompletionService>`.
pub trait CompletionService: Send + Sync {
    /// Service name used in logs (e.g., "anthropic", "mock").
    fn name(&self) -> &str;

    /// Send the conversation and return the generated reply.
    ///
    /// Authentication, network, rate-limit and malformed-request failures
    /// all surface as `Err`; callers may inspect `Error::kind` but are not
    /// required to.
    fn complete<'a>(
        &'a self,
        conversation: &'a [Message],
    ) -> BoxFuture<'a, Result<Completion, Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    struct EchoService;

    impl CompletionService for EchoService {
        fn name(&self) -> &str {
            "echo"
        }

        fn complete<'a>(
            &'a self,
            conversation: &'a [Message],
        ) -> BoxFuture<'a, Result<Completion, Error>> {
            Box::pin(async move {
                conversation
                    .last()
                    .map(|m| Completion::text(m.content.clone()))
                    .ok_or_else(|| Error::configuration("empty conversation"))
            })
        }
    }

    #[test]
    fn test_completion_service_trait_object() {
        let service: Box<dyn CompletionService> = Box::new(EchoService);
        assert_eq!(service.name(), "echo");
    }

    #[tokio::test]
    async fn test_completion_service_complete_through_trait_object() {
        let service: Box<dyn CompletionService> = Box::new(EchoService);
        let conversation = vec![Message::user("first"), Message::user("second")];
        let reply = service.complete(&conversation).await.unwrap();
        assert_eq!(reply.text, "second");
    }

    #[tokio::test]
    async fn test_completion_service_error_passthrough() {
        let service = EchoService;
        let err = service.complete(&[]).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
