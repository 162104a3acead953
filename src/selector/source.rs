//! The option source capability injected by the host.

use std::future::Future;
use std::pin::Pin;

use super::error::FetchError;
use super::option::{QueryState, SelectOption};

/// Future returned by [`OptionSource::fetch`].
pub type FetchFuture =
    Pin<Box<dyn Future<Output = Result<Vec<SelectOption>, FetchError>> + Send + 'static>>;

/// Supplies dropdown options for a query.
///
/// This is the selector's only I/O boundary. Calling `fetch` issues the
/// request; the returned future resolves once the options are available.
pub trait OptionSource: Send + Sync + 'static {
    fn fetch(&self, query: QueryState) -> FetchFuture;
}

impl<F, Fut> OptionSource for F
where
    F: Fn(QueryState) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<SelectOption>, FetchError>> + Send + 'static,
{
    fn fetch(&self, query: QueryState) -> FetchFuture {
        Box::pin(self(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_closure_is_an_option_source() {
        let source = |query: QueryState| async move {
            if query.input_value == "fail" {
                Err(FetchError::new("boom"))
            } else {
                Ok(vec![SelectOption::new(query.input_value.clone(), "Echo")])
            }
        };

        let options = source.fetch(QueryState::new("ru")).await.unwrap();
        assert_eq!(options, vec![SelectOption::new("ru", "Echo")]);

        let err = source.fetch(QueryState::new("fail")).await.unwrap_err();
        assert_eq!(err.message(), "boom");
    }
}
