//! Output values
//!
//! An [`Output`] is a cheaply cloneable handle on a resource attribute that
//! is not known until the backend responds. Dependent resources consume
//! outputs through [`Input`], which defers their own registration until the
//! upstream value has resolved.

use crate::error::{Error, Result};
use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// An asynchronously resolved value.
///
/// Cloning an `Output` is cheap; all clones observe the same resolution.
/// Resolution errors are shared between clones as well.
#[derive(Clone)]
pub struct Output<T: Clone> {
    inner: Shared<BoxFuture<'static, std::result::Result<T, Arc<Error>>>>,
}

impl<T: Clone + Send + Sync + 'static> Output<T> {
    /// Create an already-resolved output
    pub fn ready(value: T) -> Self {
        Self {
            inner: futures::future::ready(Ok(value)).boxed().shared(),
        }
    }

    /// Wrap a pending resolution
    pub fn from_future<F>(fut: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        Self {
            inner: fut.map(|r| r.map_err(Arc::new)).boxed().shared(),
        }
    }

    /// Await the resolved value
    pub async fn get(&self) -> Result<T> {
        self.inner
            .clone()
            .await
            .map_err(|e| Error::output_resolution(e.to_string()))
    }

    /// Derive a new output by transforming the resolved value
    pub fn map<U, F>(&self, f: F) -> Output<U>
    where
        U: Clone + Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        Output {
            inner: self.inner.clone().map(|r| r.map(f)).boxed().shared(),
        }
    }

    /// Derive a new output by fallibly transforming the resolved value
    pub fn try_map<U, F>(&self, f: F) -> Output<U>
    where
        U: Clone + Send + 'static,
        F: FnOnce(T) -> Result<U> + Send + 'static,
    {
        Output {
            inner: self
                .inner
                .clone()
                .map(|r| match r {
                    Ok(value) => f(value).map_err(Arc::new),
                    Err(e) => Err(e),
                })
                .boxed()
                .shared(),
        }
    }
}

impl<T: Clone> fmt::Debug for Output<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output").finish_non_exhaustive()
    }
}

/// A resource argument: either a literal value or an upstream [`Output`].
///
/// Passing an output establishes an explicit dependency edge; the consuming
/// resource's registration waits for the value to resolve.
#[derive(Debug, Clone)]
pub enum Input<T: Clone> {
    /// A literal value known at declaration time
    Value(T),
    /// A value resolved by an upstream resource
    Output(Output<T>),
}

impl<T: Clone + Send + Sync + 'static> Input<T> {
    /// Resolve the input to a concrete value, awaiting upstream outputs
    pub async fn resolve(&self) -> Result<T> {
        match self {
            Self::Value(value) => Ok(value.clone()),
            Self::Output(output) => output.get().await,
        }
    }
}

impl<T: Clone> From<T> for Input<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: Clone> From<Output<T>> for Input<T> {
    fn from(output: Output<T>) -> Self {
        Self::Output(output)
    }
}

impl From<&str> for Input<String> {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ready_outputs_resolve_immediately() {
        let output = Output::ready(42);
        assert_eq!(output.get().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn clones_share_one_resolution() {
        let output = Output::from_future(async { Ok("sg-123".to_string()) });
        let clone = output.clone();
        assert_eq!(output.get().await.unwrap(), "sg-123");
        assert_eq!(clone.get().await.unwrap(), "sg-123");
    }

    #[tokio::test]
    async fn map_transforms_resolved_values() {
        let output = Output::ready(80).map(|port| format!("port {port}"));
        assert_eq!(output.get().await.unwrap(), "port 80");
    }

    #[tokio::test]
    async fn try_map_propagates_errors() {
        let output: Output<i64> =
            Output::ready(80).try_map(|_| Err(Error::output_resolution("bad state")));
        let err = output.get().await.unwrap_err();
        assert!(matches!(err, Error::OutputResolution { .. }));
    }

    #[tokio::test]
    async fn resolution_errors_reach_every_clone() {
        let output: Output<String> =
            Output::from_future(async { Err(Error::output_resolution("backend gone")) });
        let clone = output.clone();
        assert!(output.get().await.is_err());
        assert!(clone.get().await.is_err());
    }

    #[tokio::test]
    async fn inputs_resolve_literals_and_outputs() {
        let literal: Input<String> = "tcp".into();
        assert_eq!(literal.resolve().await.unwrap(), "tcp");

        let wired: Input<String> = Output::ready("sg-1".to_string()).into();
        assert_eq!(wired.resolve().await.unwrap(), "sg-1");
    }
}
