//! Script abstraction: a unit of scan work with declared dependencies.

use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

use crate::core::types::ScriptId;

/// Errors that can occur while running a script's action.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The action reported a failure.
    #[error("{0}")]
    Failed(String),

    /// The action surfaced an underlying error.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Boxed future returned by closure-backed actions.
pub type ActionFuture = Pin<Box<dyn Future<Output = Result<(), ScriptError>> + Send>>;

/// The runnable behavior attached to a script.
///
/// The scheduler only needs a zero-argument action that may fail; what the
/// script actually scans and how stays outside the core.
#[async_trait]
pub trait ScriptAction: Send + Sync {
    /// Run the action to completion.
    async fn run(&self) -> Result<(), ScriptError>;
}

/// Adapter that turns an async closure into a [`ScriptAction`].
struct FnAction {
    inner: Box<dyn Fn() -> ActionFuture + Send + Sync>,
}

#[async_trait]
impl ScriptAction for FnAction {
    async fn run(&self) -> Result<(), ScriptError> {
        (self.inner)().await
    }
}

/// Action that does nothing and succeeds.
struct NoopAction;

#[async_trait]
impl ScriptAction for NoopAction {
    async fn run(&self) -> Result<(), ScriptError> {
        Ok(())
    }
}

/// A script: a unique id, the ids it depends on, and a run action.
///
/// The dependency list is kept exactly as declared. It may repeat ids or
/// name ids that are not part of the input set; the planner decides how to
/// treat those.
#[derive(Clone)]
pub struct Script {
    id: ScriptId,
    dependencies: Vec<ScriptId>,
    action: Arc<dyn ScriptAction>,
}

impl Script {
    /// Create a script with an explicit action.
    pub fn new<I>(id: impl Into<ScriptId>, dependencies: I, action: Arc<dyn ScriptAction>) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ScriptId>,
    {
        Self {
            id: id.into(),
            dependencies: dependencies.into_iter().map(Into::into).collect(),
            action,
        }
    }

    /// Create a script whose action is an async closure.
    pub fn from_fn<I, F, Fut>(id: impl Into<ScriptId>, dependencies: I, action: F) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ScriptId>,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ScriptError>> + Send + 'static,
    {
        let inner: Box<dyn Fn() -> ActionFuture + Send + Sync> =
            Box::new(move || -> ActionFuture { Box::pin(action()) });
        Self::new(id, dependencies, Arc::new(FnAction { inner }))
    }

    /// Create a script whose action does nothing and succeeds.
    pub fn noop<I>(id: impl Into<ScriptId>, dependencies: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ScriptId>,
    {
        Self::new(id, dependencies, Arc::new(NoopAction))
    }

    /// The script's id.
    pub fn id(&self) -> ScriptId {
        self.id
    }

    /// The declared dependency ids, in declaration order.
    pub fn dependencies(&self) -> &[ScriptId] {
        &self.dependencies
    }

    /// The script's run action.
    pub fn action(&self) -> &Arc<dyn ScriptAction> {
        &self.action
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Script")
            .field("id", &self.id)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}
