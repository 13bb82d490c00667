//! Iteration failures

/// The per-element callback failed for the element at `index`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("element {index} failed: {error}")]
pub struct ElementFault<E> {
    /// Position of the failing element
    pub index: usize,
    /// The raw error returned by the callback
    pub error: E,
}

impl<E> ElementFault<E> {
    /// Unwrap the raw error
    pub fn into_inner(self) -> E {
        self.error
    }
}

/// Failure of an awaited iteration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IterateError<E> {
    /// An element callback failed
    #[error("{0}")]
    Element(ElementFault<E>),

    /// Every continuation was dropped before the iteration reached its end
    #[error("iteration stalled: a continuation was dropped without being resumed")]
    Abandoned,
}

impl<E> From<ElementFault<E>> for IterateError<E> {
    fn from(fault: ElementFault<E>) -> Self {
        IterateError::Element(fault)
    }
}
