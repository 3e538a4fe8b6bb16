//! Execution contexts and the policy-to-context mapping.
//!
//! A context is a zero-sized tag naming "where kernels run". Operations
//! accept a *policy* value and map it to a context through [`ExecPolicy`];
//! the context then selects kernels through
//! [`KernelProvider`](crate::provider::KernelProvider). Contexts are
//! stateless and constructed transiently per call.

/// Tag type naming an execution context.
pub trait ExecContext: Copy + Default + 'static {
    /// Whether this context unconditionally runs the reference kernels,
    /// bypassing provider hooks. Exactly one context sets this.
    const IS_INLINE: bool = false;
}

/// Context that always runs the portable reference kernels directly.
///
/// Specialized kernels registered for other contexts are never consulted;
/// this is the escape hatch those kernels themselves use as a fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineExec;

/// The context no-policy entry points run under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultExec;

impl ExecContext for InlineExec {
    const IS_INLINE: bool = true;
}

impl ExecContext for DefaultExec {}

/// Pluggable mapping from caller-facing policy values to execution contexts.
///
/// Every context is trivially its own policy. Downstream crates with richer
/// policy types (thread pools, device handles) implement this to route their
/// policies onto a context tag.
pub trait ExecPolicy {
    type Context: ExecContext;

    fn into_context(self) -> Self::Context;
}

impl ExecPolicy for InlineExec {
    type Context = InlineExec;

    #[inline]
    fn into_context(self) -> InlineExec {
        self
    }
}

impl ExecPolicy for DefaultExec {
    type Context = DefaultExec;

    #[inline]
    fn into_context(self) -> DefaultExec {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_flag() {
        assert!(InlineExec::IS_INLINE);
        assert!(!DefaultExec::IS_INLINE);
    }

    #[test]
    fn test_policy_round_trip() {
        let _: DefaultExec = DefaultExec.into_context();
        let _: InlineExec = InlineExec.into_context();
    }
}
