//! Step observer trait for monitoring world steps.

/// Trait for observing soft-body world steps.
///
/// Implement this trait to monitor progress (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called after every body has accumulated its component forces, once
    /// per integration pass.
    fn on_forces(&mut self) {}

    /// Called after every body has been integrated, once per integration pass.
    fn on_integrate(&mut self) {}

    /// Called with the number of contacts found this step.
    fn on_contacts(&mut self, _count: usize) {}

    /// Called when a step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
