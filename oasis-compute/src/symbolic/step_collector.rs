/// A type that collects the steps of an algorithm.
///
/// [`StepCollector`] is also implemented for the unit type `()`, which discards every step, and
/// for [`StepCount`], which only counts them.
pub trait StepCollector<S> {
    /// Adds a step to the collector.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        self.push(step);
    }
}

/// Counts the steps taken by an algorithm without storing them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepCount(pub usize);

impl<S> StepCollector<S> for StepCount {
    #[inline]
    fn push(&mut self, _: S) {
        self.0 += 1;
    }
}
