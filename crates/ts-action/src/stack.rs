use crate::ActionStep;

/// LIFO of pending steps.  The last pushed step runs first.
#[derive(Clone, Debug, Default)]
pub struct ActionStack {
    steps: Vec<ActionStep>,
}

impl ActionStack {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, step: ActionStep) {
        self.steps.push(step);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<ActionStep> {
        self.steps.pop()
    }

    #[inline]
    pub fn top(&self) -> Option<&ActionStep> {
        self.steps.last()
    }

    /// Discard every pending step without running it.
    #[inline]
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps in execution order, top of the stack first.
    pub fn iter(&self) -> impl Iterator<Item = &ActionStep> + '_ {
        self.steps.iter().rev()
    }
}
