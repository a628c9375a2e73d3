/// Operand stack used by the VM.
///
/// Popping an empty stack returns `None` so the VM can report a
/// [`StackUnderflow`](crate::vm::RuntimeError::StackUnderflow) for
/// hand-written instruction sequences instead of panicking.
///
/// # Examples
///
/// ```ignore
/// use stackc_core::vm::Stack;
///
/// let mut stack = Stack::new(4);
/// stack.push(42.0);
/// stack.push(17.0);
/// assert_eq!(stack.pop(), Some(17.0));
/// assert_eq!(stack.peek(), Some(&42.0));
/// assert_eq!(stack.len(), 1);
/// ```
#[derive(Debug)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    /// Creates an empty stack with room for `capacity` elements.
    ///
    /// Pre-allocation is capped at 256 elements; the stack grows past
    /// `capacity` if a sequence needs more.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity.min(256)),
        }
    }

    #[inline]
    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    /// Removes and returns the top value, or `None` if the stack is empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    #[cfg(test)]
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
