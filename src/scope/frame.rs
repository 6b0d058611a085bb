use crate::{error::EvalError, interpreter::value::core::Value, scope::Bindings};

/// Depths below this select no frame: they denote the evaluation machinery
/// itself, which has no bindings of its own.
pub const FIRST_CALLER_DEPTH: usize = 2;

/// The bindings visible at one level of the caller's call chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Names local to this level.
    pub locals:  Bindings,
    /// Names global to this level.
    pub globals: Bindings,
}

impl Frame {
    /// Creates a frame from its two namespaces.
    #[must_use]
    pub const fn new(locals: Bindings, globals: Bindings) -> Self {
        Self { locals, globals }
    }

    /// Adds a local binding.
    #[must_use]
    pub fn with_local(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.locals.insert(name.into(), value.into());
        self
    }

    /// Adds a global binding.
    #[must_use]
    pub fn with_global(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.globals.insert(name.into(), value.into());
        self
    }
}

/// A caller-maintained stack of frames, innermost last.
///
/// Depth `2` selects the innermost frame, `3` the one below it, and so on.
///
/// # Example
/// ```
/// use scopeval::scope::frame::{CallStack, Frame};
///
/// let mut stack = CallStack::new();
/// stack.push(Frame::default().with_local("outer", 1_i64));
/// stack.push(Frame::default().with_local("inner", 2_i64));
///
/// let innermost = stack.frame_at(2).unwrap().unwrap();
/// assert!(innermost.locals.contains_key("inner"));
///
/// assert!(stack.frame_at(3).unwrap().is_some());
/// assert!(stack.frame_at(4).is_err());
/// assert!(stack.frame_at(1).unwrap().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallStack {
    frames: Vec<Frame>,
}

impl CallStack {
    /// Creates an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Enters a new, innermost frame.
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Leaves the innermost frame.
    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    /// Number of frames on the stack.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` when no frame has been pushed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Selects the frame at `depth`.
    ///
    /// Depths `0` and `1` select nothing.
    ///
    /// # Errors
    /// `EvalError::ContextDepth` when the stack is shallower than `depth`.
    pub fn frame_at(&self, depth: usize) -> Result<Option<&Frame>, EvalError> {
        let Some(offset) = depth.checked_sub(FIRST_CALLER_DEPTH) else {
            return Ok(None);
        };
        self.frames
            .iter()
            .rev()
            .nth(offset)
            .map(Some)
            .ok_or(EvalError::ContextDepth { depth,
                                             available: self.frames.len() })
    }
}

impl FromIterator<Frame> for CallStack {
    fn from_iter<T: IntoIterator<Item = Frame>>(iter: T) -> Self {
        Self { frames: iter.into_iter().collect() }
    }
}
