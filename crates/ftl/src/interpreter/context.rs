//! Resolution context for tracking state during recursive resolution.

use std::mem;

use log::trace;

use crate::interpreter::ResolveError;
use crate::types::{Args, Value};

/// Default maximum nesting of message and term references.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default maximum number of placeables written by one top-level resolution.
pub const DEFAULT_MAX_PLACEABLES: usize = 100;

/// Whether a call-stack frame belongs to a message or a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FrameKind {
    Message,
    Term,
}

/// One in-flight message or term pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Frame {
    kind: FrameKind,
    id: String,
    attribute: Option<String>,
}

impl Frame {
    pub(crate) fn message(id: &str, attribute: Option<&str>) -> Self {
        Self {
            kind: FrameKind::Message,
            id: id.to_string(),
            attribute: attribute.map(ToString::to_string),
        }
    }

    pub(crate) fn term(id: &str, attribute: Option<&str>) -> Self {
        Self {
            kind: FrameKind::Term,
            id: id.to_string(),
            attribute: attribute.map(ToString::to_string),
        }
    }

    /// The reference as written in FTL, e.g. `-brand.gender`.
    fn display_id(&self) -> String {
        let prefix = match self.kind {
            FrameKind::Message => "",
            FrameKind::Term => "-",
        };
        match &self.attribute {
            Some(attribute) => format!("{prefix}{}.{attribute}", self.id),
            None => format!("{prefix}{}", self.id),
        }
    }
}

/// Resolution context carrying state through recursive resolution.
///
/// The context tracks:
/// - Variables available in the current scope
/// - Call stack of in-flight messages and terms, for cycle detection
/// - The placeable budget shared by the whole top-level resolution
/// - Errors collected so far
///
/// One context belongs to one top-level resolution and is never shared.
pub(crate) struct ResolveContext<'a> {
    /// Variables visible in this scope.
    args: Option<&'a Args>,
    /// Call stack for cycle detection.
    stack: Vec<Frame>,
    max_depth: usize,
    placeables: usize,
    max_placeables: usize,
    /// Set once the placeable budget is exhausted; stops all further output.
    dirty: bool,
    errors: Vec<ResolveError>,
}

impl<'a> ResolveContext<'a> {
    pub(crate) fn new(args: Option<&'a Args>, max_depth: usize, max_placeables: usize) -> Self {
        Self {
            args,
            stack: Vec::new(),
            max_depth,
            placeables: 0,
            max_placeables,
            dirty: false,
            errors: Vec::new(),
        }
    }

    /// Get a variable value.
    pub(crate) fn arg(&self, name: &str) -> Option<&'a Value> {
        self.args.and_then(|args| args.get(name))
    }

    /// Run `f` with `frame` pushed onto the call stack.
    ///
    /// Fails without running `f` if the frame is already in flight (a cycle)
    /// or the depth limit is reached. The frame is popped when `f` returns.
    pub(crate) fn with_frame<T>(
        &mut self,
        frame: Frame,
        f: impl FnOnce(&mut Self) -> T,
    ) -> Result<T, ResolveError> {
        if self.stack.contains(&frame) {
            trace!(
                "cyclic reference to '{}' via {:?}",
                frame.display_id(),
                self.stack.iter().map(Frame::display_id).collect::<Vec<_>>()
            );
            return Err(ResolveError::CyclicReference {
                id: frame.display_id(),
            });
        }
        if self.stack.len() >= self.max_depth {
            return Err(ResolveError::DepthExceeded {
                max: self.max_depth,
            });
        }

        self.stack.push(frame);
        let result = f(self);
        self.stack.pop();
        Ok(result)
    }

    /// Count one placeable against the budget.
    ///
    /// Exceeding it records an error once and marks the context dirty.
    pub(crate) fn count_placeable(&mut self) -> bool {
        if self.dirty {
            return false;
        }
        self.placeables += 1;
        if self.placeables > self.max_placeables {
            self.dirty = true;
            self.report(ResolveError::TooManyPlaceables {
                max: self.max_placeables,
            });
            return false;
        }
        true
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record an error.
    pub(crate) fn report(&mut self, error: ResolveError) {
        self.errors.push(error);
    }

    /// Create a context for resolving a term with its own variables.
    ///
    /// The call stack, placeable budget, and errors move into the child;
    /// hand them back with [`ResolveContext::absorb`].
    pub(crate) fn term_child<'c>(&mut self, args: &'c Args) -> ResolveContext<'c> {
        ResolveContext {
            args: Some(args),
            stack: mem::take(&mut self.stack),
            max_depth: self.max_depth,
            placeables: self.placeables,
            max_placeables: self.max_placeables,
            dirty: self.dirty,
            errors: mem::take(&mut self.errors),
        }
    }

    /// Take back the shared state from a child context.
    pub(crate) fn absorb(&mut self, child: ResolveContext<'_>) {
        self.stack = child.stack;
        self.placeables = child.placeables;
        self.dirty = child.dirty;
        self.errors = child.errors;
    }

    pub(crate) fn into_errors(self) -> Vec<ResolveError> {
        self.errors
    }
}
