//! Generic depth-first traversal of a `(Dictionary, Guide)` pair.

use smallvec::SmallVec;

use crate::dictionary::{Dictionary, Guide};

/// A delegate's verdict on one traversal step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    /// Whether the walker may explore children of the state just entered.
    /// `false` treats the branch as fully explored.
    pub descend: bool,
    /// Whether control returns to the caller with the current path exposed
    /// as a result.
    pub emit: bool,
}

/// Incremental state carried alongside the walk.
///
/// The walker calls [`on_step`](TraversalDelegate::on_step) after every
/// successful transition, with the path buffer already extended by the
/// consumed label, and [`on_ascend`](TraversalDelegate::on_ascend) before
/// every retreat, with the path buffer still holding the label about to be
/// popped — so both callbacks can index their per-depth state by
/// `path.len()`.
pub trait TraversalDelegate {
    /// Reacts to the walker entering the state at the end of `path`.
    fn on_step(&mut self, path: &[u8], is_terminal: bool) -> Step;

    /// Rolls back per-depth state before the last label of `path` is popped.
    fn on_ascend(&mut self, path: &[u8]);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    NextChild,
    NextSibling,
}

/// Depth-first walker enumerating automaton paths in guide order.
///
/// The walker owns the traversal bookkeeping (state stack, label path,
/// child/sibling mode) and nothing else; all search-specific state lives in
/// the delegate passed to [`next`](DepthFirstWalker::next). One `start`
/// begins a session that visits each key at most once, in a preorder walk of
/// the subtree below the starting state; `next` runs until the delegate
/// emits or the subtree is exhausted.
#[derive(Debug)]
pub struct DepthFirstWalker<'a> {
    dict: &'a Dictionary<'a>,
    guide: &'a Guide<'a>,
    stack: SmallVec<[u32; 32]>,
    path: SmallVec<[u8; 32]>,
    mode: Mode,
}

impl<'a> DepthFirstWalker<'a> {
    /// Creates a walker over a dictionary and its guide.
    ///
    /// The guide must have been built for this exact dictionary; a
    /// mismatched pair makes the walk terminate early rather than misbehave.
    pub fn new(dict: &'a Dictionary<'a>, guide: &'a Guide<'a>) -> Self {
        debug_assert_eq!(dict.len(), guide.len(), "guide built for another dictionary");
        DepthFirstWalker {
            dict,
            guide,
            stack: SmallVec::new(),
            path: SmallVec::new(),
            mode: Mode::NextChild,
        }
    }

    /// Begins a traversal session from the dictionary root.
    pub fn start(&mut self, expected_depth: usize) {
        self.start_from(self.dict.root(), expected_depth);
    }

    /// Begins a traversal session from an arbitrary state, typically one
    /// reached by following a prefix.
    pub fn start_from(&mut self, index: u32, expected_depth: usize) {
        self.mode = Mode::NextChild;
        self.stack.clear();
        self.stack.reserve(expected_depth + 1);
        self.stack.push(index);
        self.path.clear();
        self.path.reserve(expected_depth);
    }

    /// Labels consumed from the starting state to the current state.
    #[inline]
    pub fn path(&self) -> &[u8] {
        &self.path
    }

    /// Whether a key terminates at the current state.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.stack
            .last()
            .is_some_and(|&index| self.dict.has_value(index))
    }

    /// Value of the key terminating at the current state; meaningful only
    /// when [`is_terminal`](DepthFirstWalker::is_terminal) holds.
    #[inline]
    pub fn value(&self) -> Option<i32> {
        self.stack.last().and_then(|&index| self.dict.value(index))
    }

    fn follow(&mut self, label: u8) -> bool {
        let Some(&top) = self.stack.last() else {
            return false;
        };
        match self.dict.follow(top, label) {
            Some(next) => {
                self.stack.push(next);
                self.path.push(label);
                true
            }
            None => false,
        }
    }

    fn ascend<D: TraversalDelegate>(&mut self, delegate: &mut D) {
        if !self.path.is_empty() {
            delegate.on_ascend(&self.path);
        }
        self.stack.pop();
        self.path.pop();
    }

    /// Advances to the next step the delegate emits.
    ///
    /// Returns `false` once the walk is exhausted (including when the guide
    /// contradicts the dictionary, which abandons the session).
    pub fn next<D: TraversalDelegate>(&mut self, delegate: &mut D) -> bool {
        if self.stack.is_empty() {
            return false;
        }
        loop {
            match self.mode {
                Mode::NextChild => {
                    let Some(&top) = self.stack.last() else {
                        return false;
                    };
                    let child = self.guide.child(top);
                    if child == 0 {
                        self.mode = Mode::NextSibling;
                        continue;
                    }
                    if !self.follow(child) {
                        self.stack.clear();
                        return false;
                    }
                    let step = delegate.on_step(&self.path, self.is_terminal());
                    if !step.descend {
                        self.mode = Mode::NextSibling;
                    }
                    if step.emit {
                        return true;
                    }
                }
                Mode::NextSibling => loop {
                    let Some(&top) = self.stack.last() else {
                        return false;
                    };
                    let sibling = self.guide.sibling(top);
                    self.ascend(delegate);
                    if sibling != 0 {
                        if self.stack.is_empty() || !self.follow(sibling) {
                            self.stack.clear();
                            return false;
                        }
                        let step = delegate.on_step(&self.path, self.is_terminal());
                        self.mode = if step.descend {
                            Mode::NextChild
                        } else {
                            Mode::NextSibling
                        };
                        if step.emit {
                            return true;
                        }
                        break;
                    } else if self.stack.is_empty() {
                        return false;
                    }
                },
            }
        }
    }
}
