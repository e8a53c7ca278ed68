//! Stack growth for the recursive walks over expression text and matcher
//! trees. Nesting depth is user-controlled, so both the parser and the
//! checker enter each level through [`ensure_sufficient_stack`].

/// Grow the stack when less than this remains.
const RED_ZONE: usize = 64 * 1024;

/// Size of each new stack segment.
const SEGMENT: usize = 1024 * 1024;

/// Run `f`, first moving to a fresh stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
