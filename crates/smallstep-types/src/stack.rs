//! Stack headroom for recursion over node trees.
//!
//! Rendering, cloning and reduction all walk trees structurally. Each
//! recursive call goes through [`with_stack_headroom`], which switches to
//! a fresh heap-allocated segment when the current stack runs low.

/// Remaining stack below which a new segment is allocated.
const MIN_HEADROOM: usize = 128 * 1024;

/// Size of each freshly allocated segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f` with at least [`MIN_HEADROOM`] bytes of stack available.
#[inline]
pub fn with_stack_headroom<R>(f: impl FnOnce() -> R) -> R {
    #[cfg(not(target_arch = "wasm32"))]
    {
        stacker::maybe_grow(MIN_HEADROOM, SEGMENT_SIZE, f)
    }
    #[cfg(target_arch = "wasm32")]
    {
        f()
    }
}
