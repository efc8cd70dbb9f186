//! Stack growth for deeply nested scripts.
//!
//! The Sprig parser descends once per nested group, lambda, and operand, and
//! the evaluator descends once per expression node and script call. Both wrap
//! their recursive entry points in [`ensure_sufficient_stack`] so a script
//! like `((((...))))` or a deep user recursion grows the native stack instead
//! of aborting the host process.
//!
//! On `wasm32` the guard is a plain call.

/// Grow when fewer than this many bytes of stack remain.
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment.
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first switching to a fresh stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// Run `f` directly; the wasm runtime owns its stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::ensure_sufficient_stack;

    fn nest(depth: u32) -> u32 {
        ensure_sufficient_stack(|| if depth == 0 { 0 } else { 1 + nest(depth - 1) })
    }

    #[test]
    fn passes_value_through() {
        assert_eq!(ensure_sufficient_stack(|| "sprig"), "sprig");
    }

    #[test]
    fn survives_deep_recursion() {
        assert_eq!(nest(200_000), 200_000);
    }
}
