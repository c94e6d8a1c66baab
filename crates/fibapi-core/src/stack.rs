//! Dedicated stack for recursive algorithms.
//!
//! Recursive calls consume one frame per level, and runtime worker threads
//! ship with small stacks. Running the recursion on a scoped thread with an
//! explicit stack size keeps the depth guard, not the platform, in charge of
//! when a computation gives up.

use std::thread;

use crate::calculator::FibError;

/// Run `f` on a scoped thread with a stack of `stack_bytes`, returning its result.
pub fn with_recursion_stack<T, F>(stack_bytes: usize, f: F) -> Result<T, FibError>
where
    T: Send,
    F: FnOnce() -> Result<T, FibError> + Send,
{
    thread::scope(|scope| {
        let handle = thread::Builder::new()
            .name("fib-recursion".into())
            .stack_size(stack_bytes)
            .spawn_scoped(scope, f)
            .map_err(|e| FibError::Calculation(format!("failed to spawn recursion thread: {e}")))?;
        handle
            .join()
            .map_err(|_| FibError::Calculation("recursion thread panicked".into()))?
    })
}
