/// Core evaluation logic and context management.
///
/// Contains the runtime context, the break signal, and the dispatch from
/// command tree nodes to the operations below.
pub mod core;

/// Control flow.
///
/// Implements while and do-while loops, function definition and calls, and
/// conditional breaks.
pub mod control;

/// Memory movement.
///
/// Moves tape and function pointers, switches tracks, swaps global and local
/// cells, and reads the pointer index.
pub mod memory_ops;

/// Cell arithmetic.
///
/// Increments, binary operators against the inactive track, rounding, and
/// random numbers.
pub mod arithmetic;

/// Console input and output commands.
pub mod io;

/// Utility functions for evaluation.
///
/// Provides repeat-count composition and validation shared by the commands.
pub mod utils;
