/// Bidirectionally growing storage.
///
/// A strip is a sequence of cells with a movable pointer that grows at
/// whichever end the pointer walks off. Tapes are strips of numbers; the
/// function table is a strip of optional function bodies.
pub mod strip;

/// Dual-track memory scopes.
///
/// A scope pairs an active and an inactive tape. There is one global scope
/// and one local scope per active call.
pub mod scope;
