/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without risking silent data loss. Every helper takes
/// the error to report as a parameter, so callers decide which error type a
/// failed conversion turns into.
pub mod num;
