/// Numeric helpers shared across the pipeline.
///
/// Canonical number stringification, tolerant float comparison, and the
/// leading-number parse used by the `val` builtin live here so the evaluator
/// and the report layer agree on the exact textual form of a number.
pub mod num;
