/// Numeric conversion helpers.
///
/// Conversions between the `i64` literals, the `f64` register file and the
/// `i64` integer-typed result. All functions return a `Result`, which is `Ok`
/// only if the conversion is exact or, for results, representable.
pub mod num;
