//! Benchmarks for the epilogue registry. See `benches/`.
