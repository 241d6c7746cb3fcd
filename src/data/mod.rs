/// Data layer: core types, loading, and interpolation.
///
/// Architecture:
/// ```text
///  <model>/Comparison.txt        Ttpaths.txt
///        │                            │
///        ▼                            ▼
///   ┌──────────────────┐     ┌──────────────┐
///   │ ComparisonReader │     │ TtPathReader │   parse → model types
///   └──────────────────┘     └──────────────┘
///        │ SampleSummary              │ CoolingPath
///        └──────────────┬─────────────┘
///                       ▼
///                 ┌──────────┐
///                 │  interp   │  closure depth at predicted age
///                 └──────────┘
/// ```

pub mod interp;
pub mod loader;
pub mod model;
