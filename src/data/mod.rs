/// Data layer: core types, loading, and series normalization.
///
/// Architecture:
/// ```text
///  data.json (HTTP / file)      embedded fallback
///        │                            │
///        ▼                            ▼
///   ┌──────────┐  fetch failure ┌──────────┐
///   │  loader   │ ─────────────▶ │ fallback  │
///   └──────────┘                └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ Vec<Reading>  │  ordered samples, source field names
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  series   │  alias resolution → per-channel value sequences
///   └──────────┘
/// ```
pub mod loader;
pub mod model;
pub mod series;
