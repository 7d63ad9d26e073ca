/// Data layer: core types, loading, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ShipmentDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ ShipmentDataset  │  four columns, one row per shipment
///   └─────────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  counts, rating ranges, weight bins (one view per chart)
///   └───────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
