/// Data layer: core types, parsing, and revolution selection.
///
/// Architecture:
/// ```text
///  Piston_Gap_Pressure.txt
///        │
///        ▼
///   ┌──────────┐
///   │  parser   │  text → Vec<Section>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Section  │  phi label, N×M row-major values
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  select   │  last revolution → Selection (+ stats)
///   └──────────┘
/// ```

pub mod error;
pub mod model;
pub mod parser;
pub mod select;
