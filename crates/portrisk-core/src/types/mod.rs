//! Domain vocabulary shared across the engine.
//! Dimension and period enums, bounded Likert responses, variable keys.

pub mod collections;
pub mod dimension;
pub mod label;
pub mod likert;
pub mod period;
pub mod variable;

pub use collections::{BTreeMap, FxHashMap, FxHashSet};
pub use dimension::Dimension;
pub use label::fold_label;
pub use likert::LikertResponse;
pub use period::Period;
pub use variable::{compare_codes, VariableKey};
