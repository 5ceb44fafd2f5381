pub mod model;
pub mod scanner;
pub mod util;

pub use model::{ApiKind, ApiRecord, ApiShape};
pub use scanner::{inspect_path, inspect_source, write_json, InspectConfig};
