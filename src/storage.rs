/// Flat-text roster serialization.
pub mod roster;

pub use roster::{
    parse_record_line, LineError, LineErrorKind, LoadError, LoadReport, SaveError,
};
