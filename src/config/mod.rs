// ============================================================================
// Configuration Module
// Precision bound and parse mode, as explicit values or process-wide defaults
// ============================================================================

mod settings;

pub use settings::{
    set_default_parse_mode, set_default_precision, DecimalConfig, ParseMode, MAX_PRECISION,
};
