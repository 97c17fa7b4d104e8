// ============================================================================
// Decimal Configuration
// Precision bound and parse behavior, explicit or process-wide
// ============================================================================

use crate::decimal::Decimal;
use crate::numeric::{DecimalError, DecimalResult};
use parking_lot::RwLock;
use tracing::info;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest supported number of digits after the decimal point.
pub const MAX_PRECISION: u8 = 19;

/// Installed configuration used by every operation without an explicit config.
static GLOBAL: RwLock<DecimalConfig> = RwLock::new(DecimalConfig::new());

// ============================================================================
// Parse Mode
// ============================================================================

/// What parsing does with more fractional digits than the configured precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParseMode {
    /// Reject the input with `PrecisionOutOfRange`
    #[default]
    Error,

    /// Drop the excess digits without rounding
    Truncate,
}

// ============================================================================
// Decimal Configuration
// ============================================================================

/// Precision bound and parse mode for decimal operations.
///
/// Operations that produce a precision of their own (multiply, divide, square
/// root, powers) and parsing read these settings. Pass a config explicitly with
/// the `*_with` methods on [`Decimal`](crate::decimal::Decimal), or install one
/// process-wide at start-up with [`DecimalConfig::install`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "UncheckedConfig"))]
pub struct DecimalConfig {
    /// Maximum digits after the decimal point (1..=19)
    precision: u8,

    /// How parsing treats excess fractional digits
    parse_mode: ParseMode,
}

impl DecimalConfig {
    /// Default configuration: 19 digits, reject excess precision
    pub const fn new() -> Self {
        Self {
            precision: MAX_PRECISION,
            parse_mode: ParseMode::Error,
        }
    }

    /// Builder method: Set the precision bound
    ///
    /// # Errors
    /// Returns `PrecisionOutOfRange` unless `precision` is in 1..=19, so a
    /// config never carries a bound the fixed-width tables cannot serve.
    pub fn with_precision(mut self, precision: u8) -> DecimalResult<Self> {
        self.precision = precision;
        self.validate()?;
        Ok(self)
    }

    /// Builder method: Set the parse mode
    pub const fn with_parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = parse_mode;
        self
    }

    #[inline]
    pub const fn precision(&self) -> u8 {
        self.precision
    }

    #[inline]
    pub const fn parse_mode(&self) -> ParseMode {
        self.parse_mode
    }

    /// Validate the configuration
    ///
    /// # Errors
    /// Returns `PrecisionOutOfRange` unless the precision is in 1..=19.
    pub fn validate(&self) -> DecimalResult<()> {
        if self.precision == 0 || self.precision > MAX_PRECISION {
            return Err(DecimalError::PrecisionOutOfRange);
        }
        Ok(())
    }

    /// Parses `s` under this configuration.
    ///
    /// Shortcut for [`Decimal::parse_with`].
    #[inline]
    pub fn parse(&self, s: &str) -> DecimalResult<Decimal> {
        Decimal::parse_with(s, self)
    }

    /// The installed process-wide configuration.
    #[inline]
    pub fn global() -> Self {
        *GLOBAL.read()
    }

    /// Installs this configuration process-wide.
    ///
    /// Meant to be called once at start-up, before decimals are shared between
    /// threads; values parsed earlier keep their precision.
    pub fn install(self) -> DecimalResult<()> {
        self.validate()?;
        *GLOBAL.write() = self;
        info!(
            precision = self.precision,
            parse_mode = ?self.parse_mode,
            "installed default decimal configuration"
        );
        Ok(())
    }
}

impl Default for DecimalConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Wire form of [`DecimalConfig`], checked before it becomes one.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct UncheckedConfig {
    precision: u8,
    parse_mode: ParseMode,
}

#[cfg(feature = "serde")]
impl TryFrom<UncheckedConfig> for DecimalConfig {
    type Error = DecimalError;

    fn try_from(raw: UncheckedConfig) -> DecimalResult<Self> {
        Ok(Self::new()
            .with_precision(raw.precision)?
            .with_parse_mode(raw.parse_mode))
    }
}

// ============================================================================
// Process-wide Setters
// ============================================================================

/// Changes the default precision (1..=19) for the whole process.
///
/// # Errors
/// Returns `PrecisionOutOfRange` for 0 or values above 19; the installed
/// configuration is left untouched.
pub fn set_default_precision(precision: u8) -> DecimalResult<()> {
    DecimalConfig::global().with_precision(precision)?.install()
}

/// Changes the default parse mode for the whole process.
pub fn set_default_parse_mode(parse_mode: ParseMode) {
    let mut config = GLOBAL.write();
    config.parse_mode = parse_mode;
    info!(?parse_mode, "changed default decimal parse mode");
}
