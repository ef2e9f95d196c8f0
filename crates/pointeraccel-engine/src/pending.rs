//! Staged configuration and the commit cooldown.
//!
//! Text is parsed when it is staged, off the sample path. The sample path
//! only moves already-typed values into the committed parameters, at most
//! once per [`COMMIT_COOLDOWN_NS`].

use pointeraccel_curves::{LutTable, ModeSelector};
use pointeraccel_errors::ParamError;
use pointeraccel_fixed::Fixed;

use crate::params::{AccelParams, ParamKey, ParamReport, parse_flag};

/// Minimum spacing between two commits.
pub const COMMIT_COOLDOWN_NS: u64 = 1_000_000_000;

const NUMERIC_KEYS: usize = ParamKey::NUMERIC.len();

/// Typed values waiting to be committed, plus the trigger flag.
///
/// Later stagings of the same field replace earlier ones. A field whose
/// text is rejected leaves the staged and committed values alone.
///
/// # Example
///
/// ```
/// use pointeraccel_engine::{AccelParams, PendingUpdate};
/// use pointeraccel_fixed::Fixed;
///
/// let mut update = PendingUpdate::new();
/// update.stage("Offset", "2")?;
/// assert!(update.stage("Offset", "two").is_err());
///
/// let mut params = AccelParams::default();
/// assert_eq!(update.apply_to(&mut params), 1);
/// assert_eq!(params.offset, Fixed::TWO);
/// # Ok::<(), pointeraccel_errors::ParamError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpdate {
    numbers: [Option<Fixed>; NUMERIC_KEYS],
    mode: Option<ModeSelector>,
    smoothing: Option<bool>,
    lut: Option<LutTable>,
    triggered: bool,
}

impl Default for PendingUpdate {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingUpdate {
    /// An update with nothing staged.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            numbers: [None; NUMERIC_KEYS],
            mode: None,
            smoothing: None,
            lut: None,
            triggered: false,
        }
    }

    /// Parse `text` for the parameter named `key` and stage it.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError`] for an unknown key or rejected text.
    pub fn stage(&mut self, key: &str, text: &str) -> Result<ParamKey, ParamError> {
        let key: ParamKey = key.parse()?;
        self.stage_key(key, text)?;
        Ok(key)
    }

    /// Parse `text` for `key` and stage it.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError`] if the text does not parse or fails
    /// validation.
    pub fn stage_key(&mut self, key: ParamKey, text: &str) -> Result<(), ParamError> {
        match key {
            ParamKey::AccelerationMode => {
                let mode = text.parse::<ModeSelector>().map_err(|_| ParamError::InvalidMode {
                    key: key.name().to_owned(),
                    text: text.to_owned(),
                })?;
                self.mode = Some(mode);
            }
            ParamKey::UseSmoothing => {
                self.smoothing = Some(parse_flag(key, text)?);
            }
            ParamKey::LutData => {
                let table = text
                    .parse::<LutTable>()
                    .map_err(|e| ParamError::lut(key.name(), e))?;
                self.lut = Some(table);
            }
            _ => {
                let value = text
                    .parse::<Fixed>()
                    .map_err(|e| ParamError::parse(key.name(), text, e))?;
                self.stage_number(key, value)?;
            }
        }
        Ok(())
    }

    /// Stage an already-typed numeric value.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError`] if `key` is not numeric or the value fails
    /// validation.
    pub fn stage_number(&mut self, key: ParamKey, value: Fixed) -> Result<(), ParamError> {
        let value = key.check(value)?;
        let slot = key
            .numeric_index()
            .and_then(|i| self.numbers.get_mut(i))
            .ok_or_else(|| ParamError::out_of_range(key.name(), value, "not a numeric parameter"))?;
        *slot = Some(value);
        Ok(())
    }

    /// Stage a mode selector.
    pub fn stage_mode(&mut self, mode: impl Into<ModeSelector>) {
        self.mode = Some(mode.into());
    }

    /// Stage the smoothing flag.
    pub fn stage_smoothing(&mut self, enabled: bool) {
        self.smoothing = Some(enabled);
    }

    /// Stage a complete lookup table. It replaces the committed table as a
    /// whole on commit.
    pub fn stage_lut(&mut self, table: LutTable) {
        self.lut = Some(table);
    }

    /// Stage a batch of `(key, text)` pairs.
    pub fn stage_all<'a, I>(&mut self, pairs: I) -> ParamReport
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut report = ParamReport::default();
        for (key, text) in pairs {
            match self.stage(key, text) {
                Ok(key) => report.accepted.push(key),
                Err(error) => report.rejected.push(error),
            }
        }
        report
    }

    /// Request a commit.
    pub fn trigger(&mut self) {
        self.triggered = true;
    }

    /// Whether a commit has been requested.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Number of staged fields.
    #[must_use]
    pub fn staged_count(&self) -> usize {
        self.numbers.iter().filter(|v| v.is_some()).count()
            + usize::from(self.mode.is_some())
            + usize::from(self.smoothing.is_some())
            + usize::from(self.lut.is_some())
    }

    /// Whether nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.staged_count() == 0
    }

    /// Fold `other` into `self`. Fields staged in `other` win, and a
    /// trigger in either survives.
    pub fn merge(&mut self, other: PendingUpdate) {
        for (mine, theirs) in self.numbers.iter_mut().zip(other.numbers) {
            if theirs.is_some() {
                *mine = theirs;
            }
        }
        if other.mode.is_some() {
            self.mode = other.mode;
        }
        if other.smoothing.is_some() {
            self.smoothing = other.smoothing;
        }
        if other.lut.is_some() {
            self.lut = other.lut;
        }
        self.triggered |= other.triggered;
    }

    /// Move every staged field into `params` and clear the update,
    /// including the trigger. Returns the number of fields written.
    ///
    /// # RT Safety
    ///
    /// No allocation; copies at most one lookup table.
    pub fn apply_to(&mut self, params: &mut AccelParams) -> usize {
        let mut written = 0;
        for (key, staged) in ParamKey::NUMERIC.iter().zip(self.numbers.iter_mut()) {
            if let (Some(value), Some(field)) = (staged.take(), params.number_mut(*key)) {
                *field = value;
                written += 1;
            }
        }
        if let Some(mode) = self.mode.take() {
            params.mode = mode;
            written += 1;
        }
        if let Some(enabled) = self.smoothing.take() {
            params.use_smoothing = enabled;
            written += 1;
        }
        if let Some(table) = self.lut.take() {
            params.lut = table;
            written += 1;
        }
        self.triggered = false;
        written
    }
}

/// Commit cooldown state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Debounce {
    next_commit_ns: u64,
}

impl Debounce {
    /// Whether a commit is allowed at `now_ns`.
    #[inline]
    #[must_use]
    pub fn ready(&self, now_ns: u64) -> bool {
        now_ns >= self.next_commit_ns
    }

    /// Record a commit at `now_ns`.
    #[inline]
    pub fn rearm(&mut self, now_ns: u64) {
        self.next_commit_ns = now_ns.saturating_add(COMMIT_COOLDOWN_NS);
    }

    /// Earliest time of the next commit.
    #[must_use]
    pub fn next_commit_ns(&self) -> u64 {
        self.next_commit_ns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn must<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
        match result {
            Ok(v) => v,
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    #[test]
    fn test_later_staging_wins() {
        let mut update = PendingUpdate::new();
        must(update.stage("Midpoint", "1"));
        must(update.stage("midpoint", "4"));
        assert_eq!(update.staged_count(), 1);
        let mut params = AccelParams::default();
        update.apply_to(&mut params);
        assert_eq!(params.midpoint, Fixed::from_int(4));
    }

    #[test]
    fn test_rejected_text_keeps_staged_value() {
        let mut update = PendingUpdate::new();
        must(update.stage("Sensitivity", "2"));
        assert!(update.stage("Sensitivity", "0").is_err());
        assert!(update.stage("Sensitivity", "").is_err());
        let mut params = AccelParams::default();
        update.apply_to(&mut params);
        assert_eq!(params.sensitivity, Fixed::TWO);
    }

    #[test]
    fn test_apply_clears_update() {
        let mut update = PendingUpdate::new();
        must(update.stage("UseSmoothing", "true"));
        update.trigger();
        let mut params = AccelParams::default();
        assert_eq!(update.apply_to(&mut params), 1);
        assert!(update.is_empty());
        assert!(!update.is_triggered());
        assert_eq!(update.apply_to(&mut params), 0);
    }

    #[test]
    fn test_merge_prefers_newer_fields() {
        let mut older = PendingUpdate::new();
        must(older.stage("Offset", "1"));
        must(older.stage("Exponent", "2"));
        let mut newer = PendingUpdate::new();
        must(newer.stage("Offset", "3"));
        newer.trigger();
        older.merge(newer);
        assert!(older.is_triggered());
        let mut params = AccelParams::default();
        assert_eq!(older.apply_to(&mut params), 2);
        assert_eq!(params.offset, Fixed::from_int(3));
        assert_eq!(params.exponent, Fixed::TWO);
    }

    #[test]
    fn test_stage_number_rejects_non_numeric_keys() {
        let mut update = PendingUpdate::new();
        assert!(update.stage_number(ParamKey::LutData, Fixed::ONE).is_err());
        assert!(update.stage_number(ParamKey::InputCap, -Fixed::ONE).is_err());
        assert!(update.is_empty());
    }

    #[test]
    fn test_debounce_window() {
        let mut debounce = Debounce::default();
        assert!(debounce.ready(0));
        debounce.rearm(5_000);
        assert!(!debounce.ready(5_000 + COMMIT_COOLDOWN_NS - 1));
        assert!(debounce.ready(5_000 + COMMIT_COOLDOWN_NS));
        debounce.rearm(u64::MAX - 1);
        assert_eq!(debounce.next_commit_ns(), u64::MAX);
    }
}
