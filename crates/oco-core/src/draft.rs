//! Draft state for a stop-loss / take-profit bracket and the session that edits it.
//!
//! A [`DraftState`] is the trader's unvalidated form: prices and the amount
//! are free text, exactly as typed. It is created empty, updated one field at
//! a time through typed [`DraftUpdate`]s, and consumed by the
//! [`JobBuilder`](crate::builder::JobBuilder) on submission.
//!
//! Values that arrive from elsewhere (a price clicked on a chart, say) go
//! through a [`FocusDelegate`]. The delegate is scoped to the single field
//! focused in its [`EditingSession`]; refocusing moves the scope.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builder::JobBuilder;
use crate::error::OcoError;
use crate::ids::IdGenerator;
use crate::types::{Direction, LegKind, OcoJob, Side, TickTrigger};

// ---------------------------------------------------------------------------
// DraftState
// ---------------------------------------------------------------------------

/// The pre-validation form. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftState {
    pub low_price: String,
    pub low_limit_price: String,
    pub low_trailing: bool,
    pub high_price: String,
    pub high_limit_price: String,
    pub high_trailing: bool,
    pub initial_trailing_stop: String,
    pub amount: String,
    pub direction: Direction,
}

impl DraftState {
    /// Threshold price text for `side`.
    pub fn threshold(&self, side: Side) -> &str {
        match side {
            Side::Low => &self.low_price,
            Side::High => &self.high_price,
        }
    }

    /// Limit price text for `side`.
    pub fn limit_price(&self, side: Side) -> &str {
        match side {
            Side::Low => &self.low_limit_price,
            Side::High => &self.high_limit_price,
        }
    }

    pub fn leg_kind(&self, side: Side) -> LegKind {
        match side {
            Side::Low => LegKind::from_trailing(self.low_trailing),
            Side::High => LegKind::from_trailing(self.high_trailing),
        }
    }

    /// Whether `side` will produce a binding when built.
    pub fn has_side(&self, side: Side) -> bool {
        !self.threshold(side).is_empty()
    }

    /// Return the draft with one field replaced.
    #[must_use]
    pub fn with(mut self, update: DraftUpdate) -> Self {
        match update {
            DraftUpdate::LowPrice(v) => self.low_price = v,
            DraftUpdate::LowLimitPrice(v) => self.low_limit_price = v,
            DraftUpdate::LowTrailing(v) => self.low_trailing = v,
            DraftUpdate::HighPrice(v) => self.high_price = v,
            DraftUpdate::HighLimitPrice(v) => self.high_limit_price = v,
            DraftUpdate::HighTrailing(v) => self.high_trailing = v,
            DraftUpdate::InitialTrailingStop(v) => self.initial_trailing_stop = v,
            DraftUpdate::Amount(v) => self.amount = v,
            DraftUpdate::Direction(v) => self.direction = v,
        }
        self
    }

    /// Return the draft with `field` set from raw text.
    ///
    /// Text fields take `raw` verbatim. Flags accept `true`/`false` and the
    /// direction accepts `BUY`/`SELL`, both case-insensitively.
    pub fn with_field(self, field: DraftField, raw: &str) -> Result<Self, OcoError> {
        Ok(self.with(field.update_from(raw)?))
    }
}

// ---------------------------------------------------------------------------
// Fields and updates
// ---------------------------------------------------------------------------

/// The nine draft fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    LowPrice,
    LowLimitPrice,
    LowTrailing,
    HighPrice,
    HighLimitPrice,
    HighTrailing,
    InitialTrailingStop,
    Amount,
    Direction,
}

impl DraftField {
    pub const ALL: [DraftField; 9] = [
        Self::LowPrice,
        Self::LowLimitPrice,
        Self::LowTrailing,
        Self::HighPrice,
        Self::HighLimitPrice,
        Self::HighTrailing,
        Self::InitialTrailingStop,
        Self::Amount,
        Self::Direction,
    ];

    /// Field name as it appears in draft JSON.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LowPrice => "lowPrice",
            Self::LowLimitPrice => "lowLimitPrice",
            Self::LowTrailing => "lowTrailing",
            Self::HighPrice => "highPrice",
            Self::HighLimitPrice => "highLimitPrice",
            Self::HighTrailing => "highTrailing",
            Self::InitialTrailingStop => "initialTrailingStop",
            Self::Amount => "amount",
            Self::Direction => "direction",
        }
    }

    /// Build the typed update for this field from raw text.
    pub fn update_from(&self, raw: &str) -> Result<DraftUpdate, OcoError> {
        let flag = || match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(OcoError::Draft {
                field: self.name(),
                value: raw.to_string(),
            }),
        };
        Ok(match self {
            Self::LowPrice => DraftUpdate::LowPrice(raw.to_string()),
            Self::LowLimitPrice => DraftUpdate::LowLimitPrice(raw.to_string()),
            Self::LowTrailing => DraftUpdate::LowTrailing(flag()?),
            Self::HighPrice => DraftUpdate::HighPrice(raw.to_string()),
            Self::HighLimitPrice => DraftUpdate::HighLimitPrice(raw.to_string()),
            Self::HighTrailing => DraftUpdate::HighTrailing(flag()?),
            Self::InitialTrailingStop => DraftUpdate::InitialTrailingStop(raw.to_string()),
            Self::Amount => DraftUpdate::Amount(raw.to_string()),
            Self::Direction => DraftUpdate::Direction(raw.parse()?),
        })
    }
}

impl std::fmt::Display for DraftField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DraftField {
    type Err = OcoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| OcoError::Config(format!("unknown draft field {s:?}")))
    }
}

/// A typed single-field change to a [`DraftState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftUpdate {
    LowPrice(String),
    LowLimitPrice(String),
    LowTrailing(bool),
    HighPrice(String),
    HighLimitPrice(String),
    HighTrailing(bool),
    InitialTrailingStop(String),
    Amount(String),
    Direction(Direction),
}

impl DraftUpdate {
    pub fn field(&self) -> DraftField {
        match self {
            Self::LowPrice(_) => DraftField::LowPrice,
            Self::LowLimitPrice(_) => DraftField::LowLimitPrice,
            Self::LowTrailing(_) => DraftField::LowTrailing,
            Self::HighPrice(_) => DraftField::HighPrice,
            Self::HighLimitPrice(_) => DraftField::HighLimitPrice,
            Self::HighTrailing(_) => DraftField::HighTrailing,
            Self::InitialTrailingStop(_) => DraftField::InitialTrailingStop,
            Self::Amount(_) => DraftField::Amount,
            Self::Direction(_) => DraftField::Direction,
        }
    }
}

// ---------------------------------------------------------------------------
// EditingSession
// ---------------------------------------------------------------------------

/// Owns one draft for the lifetime of an edit.
#[derive(Debug, Default)]
pub struct EditingSession {
    draft: DraftState,
    focused: Option<DraftField>,
}

impl EditingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_draft(draft: DraftState) -> Self {
        Self { draft, focused: None }
    }

    pub fn draft(&self) -> &DraftState {
        &self.draft
    }

    /// Replace the whole draft, e.g. on a form-wide change.
    pub fn replace(&mut self, draft: DraftState) {
        self.draft = draft;
    }

    pub fn apply(&mut self, update: DraftUpdate) {
        let draft = std::mem::take(&mut self.draft);
        self.draft = draft.with(update);
    }

    /// Set `field` from raw text. The draft is unchanged on error.
    pub fn set(&mut self, field: DraftField, raw: &str) -> Result<(), OcoError> {
        let update = field.update_from(raw)?;
        self.apply(update);
        Ok(())
    }

    /// Route externally supplied values to `field` until refocused or blurred.
    pub fn focus(&mut self, field: DraftField) {
        debug!("focus moved to {field}");
        self.focused = Some(field);
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    pub fn focused(&self) -> Option<DraftField> {
        self.focused
    }

    /// Write `raw` into the focused field.
    pub fn supply(&mut self, raw: &str) -> Result<(), OcoError> {
        let field = self.focused.ok_or(OcoError::NoFocus)?;
        self.set(field, raw)
    }

    /// A callback handle bound to the focused field, or `None` with no focus.
    pub fn delegate(&mut self) -> Option<FocusDelegate<'_>> {
        let field = self.focused?;
        Some(FocusDelegate { session: self, field })
    }

    /// Build a job from the current draft. The session keeps its draft.
    pub fn build<G: IdGenerator>(&self, builder: &JobBuilder<G>, instrument: &TickTrigger) -> OcoJob {
        builder.build(&self.draft, instrument)
    }

    /// End the session, yielding the final draft.
    pub fn take(self) -> DraftState {
        self.draft
    }
}

/// Writes values into exactly one draft field.
///
/// Borrowing the session mutably keeps a stale delegate from outliving a
/// focus change.
#[derive(Debug)]
pub struct FocusDelegate<'a> {
    session: &'a mut EditingSession,
    field: DraftField,
}

impl FocusDelegate<'_> {
    pub fn field(&self) -> DraftField {
        self.field
    }

    pub fn supply(&mut self, raw: &str) -> Result<(), OcoError> {
        self.session.set(self.field, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_draft_is_empty_buy() {
        let d = DraftState::default();
        assert_eq!(d.direction, Direction::Buy);
        assert!(!d.has_side(Side::Low));
        assert!(!d.has_side(Side::High));
        assert_eq!(d.leg_kind(Side::Low), LegKind::Limit);
    }

    #[test]
    fn with_field_parses_typed_fields() {
        let d = DraftState::default()
            .with_field(DraftField::LowPrice, "100")
            .and_then(|d| d.with_field(DraftField::HighTrailing, "TRUE"))
            .and_then(|d| d.with_field(DraftField::Direction, "sell"))
            .unwrap();
        assert_eq!(d.low_price, "100");
        assert!(d.high_trailing);
        assert_eq!(d.direction, Direction::Sell);
        assert_eq!(d.leg_kind(Side::High), LegKind::TrailingStop);
    }

    #[test]
    fn with_field_keeps_text_verbatim() {
        let d = DraftState::default().with_field(DraftField::Amount, " 1.5x ").unwrap();
        assert_eq!(d.amount, " 1.5x ");
    }

    #[test]
    fn with_field_rejects_bad_flag_and_direction() {
        let err = DraftState::default().with_field(DraftField::LowTrailing, "yes").unwrap_err();
        assert!(matches!(err, OcoError::Draft { field: "lowTrailing", .. }));
        assert!(DraftState::default().with_field(DraftField::Direction, "long").is_err());
    }

    #[test]
    fn field_names_round_trip() {
        for f in DraftField::ALL {
            assert_eq!(f.name().parse::<DraftField>().unwrap(), f);
        }
        assert!("price".parse::<DraftField>().is_err());
    }

    #[test]
    fn update_reports_its_field() {
        let u = DraftField::InitialTrailingStop.update_from("5").unwrap();
        assert_eq!(u, DraftUpdate::InitialTrailingStop("5".into()));
        assert_eq!(u.field(), DraftField::InitialTrailingStop);
    }

    #[test]
    fn draft_json_uses_camel_case_and_defaults() {
        let d: DraftState = serde_json::from_value(serde_json::json!({
            "lowPrice": "100",
            "lowLimitPrice": "99",
            "direction": "SELL"
        }))
        .unwrap();
        assert_eq!(d.low_limit_price, "99");
        assert_eq!(d.direction, Direction::Sell);
        assert_eq!(d.high_price, "");
    }

    #[test]
    fn supply_without_focus_fails() {
        let mut s = EditingSession::new();
        assert!(matches!(s.supply("100"), Err(OcoError::NoFocus)));
        assert!(s.delegate().is_none());
    }

    #[test]
    fn delegate_writes_only_the_focused_field() {
        let mut s = EditingSession::new();
        s.focus(DraftField::HighPrice);
        s.delegate().unwrap().supply("210").unwrap();
        assert_eq!(s.draft().high_price, "210");
        assert_eq!(s.draft().low_price, "");

        s.focus(DraftField::LowLimitPrice);
        let mut d = s.delegate().unwrap();
        assert_eq!(d.field(), DraftField::LowLimitPrice);
        d.supply("95").unwrap();
        assert_eq!(s.draft().low_limit_price, "95");
        assert_eq!(s.draft().high_price, "210");
    }

    #[test]
    fn blur_ends_the_scope() {
        let mut s = EditingSession::new();
        s.focus(DraftField::Amount);
        s.supply("3").unwrap();
        s.blur();
        assert!(s.supply("4").is_err());
        assert_eq!(s.take().amount, "3");
    }

    #[test]
    fn failed_set_leaves_draft_untouched() {
        let mut s = EditingSession::from_draft(DraftState {
            low_trailing: true,
            ..Default::default()
        });
        assert!(s.set(DraftField::LowTrailing, "maybe").is_err());
        assert!(s.draft().low_trailing);
    }
}
