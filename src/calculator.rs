//! One calculator screen as a Moore machine
//!
//! State is the set of numeric fields; inputs are text edits, slider drags
//! and clock ticks; the output is the projection recomputed on every change
//! to a field value.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{CalculatorError, ProjectionError};
use crate::input::NumericField;
use crate::instruments::{FieldId, InstrumentKind};
use crate::projection::{InstrumentParameters, ProjectionEngine, ProjectionResult};

/// Input event from the presentation layer
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CalculatorEvent {
    /// Text box contents changed
    Text { field: FieldId, text: String },
    /// Slider moved
    Slider { field: FieldId, value: f64 },
    /// Logical time passed
    Tick { millis: u64 },
    /// A text box gained focus
    Focus { field: FieldId },
    /// Tap outside the inputs
    Dismiss,
    /// Hardware back button
    Back,
}

/// State of one calculator instance
///
/// Each instance owns its fields exclusively. Pending message clears live in
/// the fields, so dropping the calculator discards them.
#[derive(Debug, Clone)]
pub struct Calculator {
    kind: InstrumentKind,
    engine: ProjectionEngine,
    fields: Vec<NumericField>,
    params: InstrumentParameters,

    /// Logical clock driving message auto-clear
    now: Duration,

    output: Result<ProjectionResult, ProjectionError>,
}

impl Calculator {
    /// Mount a calculator with every field at its configured default
    pub fn new(kind: InstrumentKind, engine: ProjectionEngine) -> Result<Self, CalculatorError> {
        let config = engine.catalog().get(kind);

        let fields = kind
            .fields()
            .iter()
            .map(|&id| {
                config
                    .field(id)
                    .map(|c| NumericField::new(id, c.clone()))
                    .ok_or(CalculatorError::MissingFieldConfig { instrument: kind, field: id })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let params = collect_parameters(kind, &fields).ok_or(CalculatorError::MissingFieldConfig {
            instrument: kind,
            field: FieldId::TimePeriod,
        })?;
        let output = engine.project(&params);

        Ok(Self {
            kind,
            engine,
            fields,
            params,
            now: Duration::ZERO,
            output,
        })
    }

    /// Mount with the built-in bounds
    pub fn with_defaults(kind: InstrumentKind) -> Result<Self, CalculatorError> {
        Self::new(kind, ProjectionEngine::default())
    }

    pub fn kind(&self) -> InstrumentKind {
        self.kind
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn fields(&self) -> &[NumericField] {
        &self.fields
    }

    pub fn field(&self, id: FieldId) -> Option<&NumericField> {
        self.fields.iter().find(|f| f.id() == id)
    }

    /// Current committed parameters
    pub fn parameters(&self) -> InstrumentParameters {
        self.params
    }

    /// Latest projection output
    pub fn result(&self) -> Result<&ProjectionResult, &ProjectionError> {
        self.output.as_ref()
    }

    /// Message currently shown under a field
    pub fn error_message(&self, id: FieldId) -> Option<String> {
        self.field(id).and_then(NumericField::error_message)
    }

    fn field_mut(&mut self, id: FieldId) -> Result<&mut NumericField, CalculatorError> {
        let instrument = self.kind;
        self.fields
            .iter_mut()
            .find(|f| f.id() == id)
            .ok_or(CalculatorError::UnknownField { instrument, field: id })
    }

    /// Apply a text edit; returns `false` if the edit was rejected
    pub fn edit_text(&mut self, id: FieldId, raw: &str) -> Result<bool, CalculatorError> {
        self.focus(id)?;
        let now = self.now;
        let changed = self.field_mut(id)?.apply_text(raw, now);
        if changed {
            self.recompute();
        }
        Ok(changed)
    }

    /// Apply a slider drag
    pub fn slide(&mut self, id: FieldId, value: f64) -> Result<(), CalculatorError> {
        self.field_mut(id)?.apply_slider(value);
        self.recompute();
        Ok(())
    }

    /// Advance the logical clock and fire due message clears
    ///
    /// Returns how many messages were cleared. Values do not change, so the
    /// projection is not recomputed.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        self.now += elapsed;
        let now = self.now;
        self.fields
            .iter_mut()
            .map(|f| f.fire_due_clear(now))
            .filter(|cleared| *cleared)
            .count()
    }

    pub fn focus(&mut self, id: FieldId) -> Result<(), CalculatorError> {
        for field in &mut self.fields {
            field.blur();
        }
        self.field_mut(id)?.focus();
        Ok(())
    }

    pub fn blur_all(&mut self) {
        for field in &mut self.fields {
            field.blur();
        }
    }

    pub fn focused_field(&self) -> Option<FieldId> {
        self.fields.iter().find(|f| f.is_focused()).map(NumericField::id)
    }

    /// Back button: blur the focused field and consume the press, if any
    pub fn handle_back(&mut self) -> bool {
        if self.focused_field().is_some() {
            self.blur_all();
            true
        } else {
            false
        }
    }

    /// Dispatch one presentation-layer event
    pub fn handle(&mut self, event: &CalculatorEvent) -> Result<(), CalculatorError> {
        match event {
            CalculatorEvent::Text { field, text } => {
                self.edit_text(*field, text)?;
            }
            CalculatorEvent::Slider { field, value } => self.slide(*field, *value)?,
            CalculatorEvent::Tick { millis } => {
                self.advance(Duration::from_millis(*millis));
            }
            CalculatorEvent::Focus { field } => self.focus(*field)?,
            CalculatorEvent::Dismiss => self.blur_all(),
            CalculatorEvent::Back => {
                self.handle_back();
            }
        }
        Ok(())
    }

    fn recompute(&mut self) {
        if let Some(params) = collect_parameters(self.kind, &self.fields) {
            self.params = params;
        }
        self.output = self.engine.project(&self.params);
    }
}

fn collect_parameters(kind: InstrumentKind, fields: &[NumericField]) -> Option<InstrumentParameters> {
    InstrumentParameters::from_fields(kind, |id| fields.iter().find(|f| f.id() == id).map(NumericField::value))
}
