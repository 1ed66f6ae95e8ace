// ── Schemas ──
//
// Declarative description of each resource and data source: attribute
// types, modes, validators, and plan modifiers. Validation against a
// schema runs before any remote call.

use serde_json::Value;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::state::{AttrValue, StateBlob};
use crate::validate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrType {
    String,
    Bool,
    Int,
    List(Box<AttrType>),
    Object(Vec<(&'static str, AttrType)>),
}

impl AttrType {
    fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int => "number",
            Self::List(_) => "list",
            Self::Object(_) => "object",
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::String, Value::String(_))
            | (Self::Bool, Value::Bool(_))
            | (Self::Int, Value::Number(_)) => true,
            (Self::List(inner), Value::Array(items)) => items.iter().all(|i| inner.accepts(i)),
            (Self::Object(fields), Value::Object(map)) => fields.iter().all(|(name, ty)| {
                map.get(*name)
                    .is_none_or(|v| v.is_null() || ty.accepts(v))
            }),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Mode {
    Required,
    Optional,
    Computed,
    OptionalComputed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanModifier {
    /// Keep the prior value instead of showing "known after apply".
    UseStateForUnknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    OneOf(&'static [&'static str]),
    OneOfInt(&'static [i64]),
    GreaterThanZero,
    MaxLength(usize),
    ImmutableOnUpdate,
}

impl Validator {
    fn check(self, value: &Value, prior: Option<&StateBlob>, name: &str) -> Result<(), String> {
        match (self, value) {
            (Self::OneOf(allowed), Value::String(s)) => validate::one_of(s, allowed),
            (Self::OneOfInt(allowed), Value::Number(n)) => match n.as_i64() {
                Some(i) => validate::one_of_int(i, allowed),
                None => Err(format!("{n} is not an integer")),
            },
            (Self::GreaterThanZero, Value::String(s)) => validate::greater_than_zero(s),
            (Self::MaxLength(max), Value::String(s)) => validate::max_length(s, max),
            (Self::ImmutableOnUpdate, Value::String(s)) => {
                let prior_id_known = prior
                    .and_then(|p| p.get("id").as_str())
                    .is_some_and(|id| !id.is_empty());
                let prior_value = prior.and_then(|p| p.get(name).as_str()).unwrap_or_default();
                validate::immutable_on_update(prior_id_known, prior_value, Some(s))
            }
            _ => Ok(()),
        }
    }
}

// ── Attribute ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    pub ty: AttrType,
    pub mode: Mode,
    pub description: &'static str,
    pub sensitive: bool,
    pub validators: Vec<Validator>,
    pub plan_modifiers: Vec<PlanModifier>,
}

impl Attribute {
    pub fn new(name: &'static str, ty: AttrType, mode: Mode) -> Self {
        Self {
            name,
            ty,
            mode,
            description: "",
            sensitive: false,
            validators: Vec::new(),
            plan_modifiers: Vec::new(),
        }
    }

    pub fn string(name: &'static str, mode: Mode) -> Self {
        Self::new(name, AttrType::String, mode)
    }

    pub fn bool(name: &'static str, mode: Mode) -> Self {
        Self::new(name, AttrType::Bool, mode)
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn plan_modifier(mut self, modifier: PlanModifier) -> Self {
        self.plan_modifiers.push(modifier);
        self
    }

    pub fn is_configurable(&self) -> bool {
        self.mode != Mode::Computed
    }
}

// ── Schema ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub description: &'static str,
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn new(description: &'static str) -> Self {
        Self {
            description,
            attributes: Vec::new(),
        }
    }

    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Check `config` against this schema.
    ///
    /// `prior` is the state before an update and feeds immutable-on-update.
    /// Unknown values are not checked; they get validated once known.
    pub fn validate(&self, config: &StateBlob, prior: Option<&StateBlob>) -> Diagnostics {
        let mut diags = Diagnostics::new();

        for name in config.names() {
            if self.get(name).is_none() {
                diags.push(
                    Diagnostic::error(
                        "Unsupported argument",
                        format!("An argument named \"{name}\" is not expected here."),
                    )
                    .with_attribute(name),
                );
            }
        }

        for attr in &self.attributes {
            let value = config.get(attr.name);
            match value {
                AttrValue::Null if attr.mode == Mode::Required => {
                    diags.push(
                        Diagnostic::error(
                            "Missing required argument",
                            format!("The argument \"{}\" is required.", attr.name),
                        )
                        .with_attribute(attr.name),
                    );
                }
                AttrValue::Known(v) => {
                    if !attr.ty.accepts(v) {
                        diags.push(
                            Diagnostic::error(
                                "Invalid attribute value",
                                format!("expected a {}", attr.ty.name()),
                            )
                            .with_attribute(attr.name),
                        );
                        continue;
                    }
                    for validator in &attr.validators {
                        if let Err(detail) = validator.check(v, prior, attr.name) {
                            diags.push(
                                Diagnostic::error("Invalid attribute value", detail)
                                    .with_attribute(attr.name),
                            );
                        }
                    }
                }
                AttrValue::Null | AttrValue::Unknown => {}
            }
        }

        diags
    }

    /// Carry prior values into the plan where a modifier asks for it.
    pub fn apply_plan_modifiers(&self, prior: &StateBlob, proposed: &StateBlob) -> StateBlob {
        let mut planned = proposed.clone();
        for attr in &self.attributes {
            let keeps_state = attr
                .plan_modifiers
                .contains(&PlanModifier::UseStateForUnknown);
            if keeps_state && planned.get(attr.name).is_unknown() {
                let prior_value = prior.get(attr.name);
                if prior_value.is_known() {
                    planned.set(attr.name, prior_value.clone());
                }
            }
        }
        planned
    }
}
