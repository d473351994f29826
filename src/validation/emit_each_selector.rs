//! EmitEachSelector validator
//!
//! Emits one event per shape matched by a selector. With `bindToTrait` set,
//! only shapes carrying that trait produce events and each event points at
//! the trait rather than the shape. With `messageTemplate` set, the message is
//! rendered from the match (shape plus selector variables).

use attr_template::{Template, Value};
use shape_model::{Model, Selector, Shape, ShapeId, ShapeMatch, SourceLocation, TypeSelector};
use tracing::debug;

use super::event::{Severity, ValidationEvent};
use super::Validator;
use crate::config::EmitEachSelectorConfig;

pub const EMIT_EACH_SELECTOR: &str = "EmitEachSelector";

pub struct EmitEachSelectorValidator<S = TypeSelector> {
    id: String,
    severity: Severity,
    selector: S,
    bind_to_trait: Option<ShapeId>,
    message_template: Option<Template>,
}

impl EmitEachSelectorValidator<TypeSelector> {
    pub fn from_config(config: EmitEachSelectorConfig) -> Self {
        let mut validator = Self::new(config.selector);
        validator.bind_to_trait = config.bind_to_trait;
        validator.message_template = config.message_template;
        validator
    }
}

impl<S: Selector> EmitEachSelectorValidator<S> {
    pub fn new(selector: S) -> Self {
        Self {
            id: EMIT_EACH_SELECTOR.to_string(),
            severity: Severity::Danger,
            selector,
            bind_to_trait: None,
            message_template: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_bind_to_trait(mut self, trait_id: ShapeId) -> Self {
        self.bind_to_trait = Some(trait_id);
        self
    }

    pub fn with_message_template(mut self, template: Template) -> Self {
        self.message_template = Some(template);
        self
    }

    pub fn selector(&self) -> &S {
        &self.selector
    }

    /// Where an event for `shape` is reported: the binding trait when one is
    /// configured, otherwise the shape. `None` when the shape lacks the trait.
    fn event_location<'m>(&self, shape: &'m Shape) -> Option<&'m SourceLocation> {
        match &self.bind_to_trait {
            None => Some(shape.source_location()),
            Some(trait_id) => shape.find_trait(trait_id).map(|t| t.source_location()),
        }
    }

    fn create_event(
        &self,
        model: &Model,
        shape_match: &ShapeMatch,
        message: impl FnOnce() -> String,
    ) -> Option<ValidationEvent> {
        let shape_id = shape_match.shape();
        let Some(shape) = model.get_shape(shape_id) else {
            debug!(shape = %shape_id, "selector matched a shape missing from the model");
            return None;
        };
        let Some(location) = self.event_location(shape) else {
            debug!(shape = %shape_id, "skipping match without binding trait");
            return None;
        };

        debug!(shape = %shape_id, validator = %self.id, "emitting event");
        Some(
            ValidationEvent::new(&self.id, self.severity, message())
                .with_shape(shape_id.clone())
                .with_location(location.clone()),
        )
    }

    fn validate_with_simple_messages(&self, model: &Model) -> Vec<ValidationEvent> {
        let message = format!("Selector capture matched selector: {}", self.selector);
        self.selector
            .select(model)
            .iter()
            .filter_map(|shape_match| self.create_event(model, shape_match, || message.clone()))
            .collect()
    }

    fn validate_with_template(&self, model: &Model, template: &Template) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        self.selector.consume_matches(model, &mut |shape_match| {
            let event = self.create_event(model, &shape_match, || {
                template.render(&Value::shape_match(model, &shape_match))
            });
            events.extend(event);
        });
        events
    }
}

impl<S: Selector> Validator for EmitEachSelectorValidator<S> {
    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self, model: &Model) -> Vec<ValidationEvent> {
        if let Some(trait_id) = &self.bind_to_trait {
            if !model.applied_traits().contains(trait_id) {
                debug!(trait_id = %trait_id, "binding trait is never applied");
                return Vec::new();
            }
        }

        match &self.message_template {
            None => self.validate_with_simple_messages(model),
            Some(template) => self.validate_with_template(model, template),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use shape_model::ShapeKind;
    use std::fmt;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn id(text: &str) -> ShapeId {
        ShapeId::parse(text).unwrap()
    }

    fn model() -> Model {
        let a = Shape::builder(id("com.example#A"), ShapeKind::Structure)
            .source_location(SourceLocation::new("a.json", 1, 1))
            .add_trait_at(
                id("smithy.api#deprecated"),
                json!({"since": "2.0"}),
                SourceLocation::new("a.json", 2, 5),
            )
            .build();
        let b = Shape::builder(id("com.example#B"), ShapeKind::Structure)
            .source_location(SourceLocation::new("b.json", 1, 1))
            .build();
        let s = Shape::builder(id("com.example#S"), ShapeKind::String).build();
        Model::builder().add_shapes([a, b, s]).build().unwrap()
    }

    #[test]
    fn test_simple_messages() {
        let validator = EmitEachSelectorValidator::new(TypeSelector::of_kind(ShapeKind::Structure));
        let events = validator.validate(&model());
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].message, "Selector capture matched selector: structure");
        assert_eq!(events[0].severity, Severity::Danger);
        assert_eq!(events[0].id, "EmitEachSelector");
        assert_eq!(events[0].shape_id, Some(id("com.example#A")));
        assert_eq!(events[0].source_location, SourceLocation::new("a.json", 1, 1));
        assert_eq!(events[1].shape_id, Some(id("com.example#B")));
    }

    #[test]
    fn test_bound_trait_filters_and_locates() {
        let validator = EmitEachSelectorValidator::new(TypeSelector::any())
            .with_bind_to_trait(id("smithy.api#deprecated"));
        let events = validator.validate(&model());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].shape_id, Some(id("com.example#A")));
        assert_eq!(events[0].source_location, SourceLocation::new("a.json", 2, 5));
    }

    #[test]
    fn test_template_messages() {
        let validator = EmitEachSelectorValidator::new(TypeSelector::of_kind(ShapeKind::Structure))
            .with_bind_to_trait(id("smithy.api#deprecated"))
            .with_message_template(
                Template::parse("@name is deprecated since @trait(deprecated).since").unwrap(),
            )
            .with_id("Deprecated")
            .with_severity(Severity::Warning);
        let events = validator.validate(&model());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "A is deprecated since 2.0");
        assert_eq!(events[0].id, "Deprecated");
        assert_eq!(events[0].severity, Severity::Warning);
    }

    /// Counts selector runs so short-circuiting is observable
    #[derive(Default)]
    struct CountingSelector {
        runs: AtomicUsize,
    }

    impl fmt::Display for CountingSelector {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("counting")
        }
    }

    impl Selector for CountingSelector {
        fn consume_matches(&self, model: &Model, consumer: &mut dyn FnMut(ShapeMatch)) {
            self.runs.fetch_add(1, Ordering::SeqCst);
            TypeSelector::any().consume_matches(model, consumer);
        }
    }

    #[test]
    fn test_unused_binding_trait_skips_selector() {
        let validator = EmitEachSelectorValidator::new(CountingSelector::default())
            .with_bind_to_trait(id("com.example#neverApplied"));
        assert!(validator.validate(&model()).is_empty());
        assert_eq!(validator.selector().runs.load(Ordering::SeqCst), 0);

        let validator = EmitEachSelectorValidator::new(CountingSelector::default());
        assert_eq!(validator.validate(&model()).len(), 3);
        assert_eq!(validator.selector().runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_template_reads_selector_variables() {
        struct PairSelector;

        impl fmt::Display for PairSelector {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("pair")
            }
        }

        impl Selector for PairSelector {
            fn consume_matches(&self, _model: &Model, consumer: &mut dyn FnMut(ShapeMatch)) {
                consumer(
                    ShapeMatch::new(ShapeId::parse("com.example#A").unwrap())
                        .with_variable("other", vec![ShapeId::parse("com.example#B").unwrap()]),
                );
            }
        }

        let validator = EmitEachSelectorValidator::new(PairSelector)
            .with_message_template(Template::parse("@name pairs with @var(other)").unwrap());
        let events = validator.validate(&model());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "A pairs with com.example#B");
    }
}
