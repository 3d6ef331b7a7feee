//! Demo-value substitution for anonymized exports.
//!
//! Overrides are registered per model and field at configuration time;
//! anything without an override falls back to a `Demo <field>` placeholder.

use std::collections::HashMap;
use std::fmt;

type DemoFn = Box<dyn Fn() -> String + Send + Sync>;

#[derive(Default)]
pub struct AnonymizerRegistry {
    overrides: HashMap<String, HashMap<String, DemoFn>>,
}

impl AnonymizerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a substitution function for one field of one model.
    pub fn register<F>(&mut self, model: impl Into<String>, field: impl Into<String>, demo: F)
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.overrides
            .entry(model.into())
            .or_default()
            .insert(field.into(), Box::new(demo));
    }

    /// The substitute value for a text field.
    pub fn substitute(&self, model: &str, field: &str) -> String {
        match self
            .overrides
            .get(model)
            .and_then(|fields| fields.get(field))
        {
            Some(demo) => demo(),
            None => format!("Demo {field}"),
        }
    }
}

impl fmt::Debug for AnonymizerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut registered: Vec<(&str, usize)> = self
            .overrides
            .iter()
            .map(|(model, fields)| (model.as_str(), fields.len()))
            .collect();
        registered.sort_unstable();
        f.debug_struct("AnonymizerRegistry")
            .field("overrides", &registered)
            .finish()
    }
}
