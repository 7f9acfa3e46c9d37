use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sections the planning backend is known to emit. Each may arrive in either
/// PascalCase or snake_case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanSection {
    ProductDefinition,
    FunctionalRequirements,
    NonFunctionalRequirements,
    TechnicalArchitecture,
    ExecutionRoadmap,
}

impl PlanSection {
    pub const ALL: [PlanSection; 5] = [
        PlanSection::ProductDefinition,
        PlanSection::FunctionalRequirements,
        PlanSection::NonFunctionalRequirements,
        PlanSection::TechnicalArchitecture,
        PlanSection::ExecutionRoadmap,
    ];

    pub fn pascal_key(self) -> &'static str {
        match self {
            PlanSection::ProductDefinition => "ProductDefinition",
            PlanSection::FunctionalRequirements => "FunctionalRequirements",
            PlanSection::NonFunctionalRequirements => "NonFunctionalRequirements",
            PlanSection::TechnicalArchitecture => "TechnicalArchitecture",
            PlanSection::ExecutionRoadmap => "ExecutionRoadmap",
        }
    }

    pub fn snake_key(self) -> &'static str {
        match self {
            PlanSection::ProductDefinition => "product_definition",
            PlanSection::FunctionalRequirements => "functional_requirements",
            PlanSection::NonFunctionalRequirements => "non_functional_requirements",
            PlanSection::TechnicalArchitecture => "technical_architecture",
            PlanSection::ExecutionRoadmap => "execution_roadmap",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|section| section.pascal_key() == key || section.snake_key() == key)
    }
}

/// Execution plan as produced by the backend. Kept as an open JSON object so
/// unknown sections and arbitrary nesting survive untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan(Map<String, Value>);

impl Plan {
    pub fn new(sections: Map<String, Value>) -> Self {
        Self(sections)
    }

    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// PascalCase wins when both spellings are present.
    pub fn section(&self, section: PlanSection) -> Option<&Value> {
        self.0
            .get(section.pascal_key())
            .filter(|value| !value.is_null())
            .or_else(|| self.0.get(section.snake_key()))
    }

    pub fn product_definition(&self) -> Option<&Value> {
        self.section(PlanSection::ProductDefinition)
    }

    pub fn technical_architecture(&self) -> Option<&Value> {
        self.section(PlanSection::TechnicalArchitecture)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Sections whose key is not one of the known [`PlanSection`] spellings.
    pub fn extra_sections(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0
            .iter()
            .filter(|(key, _)| PlanSection::from_key(key).is_none())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}
