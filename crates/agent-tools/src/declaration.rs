use agent_core::tools::{FunctionSchema, ToolSchema};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Number,
    Array,
}

impl ParamType {
    fn as_str(self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Array => "array",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub param_type: ParamType,
    /// Element type for [`ParamType::Array`] parameters.
    pub items: Option<ParamType>,
    pub description: &'static str,
    pub required: bool,
}

impl ParamSpec {
    pub fn required(name: &'static str, param_type: ParamType, description: &'static str) -> Self {
        Self {
            name,
            param_type,
            items: None,
            description,
            required: true,
        }
    }

    pub fn of(mut self, items: ParamType) -> Self {
        self.items = Some(items);
        self
    }
}

/// Static description of one tool, shown to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDeclaration {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Vec<ParamSpec>,
}

impl ToolDeclaration {
    pub fn required_parameters(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.parameters
            .iter()
            .filter(|param| param.required)
            .map(|param| param.name)
    }

    /// JSON-schema `parameters` object in the OpenAI function format.
    pub fn parameters_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|param| {
                let mut property = json!({
                    "type": param.param_type.as_str(),
                    "description": param.description,
                });
                if let Some(items) = param.items {
                    property["items"] = json!({ "type": items.as_str() });
                }
                (param.name.to_string(), property)
            })
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": self.required_parameters().collect::<Vec<_>>(),
        })
    }

    pub fn to_schema(&self) -> ToolSchema {
        ToolSchema {
            schema_type: "function".to_string(),
            function: FunctionSchema {
                name: self.name.to_string(),
                description: self.description.to_string(),
                parameters: self.parameters_schema(),
            },
        }
    }
}
