use std::collections::BTreeMap;

use uuid::Uuid;

use crate::tools::ToolCall;

/// One streamed fragment of a tool call, as sent by OpenAI-compatible providers.
///
/// The first fragment for an `index` usually carries `id` and `name`; later
/// fragments only append to `arguments`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCallDelta {
    pub index: usize,
    pub id: Option<String>,
    pub name: Option<String>,
    pub arguments: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PartialToolCall {
    id: String,
    name: String,
    arguments: String,
}

/// Merges streamed tool-call fragments into complete calls, in request order.
#[derive(Debug, Default, Clone)]
pub struct ToolCallAccumulator {
    parts: BTreeMap<usize, PartialToolCall>,
}

impl ToolCallAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, delta: ToolCallDelta) {
        let part = self.parts.entry(delta.index).or_default();

        if let Some(id) = delta.id.filter(|id| !id.is_empty()) {
            part.id = id;
        }
        if let Some(name) = delta.name.filter(|name| !name.is_empty()) {
            part.name = name;
        }
        if let Some(arguments) = delta.arguments {
            part.arguments.push_str(&arguments);
        }
    }

    pub fn extend<I>(&mut self, deltas: I)
    where
        I: IntoIterator<Item = ToolCallDelta>,
    {
        for delta in deltas {
            self.update(delta);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Calls without a name are dropped; calls without an id get a generated one.
    pub fn finalize(self) -> Vec<ToolCall> {
        self.parts
            .into_values()
            .filter(|part| {
                let named = !part.name.trim().is_empty();
                if !named {
                    log::warn!(
                        "Dropping streamed tool call without a name (id: {:?}, arguments: {:?})",
                        part.id,
                        part.arguments
                    );
                }
                named
            })
            .map(|part| {
                let id = if part.id.is_empty() {
                    format!("call_{}", Uuid::new_v4())
                } else {
                    part.id
                };
                ToolCall::new(id, part.name, part.arguments)
            })
            .collect()
    }
}
