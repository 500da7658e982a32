#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn test_history_starts_empty() {
        let history = ConversationHistory::new();
        assert!(history.is_empty());
        assert!(history.last().is_none());
        assert_eq!(history.validate(), Ok(()));
    }

    #[test]
    fn test_tool_exchange_renders_absent_output() {
        let mut history = ConversationHistory::new();
        let call = ToolCall::new("call-1", "get_table_scheme", r#"{"table_name":"users"}"#);

        history.push_user("describe users");
        history.push_tool_exchange(
            Message::assistant_tool_call(call.clone()),
            Message::tool_result(&call.id, &call.function.name, ToolOutput::Absent.render()),
        );

        let last = history.last().unwrap();
        assert_eq!(last.role, Role::Tool);
        assert_eq!(last.text(), NO_RESULT_SENTINEL);
        assert_eq!(history.validate(), Ok(()));
    }

    #[test]
    fn test_tool_schema_creation() {
        let schema = ToolSchema {
            schema_type: "function".to_string(),
            function: FunctionSchema {
                name: "get_table_list".to_string(),
                description: "Fetches the current table definitions".to_string(),
                parameters: serde_json::json!({
                    "type": "object",
                    "properties": {},
                    "required": []
                }),
            },
        };

        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value["type"], "function");
        assert_eq!(value["function"]["name"], "get_table_list");
    }

    #[test]
    fn test_agent_error_messages() {
        assert_eq!(
            AgentError::ModelUnavailable("HTTP 429".to_string()).to_string(),
            "Model unavailable: HTTP 429"
        );
        assert_eq!(
            AgentError::TooManyToolCalls(25).to_string(),
            "Stopped after 25 tool calls without a final answer"
        );
    }

    #[test]
    fn test_agent_event_serialization() {
        let event = AgentEvent::ToolComplete {
            tool_call_id: "call-1".to_string(),
            tool_name: "find_records".to_string(),
            found: false,
        };

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "tool_complete");
        assert_eq!(value["found"], false);
    }
}
