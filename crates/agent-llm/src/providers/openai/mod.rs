use async_trait::async_trait;
use reqwest::Client;

use crate::provider::{LLMError, LLMProvider, LLMStream, Result};
use agent_core::{tools::ToolSchema, Message};

use super::common::openai_compat::{build_openai_compat_body, parse_openai_compat_sse_data};
use super::common::sse::llm_stream_from_sse;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAIProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: agent_core::config::DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    async fn chat_stream(&self, messages: &[Message], tools: &[ToolSchema]) -> Result<LLMStream> {
        let body = build_openai_compat_body(&self.model, messages, tools);

        log::debug!(
            "OpenAI request: model={}, messages={}, tools={}",
            self.model,
            messages.len(),
            tools.len()
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            return Err(LLMError::Api(format!("HTTP {}: {}", status, text)));
        }

        Ok(llm_stream_from_sse(response, parse_openai_compat_sse_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LLMChunk;
    use agent_core::tools::{FunctionSchema, ToolCallAccumulator};
    use futures::StreamExt;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sse(events: &[&str]) -> String {
        events
            .iter()
            .map(|data| format!("data: {data}\n\n"))
            .collect()
    }

    fn schema() -> ToolSchema {
        ToolSchema {
            schema_type: "function".to_string(),
            function: FunctionSchema {
                name: "get_table_list".to_string(),
                description: "Fetches the current table definitions".to_string(),
                parameters: serde_json::json!({"type": "object", "properties": {}, "required": []}),
            },
        }
    }

    #[test]
    fn test_default_values() {
        let provider = OpenAIProvider::new("test_key");
        assert_eq!(provider.api_key, "test_key");
        assert_eq!(provider.base_url, "https://api.openai.com/v1");
        assert_eq!(provider.model(), "gpt-4-turbo-preview");
    }

    #[test]
    fn test_chained_builders() {
        let provider = OpenAIProvider::new("test_key")
            .with_base_url("http://localhost:11434/v1/")
            .with_model("gpt-4o");

        assert_eq!(provider.base_url, "http://localhost:11434/v1");
        assert_eq!(provider.model(), "gpt-4o");
    }

    #[tokio::test]
    async fn test_streams_text_answer() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "stream": true,
                "tool_choice": "auto"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(sse(&[
                        r#"{"choices":[{"delta":{"role":"assistant","content":"Table "}}]}"#,
                        r#"{"choices":[{"delta":{"content":"users"}}]}"#,
                        "[DONE]",
                    ])),
            )
            .mount(&mock_server)
            .await;

        let provider = OpenAIProvider::new("sk-test")
            .with_base_url(mock_server.uri())
            .with_model("gpt-4o-mini");

        let mut stream = provider
            .chat_stream(&[Message::user("list tables")], &[schema()])
            .await
            .expect("stream");

        let mut text = String::new();
        while let Some(chunk) = stream.next().await {
            match chunk.expect("chunk") {
                LLMChunk::Token(token) => text.push_str(&token),
                other => panic!("unexpected chunk: {other:?}"),
            }
        }

        assert_eq!(text, "Table users");
    }

    #[tokio::test]
    async fn test_streams_tool_call_fragments() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(sse(&[
                        r#"{"choices":[{"delta":{"tool_calls":[{"index":0,"id":"call_abc","type":"function","function":{"name":"get_table_scheme","arguments":""}}]}}]}"#,
                        r#"{"choices":[{"delta":{"tool_calls":[{"index":0,"function":{"arguments":"{\"table_name\":"}}]}}]}"#,
                        r#"{"choices":[{"delta":{"tool_calls":[{"index":0,"function":{"arguments":"\"users\"}"}}]}}]}"#,
                        r#"{"choices":[{"delta":{},"finish_reason":"tool_calls"}]}"#,
                        "[DONE]",
                    ])),
            )
            .mount(&mock_server)
            .await;

        let provider = OpenAIProvider::new("sk-test").with_base_url(mock_server.uri());
        let mut stream = provider
            .chat_stream(&[Message::user("describe users")], &[schema()])
            .await
            .expect("stream");

        let mut accumulator = ToolCallAccumulator::new();
        while let Some(chunk) = stream.next().await {
            if let LLMChunk::ToolCalls(deltas) = chunk.expect("chunk") {
                accumulator.extend(deltas);
            }
        }

        let calls = accumulator.finalize();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, "call_abc");
        assert_eq!(calls[0].function.name, "get_table_scheme");
        assert_eq!(calls[0].function.arguments, r#"{"table_name":"users"}"#);
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string(
                r#"{"error":{"message":"Invalid API key","code":"invalid_api_key"}}"#,
            ))
            .mount(&mock_server)
            .await;

        let provider = OpenAIProvider::new("bad").with_base_url(mock_server.uri());
        let result = provider.chat_stream(&[Message::user("hi")], &[]).await;

        match result {
            Err(LLMError::Api(message)) => {
                assert!(message.starts_with("HTTP 401"));
                assert!(message.contains("Invalid API key"));
            }
            Err(other) => panic!("expected LLMError::Api, got {other:?}"),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[tokio::test]
    async fn test_invalid_chunk_surfaces_stream_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(sse(&["{not valid json}"])),
            )
            .mount(&mock_server)
            .await;

        let provider = OpenAIProvider::new("sk-test").with_base_url(mock_server.uri());
        let mut stream = provider
            .chat_stream(&[Message::user("hi")], &[])
            .await
            .expect("stream");

        assert!(matches!(stream.next().await, Some(Err(LLMError::Stream(_)))));
    }
}
