//! SSE -> [`LLMStream`] adapter shared by OpenAI-compatible providers.

use eventsource_stream::Eventsource;
use futures_util::StreamExt;
use reqwest::Response;

use crate::provider::{LLMError, LLMStream, Result};
use crate::types::LLMChunk;

/// Convert an SSE HTTP [`Response`] into an [`LLMStream`].
///
/// `decode` turns each non-empty `data:` payload into a chunk. Decoding stops
/// after the first [`LLMChunk::Done`], which is not forwarded.
pub fn llm_stream_from_sse<D>(response: Response, decode: D) -> LLMStream
where
    D: Fn(&str) -> Result<LLMChunk> + Send + 'static,
{
    let stream = response
        .bytes_stream()
        .eventsource()
        .filter(|event| {
            let keep = match event {
                Ok(event) => !event.data.trim().is_empty(),
                Err(_) => true,
            };
            async move { keep }
        })
        .map(move |event| match event {
            Ok(event) => decode(&event.data).map_err(|error| match error {
                LLMError::Stream(message) => LLMError::Stream(message),
                other => LLMError::Stream(other.to_string()),
            }),
            Err(error) => Err(LLMError::Stream(error.to_string())),
        })
        .take_while(|chunk| {
            let more = !matches!(chunk, Ok(LLMChunk::Done));
            async move { more }
        });

    Box::pin(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn sse_response(body: &'static str) -> (MockServer, Response) {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sse"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(body),
            )
            .mount(&mock_server)
            .await;

        let response = reqwest::Client::new()
            .get(format!("{}/sse", mock_server.uri()))
            .send()
            .await
            .expect("response");

        (mock_server, response)
    }

    #[tokio::test]
    async fn llm_stream_from_sse_stops_at_done() {
        let (_server, response) =
            sse_response(concat!("data: a\n\n", "data: [DONE]\n\n", "data: b\n\n")).await;

        let mut stream = llm_stream_from_sse(response, |data| {
            if data == "[DONE]" {
                return Ok(LLMChunk::Done);
            }
            Ok(LLMChunk::Token(data.to_string()))
        });

        let mut out = Vec::new();
        while let Some(item) = stream.next().await {
            out.push(item.expect("chunk"));
        }

        assert_eq!(out, vec![LLMChunk::Token("a".to_string())]);
    }

    #[tokio::test]
    async fn llm_stream_from_sse_maps_decode_errors_to_stream_error() {
        let (_server, response) = sse_response("data: boom\n\n").await;

        let mut stream =
            llm_stream_from_sse(response, |_data| Err(LLMError::Api("boom".to_string())));

        match stream.next().await {
            Some(Err(LLMError::Stream(message))) => assert!(message.contains("API error")),
            other => panic!("expected LLMError::Stream, got: {other:?}"),
        }
    }
}
