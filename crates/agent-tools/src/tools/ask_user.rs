use agent_core::ToolOutput;
use serde::Deserialize;

use crate::declaration::{ParamSpec, ParamType, ToolDeclaration};
use crate::prompt::UserPrompt;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClarificationArgs {
    pub question_to_user: String,
}

pub(crate) fn declaration() -> ToolDeclaration {
    ToolDeclaration {
        name: "ask_user_for_clarification",
        description: "Poses a question to the user and returns their response",
        parameters: vec![ParamSpec::required(
            "question_to_user",
            ParamType::String,
            "The question to ask the user",
        )],
    }
}

pub(crate) async fn run(prompt: &dyn UserPrompt, args: &ClarificationArgs) -> ToolOutput {
    match prompt.ask(&args.question_to_user).await {
        Ok(Some(answer)) => ToolOutput::Text(answer),
        Ok(None) => {
            log::debug!("ask_user_for_clarification: input closed");
            ToolOutput::Absent
        }
        Err(e) => {
            log::warn!("ask_user_for_clarification: {}", e);
            ToolOutput::Absent
        }
    }
}
