use crate::model::ChatMessage;
use crate::store::effect::{EffectContext, Strategy};
use crate::store::{AppAction, AppState};

use super::actions::ChatAction;

const SEND: &str = "chat/send";

pub(crate) fn run(action: &ChatAction, state: &AppState, ctx: &EffectContext) {
    let ChatAction::SendMessage { request } = action else {
        return;
    };

    let mut request = request.clone();
    if request.session_id.is_none() {
        request.session_id = state.chat.current_session_id.clone();
    }

    let api = ctx.chat();
    ctx.runner().spawn(
        SEND,
        Strategy::Merge,
        async move {
            match api.send_message(&request).await {
                Ok(response) => ChatAction::SendMessageSuccess {
                    session_id: response.session_id,
                    message: ChatMessage::bot(response.message),
                    suggestions: response.suggestions,
                },
                Err(err) => ChatAction::SendMessageFailure {
                    error: err.to_string(),
                },
            }
            .into()
        },
        send_failure,
    );
}

fn send_failure(error: String) -> AppAction {
    ChatAction::SendMessageFailure { error }.into()
}
