//! Helpers for driving sessions in tests.

use std::collections::VecDeque;

use crate::prompt::Prompt;

/// A prompt source that replays scripted replies in order. Asking past
/// the end of the script behaves as a cancel.
pub struct ScriptedPrompt {
    /// Replies to hand out, front first. `None` is a cancel.
    replies: VecDeque<Option<String>>,
}

impl ScriptedPrompt {
    /// A prompt with an explicit reply script.
    pub fn new(replies: Vec<Option<String>>) -> Self {
        ScriptedPrompt {
            replies: replies.into(),
        }
    }

    /// A prompt that answers each ask with the next string.
    pub fn answers(replies: &[&str]) -> Self {
        ScriptedPrompt {
            replies: replies.iter().map(|r| Some((*r).to_string())).collect(),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, _title: &str, _initial: &str) -> Option<String> {
        self.replies.pop_front().flatten()
    }
}

/// A prompt source that accepts every suggestion unchanged, like a user
/// hitting enter on each dialog.
pub struct AcceptingPrompt;

impl Prompt for AcceptingPrompt {
    fn ask(&mut self, _title: &str, initial: &str) -> Option<String> {
        Some(initial.to_string())
    }
}
