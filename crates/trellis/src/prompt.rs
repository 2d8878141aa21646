//! Prompting for names during interactive operations.

/// Source of user-supplied names.
///
/// Operations that need a name call this at apply time, so an operation
/// launched without a precomputed name can still ask the user. Returning
/// `None` means the user cancelled, which an operation reports as a clean
/// no-op rather than an error.
pub trait Prompt: Send {
    /// Ask for a string. `title` says what is being named and `initial`
    /// is the suggested value.
    fn ask(&mut self, title: &str, initial: &str) -> Option<String>;
}

/// A prompt source that always cancels.
///
/// The default for headless use, where every operation is expected to be
/// constructed with its inputs already decided.
#[derive(Debug, Default)]
pub struct NullPrompt;

impl Prompt for NullPrompt {
    fn ask(&mut self, _title: &str, _initial: &str) -> Option<String> {
        None
    }
}
