//! Session history management

use crate::agent::types::SessionTurn;

/// Ephemeral, ordered transcript of the current process's conversation.
///
/// Grows without bound; prompt composition only reads the tail.
#[derive(Debug, Clone)]
pub struct SessionHistory {
    /// Turns in the order they happened
    turns: Vec<SessionTurn>,
}

impl SessionHistory {
    /// Create an empty session
    pub fn new() -> Self {
        SessionHistory { turns: Vec::new() }
    }

    /// Append a turn
    pub fn push(&mut self, turn: SessionTurn) {
        self.turns.push(turn);
    }

    /// Record a completed exchange: the user input then the reply
    pub fn record_exchange(&mut self, user_input: impl Into<String>, reply: impl Into<String>) {
        self.push(SessionTurn::user(user_input));
        self.push(SessionTurn::assistant(reply));
    }

    /// Get the last N turns, oldest first
    pub fn recent(&self, n: usize) -> &[SessionTurn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    /// Render the last N turns as newline-joined `Role: content` lines.
    ///
    /// Returns `None` when there is no history.
    pub fn render_recent(&self, n: usize) -> Option<String> {
        let recent = self.recent(n);
        if recent.is_empty() {
            return None;
        }
        Some(
            recent
                .iter()
                .map(SessionTurn::render)
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }

    /// All turns
    pub fn turns(&self) -> &[SessionTurn] {
        &self.turns
    }

    /// Get turn count
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Check if the session is empty
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl Default for SessionHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::types::Role;

    #[test]
    fn test_empty_history_renders_none() {
        let history = SessionHistory::new();
        assert!(history.is_empty());
        assert!(history.render_recent(6).is_none());
    }

    #[test]
    fn test_record_exchange() {
        let mut history = SessionHistory::new();
        history.record_exchange("Hello", "Hi there!");

        assert_eq!(history.len(), 2);
        assert_eq!(history.turns()[0].role, Role::User);
        assert_eq!(history.turns()[1].role, Role::Assistant);
        assert_eq!(history.turns()[1].content, "Hi there!");
    }

    #[test]
    fn test_render_recent_keeps_last_six_in_order() {
        let mut history = SessionHistory::new();
        for i in 0..5 {
            history.record_exchange(format!("q{}", i), format!("a{}", i));
        }
        assert_eq!(history.len(), 10);

        let rendered = history.render_recent(6).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "User: q2",
                "Assistant: a2",
                "User: q3",
                "Assistant: a3",
                "User: q4",
                "Assistant: a4",
            ]
        );
    }

    #[test]
    fn test_recent_with_short_history() {
        let mut history = SessionHistory::new();
        history.push(SessionTurn::user("only"));
        assert_eq!(history.recent(6).len(), 1);
    }
}
