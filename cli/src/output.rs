//! Console rendering of the poll state.

use livepoll_domain::AppState;

/// Render the state the way the admin dashboard presents it: the question
/// list with the current one marked, plus tallies for the current
/// question.
pub fn render_state(state: &AppState) -> String {
    let mut out = String::new();

    if state.questions.is_empty() {
        out.push_str("No questions. Add one with `livepoll add`.\n");
        return out;
    }

    for (index, question) in state.questions.iter().enumerate() {
        let marker = if index == state.current_question_index {
            ">"
        } else {
            " "
        };
        let total = state.votes.question_total(&question.id);
        out.push_str(&format!(
            "{marker} [{}] {} ({} vote{})\n",
            question.id,
            question.text,
            total,
            if total == 1 { "" } else { "s" }
        ));
    }

    if let Some(current) = state.current_question() {
        out.push('\n');
        out.push_str(&format!(
            "Current question ({} of {}):\n",
            state.current_question_index + 1,
            state.questions.len()
        ));
        for option in &current.options {
            let count = state.votes.count(&current.id, &option.id);
            out.push_str(&format!("  [{}] {:<24} {}\n", option.id, option.text, count));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use livepoll_domain::{OptionId, QuestionId, cast_vote};

    #[test]
    fn test_render_marks_current_and_counts() {
        let state = AppState::initial();
        let state = cast_vote(&state, &QuestionId::new("q1"), &OptionId::new("q1o3")).unwrap();
        let rendered = render_state(&state);
        assert!(rendered.starts_with("> [q1]"));
        assert!(rendered.contains("(1 vote)"));
        assert!(rendered.contains("Current question (1 of 3):"));
        assert!(rendered.contains("[q1o3] Rust"));
    }

    #[test]
    fn test_render_empty_list() {
        let empty = AppState {
            questions: Vec::new(),
            current_question_index: 0,
            votes: Default::default(),
        };
        assert!(render_state(&empty).contains("No questions"));
    }
}
