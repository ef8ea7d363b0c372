//! Default question set seeded on first run and on session reset.

use crate::poll::question::{PollOption, Question};

/// The questions a fresh session starts with.
pub fn default_questions() -> Vec<Question> {
    vec![
        Question::new(
            "q1",
            "What is your favorite programming language?",
            vec![
                PollOption::new("q1o1", "JavaScript"),
                PollOption::new("q1o2", "Python"),
                PollOption::new("q1o3", "Rust"),
                PollOption::new("q1o4", "Go"),
            ],
        ),
        Question::new(
            "q2",
            "Which frontend framework do you prefer?",
            vec![
                PollOption::new("q2o1", "React"),
                PollOption::new("q2o2", "Vue"),
                PollOption::new("q2o3", "Svelte"),
                PollOption::new("q2o4", "Angular"),
            ],
        ),
        Question::new(
            "q3",
            "What is the most important factor in a new job?",
            vec![
                PollOption::new("q3o1", "Salary"),
                PollOption::new("q3o2", "Work-Life Balance"),
                PollOption::new("q3o3", "Company Culture"),
                PollOption::new("q3o4", "Career Growth"),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid_questions() {
        let questions = default_questions();
        assert_eq!(questions.len(), 3);
        for question in &questions {
            question.validate().expect("default question must validate");
            assert_eq!(question.options.len(), 4);
        }
    }
}
