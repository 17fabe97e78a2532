//! Prompt text for the coding agents and the arbitrator.

/// System prompt shared by both coding agents.
pub const CODER_SYSTEM_PROMPT: &str = r#"You are a Python expert. Write code that follows PEP 8 and PEP 484.
The code you produce must always define this function:

def run_task(n: int) -> List[int]:
    """Run the task.

    Args:
        n: input value

    Returns:
        list of results
    """

Expected behaviour of run_task for the reference task (a table of squares):
- run_task(5) == [1, 4, 9, 16, 25]
- run_task(0) == []
- run_task(1) == [1]
- run_task(-1) raises ValueError

Reply with the complete module and nothing else."#;

/// System prompt for the arbitration agent.
pub const ARBITRATOR_SYSTEM_PROMPT: &str =
    "You are the arbitrator of a code review. Choose the best code, or combine the two, \
     and reply with the final module only.";

/// Prefix that marks a corrective prompt built from check failures.
pub const CHECK_FAIL_MARKER: &str = "[CHECK_FAIL]";

/// Initial generation request.
pub fn generation(task: &str) -> String {
    format!(
        "Carry out the following task:\n{task}\n\n\
         Return the complete code, from the imports down to the \
         `if __name__ == '__main__'` block."
    )
}

/// Ask an agent to review the other agent's candidate.
pub fn review(code: &str) -> String {
    format!("Review the following code:\n\n{code}")
}

/// Ask an agent to revise its own candidate using the other agent's review.
pub fn revise(code: &str, feedback: &str) -> String {
    format!(
        "Revise your code based on the following feedback:\n\n{feedback}\n\n\
         Your current code:\n\n{code}\n\n\
         Return the complete corrected module."
    )
}

/// Feed an agent its own failing check output.
pub fn check_failure(code: &str, failure_log: &str) -> String {
    format!(
        "{CHECK_FAIL_MARKER}\n{failure_log}\n\n\
         Fix the errors above.\n\n\
         Your current code:\n\n{code}"
    )
}

/// Ask the arbitrator to pick between the two final candidates.
pub fn arbitration(name_a: &str, code_a: &str, name_b: &str, code_b: &str) -> String {
    format!(
        "Choose the best of the following two pieces of code:\n\n\
         {name_a}:\n{code_a}\n\n\
         {name_b}:\n{code_b}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_failure_starts_with_marker() {
        let prompt = check_failure("x = 1", "=== Lint Errors ===\nF841");
        assert!(prompt.starts_with("[CHECK_FAIL]\n=== Lint Errors ===\nF841"));
        assert!(prompt.ends_with("x = 1"));
    }

    #[test]
    fn test_arbitration_labels_both_candidates() {
        let prompt = arbitration("ChatGPT", "a = 1", "Claude", "b = 2");
        assert!(prompt.contains("ChatGPT:\na = 1"));
        assert!(prompt.contains("Claude:\nb = 2"));
    }

    #[test]
    fn test_generation_keeps_empty_task() {
        let prompt = generation("");
        assert!(prompt.starts_with("Carry out the following task:\n\n"));
    }
}
