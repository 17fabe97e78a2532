//! Integration tests for the review loop.
//!
//! Agents are `ScriptedAgent`s and the check tools are a `MockRunner`, so
//! every test is deterministic and runs offline.

use duet_agents::ScriptedAgent;
use duet_checks::{CheckConfig, CheckRunner, MockResponse, MockRunner};
use duet_core::prompts::CHECK_FAIL_MARKER;
use duet_core::{AgentSet, CoreError, LoopConfig, LoopPhase, Owner, ReviewLoop};
use tempfile::TempDir;

struct Harness {
    _temp: TempDir,
    model_a: ScriptedAgent,
    model_b: ScriptedAgent,
    arbitrator: ScriptedAgent,
    tools: MockRunner,
    review: ReviewLoop,
}

fn harness(
    model_a: ScriptedAgent,
    model_b: ScriptedAgent,
    tools: MockRunner,
    config: LoopConfig,
) -> Harness {
    let temp = tempfile::tempdir().unwrap();
    let arbitrator = ScriptedAgent::new("Arbitrator").respond_with(|_| "final code".to_string());
    let checks = CheckRunner::new(
        CheckConfig::new().with_scratch_file(temp.path().join("workspace/temp.py")),
        tools.clone(),
    );
    let agents = AgentSet::new(model_a.clone(), model_b.clone(), arbitrator.clone());

    Harness {
        _temp: temp,
        model_a,
        model_b,
        arbitrator,
        tools,
        review: ReviewLoop::new(agents, checks, config),
    }
}

/// Coder that answers by prompt kind, tagging replies with its own name.
fn coder(name: &'static str) -> ScriptedAgent {
    ScriptedAgent::new(name).respond_with(move |prompt| {
        if prompt.starts_with(CHECK_FAIL_MARKER) {
            format!("{name} fixed code")
        } else if prompt.starts_with("Review") {
            format!("{name} feedback")
        } else if prompt.starts_with("Revise") {
            format!("{name} revised code")
        } else {
            format!("{name} initial code")
        }
    })
}

#[tokio::test]
async fn test_green_first_round_stops_early() {
    let model_a = ScriptedAgent::new("ChatGPT").replies(["A v0", "A's review of B", "A v1"]);
    let model_b = ScriptedAgent::new("Claude").replies(["B v0", "B's review of A", "B v1"]);
    let h = harness(model_a, model_b, MockRunner::new(), LoopConfig::new().with_max_rounds(3));

    let outcome = h.review.run("print a table of squares").await.unwrap();

    assert!(outcome.converged);
    assert_eq!(outcome.rounds_used(), 1);
    assert!(outcome.rounds[0].fixups.is_empty());
    assert_eq!(outcome.final_code, "final code");
    assert_eq!(outcome.candidate_a.code, "A v1");
    assert_eq!(outcome.candidate_b.code, "B v1");

    // One generation, one review, one revision each; nothing left unused.
    assert_eq!(h.model_a.call_count(), 3);
    assert_eq!(h.model_b.call_count(), 3);
    assert_eq!(h.model_a.remaining_replies(), 0);
    assert_eq!(h.arbitrator.call_count(), 1);
    assert!(h.model_a.prompts_containing(CHECK_FAIL_MARKER).is_empty());
    assert!(h.model_b.prompts_containing(CHECK_FAIL_MARKER).is_empty());

    // Two validations of three tools.
    assert_eq!(h.tools.call_count(), 6);

    assert_eq!(
        outcome.phases,
        vec![
            LoopPhase::Generating,
            LoopPhase::Reviewing,
            LoopPhase::Correcting,
            LoopPhase::Validating,
            LoopPhase::Converged,
            LoopPhase::Arbitrating,
            LoopPhase::Done,
        ]
    );
}

#[tokio::test]
async fn test_reviews_are_cross_wired() {
    let model_a = ScriptedAgent::new("ChatGPT").replies(["A v0", "A's review of B", "A v1"]);
    let model_b = ScriptedAgent::new("Claude").replies(["B v0", "B's review of A", "B v1"]);
    let h = harness(model_a, model_b, MockRunner::new(), LoopConfig::new().with_max_rounds(1));

    h.review.run("task").await.unwrap();

    let a_prompts = h.model_a.prompts();
    let b_prompts = h.model_b.prompts();

    // Both agents get the same task.
    assert_eq!(a_prompts[0], b_prompts[0]);
    assert!(a_prompts[0].contains("task"));

    // Each agent reviews the other's code.
    assert!(a_prompts[1].starts_with("Review") && a_prompts[1].contains("B v0"));
    assert!(b_prompts[1].starts_with("Review") && b_prompts[1].contains("A v0"));

    // Each agent revises its own code using the other's review.
    assert!(a_prompts[2].contains("B's review of A") && a_prompts[2].contains("A v0"));
    assert!(b_prompts[2].contains("A's review of B") && b_prompts[2].contains("B v0"));

    // The arbitrator sees both final candidates under the agents' names.
    let arbitration = &h.arbitrator.prompts()[0];
    assert!(arbitration.contains("ChatGPT:\nA v1"));
    assert!(arbitration.contains("Claude:\nB v1"));
}

#[tokio::test]
async fn test_never_green_uses_every_round_and_still_arbitrates() {
    let tools = MockRunner::new().with_default(MockResponse::failure(1, "FAILED"));
    let h = harness(coder("A"), coder("B"), tools, LoopConfig::new().with_max_rounds(2));

    let outcome = h.review.run("task").await.unwrap();

    assert!(!outcome.converged);
    assert_eq!(outcome.rounds_used(), 2);
    for record in &outcome.rounds {
        assert!(!record.green_a && !record.green_b);
        assert_eq!(record.fixups, vec![Owner::A, Owner::B]);
    }

    // Fix-up replies replace the candidates and reach the arbitrator.
    assert_eq!(outcome.candidate_a.code, "A fixed code");
    assert_eq!(outcome.candidate_a.revisions, 4);
    assert!(h.arbitrator.prompts()[0].contains("A fixed code"));
    assert_eq!(outcome.final_code, "final code");

    let fixups = h.model_a.prompts_containing(CHECK_FAIL_MARKER);
    assert_eq!(fixups.len(), 2);
    assert!(fixups[0].contains("=== Test Failures ===\nFAILED"));
    assert!(fixups[0].contains("=== Lint Errors ==="));
    assert!(fixups[0].contains("=== Type Check Errors ==="));

    assert_eq!(h.tools.call_count(), 2 * 2 * 3);
}

#[tokio::test]
async fn test_only_failing_candidate_is_fixed_then_converges() {
    // The first pytest call checks candidate A in round 0; everything else passes.
    let tools = MockRunner::new().add_response("pytest", MockResponse::failure(1, "1 failed"));
    let h = harness(coder("A"), coder("B"), tools, LoopConfig::new().with_max_rounds(5));

    let outcome = h.review.run("task").await.unwrap();

    assert!(outcome.converged);
    assert_eq!(outcome.rounds_used(), 2);
    assert_eq!(outcome.rounds[0].fixups, vec![Owner::A]);
    assert!(!outcome.rounds[0].green_a);
    assert!(outcome.rounds[0].green_b);
    assert!(outcome.rounds[1].converged());

    assert_eq!(h.model_a.prompts_containing(CHECK_FAIL_MARKER).len(), 1);
    assert!(h.model_b.prompts_containing(CHECK_FAIL_MARKER).is_empty());

    // Round 1 reviews the fixed code, not the failing revision.
    assert!(h.model_b.prompts()[3].contains("A fixed code"));
}

#[tokio::test]
async fn test_zero_rounds_goes_straight_to_arbitration() {
    let tools = MockRunner::new();
    let h = harness(coder("A"), coder("B"), tools, LoopConfig::new().with_max_rounds(0));

    let outcome = h.review.run("task").await.unwrap();

    assert!(!outcome.converged);
    assert!(outcome.rounds.is_empty());
    assert_eq!(h.model_a.call_count(), 1);
    assert_eq!(h.tools.call_count(), 0);
    assert!(h.arbitrator.prompts()[0].contains("A initial code"));
    assert_eq!(
        outcome.phases,
        vec![LoopPhase::Generating, LoopPhase::Arbitrating, LoopPhase::Done]
    );
}

#[tokio::test]
async fn test_agent_failure_aborts_the_run() {
    let model_b = ScriptedAgent::new("Claude").simulate_failure("401 unauthorized");
    let h = harness(coder("A"), model_b, MockRunner::new(), LoopConfig::default());

    let err = h.review.run("task").await.unwrap_err();

    let CoreError::Agent(cause) = &err else {
        panic!("expected an agent error, got {err:?}");
    };
    assert!(cause.to_string().contains("401 unauthorized"));
    // The cause is reported once, through the source chain.
    assert_eq!(err.to_string(), "Agent call failed");
    assert!(std::error::Error::source(&err).is_some());
    assert_eq!(h.arbitrator.call_count(), 0);
    assert_eq!(h.tools.call_count(), 0);
}

#[tokio::test]
async fn test_extract_code_strips_fences() {
    let fenced = |body: &str| format!("Sure:\n```python\n{body}\n```\nDone.");
    let model_a = ScriptedAgent::new("A").replies([
        fenced("a = 0"),
        "looks fine".to_string(),
        fenced("a = 1"),
    ]);
    let model_b = ScriptedAgent::new("B").replies([
        fenced("b = 0"),
        "looks fine".to_string(),
        fenced("b = 1"),
    ]);
    let h = harness(
        model_a,
        model_b,
        MockRunner::new(),
        LoopConfig::new().with_max_rounds(1).with_extract_code(true),
    );

    let outcome = h.review.run("task").await.unwrap();

    assert_eq!(outcome.candidate_a.code, "a = 1\n");
    assert_eq!(outcome.candidate_b.code, "b = 1\n");

    // The scratch file only ever held code, never the chat prose.
    assert!(h
        .tools
        .get_calls()
        .iter()
        .all(|c| !c.file_snapshot.as_deref().unwrap_or("").contains("Sure:")));
}
