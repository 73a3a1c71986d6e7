//! End-to-end tests: document loading through delegation and status
//! tracking.
mod common;
use common::*;
use flowc::engine::{JobClient, JobClientError, TaskChain};
use flowc::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn full_translation_from_raw_document() {
    let flow = Flow::from_json_str(three_node_document()).unwrap();
    let flow = normalize(flow);
    let ordered = linearize(&flow).unwrap();

    let commands = flat_commands(&ordered);
    assert_eq!(
        commands,
        vec!["cat /tmp/in.txt | /bin/grep pattern  > /tmp/out.txt".to_string()]
    );

    let plan = Synthesizer::new(&flow).structured(&ordered);
    assert_eq!(plan.steps.len(), 3);
    assert_eq!(plan.workflow_name(), "cat-grep-print");
}

#[test]
fn status_record_round_trips_every_state() {
    let dir = tempfile::tempdir().unwrap();
    let status = WorkflowStatus::new(dir.path());

    for state in [
        RunState::Ready,
        RunState::Running,
        RunState::Finished,
        RunState::Error,
    ] {
        status.save(state).unwrap();
        assert_eq!(status.load().unwrap(), state);
    }

    let content = std::fs::read_to_string(dir.path().join(".workflow-status.json")).unwrap();
    assert_eq!(content, r#"{"state":"ERROR"}"#);
}

#[test]
fn status_errors_distinguish_reading_from_writing() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".workflow-status.json"), "not json").unwrap();
    let err = WorkflowStatus::new(dir.path()).load().unwrap_err();
    assert!(matches!(err, EngineError::StatusParse { .. }));

    // The write-side variant talks about serialization, not about the
    // file's contents being invalid JSON.
    let encode = EngineError::StatusEncode {
        path: "x".to_string(),
        source: serde_json::from_str::<i64>("?").unwrap_err(),
    };
    assert!(encode.to_string().contains("serialize"));
    assert!(!encode.to_string().contains("not valid JSON"));
}

#[test]
fn task_chain_links_each_task_to_its_predecessor() {
    let chain = TaskChain::from_commands(
        "job",
        vec!["echo a".to_string(), "echo b".to_string(), "echo c".to_string()],
    );
    assert_eq!(chain.tasks.len(), 3);
    assert_eq!(chain.tasks[0].name, "task_0");
    assert_eq!(chain.tasks[0].parent, None);
    assert_eq!(chain.tasks[1].parent, Some(0));
    assert_eq!(chain.tasks[2].parent, Some(1));
}

/// Records the call sequence the chain engine makes against the job seam.
struct RecordingClient {
    calls: Rc<RefCell<Vec<String>>>,
    fail_on_run: bool,
}

impl JobClient for RecordingClient {
    fn reset(&mut self) -> std::result::Result<(), JobClientError> {
        self.calls.borrow_mut().push("reset".to_string());
        Ok(())
    }

    fn submit(&mut self, chain: &TaskChain) -> std::result::Result<(), JobClientError> {
        self.calls
            .borrow_mut()
            .push(format!("submit {} ({} tasks)", chain.name, chain.tasks.len()));
        Ok(())
    }

    fn run_to_completion(&mut self) -> std::result::Result<(), JobClientError> {
        self.calls.borrow_mut().push("run".to_string());
        if self.fail_on_run {
            Err("scheduler unavailable".into())
        } else {
            Ok(())
        }
    }
}

#[test]
fn chain_engine_delegates_and_records_finished() {
    let dir = tempfile::tempdir().unwrap();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let client = RecordingClient {
        calls: Rc::clone(&calls),
        fail_on_run: false,
    };

    let mut engine = ChainEngine::new(dir.path(), client);
    engine.execute(three_node_flow(), "job-1").unwrap();

    assert_eq!(
        *calls.borrow(),
        vec!["reset", "submit job-1 (1 tasks)", "run"]
    );
    let status = WorkflowStatus::new(dir.path());
    assert_eq!(status.load().unwrap(), RunState::Finished);
}

#[test]
fn chain_engine_records_error_without_propagating() {
    let dir = tempfile::tempdir().unwrap();
    let client = RecordingClient {
        calls: Rc::new(RefCell::new(Vec::new())),
        fail_on_run: true,
    };

    let mut engine = ChainEngine::new(dir.path(), client);
    // External failure is terminal best-effort: logged and recorded, not
    // returned.
    engine.execute(three_node_flow(), "job-2").unwrap();

    let status = WorkflowStatus::new(dir.path());
    assert_eq!(status.load().unwrap(), RunState::Error);
}

#[test]
fn chain_engine_propagates_graph_errors_before_side_effects() {
    let dir = tempfile::tempdir().unwrap();
    let client = RecordingClient {
        calls: Rc::new(RefCell::new(Vec::new())),
        fail_on_run: false,
    };

    let disconnected = Flow {
        nodes: vec![tool_node(1, "/bin/a", vec![]), tool_node(2, "/bin/b", vec![])],
        connections: vec![],
    };
    let mut engine = ChainEngine::new(dir.path(), client);
    let result = engine.execute(disconnected, "bad-job");

    assert!(matches!(result, Err(EngineError::Linearize(_))));
    assert!(!dir.path().join(".workflow-status.json").exists());
}

#[test]
fn local_shell_client_runs_a_real_chain() {
    let dir = tempfile::tempdir().unwrap();
    let out_file = dir.path().join("chained.txt");

    let flow = Flow {
        nodes: vec![tool_node(
            1,
            "touch",
            vec![port("arg0", out_file.display().to_string().as_str(), 0)],
        )],
        connections: vec![],
    };
    let mut engine = ChainEngine::new(dir.path(), LocalShellClient::new());
    engine.execute(flow, "local-job").unwrap();

    assert!(out_file.exists());
    assert_eq!(
        WorkflowStatus::new(dir.path()).load().unwrap(),
        RunState::Finished
    );
}

#[test]
fn cwl_engine_emits_artifacts_and_tracks_the_run() {
    let dir = tempfile::tempdir().unwrap();
    // `true` ignores the artifact arguments and exits successfully, which
    // is all the delegation boundary observes.
    let engine = CwlEngine::new(dir.path(), "true");
    engine.execute(three_node_flow()).unwrap();

    assert!(dir.path().join("cat-grep-print-workflow.cwl").exists());
    assert!(dir.path().join("cat-grep-print-params.yml").exists());
    assert_eq!(
        WorkflowStatus::new(dir.path()).load().unwrap(),
        RunState::Finished
    );
}

#[test]
fn cwl_engine_records_error_when_the_runner_fails() {
    let dir = tempfile::tempdir().unwrap();
    let engine = CwlEngine::new(dir.path(), "false");
    engine.execute(three_node_flow()).unwrap();

    assert_eq!(
        WorkflowStatus::new(dir.path()).load().unwrap(),
        RunState::Error
    );
}
