//! The agent control loop: request steps from the model, dispatch actions to
//! the tool registry, fold observations back into the transcript, stop on an
//! output step.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use agent_core::{
    dispatch, render_prompt, AgentError, AgentEvent, EventSink, Message, ProjectContext,
    ProjectInfo, Step, ToolRegistry,
};
use agent_llm::LLMProvider;

use crate::prompt::build_system_prompt;
use crate::rewrite::rewrite_write_path;

/// Only the file-write tool gets path rewriting; see [`rewrite_write_path`].
const WRITE_TOOL: &str = "write_file";

#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// Cap on inner-loop rounds per query, so a model that never emits an
    /// output step cannot spin forever.
    pub max_rounds: usize,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self { max_rounds: 50 }
    }
}

/// Owns the conversation transcript and the protocol state machine.
///
/// One orchestrator per session. The transcript starts with the system
/// instruction and is append-only; each call to [`Orchestrator::handle_query`]
/// runs the inner loop until the model emits an `output` step or a protocol
/// error ends the attempt. Errors are never fatal to the session: the caller
/// reports them and may issue the next query on the same orchestrator.
pub struct Orchestrator {
    provider: Arc<dyn LLMProvider>,
    registry: Arc<ToolRegistry>,
    project: ProjectContext,
    transcript: Vec<Message>,
    config: LoopConfig,
    events: Option<EventSink>,
}

impl Orchestrator {
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        registry: Arc<ToolRegistry>,
        project: ProjectContext,
        config: LoopConfig,
    ) -> Self {
        let system = build_system_prompt(&registry);
        Self {
            provider,
            registry,
            project,
            transcript: vec![Message::system(system)],
            config,
            events: None,
        }
    }

    pub fn with_event_sink(mut self, sink: EventSink) -> Self {
        self.events = Some(sink);
        self
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    fn emit(&self, event: AgentEvent) {
        if let Some(sink) = &self.events {
            sink(&event);
        }
    }

    /// Resolve one user query, returning the content of the model's final
    /// `output` step.
    pub async fn handle_query(&mut self, query: &str) -> Result<String, AgentError> {
        self.transcript.push(Message::user(query));

        for round in 0..self.config.max_rounds {
            let prompt = render_prompt(&self.transcript);
            log::debug!(
                "round {round}: requesting step ({} transcript messages)",
                self.transcript.len()
            );

            let raw = self
                .provider
                .generate(&prompt)
                .await
                .map_err(|e| AgentError::Llm(e.to_string()))?;

            let step = Step::parse(&raw)?;
            // The model sees its own prior steps in canonical JSON form
            self.transcript.push(Message::model(step.to_json()));

            match step {
                Step::Plan { content } => {
                    self.emit(AgentEvent::Plan { content });
                }
                Step::Observe { .. } => {
                    // A model-emitted observation carries no side effect;
                    // the transcript append above is all there is to it.
                }
                Step::Action {
                    function, input, ..
                } => {
                    self.emit(AgentEvent::Action {
                        function: function.clone(),
                        input: input.clone(),
                    });

                    let observation = self.perform_action(&function, input).await;

                    self.emit(AgentEvent::Observation {
                        output: observation.clone(),
                    });
                    self.transcript
                        .push(Message::model(Step::observation(observation).to_json()));
                }
                Step::Output { content } => return Ok(content),
            }
        }

        Err(AgentError::Protocol(format!(
            "no output step after {} rounds",
            self.config.max_rounds
        )))
    }

    /// Dispatch one action step and produce the observation payload. Unknown
    /// tools and tool failures come back as error payloads; they never abort
    /// the loop.
    async fn perform_action(&self, function: &str, mut input: Value) -> Value {
        if function == WRITE_TOOL {
            self.rewrite_input_path(&mut input);
        }

        let result = dispatch(&self.registry, function, input).await;

        // A successful scaffold overwrites the current-project record whole
        if let Some(info_value) = result.output.get("project_info") {
            match serde_json::from_value::<ProjectInfo>(info_value.clone()) {
                Ok(info) => {
                    self.project.replace(info.clone());
                    self.emit(AgentEvent::ProjectCreated { info });
                }
                Err(e) => log::warn!("ignoring malformed project_info in tool result: {e}"),
            }
        }

        result.output
    }

    /// Rebase a relative write path under the active project directory.
    /// Applies only when the input is a keyed mapping and a project is
    /// active; absolute paths pass through unchanged.
    fn rewrite_input_path(&self, input: &mut Value) {
        let Some(project) = self.project.current() else {
            return;
        };
        let Value::Object(map) = input else {
            return;
        };
        let Some(path) = map
            .get("file_path")
            .or_else(|| map.get("path"))
            .and_then(|value| value.as_str())
            .map(str::to_string)
        else {
            return;
        };

        if Path::new(&path).is_absolute() {
            return;
        }

        let rewritten = rewrite_write_path(&project, &path);
        self.emit(AgentEvent::PathRewritten {
            path: rewritten.clone(),
        });

        let as_string = rewritten.to_string_lossy().into_owned();
        map.insert("file_path".to_string(), Value::String(as_string.clone()));
        map.insert("path".to_string(), Value::String(as_string));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use agent_core::{Tool, ToolError, ToolResult};
    use agent_llm::{LLMError, LLMProvider};
    use agent_tools::{default_registry, SystemCommandRunner};

    use super::*;

    /// Replays a fixed sequence of model responses.
    struct ScriptedProvider {
        responses: Mutex<VecDeque<String>>,
    }

    impl ScriptedProvider {
        fn new(responses: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.iter().map(|s| s.to_string()).collect()),
            })
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn generate(&self, _prompt: &str) -> Result<String, LLMError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| LLMError::Api("script exhausted".to_string()))
        }
    }

    fn empty_registry() -> Arc<ToolRegistry> {
        Arc::new(ToolRegistry::new())
    }

    fn real_registry(project: &ProjectContext) -> Arc<ToolRegistry> {
        Arc::new(
            default_registry(Arc::new(SystemCommandRunner::new()), project.clone()).unwrap(),
        )
    }

    #[tokio::test]
    async fn plan_steps_loop_until_output() {
        let provider = ScriptedProvider::new(&[
            r#"{"step": "plan", "content": "thinking"}"#,
            r#"{"step": "plan", "content": "still thinking"}"#,
            r#"{"step": "output", "content": "all done"}"#,
        ]);
        let mut orchestrator = Orchestrator::new(
            provider,
            empty_registry(),
            ProjectContext::new(),
            LoopConfig::default(),
        );

        let output = orchestrator.handle_query("do something").await.unwrap();
        assert_eq!(output, "all done");
        // system + user + three model steps
        assert_eq!(orchestrator.transcript().len(), 5);
    }

    #[tokio::test]
    async fn unknown_tool_becomes_observation_and_loop_continues() {
        let provider = ScriptedProvider::new(&[
            r#"{"step": "action", "function": "teleport", "input": "home"}"#,
            r#"{"step": "output", "content": "recovered"}"#,
        ]);
        let mut orchestrator = Orchestrator::new(
            provider,
            empty_registry(),
            ProjectContext::new(),
            LoopConfig::default(),
        );

        let output = orchestrator.handle_query("go").await.unwrap();
        assert_eq!(output, "recovered");

        let observation = orchestrator
            .transcript()
            .iter()
            .find(|message| message.text.contains("not available"))
            .expect("observation with error should be in transcript");
        assert!(observation.text.contains("Tool 'teleport' not available"));
    }

    #[tokio::test]
    async fn malformed_step_is_a_protocol_error_and_session_survives() {
        let provider = ScriptedProvider::new(&[
            "this is not a step",
            r#"{"step": "output", "content": "second try worked"}"#,
        ]);
        let mut orchestrator = Orchestrator::new(
            provider,
            empty_registry(),
            ProjectContext::new(),
            LoopConfig::default(),
        );

        let err = orchestrator.handle_query("first").await.unwrap_err();
        assert!(matches!(err, AgentError::Protocol(_)));

        // The same orchestrator accepts the next query
        let output = orchestrator.handle_query("second").await.unwrap();
        assert_eq!(output, "second try worked");
    }

    #[tokio::test]
    async fn round_cap_stops_a_loop_without_output() {
        let provider = ScriptedProvider::new(&[
            r#"{"step": "plan", "content": "1"}"#,
            r#"{"step": "plan", "content": "2"}"#,
            r#"{"step": "plan", "content": "3"}"#,
        ]);
        let mut orchestrator = Orchestrator::new(
            provider,
            empty_registry(),
            ProjectContext::new(),
            LoopConfig { max_rounds: 2 },
        );

        let err = orchestrator.handle_query("spin").await.unwrap_err();
        assert!(matches!(err, AgentError::Protocol(message) if message.contains("2 rounds")));
    }

    #[tokio::test]
    async fn write_path_is_rebased_under_active_project() {
        let dir = tempfile::tempdir().unwrap();
        let project_dir = dir.path().join("api");

        let project = ProjectContext::new();
        project.replace(ProjectInfo {
            name: "api".into(),
            directory: project_dir.clone(),
            kind: "node".into(),
        });

        // The read targets the rebased location to prove the write landed there
        let read_step = format!(
            r#"{{"step": "action", "function": "read_file", "input": "{}"}}"#,
            project_dir.join("index.js").display()
        );
        let provider = ScriptedProvider::new(&[
            r#"{"step": "action", "function": "write_file", "input": {"file_path": "api/index.js", "content": "console.log(1)"}}"#,
            &read_step,
            r#"{"step": "output", "content": "written"}"#,
        ]);

        let registry = real_registry(&project);
        let mut orchestrator = Orchestrator::new(
            provider,
            registry,
            project,
            LoopConfig::default(),
        );

        let output = orchestrator.handle_query("write the entry file").await.unwrap();
        assert_eq!(output, "written");

        // The prefix was stripped, not duplicated
        assert!(project_dir.join("index.js").exists());
        assert!(!project_dir.join("api/index.js").exists());
        assert_eq!(
            std::fs::read_to_string(project_dir.join("index.js")).unwrap(),
            "console.log(1)"
        );

        // The action step's canonical JSON also carries the content, so the
        // lookup has to key on the observe shape.
        let read_observation = orchestrator
            .transcript()
            .iter()
            .find(|message| {
                message.text.contains(r#""step":"observe""#)
                    && message.text.contains(r#""content":"console.log(1)""#)
            })
            .expect("read observation should carry the written body");
        assert!(read_observation.text.contains(r#""encoding_used":"utf-8""#));
    }

    struct FakeScaffold;

    #[async_trait]
    impl Tool for FakeScaffold {
        fn name(&self) -> &str {
            "create_project"
        }

        fn description(&self) -> &str {
            "fake scaffold"
        }

        fn parameters_schema(&self) -> serde_json::Value {
            json!({"type": "object", "properties": {}})
        }

        async fn execute(&self, _args: serde_json::Value) -> Result<ToolResult, ToolError> {
            Ok(ToolResult::ok(json!({
                "results": [],
                "project_info": {"name": "web", "directory": "/work/web", "type": "react"}
            })))
        }
    }

    #[tokio::test]
    async fn project_info_in_result_replaces_the_project_context() {
        let registry = ToolRegistry::new();
        registry.register(FakeScaffold).unwrap();

        let provider = ScriptedProvider::new(&[
            r#"{"step": "action", "function": "create_project", "input": {"project_type": "react"}}"#,
            r#"{"step": "output", "content": "created"}"#,
        ]);

        let project = ProjectContext::new();
        let mut orchestrator = Orchestrator::new(
            provider,
            Arc::new(registry),
            project.clone(),
            LoopConfig::default(),
        );

        orchestrator.handle_query("make a react app").await.unwrap();

        let info = project.current().expect("project should be set");
        assert_eq!(info.name, "web");
        assert_eq!(info.directory, std::path::PathBuf::from("/work/web"));
        assert_eq!(info.kind, "react");
    }

    #[tokio::test]
    async fn llm_failure_surfaces_as_llm_error() {
        let provider = ScriptedProvider::new(&[]);
        let mut orchestrator = Orchestrator::new(
            provider,
            empty_registry(),
            ProjectContext::new(),
            LoopConfig::default(),
        );

        let err = orchestrator.handle_query("anything").await.unwrap_err();
        assert!(matches!(err, AgentError::Llm(_)));
    }
}
