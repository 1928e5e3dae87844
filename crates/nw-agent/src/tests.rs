//! Integration tests for the agent loop

#[cfg(test)]
mod agent_tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::{AgentConfig, AgentExecutor, ToolRegistry, OBSERVATION_STOP};
    use nw_core::{
        DocumentUnit, Error, GenerationConfig, GenerationResult, LLMProvider, Result,
        SearchProvider,
    };
    use nw_rag::{HashingEmbedder, RagConfig, RetrievalQA, VectorIndex};

    /// Replays canned responses in order, repeating the last one forever
    struct ScriptedLLM {
        replies: Mutex<VecDeque<String>>,
        last: Mutex<String>,
        prompts: Mutex<Vec<String>>,
        configs: Mutex<Vec<GenerationConfig>>,
    }

    impl ScriptedLLM {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
                last: Mutex::new(String::new()),
                prompts: Mutex::new(Vec::new()),
                configs: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedLLM {
        async fn generate_with_config(
            &self,
            prompt: &str,
            config: &GenerationConfig,
        ) -> Result<GenerationResult> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.configs.lock().unwrap().push(config.clone());

            let mut last = self.last.lock().unwrap();
            if let Some(next) = self.replies.lock().unwrap().pop_front() {
                *last = next;
            }
            Ok(GenerationResult {
                text: last.clone(),
                model_id: "scripted".to_string(),
                tokens_used: None,
            })
        }

        fn model_id(&self) -> &str {
            "scripted"
        }
    }

    struct CannedSearch {
        queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SearchProvider for CannedSearch {
        async fn search(&self, query: &str) -> Result<String> {
            self.queries.lock().unwrap().push(query.to_string());
            Ok("Paris is the capital of France.".to_string())
        }
    }

    fn notes_responder() -> Arc<RetrievalQA> {
        let embedder = HashingEmbedder::default();
        let mut index = VectorIndex::new();
        for (page, text) in [
            "Small-step semantics describes a single evaluation step.",
            "A store maps variables to integer values.",
        ]
        .iter()
        .enumerate()
        {
            index
                .insert(
                    DocumentUnit::new(*text, "lec02-smallstep.pdf", page as u32),
                    embedder.embed(text),
                )
                .unwrap();
        }

        let qa_llm = Arc::new(ScriptedLLM::new(&["The notes say so."]));
        Arc::new(RetrievalQA::new(
            qa_llm,
            Arc::new(embedder),
            Arc::new(index),
            &RagConfig::default(),
        ))
    }

    fn executor(llm: Arc<ScriptedLLM>, search: Arc<CannedSearch>, max_iterations: usize) -> AgentExecutor {
        let tools = ToolRegistry::standard(notes_responder(), search);
        let config = AgentConfig {
            max_iterations,
            ..AgentConfig::default()
        };
        AgentExecutor::new(llm, Arc::new(tools), config)
    }

    fn canned_search() -> Arc<CannedSearch> {
        Arc::new(CannedSearch {
            queries: Mutex::new(Vec::new()),
        })
    }

    #[tokio::test]
    async fn test_finishes_after_consulting_notes() {
        let llm = Arc::new(ScriptedLLM::new(&[
            "Thought: I should check the notes.\nAction: Source Info\nAction Input: small-step semantics",
            "Thought: I now know the final answer\nFinal Answer: It describes one evaluation step at a time.",
        ]));
        let agent = executor(llm.clone(), canned_search(), 15);

        let outcome = agent.run("What is small-step semantics?").await.unwrap();

        assert_eq!(outcome.answer, "It describes one evaluation step at a time.");
        assert_eq!(outcome.steps.len(), 1);
        assert_eq!(outcome.steps[0].action.tool, "Source Info");
        assert!(outcome.steps[0].observation.contains("Small-step semantics describes"));
        assert!(!outcome.steps[0].observation.contains("The notes say so."));

        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("Question: What is small-step semantics?"));
        assert!(prompts[1].contains(&format!(
            "\nObservation: {}\nThought: ",
            outcome.steps[0].observation
        )));
    }

    #[tokio::test]
    async fn test_generation_uses_agent_settings() {
        let llm = Arc::new(ScriptedLLM::new(&["Final Answer: done"]));
        let agent = executor(llm.clone(), canned_search(), 15);
        agent.run("anything").await.unwrap();

        let configs = llm.configs.lock().unwrap();
        assert_eq!(configs[0].stop_sequences, vec![OBSERVATION_STOP.to_string()]);
        assert_eq!(configs[0].temperature, Some(0.1));
    }

    #[tokio::test]
    async fn test_invented_observations_are_discarded() {
        let llm = Arc::new(ScriptedLLM::new(&[
            "Action: Search\nAction Input: \"capital of France\"\nObservation: Lyon\nThought: done\nFinal Answer: Lyon",
            "Final Answer: Paris",
        ]));
        let search = canned_search();
        let agent = executor(llm, search.clone(), 15);

        let outcome = agent.run("What is the capital of France?").await.unwrap();

        assert_eq!(outcome.answer, "Paris");
        assert_eq!(*search.queries.lock().unwrap(), vec!["capital of France".to_string()]);
        assert_eq!(outcome.steps[0].observation, "Paris is the capital of France.");
        assert!(!outcome.steps[0].action.log.contains("Lyon"));
    }

    #[tokio::test]
    async fn test_endless_tool_calls_exhaust_the_agent() {
        let llm = Arc::new(ScriptedLLM::new(&["Action: Search\nAction Input: again"]));
        let search = canned_search();
        let agent = executor(llm.clone(), search.clone(), 4);

        let err = agent.run("loop forever").await.unwrap_err();

        assert!(matches!(err, Error::AgentExhausted { iterations: 4 }));
        assert_eq!(llm.calls(), 4);
        assert_eq!(search.queries.lock().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_zero_iterations_still_calls_model_once() {
        let llm = Arc::new(ScriptedLLM::new(&["Action: Search\nAction Input: again"]));
        let agent = executor(llm.clone(), canned_search(), 0);

        let err = agent.run("q").await.unwrap_err();
        assert!(matches!(err, Error::AgentExhausted { iterations: 1 }));
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_an_error() {
        let llm = Arc::new(ScriptedLLM::new(&["Action: Calculator\nAction Input: 2+2"]));
        let agent = executor(llm, canned_search(), 15);

        let err = agent.run("What is 2+2?").await.unwrap_err();
        match err {
            Error::UnknownTool { name, available } => {
                assert_eq!(name, "Calculator");
                assert_eq!(available, "Source Info, Search");
            }
            other => panic!("expected UnknownTool, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_output_is_a_parse_error() {
        let llm = Arc::new(ScriptedLLM::new(&["I am not sure what to do."]));
        let agent = executor(llm, canned_search(), 15);

        let err = agent.run("q").await.unwrap_err();
        assert!(matches!(err, Error::Parse(raw) if raw == "I am not sure what to do."));
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let mut tools = ToolRegistry::standard(notes_responder(), canned_search());
        let duplicate = Arc::new(crate::SearchTool::new(canned_search()));

        let err = tools.register(duplicate).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert_eq!(tools.names(), vec!["Source Info", "Search"]);
    }
}
