//! Typed entry points binding each tool to the orchestrator, plus a dynamic
//! dispatcher working on JSON values.

use super::definitions;
use super::types::*;
use super::ToolId;
use crate::orchestrator::Orchestrator;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

impl Orchestrator {
    pub async fn run_anti_life_simulation(&self, input: &AntiLifeInput) -> Result<AntiLifeResult> {
        self.run(definitions::anti_life(), input).await
    }

    pub async fn run_bias_detection(&self, text: &str) -> Result<BiasResult> {
        self.run(definitions::bias_detector(), &text.to_string()).await
    }

    pub async fn run_world_sim(&self, premise: &str) -> Result<WorldSimResult> {
        self.run(definitions::world_sim(), &premise.to_string()).await
    }

    pub async fn run_subtext_analysis(&self, text: &str) -> Result<SubtextResult> {
        self.run(definitions::subtext(), &text.to_string()).await
    }

    pub async fn run_ego_boundary_test(&self, description: &str) -> Result<EgoBoundaryResult> {
        self.run(definitions::ego_boundary(), &description.to_string())
            .await
    }

    pub async fn run_language_smell(&self, text: &str) -> Result<LangSmellResult> {
        self.run(definitions::lang_smell(), &text.to_string()).await
    }

    pub async fn run_decision_path(&self, input: &DecisionInput) -> Result<DecisionPathResult> {
        self.run(definitions::decision_path(), input).await
    }

    pub async fn run_cost_calc(&self, choice: &str) -> Result<CostCalcResult> {
        self.run(definitions::cost_calc(), &choice.to_string()).await
    }

    pub async fn run_deception_detection(&self, narrative: &str) -> Result<DeceptionResult> {
        self.run(definitions::deception(), &narrative.to_string()).await
    }

    pub async fn run_extreme_sim(&self, habit: &str) -> Result<ExtremeSimResult> {
        self.run(definitions::extreme_sim(), &habit.to_string()).await
    }

    pub async fn run_personality_jury(&self, decision: &str) -> Result<JuryResult> {
        self.run(definitions::jury(), &decision.to_string()).await
    }

    pub async fn run_cyber_debate(&self, topic: &str) -> Result<DebateResult> {
        self.run(definitions::cyber_debate(), &topic.to_string()).await
    }

    pub async fn run_code_archaeology(&self, code: &str) -> Result<CodeArchResult> {
        self.run(definitions::code_arch(), &code.to_string()).await
    }

    pub async fn run_devils_advocate(&self, opinion: &str) -> Result<DevilsResult> {
        self.run(definitions::devils_advocate(), &opinion.to_string())
            .await
    }

    pub async fn run_concept_stitcher(&self, input: &StitcherInput) -> Result<StitcherResult> {
        self.run(definitions::concept_stitcher(), input).await
    }

    /// Runs `tool` on a JSON input and returns the normalized result as JSON.
    /// Text tools accept any value; non-strings are used in their JSON form.
    pub async fn run_tool(&self, tool: ToolId, input: Value) -> Result<Value> {
        match tool {
            ToolId::AntiLife => {
                to_json(self.run_anti_life_simulation(&decode(tool, input)?).await?)
            }
            ToolId::BiasDetector => to_json(self.run_bias_detection(&text_input(input)).await?),
            ToolId::WorldSim => to_json(self.run_world_sim(&text_input(input)).await?),
            ToolId::Subtext => to_json(self.run_subtext_analysis(&text_input(input)).await?),
            ToolId::EgoBoundary => to_json(self.run_ego_boundary_test(&text_input(input)).await?),
            ToolId::LangSmell => to_json(self.run_language_smell(&text_input(input)).await?),
            ToolId::DecisionPath => to_json(self.run_decision_path(&decode(tool, input)?).await?),
            ToolId::CostCalc => to_json(self.run_cost_calc(&text_input(input)).await?),
            ToolId::Deception => {
                to_json(self.run_deception_detection(&text_input(input)).await?)
            }
            ToolId::ExtremeSim => to_json(self.run_extreme_sim(&text_input(input)).await?),
            ToolId::Jury => to_json(self.run_personality_jury(&text_input(input)).await?),
            ToolId::CyberDebate => to_json(self.run_cyber_debate(&text_input(input)).await?),
            ToolId::CodeArch => to_json(self.run_code_archaeology(&text_input(input)).await?),
            ToolId::DevilsAdvocate => to_json(self.run_devils_advocate(&text_input(input)).await?),
            ToolId::ConceptStitcher => {
                to_json(self.run_concept_stitcher(&decode(tool, input)?).await?)
            }
        }
    }
}

fn decode<T: DeserializeOwned>(tool: ToolId, input: Value) -> Result<T> {
    serde_json::from_value(input).with_context(|| format!("Invalid input for {tool}"))
}

fn text_input(input: Value) -> String {
    match input {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn to_json<T: Serialize>(output: T) -> Result<Value> {
    Ok(serde_json::to_value(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryStore;
    use crate::llm::{JsonProvider, JsonRequest, ProviderError};
    use crate::settings::StaticCredential;
    use crate::storage::MemoryStorage;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Answers every request with the same document and keeps the user prompts
    struct EchoProvider {
        response: Value,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl JsonProvider for EchoProvider {
        fn name(&self) -> &'static str {
            "echo"
        }

        async fn generate_json(&self, request: &JsonRequest) -> Result<Value> {
            self.prompts.lock().unwrap().push(request.user_prompt.clone());
            Ok(self.response.clone())
        }
    }

    struct Unreachable;

    #[async_trait]
    impl JsonProvider for Unreachable {
        fn name(&self) -> &'static str {
            "unreachable"
        }

        async fn generate_json(&self, _request: &JsonRequest) -> Result<Value> {
            Err(ProviderError::Network("not expected".into()).into())
        }
    }

    fn orchestrator(response: Value) -> (Orchestrator, Arc<EchoProvider>) {
        let fallback = Arc::new(EchoProvider {
            response,
            prompts: Mutex::new(Vec::new()),
        });
        let orchestrator = Orchestrator::new(
            Arc::new(Unreachable),
            fallback.clone(),
            Arc::new(StaticCredential(None)),
            HistoryStore::new(Arc::new(MemoryStorage::new())),
        );
        (orchestrator, fallback)
    }

    #[tokio::test]
    async fn run_tool_returns_normalized_json() {
        let (orchestrator, fallback) = orchestrator(json!({"councilName": "内阁"}));

        let result = orchestrator
            .run_tool(ToolId::Jury, json!("辞职"))
            .await
            .unwrap();

        assert_eq!(result["councilName"], "内阁");
        assert_eq!(result["finalDecree"], "Adjourned");
        assert_eq!(result["jurors"], json!([]));
        assert_eq!(
            fallback.prompts.lock().unwrap()[0],
            "议题：\"辞职\"。召开紧急会议。"
        );
        assert_eq!(orchestrator.history().list()[0].tool_id, "JURY");
    }

    #[tokio::test]
    async fn text_tools_accept_non_string_json() {
        let (orchestrator, fallback) = orchestrator(json!({}));

        orchestrator
            .run_tool(ToolId::CostCalc, json!(42))
            .await
            .unwrap();

        assert_eq!(
            fallback.prompts.lock().unwrap()[0],
            "客户选择：\"42\"。请开具发票。"
        );
    }

    #[tokio::test]
    async fn structured_input_is_decoded() {
        let (orchestrator, fallback) = orchestrator(json!({}));

        let result = orchestrator
            .run_tool(
                ToolId::AntiLife,
                json!({"profile": "开书店", "weakness": "没人看书"}),
            )
            .await
            .unwrap();

        assert_eq!(result["deathTime"], "Unknown");
        assert!(fallback.prompts.lock().unwrap()[0].contains("开书店"));
    }

    #[tokio::test]
    async fn invalid_structured_input_is_rejected_before_any_call() {
        let (orchestrator, fallback) = orchestrator(json!({}));

        let err = orchestrator
            .run_tool(ToolId::ConceptStitcher, json!("just text"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid input for CONCEPT_STITCHER");
        assert!(fallback.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn typed_entry_point_binds_its_tool() {
        let (orchestrator, fallback) = orchestrator(json!({"winner": "blue"}));

        let result = orchestrator.run_cyber_debate("猫狗之争").await.unwrap();

        assert_eq!(result.winner, Winner::Blue);
        assert_eq!(result.red_fighter.name, "Red");
        assert_eq!(
            fallback.prompts.lock().unwrap()[0],
            "开启辩论角斗。话题：\"猫狗之争\"。"
        );
    }
}
