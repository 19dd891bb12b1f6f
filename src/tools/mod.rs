use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub mod definitions;
mod entry;
pub mod normalize;
pub mod types;

pub use types::*;

/// Static definition of an analysis tool: prompts, expected output and the
/// normalizer that turns a raw provider response into a fully populated result.
pub struct ToolConfig<I, O> {
    pub id: ToolId,
    pub system_prompt: String,
    pub build_user_prompt: fn(&I) -> String,
    /// Top-level keys every response should carry (drift diagnostics only)
    pub expected_fields: &'static [&'static str],
    /// Strict schema for providers that support constrained decoding
    pub output_schema: Value,
    pub normalize: Option<fn(&Value) -> O>,
}

impl<I, O> ToolConfig<I, O> {
    pub fn user_prompt(&self, input: &I) -> String {
        (self.build_user_prompt)(input)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolId {
    AntiLife,
    BiasDetector,
    WorldSim,
    Subtext,
    EgoBoundary,
    LangSmell,
    DecisionPath,
    CostCalc,
    Deception,
    ExtremeSim,
    Jury,
    CyberDebate,
    CodeArch,
    DevilsAdvocate,
    ConceptStitcher,
}

impl ToolId {
    pub const ALL: [ToolId; 15] = [
        ToolId::AntiLife,
        ToolId::BiasDetector,
        ToolId::WorldSim,
        ToolId::Subtext,
        ToolId::EgoBoundary,
        ToolId::LangSmell,
        ToolId::DecisionPath,
        ToolId::CostCalc,
        ToolId::Deception,
        ToolId::ExtremeSim,
        ToolId::Jury,
        ToolId::CyberDebate,
        ToolId::CodeArch,
        ToolId::DevilsAdvocate,
        ToolId::ConceptStitcher,
    ];

    /// Identifier used in logs and history records
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolId::AntiLife => "ANTI_LIFE",
            ToolId::BiasDetector => "BIAS_DETECTOR",
            ToolId::WorldSim => "WORLD_SIM",
            ToolId::Subtext => "SUBTEXT",
            ToolId::EgoBoundary => "EGO_BOUNDARY",
            ToolId::LangSmell => "LANG_SMELL",
            ToolId::DecisionPath => "DECISION_PATH",
            ToolId::CostCalc => "COST_CALC",
            ToolId::Deception => "DECEPTION",
            ToolId::ExtremeSim => "EXTREME_SIM",
            ToolId::Jury => "JURY",
            ToolId::CyberDebate => "CYBER_DEBATE",
            ToolId::CodeArch => "CODE_ARCH",
            ToolId::DevilsAdvocate => "DEVILS_ADVOCATE",
            ToolId::ConceptStitcher => "CONCEPT_STITCHER",
        }
    }

    /// Short description shown by the CLI
    pub fn description(&self) -> &'static str {
        match self {
            ToolId::AntiLife => "Post-mortem of a plan that is assumed to have failed",
            ToolId::BiasDetector => "Scan a text for logical fallacies",
            ToolId::WorldSim => "Simulate a world diverging from a premise",
            ToolId::Subtext => "Decode the subtext of a message",
            ToolId::EgoBoundary => "Stress test a self description",
            ToolId::LangSmell => "Analyze the composition and tone of a text",
            ToolId::DecisionPath => "Structured comparison of decision options",
            ToolId::CostCalc => "Invoice the hidden costs of a choice",
            ToolId::Deception => "Contrast a comforting narrative with reality",
            ToolId::ExtremeSim => "Butterfly effect cascade of a bad habit",
            ToolId::Jury => "Inner council debating a decision",
            ToolId::CyberDebate => "Three round debate on a topic",
            ToolId::CodeArch => "Archaeological review of a code snippet",
            ToolId::DevilsAdvocate => "Put an opinion on logical trial",
            ToolId::ConceptStitcher => "Stitch two concepts into a startup pitch",
        }
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds a system prompt from a role, a JSON output template and style rules
pub fn build_structured_prompt(role: &str, contract: &str, style: &str) -> String {
    format!(
        "[ROLE_DEFINITION]\n{role}\n\n\
         [OUTPUT_CONTRACT]\n\
         1. You MUST return a VALID JSON object.\n\
         2. Do NOT output any markdown code blocks (like ```json). Just the raw JSON string.\n\
         3. The JSON structure must strictly follow this template:\n\
         {contract}\n\n\
         [STYLE_CONSTRAINTS]\n{style}"
    )
    .trim()
    .to_string()
}
