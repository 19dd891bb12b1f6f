//! Typed inputs and results of the analysis tools. Field names follow the JSON
//! keys the models are asked to produce.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AntiLifeInput {
    pub profile: String,
    pub weakness: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StitcherInput {
    pub term_a: String,
    pub term_b: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DecisionInput {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irreversibles: Option<String>,
    #[serde(default)]
    pub options: Vec<DecisionOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<DecisionWeights>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DecisionOption {
    pub name: String,
    pub desc: String,
    pub pros: String,
    pub cons: String,
    pub emotional_pull: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DecisionWeights {
    pub risk_tolerance: f64,
    pub stability_pref: f64,
    pub growth_priority: f64,
    pub short_term_pressure: f64,
}

// ---------------------------------------------------------------------------
// Shared enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "LOW" => Some(Severity::Low),
            "MEDIUM" | "MED" => Some(Severity::Medium),
            "HIGH" => Some(Severity::High),
            "CRITICAL" => Some(Severity::Critical),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Stance {
    Support,
    Oppose,
    #[default]
    Abstain,
}

impl Stance {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "SUPPORT" => Some(Stance::Support),
            "OPPOSE" => Some(Stance::Oppose),
            "ABSTAIN" => Some(Stance::Abstain),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Winner {
    Red,
    Blue,
    #[default]
    Draw,
}

impl Winner {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "RED" => Some(Winner::Red),
            "BLUE" => Some(Winner::Blue),
            "DRAW" => Some(Winner::Draw),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AntiLifeResult {
    pub death_time: String,
    pub cause_of_death: String,
    pub clinical_analysis: String,
    pub fatal_symptom: String,
    pub preventable_measure: String,
    pub survival_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Virus {
    pub name: String,
    pub severity: Severity,
    pub symptom: String,
    pub treatment: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct BiasResult {
    pub infection_rate: f64,
    pub overall_diagnosis: String,
    pub viruses: Vec<Virus>,
    pub quarantine_advice: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimelineEvent {
    pub year: String,
    pub event: String,
    pub impact: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BreakingNews {
    pub headline: String,
    pub source: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SurvivorGuide {
    pub role: String,
    pub key_skill: String,
    pub must_have_item: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct WorldSimResult {
    pub chaos_level: f64,
    pub divergence_point: String,
    pub timeline: Vec<TimelineEvent>,
    pub breaking_news: BreakingNews,
    pub new_laws: Vec<String>,
    pub survivor_guide: SurvivorGuide,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeclassifiedLine {
    pub original: String,
    pub decoded: String,
    pub intent: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SubtextResult {
    pub bullshit_meter: f64,
    pub voice_stress_analysis: String,
    pub declassified_content: Vec<DeclassifiedLine>,
    pub verdict: String,
    pub power_dynamics: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct YieldPoint {
    pub trigger: String,
    pub pressure_level: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct StructuralWeakness {
    pub location: String,
    pub description: String,
    pub risk_level: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EgoBoundaryResult {
    pub integrity_score: f64,
    pub yield_point: YieldPoint,
    pub fracture_mode: String,
    pub structural_weaknesses: Vec<StructuralWeakness>,
    pub reinforcement_plan: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Ingredient {
    pub label: String,
    pub percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ScentProfile {
    pub top_note: String,
    pub middle_note: String,
    pub base_note: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LangSmellResult {
    pub composition: Vec<Ingredient>,
    pub scent_profile: ScentProfile,
    #[serde(rename = "toxicityPPM")]
    pub toxicity_ppm: f64,
    pub ai_probability: f64,
    pub detection_log: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DecisionNature {
    #[serde(rename = "type")]
    pub kind: String,
    pub core_conflict: String,
    pub key_uncertainty: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ComparisonRow {
    pub option: String,
    pub short_term_gain: String,
    pub medium_term_risk: String,
    pub long_term_ceiling: String,
    pub irreversibility: String,
    pub exit_path: String,
    pub emotional_sustainability: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RiskWarning {
    pub option: String,
    pub underestimated_risk: String,
    pub why_it_is_dangerous: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Experiment {
    pub option: String,
    pub test_method: String,
    pub cost: String,
    pub timeframe: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StopLossSignal {
    pub option: String,
    pub signal: String,
    pub action: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoolingAdvice {
    pub emotional_bias_detected: String,
    pub recommended_wait_time: String,
    pub recheck_questions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DecisionPathResult {
    pub decision_nature: DecisionNature,
    pub comparison_matrix: Vec<ComparisonRow>,
    pub risk_warnings: Vec<RiskWarning>,
    pub experimentation_suggestions: Vec<Experiment>,
    pub stop_loss_signals: Vec<StopLossSignal>,
    pub cooling_advice: CoolingAdvice,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LineItem {
    pub category: String,
    pub description: String,
    pub cost: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CostCalcResult {
    pub invoice_id: String,
    pub currency_unit: String,
    pub line_items: Vec<LineItem>,
    pub total_cost: String,
    pub fine_print: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DeceptionResult {
    pub blue_pill_narrative: String,
    pub red_pill_truth: String,
    pub glitch_factor: f64,
    pub system_failure_log: Vec<String>,
    pub reality_patch: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CascadeEvent {
    pub time: String,
    pub event: String,
    pub magnitude: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtremeSimResult {
    pub disaster_level: String,
    pub current_impact: String,
    pub cascade_timeline: Vec<CascadeEvent>,
    pub final_collapse: String,
    pub tipping_point: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Juror {
    pub archetype: String,
    pub icon: String,
    pub stance: Stance,
    pub intensity: f64,
    pub monologue: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct JuryResult {
    pub council_name: String,
    pub chaos_meter: f64,
    pub jurors: Vec<Juror>,
    pub final_decree: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Fighter {
    pub name: String,
    pub style: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Move {
    pub name: String,
    pub content: String,
    pub damage: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DebateRound {
    pub round_name: String,
    pub red_move: Move,
    pub blue_move: Move,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DebateResult {
    pub topic: String,
    pub red_fighter: Fighter,
    pub blue_fighter: Fighter,
    pub rounds: Vec<DebateRound>,
    pub winner: Winner,
    pub fatality_move: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthorProfile {
    pub mental_state: String,
    pub caffeine_level: String,
    pub hair_loss_risk: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CodeArchResult {
    pub carbon_dating: String,
    pub tech_stack_layer: String,
    pub author_profile: AuthorProfile,
    pub spaghetti_index: f64,
    pub excavation_report: String,
    pub fossil_faults: Vec<String>,
    pub curator_note: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogicalCrime {
    pub name: String,
    pub description: String,
    pub sentence: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TortureStep {
    pub tool: String,
    pub method: String,
    pub outcome: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DevilsResult {
    pub verdict: String,
    pub logical_crimes: Vec<LogicalCrime>,
    pub torture_session: Vec<TortureStep>,
    pub forced_confession: String,
    pub sanity_score: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserPersona {
    pub name: String,
    pub description: String,
    pub desire: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct StitcherResult {
    pub startup_name: String,
    pub tagline: String,
    pub user_persona: UserPersona,
    pub revenue_model: String,
    pub growth_hack: String,
    pub vc_verdict: String,
    pub unicorn_probability: f64,
}
