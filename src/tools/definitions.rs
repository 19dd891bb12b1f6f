//! The tool catalog. Each accessor returns a process-wide configuration that is
//! built on first use.

use super::normalize::{list, number, strict_number, text, text_list, variant};
use super::types::*;
use super::{build_structured_prompt, ToolConfig, ToolId};
use serde_json::{json, Value};
use std::sync::OnceLock;

pub fn anti_life() -> &'static ToolConfig<AntiLifeInput, AntiLifeResult> {
    static CONFIG: OnceLock<ToolConfig<AntiLifeInput, AntiLifeResult>> = OnceLock::new();
    CONFIG.get_or_init(|| ToolConfig {
        id: ToolId::AntiLife,
        system_prompt: build_structured_prompt(
            "你是一名来自未来的‘项目验尸官’(Project Coroner)。你的工作是对用户提出的计划进行‘尸检’。请假设这个计划已经彻底失败了。",
            r#"{ "deathTime": "2024-Q4", "causeOfDeath": "...", "clinicalAnalysis": "...", "fatalSymptom": "...", "preventableMeasure": "...", "survivalRate": 15 }"#,
            "你需要撰写一份冷酷、专业、充满病理学术语的验尸报告。分析死因、死亡时间、致命病灶。必须用简体中文回答。",
        ),
        build_user_prompt: |input| {
            format!(
                "计划/目标：\"{}\"\n已知弱点/担忧：\"{}\"\n\n请出具尸检报告。",
                input.profile, input.weakness
            )
        },
        expected_fields: &[
            "deathTime",
            "causeOfDeath",
            "clinicalAnalysis",
            "fatalSymptom",
            "preventableMeasure",
            "survivalRate",
        ],
        output_schema: json!({
            "type": "OBJECT",
            "properties": {
                "deathTime": {"type": "STRING"},
                "causeOfDeath": {"type": "STRING"},
                "clinicalAnalysis": {"type": "STRING"},
                "fatalSymptom": {"type": "STRING"},
                "preventableMeasure": {"type": "STRING"},
                "survivalRate": {"type": "NUMBER"}
            }
        }),
        normalize: Some(normalize_anti_life),
    })
}

fn normalize_anti_life(raw: &Value) -> AntiLifeResult {
    AntiLifeResult {
        death_time: text(raw, "deathTime", "Unknown"),
        cause_of_death: text(raw, "causeOfDeath", "死因不明"),
        clinical_analysis: text(raw, "clinicalAnalysis", ""),
        fatal_symptom: text(raw, "fatalSymptom", ""),
        preventable_measure: text(raw, "preventableMeasure", ""),
        survival_rate: number(raw, "survivalRate", 0.0),
    }
}

pub fn bias_detector() -> &'static ToolConfig<String, BiasResult> {
    static CONFIG: OnceLock<ToolConfig<String, BiasResult>> = OnceLock::new();
    CONFIG.get_or_init(|| ToolConfig {
        id: ToolId::BiasDetector,
        system_prompt: build_structured_prompt(
            "你是一个‘认知生化扫描仪’(Cognitive Biohazard Scanner)。将用户输入的文本视为‘生物样本’。你的任务是扫描样本中的‘逻辑谬误病毒’(Logical Fallacy Viruses)。",
            r#"{ "infectionRate": 0, "overallDiagnosis": "...", "viruses": [{ "name": "...", "severity": "HIGH", "symptom": "...", "treatment": "..." }], "quarantineAdvice": "..." }"#,
            "必须用简体中文。输出风格要像生化危机实验室报告。severity 必须是 LOW, MEDIUM, HIGH, CRITICAL。",
        ),
        build_user_prompt: |text| format!("扫描样本：\"{text}\"。"),
        expected_fields: &["infectionRate", "overallDiagnosis", "viruses", "quarantineAdvice"],
        output_schema: json!({
            "type": "OBJECT",
            "properties": {
                "infectionRate": {"type": "NUMBER"},
                "overallDiagnosis": {"type": "STRING"},
                "viruses": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "name": {"type": "STRING"},
                            "severity": {"type": "STRING", "enum": ["LOW", "MEDIUM", "HIGH", "CRITICAL"]},
                            "symptom": {"type": "STRING"},
                            "treatment": {"type": "STRING"}
                        }
                    }
                },
                "quarantineAdvice": {"type": "STRING"}
            }
        }),
        normalize: Some(normalize_bias),
    })
}

fn normalize_bias(raw: &Value) -> BiasResult {
    BiasResult {
        infection_rate: number(raw, "infectionRate", 0.0),
        overall_diagnosis: text(raw, "overallDiagnosis", "样本纯净"),
        viruses: list(raw, "viruses", |virus| Virus {
            name: text(virus, "name", ""),
            severity: variant(virus, "severity", Severity::parse, Severity::Low),
            symptom: text(virus, "symptom", ""),
            treatment: text(virus, "treatment", ""),
        }),
        quarantine_advice: text(raw, "quarantineAdvice", "无需隔离"),
    }
}

pub fn world_sim() -> &'static ToolConfig<String, WorldSimResult> {
    static CONFIG: OnceLock<ToolConfig<String, WorldSimResult>> = OnceLock::new();
    CONFIG.get_or_init(|| ToolConfig {
        id: ToolId::WorldSim,
        system_prompt: build_structured_prompt(
            "你是一个‘平行宇宙观测站’的AI。用户输入一个‘异变点’，你需要推演这个新世界的时间线和生存法则。",
            r#"{ "chaosLevel": 50, "divergencePoint": "...", "timeline": [{ "year": "...", "event": "...", "impact": "..." }], "breakingNews": { "headline": "...", "source": "...", "date": "..." }, "newLaws": ["..."], "survivorGuide": { "role": "...", "keySkill": "...", "mustHaveItem": "..." } }"#,
            "必须用简体中文。风格要像科幻小说大纲。Timeline 必须包含至少3个关键节点。",
        ),
        build_user_prompt: |premise| format!("异变点假设：\"{premise}\"。观测该宇宙。"),
        expected_fields: &[
            "chaosLevel",
            "divergencePoint",
            "timeline",
            "breakingNews",
            "newLaws",
            "survivorGuide",
        ],
        output_schema: json!({
            "type": "OBJECT",
            "properties": {
                "chaosLevel": {"type": "NUMBER"},
                "divergencePoint": {"type": "STRING"},
                "timeline": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "year": {"type": "STRING"},
                            "event": {"type": "STRING"},
                            "impact": {"type": "STRING"}
                        }
                    }
                },
                "breakingNews": {
                    "type": "OBJECT",
                    "properties": {
                        "headline": {"type": "STRING"},
                        "source": {"type": "STRING"},
                        "date": {"type": "STRING"}
                    }
                },
                "newLaws": {"type": "ARRAY", "items": {"type": "STRING"}},
                "survivorGuide": {
                    "type": "OBJECT",
                    "properties": {
                        "role": {"type": "STRING"},
                        "keySkill": {"type": "STRING"},
                        "mustHaveItem": {"type": "STRING"}
                    }
                }
            }
        }),
        normalize: Some(normalize_world_sim),
    })
}

fn normalize_world_sim(raw: &Value) -> WorldSimResult {
    let news = &raw["breakingNews"];
    let guide = &raw["survivorGuide"];
    WorldSimResult {
        chaos_level: number(raw, "chaosLevel", 0.0),
        divergence_point: text(raw, "divergencePoint", ""),
        timeline: list(raw, "timeline", |event| TimelineEvent {
            year: text(event, "year", ""),
            event: text(event, "event", ""),
            impact: text(event, "impact", ""),
        }),
        breaking_news: BreakingNews {
            headline: text(news, "headline", "Connection Lost"),
            source: text(news, "source", "System"),
            date: text(news, "date", "Unknown"),
        },
        new_laws: text_list(raw, "newLaws"),
        survivor_guide: SurvivorGuide {
            role: text(guide, "role", "Unknown"),
            key_skill: text(guide, "keySkill", "Survival"),
            must_have_item: text(guide, "mustHaveItem", "Hope"),
        },
    }
}

pub fn subtext() -> &'static ToolConfig<String, SubtextResult> {
    static CONFIG: OnceLock<ToolConfig<String, SubtextResult>> = OnceLock::new();
    CONFIG.get_or_init(|| ToolConfig {
        id: ToolId::Subtext,
        system_prompt: build_structured_prompt(
            "你是一个‘真相审讯室’的测谎专家。用户输入一段‘被拦截的通讯’，你需要分析其中的潜台词和权力关系。",
            r#"{ "bullshitMeter": 50, "voiceStressAnalysis": "...", "declassifiedContent": [{ "original": "...", "decoded": "...", "intent": "..." }], "verdict": "...", "powerDynamics": "..." }"#,
            "必须用简体中文。风格要像冷战时期的情报解密文件。",
        ),
        build_user_prompt: |text| format!("分析拦截的通讯：\"{text}\""),
        expected_fields: &[
            "bullshitMeter",
            "voiceStressAnalysis",
            "declassifiedContent",
            "verdict",
            "powerDynamics",
        ],
        output_schema: json!({
            "type": "OBJECT",
            "properties": {
                "bullshitMeter": {"type": "NUMBER"},
                "voiceStressAnalysis": {"type": "STRING"},
                "declassifiedContent": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "original": {"type": "STRING"},
                            "decoded": {"type": "STRING"},
                            "intent": {"type": "STRING"}
                        }
                    }
                },
                "verdict": {"type": "STRING"},
                "powerDynamics": {"type": "STRING"}
            }
        }),
        normalize: Some(normalize_subtext),
    })
}

fn normalize_subtext(raw: &Value) -> SubtextResult {
    SubtextResult {
        bullshit_meter: number(raw, "bullshitMeter", 0.0),
        voice_stress_analysis: text(raw, "voiceStressAnalysis", "无明显压力"),
        declassified_content: list(raw, "declassifiedContent", |line| DeclassifiedLine {
            original: text(line, "original", ""),
            decoded: text(line, "decoded", ""),
            intent: text(line, "intent", ""),
        }),
        verdict: text(raw, "verdict", "信息不足"),
        power_dynamics: text(raw, "powerDynamics", "未知"),
    }
}

pub fn ego_boundary() -> &'static ToolConfig<String, EgoBoundaryResult> {
    static CONFIG: OnceLock<ToolConfig<String, EgoBoundaryResult>> = OnceLock::new();
    CONFIG.get_or_init(|| ToolConfig {
        id: ToolId::EgoBoundary,
        system_prompt: build_structured_prompt(
            "你是一个‘精神结构工程师’。把用户的人格视为建筑物，进行‘风洞压力测试’。",
            r#"{ "integrityScore": 50, "yieldPoint": { "trigger": "...", "pressureLevel": "..." }, "fractureMode": "...", "structuralWeaknesses": [{ "location": "...", "description": "...", "riskLevel": "HIGH" }], "reinforcementPlan": "..." }"#,
            "必须用简体中文。使用工程力学术语隐喻心理状态。",
        ),
        build_user_prompt: |desc| format!("启动风洞测试。测试对象自述：\"{desc}\"。"),
        expected_fields: &[
            "integrityScore",
            "yieldPoint",
            "fractureMode",
            "structuralWeaknesses",
            "reinforcementPlan",
        ],
        output_schema: json!({
            "type": "OBJECT",
            "properties": {
                "integrityScore": {"type": "NUMBER"},
                "yieldPoint": {
                    "type": "OBJECT",
                    "properties": {
                        "trigger": {"type": "STRING"},
                        "pressureLevel": {"type": "STRING"}
                    }
                },
                "fractureMode": {"type": "STRING"},
                "structuralWeaknesses": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "location": {"type": "STRING"},
                            "description": {"type": "STRING"},
                            "riskLevel": {"type": "STRING", "enum": ["LOW", "MED", "HIGH", "CRITICAL"]}
                        }
                    }
                },
                "reinforcementPlan": {"type": "STRING"}
            }
        }),
        normalize: Some(normalize_ego_boundary),
    })
}

fn normalize_ego_boundary(raw: &Value) -> EgoBoundaryResult {
    let yield_point = &raw["yieldPoint"];
    EgoBoundaryResult {
        integrity_score: number(raw, "integrityScore", 0.0),
        yield_point: YieldPoint {
            trigger: text(yield_point, "trigger", "Unknown"),
            pressure_level: text(yield_point, "pressureLevel", "Unknown"),
        },
        fracture_mode: text(raw, "fractureMode", "Unknown"),
        structural_weaknesses: list(raw, "structuralWeaknesses", |weakness| {
            StructuralWeakness {
                location: text(weakness, "location", ""),
                description: text(weakness, "description", ""),
                risk_level: text(weakness, "riskLevel", "LOW"),
            }
        }),
        reinforcement_plan: text(raw, "reinforcementPlan", "None"),
    }
}

pub fn lang_smell() -> &'static ToolConfig<String, LangSmellResult> {
    static CONFIG: OnceLock<ToolConfig<String, LangSmellResult>> = OnceLock::new();
    CONFIG.get_or_init(|| ToolConfig {
        id: ToolId::LangSmell,
        system_prompt: build_structured_prompt(
            "你是一个‘语义光谱仪’。像化学分析一样，分析文本的‘成分’。",
            r#"{ "composition": [{ "label": "...", "percentage": 10, "colorCode": "..." }], "scentProfile": { "topNote": "...", "middleNote": "...", "baseNote": "..." }, "toxicityPPM": 100, "aiProbability": 0, "detectionLog": "..." }"#,
            "必须用简体中文。分析语气、用词倾向、潜意识情绪。",
        ),
        build_user_prompt: |text| format!("分析样本：\"{text}\"。"),
        expected_fields: &[
            "composition",
            "scentProfile",
            "toxicityPPM",
            "aiProbability",
            "detectionLog",
        ],
        output_schema: json!({
            "type": "OBJECT",
            "properties": {
                "composition": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "label": {"type": "STRING"},
                            "percentage": {"type": "NUMBER"},
                            "colorCode": {"type": "STRING"}
                        }
                    }
                },
                "scentProfile": {
                    "type": "OBJECT",
                    "properties": {
                        "topNote": {"type": "STRING"},
                        "middleNote": {"type": "STRING"},
                        "baseNote": {"type": "STRING"}
                    }
                },
                "toxicityPPM": {"type": "NUMBER"},
                "aiProbability": {"type": "NUMBER"},
                "detectionLog": {"type": "STRING"}
            }
        }),
        normalize: Some(normalize_lang_smell),
    })
}

fn normalize_lang_smell(raw: &Value) -> LangSmellResult {
    let scent = &raw["scentProfile"];
    LangSmellResult {
        composition: list(raw, "composition", |ingredient| Ingredient {
            label: text(ingredient, "label", ""),
            percentage: number(ingredient, "percentage", 0.0),
            color_code: ingredient["colorCode"]
                .as_str()
                .filter(|code| !code.is_empty())
                .map(str::to_string),
        }),
        scent_profile: ScentProfile {
            top_note: text(scent, "topNote", ""),
            middle_note: text(scent, "middleNote", ""),
            base_note: text(scent, "baseNote", ""),
        },
        toxicity_ppm: number(raw, "toxicityPPM", 0.0),
        ai_probability: number(raw, "aiProbability", 0.0),
        detection_log: text(raw, "detectionLog", ""),
    }
}

pub fn decision_path() -> &'static ToolConfig<DecisionInput, DecisionPathResult> {
    static CONFIG: OnceLock<ToolConfig<DecisionInput, DecisionPathResult>> = OnceLock::new();
    CONFIG.get_or_init(|| ToolConfig {
        id: ToolId::DecisionPath,
        system_prompt: build_structured_prompt(
            "You are a professional decision analysis assistant. Your role is to analyze decisions using a structured comparison framework.",
            r#"{ "decision_nature": { "type": "...", "core_conflict": "...", "key_uncertainty": "..." }, "comparison_matrix": [], "risk_warnings": [], "experimentation_suggestions": [], "stop_loss_signals": [], "cooling_advice": {} }"#,
            "Must answer in Simplified Chinese. Be objective, rational, and exhaustive.",
        ),
        build_user_prompt: |input| {
            format!(
                "Analyze the following decision:\n{}",
                serde_json::to_string(input).unwrap_or_default()
            )
        },
        expected_fields: &[
            "decision_nature",
            "comparison_matrix",
            "risk_warnings",
            "experimentation_suggestions",
            "stop_loss_signals",
            "cooling_advice",
        ],
        output_schema: json!({
            "type": "OBJECT",
            "properties": {
                "decision_nature": {
                    "type": "OBJECT",
                    "properties": {
                        "type": {"type": "STRING"},
                        "core_conflict": {"type": "STRING"},
                        "key_uncertainty": {"type": "STRING"}
                    }
                },
                "comparison_matrix": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "option": {"type": "STRING"},
                            "short_term_gain": {"type": "STRING"},
                            "medium_term_risk": {"type": "STRING"},
                            "long_term_ceiling": {"type": "STRING"},
                            "irreversibility": {"type": "STRING"},
                            "exit_path": {"type": "STRING"},
                            "emotional_sustainability": {"type": "STRING"}
                        }
                    }
                },
                "risk_warnings": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "option": {"type": "STRING"},
                            "underestimated_risk": {"type": "STRING"},
                            "why_it_is_dangerous": {"type": "STRING"}
                        }
                    }
                },
                "experimentation_suggestions": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "option": {"type": "STRING"},
                            "test_method": {"type": "STRING"},
                            "cost": {"type": "STRING"},
                            "timeframe": {"type": "STRING"}
                        }
                    }
                },
                "stop_loss_signals": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "option": {"type": "STRING"},
                            "signal": {"type": "STRING"},
                            "action": {"type": "STRING"}
                        }
                    }
                },
                "cooling_advice": {
                    "type": "OBJECT",
                    "properties": {
                        "emotional_bias_detected": {"type": "STRING"},
                        "recommended_wait_time": {"type": "STRING"},
                        "recheck_questions": {"type": "ARRAY", "items": {"type": "STRING"}}
                    }
                }
            }
        }),
        normalize: Some(normalize_decision_path),
    })
}

fn normalize_decision_path(raw: &Value) -> DecisionPathResult {
    let nature = &raw["decision_nature"];
    let cooling = &raw["cooling_advice"];
    DecisionPathResult {
        decision_nature: DecisionNature {
            kind: text(nature, "type", "Unknown"),
            core_conflict: text(nature, "core_conflict", "Unknown"),
            key_uncertainty: text(nature, "key_uncertainty", "Unknown"),
        },
        comparison_matrix: list(raw, "comparison_matrix", |row| ComparisonRow {
            option: text(row, "option", ""),
            short_term_gain: text(row, "short_term_gain", ""),
            medium_term_risk: text(row, "medium_term_risk", ""),
            long_term_ceiling: text(row, "long_term_ceiling", ""),
            irreversibility: text(row, "irreversibility", ""),
            exit_path: text(row, "exit_path", ""),
            emotional_sustainability: text(row, "emotional_sustainability", ""),
        }),
        risk_warnings: list(raw, "risk_warnings", |warning| RiskWarning {
            option: text(warning, "option", ""),
            underestimated_risk: text(warning, "underestimated_risk", ""),
            why_it_is_dangerous: text(warning, "why_it_is_dangerous", ""),
        }),
        experimentation_suggestions: list(raw, "experimentation_suggestions", |experiment| {
            Experiment {
                option: text(experiment, "option", ""),
                test_method: text(experiment, "test_method", ""),
                cost: text(experiment, "cost", ""),
                timeframe: text(experiment, "timeframe", ""),
            }
        }),
        stop_loss_signals: list(raw, "stop_loss_signals", |signal| StopLossSignal {
            option: text(signal, "option", ""),
            signal: text(signal, "signal", ""),
            action: text(signal, "action", ""),
        }),
        cooling_advice: CoolingAdvice {
            emotional_bias_detected: text(cooling, "emotional_bias_detected", ""),
            recommended_wait_time: text(cooling, "recommended_wait_time", ""),
            recheck_questions: text_list(cooling, "recheck_questions"),
        },
    }
}

pub fn cost_calc() -> &'static ToolConfig<String, CostCalcResult> {
    static CONFIG: OnceLock<ToolConfig<String, CostCalcResult>> = OnceLock::new();
    CONFIG.get_or_init(|| ToolConfig {
        id: ToolId::CostCalc,
        system_prompt: build_structured_prompt(
            "你是一个‘恶魔会计师’。为用户的人生选择开具一张‘因果发票’。计算灵魂、尊严、时间、健康等隐性货币。",
            r##"{ "invoiceId": "#INV-666", "currencyUnit": "...", "lineItems": [{ "category": "...", "description": "...", "cost": "..." }], "totalCost": "...", "finePrint": "..." }"##,
            "必须用简体中文。讽刺、黑色幽默。",
        ),
        build_user_prompt: |choice| format!("客户选择：\"{choice}\"。请开具发票。"),
        expected_fields: &["invoiceId", "currencyUnit", "lineItems", "totalCost", "finePrint"],
        output_schema: json!({
            "type": "OBJECT",
            "properties": {
                "invoiceId": {"type": "STRING"},
                "currencyUnit": {"type": "STRING"},
                "lineItems": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "category": {"type": "STRING"},
                            "description": {"type": "STRING"},
                            "cost": {"type": "STRING"}
                        }
                    }
                },
                "totalCost": {"type": "STRING"},
                "finePrint": {"type": "STRING"}
            }
        }),
        normalize: Some(normalize_cost_calc),
    })
}

fn normalize_cost_calc(raw: &Value) -> CostCalcResult {
    CostCalcResult {
        invoice_id: text(raw, "invoiceId", "INV-NULL"),
        currency_unit: text(raw, "currencyUnit", "Units"),
        line_items: list(raw, "lineItems", |item| LineItem {
            category: text(item, "category", ""),
            description: text(item, "description", ""),
            cost: text(item, "cost", ""),
        }),
        total_cost: text(raw, "totalCost", "Unknown"),
        fine_print: text(raw, "finePrint", "No refunds."),
    }
}

pub fn deception() -> &'static ToolConfig<String, DeceptionResult> {
    static CONFIG: OnceLock<ToolConfig<String, DeceptionResult>> = OnceLock::new();
    CONFIG.get_or_init(|| ToolConfig {
        id: ToolId::Deception,
        system_prompt: build_structured_prompt(
            "你是一个‘红丸终端’(Red Pill Terminal)。你的任务是打破用户的自我欺骗矩阵。",
            r#"{ "bluePillNarrative": "...", "redPillTruth": "...", "glitchFactor": 80, "systemFailureLog": ["..."], "realityPatch": "..." }"#,
            "必须用简体中文。对比‘美好的谎言’和‘残酷的真相’。",
        ),
        build_user_prompt: |narrative| format!("解析这个叙事：\"{narrative}\"。揭露真相。"),
        expected_fields: &[
            "bluePillNarrative",
            "redPillTruth",
            "glitchFactor",
            "systemFailureLog",
            "realityPatch",
        ],
        output_schema: json!({
            "type": "OBJECT",
            "properties": {
                "bluePillNarrative": {"type": "STRING"},
                "redPillTruth": {"type": "STRING"},
                "glitchFactor": {"type": "NUMBER"},
                "systemFailureLog": {"type": "ARRAY", "items": {"type": "STRING"}},
                "realityPatch": {"type": "STRING"}
            }
        }),
        normalize: Some(normalize_deception),
    })
}

fn normalize_deception(raw: &Value) -> DeceptionResult {
    DeceptionResult {
        blue_pill_narrative: text(raw, "bluePillNarrative", ""),
        red_pill_truth: text(raw, "redPillTruth", ""),
        glitch_factor: number(raw, "glitchFactor", 0.0),
        system_failure_log: text_list(raw, "systemFailureLog"),
        reality_patch: text(raw, "realityPatch", ""),
    }
}

pub fn extreme_sim() -> &'static ToolConfig<String, ExtremeSimResult> {
    static CONFIG: OnceLock<ToolConfig<String, ExtremeSimResult>> = OnceLock::new();
    CONFIG.get_or_init(|| ToolConfig {
        id: ToolId::ExtremeSim,
        system_prompt: build_structured_prompt(
            "你是一个‘混沌效应计算器’。将用户的微小坏习惯视为‘蝴蝶扇动翅膀’，推演其导致的级联灾难。",
            r#"{ "disasterLevel": "CAT 4", "currentImpact": "...", "cascadeTimeline": [{ "time": "...", "event": "...", "magnitude": 50 }], "finalCollapse": "...", "tippingPoint": "..." }"#,
            "必须用简体中文。逻辑滑坡要‘看似荒谬但符合混沌逻辑’。",
        ),
        build_user_prompt: |habit| format!("坏习惯/诱因：\"{habit}\"。推演蝴蝶效应。"),
        expected_fields: &[
            "disasterLevel",
            "currentImpact",
            "cascadeTimeline",
            "finalCollapse",
            "tippingPoint",
        ],
        output_schema: json!({
            "type": "OBJECT",
            "properties": {
                "disasterLevel": {"type": "STRING", "enum": ["CAT 1", "CAT 2", "CAT 3", "CAT 4", "CAT 5"]},
                "currentImpact": {"type": "STRING"},
                "cascadeTimeline": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "time": {"type": "STRING"},
                            "event": {"type": "STRING"},
                            "magnitude": {"type": "NUMBER"}
                        }
                    }
                },
                "finalCollapse": {"type": "STRING"},
                "tippingPoint": {"type": "STRING"}
            }
        }),
        normalize: Some(normalize_extreme_sim),
    })
}

fn normalize_extreme_sim(raw: &Value) -> ExtremeSimResult {
    ExtremeSimResult {
        disaster_level: text(raw, "disasterLevel", "CAT 1"),
        current_impact: text(raw, "currentImpact", ""),
        cascade_timeline: list(raw, "cascadeTimeline", |event| CascadeEvent {
            time: text(event, "time", ""),
            event: text(event, "event", ""),
            magnitude: number(event, "magnitude", 0.0),
        }),
        final_collapse: text(raw, "finalCollapse", ""),
        tipping_point: text(raw, "tippingPoint", ""),
    }
}

pub fn jury() -> &'static ToolConfig<String, JuryResult> {
    static CONFIG: OnceLock<ToolConfig<String, JuryResult>> = OnceLock::new();
    CONFIG.get_or_init(|| ToolConfig {
        id: ToolId::Jury,
        system_prompt: build_structured_prompt(
            "你是一个‘原型议会’。脑内的不同欲望化身为议员（如：贪婪、恐惧、道德），对用户的决定进行辩论。",
            r#"{ "councilName": "...", "chaosMeter": 50, "jurors": [{ "archetype": "...", "icon": "🤡", "stance": "SUPPORT", "intensity": 5, "monologue": "..." }], "finalDecree": "..." }"#,
            "必须用简体中文。风格：极乐迪斯科 (Disco Elysium)。",
        ),
        build_user_prompt: |decision| format!("议题：\"{decision}\"。召开紧急会议。"),
        expected_fields: &["councilName", "chaosMeter", "jurors", "finalDecree"],
        output_schema: json!({
            "type": "OBJECT",
            "properties": {
                "councilName": {"type": "STRING"},
                "chaosMeter": {"type": "NUMBER"},
                "jurors": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "archetype": {"type": "STRING"},
                            "icon": {"type": "STRING"},
                            "stance": {"type": "STRING", "enum": ["SUPPORT", "OPPOSE", "ABSTAIN"]},
                            "intensity": {"type": "NUMBER"},
                            "monologue": {"type": "STRING"}
                        }
                    }
                },
                "finalDecree": {"type": "STRING"}
            }
        }),
        normalize: Some(normalize_jury),
    })
}

fn normalize_jury(raw: &Value) -> JuryResult {
    JuryResult {
        council_name: text(raw, "councilName", "Council"),
        chaos_meter: number(raw, "chaosMeter", 0.0),
        jurors: list(raw, "jurors", |juror| Juror {
            archetype: text(juror, "archetype", ""),
            icon: text(juror, "icon", ""),
            stance: variant(juror, "stance", Stance::parse, Stance::Abstain),
            intensity: number(juror, "intensity", 0.0),
            monologue: text(juror, "monologue", ""),
        }),
        final_decree: text(raw, "finalDecree", "Adjourned"),
    }
}

pub fn cyber_debate() -> &'static ToolConfig<String, DebateResult> {
    static CONFIG: OnceLock<ToolConfig<String, DebateResult>> = OnceLock::new();
    CONFIG.get_or_init(|| {
        let fighter = json!({
            "type": "OBJECT",
            "properties": {"name": {"type": "STRING"}, "style": {"type": "STRING"}}
        });
        let attack = json!({
            "type": "OBJECT",
            "properties": {
                "name": {"type": "STRING"},
                "content": {"type": "STRING"},
                "damage": {"type": "NUMBER"}
            }
        });
        ToolConfig {
            id: ToolId::CyberDebate,
            system_prompt: build_structured_prompt(
                "你是一个‘认知角斗场’的解说员。模拟一场关于用户话题的激烈辩论 (Red Side vs Blue Side)。",
                r#"{ "topic": "...", "redFighter": { "name": "...", "style": "..." }, "blueFighter": { "name": "...", "style": "..." }, "rounds": [{ "roundName": "Round 1", "redMove": { "name": "...", "content": "...", "damage": 50 }, "blueMove": { "name": "...", "content": "...", "damage": 40 } }], "winner": "RED", "fatalityMove": "..." }"#,
                "必须用简体中文。必须有3个回合。每个招式要有伤害值。",
            ),
            build_user_prompt: |topic| format!("开启辩论角斗。话题：\"{topic}\"。"),
            expected_fields: &[
                "topic",
                "redFighter",
                "blueFighter",
                "rounds",
                "winner",
                "fatalityMove",
            ],
            output_schema: json!({
                "type": "OBJECT",
                "properties": {
                    "topic": {"type": "STRING"},
                    "redFighter": fighter.clone(),
                    "blueFighter": fighter,
                    "rounds": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "roundName": {"type": "STRING"},
                                "redMove": attack.clone(),
                                "blueMove": attack
                            }
                        }
                    },
                    "winner": {"type": "STRING", "enum": ["RED", "BLUE", "DRAW"]},
                    "fatalityMove": {"type": "STRING"}
                }
            }),
            normalize: Some(normalize_debate),
        }
    })
}

fn normalize_debate(raw: &Value) -> DebateResult {
    let fighter = |value: &Value, name: &str, style: &str| Fighter {
        name: text(value, "name", name),
        style: text(value, "style", style),
    };
    let attack = |value: &Value| Move {
        name: text(value, "name", ""),
        content: text(value, "content", ""),
        damage: number(value, "damage", 0.0),
    };
    DebateResult {
        topic: text(raw, "topic", ""),
        red_fighter: fighter(&raw["redFighter"], "Red", "Aggressive"),
        blue_fighter: fighter(&raw["blueFighter"], "Blue", "Defensive"),
        rounds: list(raw, "rounds", |round| DebateRound {
            round_name: text(round, "roundName", ""),
            red_move: attack(&round["redMove"]),
            blue_move: attack(&round["blueMove"]),
        }),
        winner: variant(raw, "winner", Winner::parse, Winner::Draw),
        fatality_move: text(raw, "fatalityMove", ""),
    }
}

pub fn code_arch() -> &'static ToolConfig<String, CodeArchResult> {
    static CONFIG: OnceLock<ToolConfig<String, CodeArchResult>> = OnceLock::new();
    CONFIG.get_or_init(|| ToolConfig {
        id: ToolId::CodeArch,
        system_prompt: build_structured_prompt(
            "你是一个‘数字遗迹博物馆’的馆长。对‘烂代码’进行考古鉴定。",
            r#"{ "carbonDating": "...", "techStackLayer": "...", "authorProfile": { "mentalState": "...", "caffeineLevel": "...", "hairLossRisk": "..." }, "spaghettiIndex": 80, "excavationReport": "...", "fossilFaults": [], "curatorNote": "..." }"#,
            "必须用简体中文。毒舌点评，考古隐喻。",
        ),
        build_user_prompt: |code| format!("鉴定这段代码遗物：\n{code}"),
        expected_fields: &[
            "carbonDating",
            "techStackLayer",
            "authorProfile",
            "spaghettiIndex",
            "excavationReport",
            "fossilFaults",
            "curatorNote",
        ],
        output_schema: json!({
            "type": "OBJECT",
            "properties": {
                "carbonDating": {"type": "STRING"},
                "techStackLayer": {"type": "STRING"},
                "authorProfile": {
                    "type": "OBJECT",
                    "properties": {
                        "mentalState": {"type": "STRING"},
                        "caffeineLevel": {"type": "STRING"},
                        "hairLossRisk": {"type": "STRING"}
                    }
                },
                "spaghettiIndex": {"type": "NUMBER"},
                "excavationReport": {"type": "STRING"},
                "fossilFaults": {"type": "ARRAY", "items": {"type": "STRING"}},
                "curatorNote": {"type": "STRING"}
            }
        }),
        normalize: Some(normalize_code_arch),
    })
}

fn normalize_code_arch(raw: &Value) -> CodeArchResult {
    let author = &raw["authorProfile"];
    CodeArchResult {
        carbon_dating: text(raw, "carbonDating", "Unknown Era"),
        tech_stack_layer: text(raw, "techStackLayer", "Unknown Layer"),
        author_profile: AuthorProfile {
            mental_state: text(author, "mentalState", "?"),
            caffeine_level: text(author, "caffeineLevel", "?"),
            hair_loss_risk: text(author, "hairLossRisk", "?"),
        },
        spaghetti_index: number(raw, "spaghettiIndex", 0.0),
        excavation_report: text(raw, "excavationReport", "No data found."),
        fossil_faults: text_list(raw, "fossilFaults"),
        curator_note: text(raw, "curatorNote", "Interesting artifact."),
    }
}

pub fn devils_advocate() -> &'static ToolConfig<String, DevilsResult> {
    static CONFIG: OnceLock<ToolConfig<String, DevilsResult>> = OnceLock::new();
    CONFIG.get_or_init(|| ToolConfig {
        id: ToolId::DevilsAdvocate,
        system_prompt: build_structured_prompt(
            "你是一个中世纪的‘逻辑异端裁判所’的大法官。对用户的观点进行‘逻辑审判’。",
            r#"{ "verdict": "...", "logicalCrimes": [{ "name": "...", "description": "...", "sentence": "..." }], "tortureSession": [{ "tool": "...", "method": "...", "outcome": "..." }], "forcedConfession": "...", "sanityScore": 50 }"#,
            "必须用简体中文。把逻辑谬误比作异端罪行。",
        ),
        build_user_prompt: |opinion| format!("把这个观点带上审判庭：\"{opinion}\""),
        expected_fields: &[
            "verdict",
            "logicalCrimes",
            "tortureSession",
            "forcedConfession",
            "sanityScore",
        ],
        output_schema: json!({
            "type": "OBJECT",
            "properties": {
                "verdict": {"type": "STRING"},
                "logicalCrimes": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "name": {"type": "STRING"},
                            "description": {"type": "STRING"},
                            "sentence": {"type": "STRING"}
                        }
                    }
                },
                "tortureSession": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "tool": {"type": "STRING"},
                            "method": {"type": "STRING"},
                            "outcome": {"type": "STRING"}
                        }
                    }
                },
                "forcedConfession": {"type": "STRING"},
                "sanityScore": {"type": "NUMBER"}
            }
        }),
        normalize: Some(normalize_devils),
    })
}

fn normalize_devils(raw: &Value) -> DevilsResult {
    DevilsResult {
        verdict: text(raw, "verdict", "逻辑混沌罪"),
        logical_crimes: list(raw, "logicalCrimes", |crime| LogicalCrime {
            name: text(crime, "name", ""),
            description: text(crime, "description", ""),
            sentence: text(crime, "sentence", ""),
        }),
        torture_session: list(raw, "tortureSession", |step| TortureStep {
            tool: text(step, "tool", ""),
            method: text(step, "method", ""),
            outcome: text(step, "outcome", ""),
        }),
        forced_confession: text(raw, "forcedConfession", "被告已疯，无法签署认罪书。"),
        sanity_score: strict_number(raw, "sanityScore", 0.0),
    }
}

pub fn concept_stitcher() -> &'static ToolConfig<StitcherInput, StitcherResult> {
    static CONFIG: OnceLock<ToolConfig<StitcherInput, StitcherResult>> = OnceLock::new();
    CONFIG.get_or_init(|| ToolConfig {
        id: ToolId::ConceptStitcher,
        system_prompt: build_structured_prompt(
            "你是一名疯狂的硅谷VC。强行缝合两个无关概念，生成荒诞商业计划书。",
            r#"{ "startupName": "...", "tagline": "...", "userPersona": { "name": "...", "description": "...", "desire": "..." }, "revenueModel": "...", "growthHack": "...", "vcVerdict": "...", "unicornProbability": 50 }"#,
            "必须用简体中文。风格浮夸，充满创投圈黑话。",
        ),
        build_user_prompt: |input| {
            format!(
                "强制缝合这两个概念：\"{}\" + \"{}\"。生成项目路演材料。",
                input.term_a, input.term_b
            )
        },
        expected_fields: &[
            "startupName",
            "tagline",
            "userPersona",
            "revenueModel",
            "growthHack",
            "vcVerdict",
            "unicornProbability",
        ],
        output_schema: json!({
            "type": "OBJECT",
            "properties": {
                "startupName": {"type": "STRING"},
                "tagline": {"type": "STRING"},
                "userPersona": {
                    "type": "OBJECT",
                    "properties": {
                        "name": {"type": "STRING"},
                        "description": {"type": "STRING"},
                        "desire": {"type": "STRING"}
                    }
                },
                "revenueModel": {"type": "STRING"},
                "growthHack": {"type": "STRING"},
                "vcVerdict": {"type": "STRING"},
                "unicornProbability": {"type": "NUMBER"}
            }
        }),
        normalize: Some(normalize_stitcher),
    })
}

fn normalize_stitcher(raw: &Value) -> StitcherResult {
    let persona = &raw["userPersona"];
    StitcherResult {
        startup_name: text(raw, "startupName", ""),
        tagline: text(raw, "tagline", ""),
        user_persona: UserPersona {
            name: text(persona, "name", ""),
            description: text(persona, "description", ""),
            desire: text(persona, "desire", ""),
        },
        revenue_model: text(raw, "revenueModel", ""),
        growth_hack: text(raw, "growthHack", ""),
        vc_verdict: text(raw, "vcVerdict", ""),
        unicorn_probability: number(raw, "unicornProbability", 0.0),
    }
}
