// Copyright (c) 2025 FinBot contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{DraftKind, TransactionDraft};
use crate::utils::{http_client, normalize_amount};

const GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const MAX_ATTEMPTS: usize = 2;
const RETRY_PAUSE: std::time::Duration = std::time::Duration::from_secs(1);
const MIN_CONFIDENCE: i64 = 60;

/// Client for the text-completion service. One endpoint extracts structured
/// transactions from free text, the other answers open-ended finance
/// questions. Both degrade to "no answer" on any failure; neither ever
/// surfaces a raw fault to the dispatcher.
pub struct Interpreter {
    http: reqwest::blocking::Client,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Deserialize)]
struct RawInterpretation {
    #[serde(rename = "type")]
    kind: String,
    amount: Option<serde_json::Value>,
    description: Option<String>,
    #[serde(default)]
    confidence: i64,
}

impl Interpreter {
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            http: http_client(REQUEST_TIMEOUT_SECS)?,
            api_key,
        })
    }

    /// Interprets a free-text message as a transaction. Returns Ok(None)
    /// for anything that is not a confident interpretation: missing key,
    /// non-2xx response, malformed JSON, type "none", confidence below 60,
    /// or an amount that does not normalize.
    pub fn interpret(&self, text: &str) -> Result<Option<TransactionDraft>> {
        let Some(ref key) = self.api_key else {
            return Ok(None);
        };
        let prompt = extraction_prompt(text);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                temperature: 0.1,
                max_output_tokens: 300,
            },
        };
        for attempt in 0..MAX_ATTEMPTS {
            match self.generate(key, &body) {
                Ok(raw) => return Ok(parse_interpretation(&raw)),
                Err(e) => {
                    eprintln!("interpreter attempt {} failed: {e:#}", attempt + 1);
                    if attempt + 1 < MAX_ATTEMPTS {
                        std::thread::sleep(RETRY_PAUSE);
                    }
                }
            }
        }
        Ok(None)
    }

    /// Open-ended finance Q&A. None means "no answer" (unconfigured key,
    /// network trouble, or an empty completion).
    pub fn ask(&self, question: &str) -> Result<Option<String>> {
        let Some(ref key) = self.api_key else {
            return Ok(None);
        };
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: question_prompt(question),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: None,
                temperature: 0.7,
                max_output_tokens: 500,
            },
        };
        match self.generate(key, &body) {
            Ok(answer) if !answer.trim().is_empty() => Ok(Some(answer.trim().to_string())),
            Ok(_) => Ok(None),
            Err(e) => {
                eprintln!("interpreter question failed: {e:#}");
                Ok(None)
            }
        }
    }

    fn generate(&self, key: &str, body: &GenerateRequest) -> Result<String> {
        let url = format!("{}?key={}", GEMINI_ENDPOINT, key);
        let resp = self.http.post(url).json(body).send()?.error_for_status()?;
        let out: GenerateResponse = resp.json()?;
        let text = out
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .unwrap_or_default();
        Ok(text)
    }
}

fn extraction_prompt(text: &str) -> String {
    format!(
        r#"Analise a seguinte frase e extraia informações sobre uma transação financeira.
Retorne APENAS um objeto JSON válido com os seguintes campos:
- "type": "income" para receitas/ganhos/salário ou "expense" para gastos/despesas
- "amount": valor numérico da transação (apenas número, sem R$)
- "description": breve descrição do item
- "confidence": 0-100 indicando sua confiança na interpretação

Se a frase NÃO for sobre finanças OU for uma pergunta genérica sobre economia,
retorne: {{"type": "none", "confidence": 0}}

Frase: "{}"

Responda APENAS com o JSON, sem texto adicional."#,
        text
    )
}

fn question_prompt(question: &str) -> String {
    format!(
        r#"Você é um assistente financeiro útil e amigável que responde em português brasileiro.
Forneça conselhos práticos e acionáveis sobre finanças pessoais.

Pergunta: "{}"

Responda de forma clara e direta, sem incluir JSON ou estruturas de dados."#,
        question
    )
}

/// Applies the interpretation gates to the raw completion text: strict JSON,
/// a usable type, confidence of at least 60, and a positive normalizable
/// amount. Pure so the gates are testable without the network.
pub fn parse_interpretation(raw: &str) -> Option<TransactionDraft> {
    let parsed: RawInterpretation = serde_json::from_str(raw.trim()).ok()?;
    let kind = match parsed.kind.as_str() {
        "income" => DraftKind::Income,
        "expense" => DraftKind::Expense,
        _ => return None,
    };
    if parsed.confidence < MIN_CONFIDENCE {
        return None;
    }
    let amount_raw = match parsed.amount? {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s,
        _ => return None,
    };
    let amount = normalize_amount(&amount_raw)?;
    if amount <= Decimal::ZERO {
        return None;
    }
    let description = parsed
        .description
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| "Sem descrição".to_string());
    Some(TransactionDraft {
        kind,
        amount,
        description,
    })
}
