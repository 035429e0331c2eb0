use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::models::member::FamilyMember;

const GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: SystemInstruction,
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

pub async fn parse_family_input(
    input: &str,
    members: &[FamilyMember],
    api_key: &str,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let now = Utc::now();
    let roster = members
        .iter()
        .map(|m| format!("{} (ID: {})", m.name, m.id))
        .collect::<Vec<_>>()
        .join(", ");

    let system_prompt = format!(
        "You are a helpful family assistant.\n\
         You turn natural language from family members into structured JSON.\n\
         Current date and time (UTC): {now}\n\
         Current family members: {roster}\n\
         Decide whether the user is describing a \"todo\" (a task) or an \"event\" (calendar).\n\
         For events:\n\
         - Extract title, startTime (RFC3339), endTime (RFC3339), isAllDay (boolean), location.\n\
         - eventType is one of 'appointment', 'activity', 'celebration', 'general'.\n\
         - Assume the current date when none is given; infer a one hour duration when none is given.\n\
         For todos:\n\
         - Extract title and priority ('low', 'medium', 'high').\n\
         - When the message names a family member (e.g. \"for Dad\", \"assign to Kiddo\"), put their ID in assignedTo.\n\
         Output ONLY raw JSON, no prose, markdown, or code fences.\n\
         The JSON shape must be exactly:\n\
         {{\"type\":\"todo|event\",\"data\":{{...}},\"confidence\":<number between 0 and 1>}}",
        now = now.to_rfc3339(),
        roster = roster
    );

    let request = GeminiRequest {
        system_instruction: SystemInstruction {
            parts: vec![Part {
                text: system_prompt,
            }],
        },
        contents: vec![Content {
            parts: vec![Part {
                text: input.to_string(),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            temperature: 0.2,
        },
    };

    let client = reqwest::Client::new();
    let response = client
        .post(format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            GEMINI_MODEL, api_key
        ))
        .header("Content-Type", "application/json")
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?; // read the body once

    if !status.is_success() {
        println!("Error {}: {}", status, text);
        return Err(format!("Request failed with status {}", status).into());
    }

    let parsed: GeminiResponse = serde_json::from_str(&text)
        .map_err(|e| format!("Failed to parse JSON: {}\nRaw body: {}", e, text))?;

    match parsed
        .candidates
        .first()
        .and_then(|candidate| candidate.content.parts.first())
    {
        Some(part) => Ok(part.text.clone()),
        None => {
            println!("No candidates found in response.\nRaw body:\n{}", text);
            Err("No response from Gemini".to_string().into())
        }
    }
}
