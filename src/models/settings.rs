use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fully-resolved assistant settings.
///
/// Every field is always present with a defined default; per-person
/// overrides arrive as a [`SettingsPatch`] and are folded in through
/// [`AssistantSettings::merged`], the single merge point. Precedence: a
/// field present on the patch wins over the default; a non-empty
/// `custom_system_prompt` later replaces the templated prompt wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    /// One of `professional`, `friendly`, `direct`.
    pub persona: String,
    /// One of `expert`, `balanced`, `accessible`.
    pub knowledge_level: String,
    /// One of `conversational`, `concise`, `detailed`.
    pub response_style: String,
    /// Verbatim replacement for the templated system prompt, when set.
    pub custom_system_prompt: Option<String>,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 1024,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            persona: "professional".to_string(),
            knowledge_level: "balanced".to_string(),
            response_style: "conversational".to_string(),
            custom_system_prompt: None,
        }
    }
}

impl AssistantSettings {
    /// Fold a stored per-person patch over these settings.
    ///
    /// Fields the patch carries win; everything else keeps its current
    /// value. A blank custom prompt is treated as unset so it can never
    /// shadow the template with an empty string.
    pub fn merged(mut self, patch: SettingsPatch) -> Self {
        if let Some(model) = patch.model {
            self.model = model;
        }
        if let Some(temperature) = patch.temperature {
            self.temperature = temperature;
        }
        if let Some(max_tokens) = patch.max_tokens {
            self.max_tokens = max_tokens.max(1) as u32;
        }
        if let Some(top_p) = patch.top_p {
            self.top_p = top_p;
        }
        if let Some(frequency_penalty) = patch.frequency_penalty {
            self.frequency_penalty = frequency_penalty;
        }
        if let Some(presence_penalty) = patch.presence_penalty {
            self.presence_penalty = presence_penalty;
        }
        if let Some(persona) = patch.persona {
            self.persona = persona;
        }
        if let Some(knowledge_level) = patch.knowledge_level {
            self.knowledge_level = knowledge_level;
        }
        if let Some(response_style) = patch.response_style {
            self.response_style = response_style;
        }
        if let Some(prompt) = patch.custom_system_prompt {
            if !prompt.trim().is_empty() {
                self.custom_system_prompt = Some(prompt);
            }
        }
        self
    }
}

/// The persisted `ai_settings` row for a person. All fields optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct SettingsPatch {
    pub person_id: Uuid,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,
    pub top_p: Option<f32>,
    pub frequency_penalty: Option<f32>,
    pub presence_penalty: Option<f32>,
    pub persona: Option<String>,
    pub knowledge_level: Option<String>,
    pub response_style: Option<String>,
    pub custom_system_prompt: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_complete() {
        let settings = AssistantSettings::default();
        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.persona, "professional");
        assert!(settings.custom_system_prompt.is_none());
    }

    #[test]
    fn test_patch_fields_win() {
        let patch = SettingsPatch {
            model: Some("gpt-4o".to_string()),
            temperature: Some(0.2),
            persona: Some("friendly".to_string()),
            ..Default::default()
        };

        let merged = AssistantSettings::default().merged(patch);
        assert_eq!(merged.model, "gpt-4o");
        assert_eq!(merged.temperature, 0.2);
        assert_eq!(merged.persona, "friendly");
        // Untouched fields keep their defaults
        assert_eq!(merged.response_style, "conversational");
    }

    #[test]
    fn test_blank_custom_prompt_is_ignored() {
        let patch = SettingsPatch {
            custom_system_prompt: Some("   ".to_string()),
            ..Default::default()
        };
        let merged = AssistantSettings::default().merged(patch);
        assert!(merged.custom_system_prompt.is_none());
    }

    #[test]
    fn test_custom_prompt_survives_merge_verbatim() {
        let patch = SettingsPatch {
            custom_system_prompt: Some("You are Dot, the payroll bot.".to_string()),
            ..Default::default()
        };
        let merged = AssistantSettings::default().merged(patch);
        assert_eq!(
            merged.custom_system_prompt.as_deref(),
            Some("You are Dot, the payroll bot.")
        );
    }
}
