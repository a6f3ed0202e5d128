/// Information about a Gemini model's capabilities and defaults.
#[derive(Clone, Debug)]
pub struct GeminiModelInfo {
    pub name: &'static str,
    pub display_name: &'static str,
    pub context_window: usize,
    pub max_output: usize,
    pub default_temperature: f64,
}

pub static GEMINI_15_PRO: GeminiModelInfo = GeminiModelInfo {
    name: "gemini-1.5-pro-latest",
    display_name: "Gemini 1.5 Pro",
    context_window: 2_097_152,
    max_output: 8_192,
    default_temperature: 0.7,
};

pub static GEMINI_15_FLASH: GeminiModelInfo = GeminiModelInfo {
    name: "gemini-1.5-flash-latest",
    display_name: "Gemini 1.5 Flash",
    context_window: 1_048_576,
    max_output: 8_192,
    default_temperature: 0.7,
};

pub static GEMINI_20_FLASH: GeminiModelInfo = GeminiModelInfo {
    name: "gemini-2.0-flash",
    display_name: "Gemini 2.0 Flash",
    context_window: 1_048_576,
    max_output: 8_192,
    default_temperature: 0.7,
};

static ALL_MODELS: &[&GeminiModelInfo] = &[&GEMINI_15_PRO, &GEMINI_15_FLASH, &GEMINI_20_FLASH];

pub fn find_model(name: &str) -> Option<&'static GeminiModelInfo> {
    ALL_MODELS.iter().find(|m| m.name == name).copied()
}

pub fn default_model() -> &'static GeminiModelInfo {
    &GEMINI_15_PRO
}

pub fn all_models() -> &'static [&'static GeminiModelInfo] {
    ALL_MODELS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_known_models() {
        assert!(find_model("gemini-1.5-pro-latest").is_some());
        assert!(find_model("gemini-1.5-flash-latest").is_some());
        assert!(find_model("gemini-2.0-flash").is_some());
        assert!(find_model("nonexistent").is_none());
    }

    #[test]
    fn default_model_is_15_pro() {
        assert_eq!(default_model().name, "gemini-1.5-pro-latest");
    }

    #[test]
    fn all_models_listed() {
        assert_eq!(all_models().len(), 3);
    }

    #[test]
    fn default_temperature_matches_scripts() {
        for model in all_models() {
            assert!((model.default_temperature - 0.7).abs() < f64::EPSILON);
        }
    }
}
