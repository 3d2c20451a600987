use crate::claude::types::Usage;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Model {
    Opus,
    #[default]
    Sonnet,
    Haiku,
}

impl Model {
    pub fn model_id(&self) -> &'static str {
        match self {
            Model::Opus => "claude-opus-4-5-20251101",
            Model::Sonnet => "claude-sonnet-4-20250514",
            Model::Haiku => "claude-3-5-haiku-20241022",
        }
    }

    /// Accepts a short alias (`opus`, `sonnet`, `haiku`) or a full model id.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "opus" | "claude-opus-4-5-20251101" => Some(Model::Opus),
            "sonnet" | "claude-sonnet-4-20250514" => Some(Model::Sonnet),
            "haiku" | "claude-3-5-haiku-20241022" => Some(Model::Haiku),
            _ => None,
        }
    }

    fn pricing(&self) -> Pricing {
        match self {
            Model::Opus => Pricing {
                input_per_million: 15.0,
                output_per_million: 75.0,
            },
            Model::Sonnet => Pricing {
                input_per_million: 3.0,
                output_per_million: 15.0,
            },
            Model::Haiku => Pricing {
                input_per_million: 0.80,
                output_per_million: 4.0,
            },
        }
    }

    /// USD cost of one call with the given token usage.
    pub fn cost(&self, usage: &Usage) -> f64 {
        let pricing = self.pricing();
        let input_cost = (usage.input_tokens as f64 / 1_000_000.0) * pricing.input_per_million;
        let output_cost = (usage.output_tokens as f64 / 1_000_000.0) * pricing.output_per_million;
        input_cost + output_cost
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Model::Opus => "Claude Opus 4.5",
            Model::Sonnet => "Claude Sonnet 4",
            Model::Haiku => "Claude 3.5 Haiku",
        };
        f.write_str(name)
    }
}

struct Pricing {
    input_per_million: f64,
    output_per_million: f64,
}
