use crate::llm::InferenceRequest;
use std::fmt;

const ADVISOR_INSTRUCTIONS: &str = "You are a retail banking advisor. Your role is to analyze customer information and suggest suitable banking products such as:
- Savings accounts (regular, high-yield, etc.)
- Checking accounts
- Credit cards
- Personal loans
- Mortgages
- Investment products
- Insurance products

Provide specific, actionable recommendations based on the customer's profile.";

const RISK_ANALYST_INSTRUCTIONS: &str = "You are a banking risk analyst. Review banking product recommendations and identify:
- Potential risks for the customer
- Limitations of suggested products
- Regulatory considerations
- Customer concerns or objections
- Alternative options to consider

Be thorough and objective in your analysis.";

/// The two fixed steps of the chain, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Recommend,
    RiskAnalysis,
}

impl Stage {
    pub const ALL: [Stage; 2] = [Stage::Recommend, Stage::RiskAnalysis];

    pub fn system_instructions(&self) -> &'static str {
        match self {
            Stage::Recommend => ADVISOR_INSTRUCTIONS,
            Stage::RiskAnalysis => RISK_ANALYST_INSTRUCTIONS,
        }
    }

    pub fn user_prompt(&self, text: &str) -> String {
        match self {
            Stage::Recommend => format!(
                "Given this customer info, suggest suitable banking products: {}",
                text
            ),
            Stage::RiskAnalysis => format!(
                "Please review the following banking product suggestions and identify any potential risks, limitations, or customer concerns:\n\n{}",
                text
            ),
        }
    }

    pub fn request(&self, model: &str, text: &str, temperature: f32) -> InferenceRequest {
        InferenceRequest::new(model, self.user_prompt(text))
            .with_system(self.system_instructions())
            .with_temperature(temperature)
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Stage::Recommend => "Product Recommendations",
            Stage::RiskAnalysis => "Risk Analysis",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Recommend => write!(f, "recommendations"),
            Stage::RiskAnalysis => write!(f, "risk analysis"),
        }
    }
}
