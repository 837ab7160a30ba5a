use super::{
    fsm::{ChainEvent, ChainStateMachine},
    stages::Stage,
};
use crate::{
    Error, Result,
    config::ChainConfig,
    llm::{Completion, DEFAULT_TEMPERATURE, LlmClient},
};
use std::sync::Arc;
use tracing::{info, warn};

/// A backend client paired with the model it should run for one stage.
#[derive(Clone)]
pub struct StageBackend {
    pub client: Arc<dyn LlmClient>,
    pub model: String,
}

impl StageBackend {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainOptions {
    pub temperature: f32,
    /// Skip the risk stage when recommendations came back as a fallback.
    pub skip_risk_on_fallback: bool,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            skip_risk_on_fallback: false,
        }
    }
}

impl From<&ChainConfig> for ChainOptions {
    fn from(config: &ChainConfig) -> Self {
        Self {
            temperature: config.temperature,
            skip_risk_on_fallback: config.skip_risk_on_fallback,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChainResult {
    pub recommendations: Completion,
    pub risk_analysis: Completion,
}

/// Recommend, then critique the recommendations.
pub struct PromptChain {
    recommender: StageBackend,
    risk_analyst: StageBackend,
    options: ChainOptions,
}

impl PromptChain {
    pub fn new(
        recommender: StageBackend,
        risk_analyst: StageBackend,
        options: ChainOptions,
    ) -> Result<Self> {
        for (stage, backend) in [
            (Stage::Recommend, &recommender),
            (Stage::RiskAnalysis, &risk_analyst),
        ] {
            if backend.model.trim().is_empty() {
                return Err(Error::config(format!("no model configured for {stage}")));
            }
        }
        if !(0.0..=1.0).contains(&options.temperature) {
            return Err(Error::config(format!(
                "temperature {} is outside 0..=1",
                options.temperature
            )));
        }

        Ok(Self {
            recommender,
            risk_analyst,
            options,
        })
    }

    pub fn backend(&self, stage: Stage) -> &StageBackend {
        match stage {
            Stage::Recommend => &self.recommender,
            Stage::RiskAnalysis => &self.risk_analyst,
        }
    }

    pub fn options(&self) -> ChainOptions {
        self.options
    }

    pub async fn run(&self, input: &str) -> Result<ChainResult> {
        self.run_with_observer(input, |_, _| {}).await
    }

    /// Runs both stages, calling `observer` as soon as each one finishes.
    pub async fn run_with_observer<F>(&self, input: &str, mut observer: F) -> Result<ChainResult>
    where
        F: FnMut(Stage, &Completion),
    {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut fsm = ChainStateMachine::new();

        let recommendations = self.run_stage(Stage::Recommend, input).await;
        fsm.transition(ChainEvent::RecommendationsGenerated)?;
        observer(Stage::Recommend, &recommendations);

        let risk_analysis = if recommendations.is_fallback() && self.options.skip_risk_on_fallback {
            warn!("Skipping risk analysis because recommendations failed");
            Completion::fallback("skipped: recommendation stage failed")
        } else {
            self.run_stage(Stage::RiskAnalysis, recommendations.text())
                .await
        };
        fsm.transition(ChainEvent::RiskAnalysisGenerated)?;
        observer(Stage::RiskAnalysis, &risk_analysis);

        fsm.transition(ChainEvent::ResultsDelivered)?;

        Ok(ChainResult {
            recommendations,
            risk_analysis,
        })
    }

    async fn run_stage(&self, stage: Stage, text: &str) -> Completion {
        let backend = self.backend(stage);
        info!(
            "Calling {} ({}) for {}",
            backend.client.backend_name(),
            backend.model,
            stage
        );

        let request = stage.request(&backend.model, text, self.options.temperature);
        let completion = backend.client.generate(&request).await;

        if completion.is_fallback() {
            warn!("{} stage returned fallback text", stage);
        } else {
            info!("{} stage completed ({} chars)", stage, completion.text().len());
        }
        completion
    }
}
