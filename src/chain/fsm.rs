use crate::{Error, Result};
use tracing::{debug, info, warn};

// Chain states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
    Idle,
    RecommendationsReady,
    RiskAnalysisReady,
    Done,
}

// Chain events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainEvent {
    RecommendationsGenerated,
    RiskAnalysisGenerated,
    ResultsDelivered,
}

/// Linear state machine for one chain run. There are no backward edges.
#[derive(Debug)]
pub struct ChainStateMachine {
    state: ChainState,
}

impl ChainStateMachine {
    pub fn new() -> Self {
        Self {
            state: ChainState::Idle,
        }
    }

    pub fn current_state(&self) -> ChainState {
        self.state
    }

    pub fn transition(&mut self, event: ChainEvent) -> Result<ChainState> {
        debug!("Chain processing event {:?} in state {:?}", event, self.state);

        let new_state = match (self.state, event) {
            (ChainState::Idle, ChainEvent::RecommendationsGenerated) => {
                ChainState::RecommendationsReady
            }
            (ChainState::RecommendationsReady, ChainEvent::RiskAnalysisGenerated) => {
                ChainState::RiskAnalysisReady
            }
            (ChainState::RiskAnalysisReady, ChainEvent::ResultsDelivered) => ChainState::Done,
            _ => {
                warn!(
                    "Invalid chain transition from {:?} with event {:?}",
                    self.state, event
                );
                return Err(Error::InvalidTransition {
                    current: format!("{:?}", self.state),
                    requested: format!("{:?}", event),
                });
            }
        };

        info!(
            "Chain state transition: {:?} -> {:?} (event: {:?})",
            self.state, new_state, event
        );
        self.state = new_state;
        Ok(new_state)
    }

    pub fn is_terminal(&self) -> bool {
        self.state == ChainState::Done
    }
}

impl Default for ChainStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
