pub mod fsm;
pub mod orchestrator;
pub mod stages;

pub use fsm::{ChainEvent, ChainState, ChainStateMachine};
pub use orchestrator::{ChainOptions, ChainResult, PromptChain, StageBackend};
pub use stages::Stage;
