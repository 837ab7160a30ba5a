use pretty_assertions::assert_eq;
use retail_banking_chain::{
    Error,
    chain::{ChainOptions, PromptChain, Stage, StageBackend},
    llm::{Completion, FALLBACK_TEXT},
};
use rstest::rstest;
use std::sync::Arc;

mod common;
use common::{HOUSE_BUYER_INPUT, MockLlmClient, create_mock_chain};

const ADVISOR_REPLY: &str = "1. A 30-year fixed-rate mortgage once a 10% down payment is saved.\n2. A high-yield savings account for the down payment fund.";
const ANALYST_REPLY: &str = "Risks: $5000 is well short of a typical down payment; PMI will apply.";

#[tokio::test]
async fn test_house_buyer_end_to_end() {
    let advisor = MockLlmClient::new("advisor").with_response(ADVISOR_REPLY);
    let analyst = MockLlmClient::new("analyst").with_response(ANALYST_REPLY);
    let chain = create_mock_chain(&advisor, &analyst, ChainOptions::default());

    let result = chain.run(HOUSE_BUYER_INPUT).await.unwrap();

    assert_eq!(
        result.recommendations,
        Completion::Generated(ADVISOR_REPLY.to_string())
    );
    assert!(result.recommendations.text().contains("mortgage"));
    assert_eq!(
        result.risk_analysis,
        Completion::Generated(ANALYST_REPLY.to_string())
    );

    let advisor_requests = advisor.get_requests();
    assert_eq!(advisor_requests.len(), 1);
    assert_eq!(advisor_requests[0].model, "advisor-model");
    assert_eq!(
        advisor_requests[0].prompt,
        format!(
            "Given this customer info, suggest suitable banking products: {}",
            HOUSE_BUYER_INPUT
        )
    );
    assert_eq!(
        advisor_requests[0].system.as_deref(),
        Some(Stage::Recommend.system_instructions())
    );

    let analyst_requests = analyst.get_requests();
    assert_eq!(analyst_requests.len(), 1);
    assert_eq!(analyst_requests[0].model, "analyst-model");
    assert_eq!(
        analyst_requests[0].prompt,
        Stage::RiskAnalysis.user_prompt(ADVISOR_REPLY)
    );
    assert_eq!(
        analyst_requests[0].system.as_deref(),
        Some(Stage::RiskAnalysis.system_instructions())
    );
}

#[tokio::test]
async fn test_stages_run_once_in_order() {
    // One client serving both stages records the call order.
    let shared = MockLlmClient::new("shared")
        .with_response("recommendations text")
        .with_response("risk text");
    let chain = create_mock_chain(&shared, &shared, ChainOptions::default());

    let mut observed = Vec::new();
    let result = chain
        .run_with_observer("Student with part-time job", |stage, completion| {
            observed.push((stage, completion.text().to_string()));
        })
        .await
        .unwrap();

    assert_eq!(
        observed,
        vec![
            (Stage::Recommend, "recommendations text".to_string()),
            (Stage::RiskAnalysis, "risk text".to_string()),
        ]
    );

    let requests = shared.get_requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].prompt.starts_with("Given this customer info"));
    assert!(requests[1].prompt.ends_with("recommendations text"));
    assert_eq!(result.risk_analysis.text(), "risk text");
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\n\t  \n")]
#[tokio::test]
async fn test_blank_input_makes_no_backend_calls(#[case] input: &str) {
    let advisor = MockLlmClient::new("advisor").with_response(ADVISOR_REPLY);
    let analyst = MockLlmClient::new("analyst").with_response(ANALYST_REPLY);
    let chain = create_mock_chain(&advisor, &analyst, ChainOptions::default());

    let err = chain.run(input).await.unwrap_err();

    assert!(matches!(err, Error::EmptyInput));
    assert_eq!(advisor.call_count(), 0);
    assert_eq!(analyst.call_count(), 0);
}

#[tokio::test]
async fn test_recommendation_failure_still_reaches_risk_stage() {
    let advisor = MockLlmClient::new("advisor").with_error("connection refused");
    let analyst = MockLlmClient::new("analyst").with_response(ANALYST_REPLY);
    let chain = create_mock_chain(&advisor, &analyst, ChainOptions::default());

    let result = chain.run(HOUSE_BUYER_INPUT).await.unwrap();

    assert!(result.recommendations.is_fallback());
    assert_eq!(result.recommendations.text(), FALLBACK_TEXT);
    assert!(
        result
            .recommendations
            .failure_reason()
            .unwrap()
            .contains("connection refused")
    );

    let analyst_requests = analyst.get_requests();
    assert_eq!(analyst_requests.len(), 1);
    assert_eq!(
        analyst_requests[0].prompt,
        Stage::RiskAnalysis.user_prompt(FALLBACK_TEXT)
    );
    assert!(!result.risk_analysis.is_fallback());
}

#[tokio::test]
async fn test_skip_risk_on_fallback() {
    let advisor = MockLlmClient::new("advisor").with_error("timeout");
    let analyst = MockLlmClient::new("analyst").with_response(ANALYST_REPLY);
    let options = ChainOptions {
        skip_risk_on_fallback: true,
        ..ChainOptions::default()
    };
    let chain = create_mock_chain(&advisor, &analyst, options);

    let result = chain.run(HOUSE_BUYER_INPUT).await.unwrap();

    assert!(result.recommendations.is_fallback());
    assert!(result.risk_analysis.is_fallback());
    assert_eq!(analyst.call_count(), 0);
}

#[tokio::test]
async fn test_skip_option_ignored_when_recommendations_succeed() {
    let advisor = MockLlmClient::new("advisor").with_response(ADVISOR_REPLY);
    let analyst = MockLlmClient::new("analyst").with_response(ANALYST_REPLY);
    let options = ChainOptions {
        skip_risk_on_fallback: true,
        ..ChainOptions::default()
    };
    let chain = create_mock_chain(&advisor, &analyst, options);

    let result = chain.run(HOUSE_BUYER_INPUT).await.unwrap();
    assert_eq!(analyst.call_count(), 1);
    assert!(!result.risk_analysis.is_fallback());
}

#[tokio::test]
async fn test_both_stages_failing_still_completes() {
    let advisor = MockLlmClient::new("advisor").with_error("500 Internal Server Error");
    let analyst = MockLlmClient::new("analyst").with_error("500 Internal Server Error");
    let chain = create_mock_chain(&advisor, &analyst, ChainOptions::default());

    let result = chain.run(HOUSE_BUYER_INPUT).await.unwrap();
    assert_eq!(result.recommendations.text(), FALLBACK_TEXT);
    assert_eq!(result.risk_analysis.text(), FALLBACK_TEXT);
}

#[tokio::test]
async fn test_temperature_propagates_to_both_stages() {
    let shared = MockLlmClient::new("shared")
        .with_response("a")
        .with_response("b");
    let options = ChainOptions {
        temperature: 0.2,
        ..ChainOptions::default()
    };
    let chain = create_mock_chain(&shared, &shared, options);

    chain.run("Retiree with a pension").await.unwrap();
    for request in shared.get_requests() {
        assert_eq!(request.temperature, 0.2);
    }
}

#[test]
fn test_chain_rejects_blank_model() {
    let client = Arc::new(MockLlmClient::new("mock"));
    let result = PromptChain::new(
        StageBackend::new(client.clone(), "llama2"),
        StageBackend::new(client, " "),
        ChainOptions::default(),
    );
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_chain_rejects_out_of_range_temperature() {
    let client = Arc::new(MockLlmClient::new("mock"));
    let result = PromptChain::new(
        StageBackend::new(client.clone(), "llama2"),
        StageBackend::new(client, "llama2"),
        ChainOptions {
            temperature: 2.0,
            skip_risk_on_fallback: false,
        },
    );
    assert!(result.is_err());
}

#[test]
fn test_orchestrator_module_path_matches_reexports() {
    use retail_banking_chain::chain::orchestrator;

    let defaults = orchestrator::ChainOptions::default();
    assert_eq!(defaults, ChainOptions::default());
    assert_eq!(defaults.temperature, 0.7);
    assert!(!defaults.skip_risk_on_fallback);
}
