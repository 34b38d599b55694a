use berthplan_sync::startup::{CycleReport, StageOutcome};
use serde_json::json;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{method, path},
};

use crate::helper::*;

#[tokio::test]
async fn test_cycle_delivers_berth_plan_and_archives_it() {
    let helper = TestHelper::new().await;
    helper.mock_token().await;
    helper.mock_berth_plan(berth_records()).await;
    helper.mock_soap(BERTH_PLAN_SOAP_PATH, 200).await;

    let report = helper.app().run_for(TestHelper::today()).await;

    assert_eq!(
        report,
        CycleReport {
            etc: StageOutcome::Skipped,
            berth_plan: StageOutcome::Delivered,
        }
    );

    let delivered = helper.received(BERTH_PLAN_SOAP_PATH).await;
    assert_eq!(delivered.len(), 1);

    let xml = &delivered[0];
    assert!(xml.starts_with("<?xml version='1.0' encoding='utf-8'?>"));
    assert!(xml.contains("<startDate>2025-06-02T00:00:00.000Z</startDate>"));
    assert!(xml.contains("<endDate>2025-07-20T00:00:00.000Z</endDate>"));
    assert_eq!(xml.matches("<berthinformation>").count(), 2);
    assert!(xml.contains("<afterMetricPoint>1569</afterMetricPoint>"));
    assert!(xml.contains("<forwardMetricPoint>1869</forwardMetricPoint>"));
    assert!(xml.contains("<bowBollard>1869</bowBollard>"));
    assert!(xml.contains("<berthingSide>StarbordSide</berthingSide>"));
    assert!(xml.contains("<afterMetricPoint>1585</afterMetricPoint>"));
    assert!(xml.contains("<forwardMetricPoint>1404.5</forwardMetricPoint>"));
    assert!(xml.contains("<berthingSide>PortSide</berthingSide>"));
    assert!(xml.contains("<marineAgent>NOATUM (Ex MARMEDSA)</marineAgent>"));
    assert!(xml.contains("<marineAgent>NOA</marineAgent>"));

    let archived = helper.archived();
    assert_eq!(archived.len(), 1);
    assert!(archived[0].starts_with("APMT_BP_"));
    assert!(archived[0].ends_with(".xml"));

    let stored = std::fs::read_to_string(helper.archive_dir.path().join(&archived[0])).unwrap();
    assert_eq!(&stored, xml);
}

#[tokio::test]
async fn test_etc_fragment_is_delivered_and_archived() {
    let helper = TestHelper::new().await;
    helper.mock_token().await;
    helper.mock_berth_plan(json!([])).await;
    helper.mock_soap(BERTH_PLAN_SOAP_PATH, 200).await;
    helper.mock_soap(ETC_SOAP_PATH, 200).await;

    let app = helper
        .app()
        .with_etc_source(StaticEtcSource(Some(ETC_FRAGMENT)));
    let report = app.run_for(TestHelper::today()).await;

    assert_eq!(report.etc, StageOutcome::Delivered);
    assert_eq!(report.berth_plan, StageOutcome::Delivered);

    let delivered = helper.received(ETC_SOAP_PATH).await;
    assert_eq!(delivered.len(), 1);
    assert!(delivered[0].contains("<tmsa:processETC>"));
    assert!(delivered[0].contains(ETC_FRAGMENT));

    let berth_plan = helper.received(BERTH_PLAN_SOAP_PATH).await;
    assert!(berth_plan[0].contains("<berths />"));

    let archived = helper.archived();
    assert_eq!(archived.len(), 2);
    assert!(archived.iter().any(|n| n.starts_with("APMT_ETC_")));
    assert!(archived.iter().any(|n| n.starts_with("APMT_BP_")));
}

#[tokio::test]
async fn test_missing_etc_data_skips_etc_stage() {
    let helper = TestHelper::new().await;
    helper.mock_token().await;
    helper.mock_berth_plan(json!([])).await;
    helper.mock_soap(BERTH_PLAN_SOAP_PATH, 200).await;
    helper.mock_soap(ETC_SOAP_PATH, 200).await;

    let app = helper.app().with_etc_source(StaticEtcSource(None));
    let report = app.run_for(TestHelper::today()).await;

    assert_eq!(report.etc, StageOutcome::Skipped);
    assert_eq!(report.berth_plan, StageOutcome::Delivered);
    assert!(helper.received(ETC_SOAP_PATH).await.is_empty());
    assert!(!helper.archived().iter().any(|n| n.starts_with("APMT_ETC_")));
}

#[tokio::test]
async fn test_rejected_etc_delivery_is_archived_and_berth_plan_still_runs() {
    let helper = TestHelper::new().await;
    helper.mock_token().await;
    helper.mock_berth_plan(berth_records()).await;
    helper.mock_soap(BERTH_PLAN_SOAP_PATH, 200).await;
    helper.mock_soap(ETC_SOAP_PATH, 500).await;

    let app = helper
        .app()
        .with_etc_source(StaticEtcSource(Some(ETC_FRAGMENT)));
    let report = app.run_for(TestHelper::today()).await;

    assert_eq!(
        report,
        CycleReport {
            etc: StageOutcome::Failed,
            berth_plan: StageOutcome::Delivered,
        }
    );
    assert!(helper.archived().iter().any(|n| n.starts_with("APMT_ETC_")));
    assert_eq!(helper.received(BERTH_PLAN_SOAP_PATH).await.len(), 1);
}

#[tokio::test]
async fn test_unknown_bollard_fails_berth_plan_without_delivery() {
    let helper = TestHelper::new().await;
    helper.mock_token().await;
    helper
        .mock_berth_plan(json!([
            { "plannedBollard": "B80", "vesselLOA": 200, "arrivalVoyage": "001E" },
            { "plannedBollard": "B999", "vesselLOA": 200, "arrivalVoyage": "002E" }
        ]))
        .await;
    helper.mock_soap(BERTH_PLAN_SOAP_PATH, 200).await;

    let report = helper.app().run_for(TestHelper::today()).await;

    assert_eq!(report.berth_plan, StageOutcome::Failed);
    assert!(helper.received(BERTH_PLAN_SOAP_PATH).await.is_empty());
    assert!(helper.archived().is_empty());
}

#[tokio::test]
async fn test_token_failure_fails_berth_plan_stage() {
    let helper = TestHelper::new().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&helper.server)
        .await;
    helper.mock_berth_plan(berth_records()).await;
    helper.mock_soap(BERTH_PLAN_SOAP_PATH, 200).await;

    let report = helper.app().run_for(TestHelper::today()).await;

    assert_eq!(report.berth_plan, StageOutcome::Failed);
    assert!(helper.received(BERTH_PLAN_PATH).await.is_empty());
    assert!(helper.received(BERTH_PLAN_SOAP_PATH).await.is_empty());
}

#[tokio::test]
async fn test_rejected_berth_plan_delivery_keeps_archived_copy() {
    let helper = TestHelper::new().await;
    helper.mock_token().await;
    helper.mock_berth_plan(berth_records()).await;
    helper.mock_soap(BERTH_PLAN_SOAP_PATH, 503).await;

    let report = helper.app().run_for(TestHelper::today()).await;

    assert_eq!(report.berth_plan, StageOutcome::Failed);
    assert_eq!(helper.archived().len(), 1);
}
