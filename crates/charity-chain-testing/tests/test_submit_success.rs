use charity_chain_client::{
    CampaignDraft, FactoryContract, Route, SubmissionState, SubmitOutcome, U256,
};
use charity_chain_testing::{sample_draft, TestFixture, ALICE};

#[tokio::test]
async fn test_submit_creates_campaign_and_navigates_home() {
    let mut test = TestFixture::mounted(vec![ALICE]).await;
    test.flow.set_draft(sample_draft());

    let outcome = test.flow.submit().await;

    let SubmitOutcome::Submitted { receipt, params } = outcome else {
        panic!("expected a mined transaction, got {outcome:?}");
    };
    assert_eq!(receipt.block_number, Some(1));
    assert_eq!(
        params.minimum_contribution,
        U256::from(10_000_000_000_000_000u64)
    );
    assert_eq!(test.navigations(), &[Route::Home]);
    assert!(test.flow.notice().is_none());
    assert_eq!(test.flow.state(), SubmissionState::Succeeded);
    assert!(!test.flow.is_busy());
    assert_eq!(test.flow.draft(), &CampaignDraft::default());

    let calls = test.factory.calls();
    assert_eq!(calls.len(), 1);
    let (from, sent) = &calls[0];
    assert_eq!(*from, ALICE);
    assert_eq!(*sent, params);
    assert_eq!(params.name, "Clean Water");
    assert_eq!(params.description, "Wells for rural schools");
    assert_eq!(params.image_url, "https://example.org/well.png");
    assert_eq!(params.legal_doc_url, "https://example.org/registration.pdf");

    assert_eq!(test.factory.deployed_campaigns().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_hundredth_of_native_unit_is_exact() {
    let mut test = TestFixture::mounted(vec![ALICE]).await;
    test.flow.set_draft(sample_draft());

    test.flow.submit().await;

    assert_eq!(
        test.factory.calls()[0].1.minimum_contribution,
        U256::from(10_000_000_000_000_000u64)
    );
}

#[tokio::test]
async fn test_one_native_unit_is_exact() {
    let mut test = TestFixture::mounted(vec![ALICE]).await;
    test.flow.set_draft(CampaignDraft {
        minimum_contribution: "1".to_string(),
        ..sample_draft()
    });

    test.flow.submit().await;

    assert_eq!(
        test.factory.calls()[0].1.minimum_contribution,
        U256::from(1_000_000_000_000_000_000u64)
    );
}

#[tokio::test]
async fn test_fields_are_trimmed_before_sending() {
    let mut test = TestFixture::mounted(vec![ALICE]).await;
    test.flow.set_draft(CampaignDraft {
        minimum_contribution: " 0.5 ".to_string(),
        name: "  Clean Water ".to_string(),
        ..sample_draft()
    });

    test.flow.submit().await;

    let (_, params) = &test.factory.calls()[0];
    assert_eq!(params.name, "Clean Water");
    assert_eq!(
        params.minimum_contribution,
        U256::from(500_000_000_000_000_000u64)
    );
}
