use charity_chain_client::{DraftField, Notice, SubmissionState, SubmitOutcome, ValidationError};
use charity_chain_testing::{sample_draft, TestFixture, ALICE};

#[tokio::test]
async fn test_missing_name_sends_nothing() {
    let mut test = TestFixture::mounted(vec![ALICE]).await;
    test.flow.set_draft(sample_draft());
    test.flow.draft_mut().name.clear();

    let outcome = test.flow.submit().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Invalid(ValidationError::MissingFields(vec![DraftField::Name]))
    );
    assert_eq!(test.flow.notice(), Some(&Notice::AllFieldsRequired));
    assert_eq!(
        test.flow.notice().unwrap().to_string(),
        "All Fields are Required"
    );
    assert_eq!(test.flow.state(), SubmissionState::Idle);
    assert_eq!(test.factory.call_count(), 0);
    assert!(test.navigations().is_empty());
}

#[tokio::test]
async fn test_whitespace_only_fields_are_missing() {
    let mut test = TestFixture::mounted(vec![ALICE]).await;
    test.flow.set_draft(sample_draft());
    test.flow.draft_mut().description = "  \t ".to_string();
    test.flow.draft_mut().image_url = String::new();

    let outcome = test.flow.submit().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Invalid(ValidationError::MissingFields(vec![
            DraftField::Description,
            DraftField::ImageUrl,
        ]))
    );
    assert_eq!(test.factory.call_count(), 0);
}

#[tokio::test]
async fn test_missing_legal_doc_is_accepted() {
    let mut test = TestFixture::mounted(vec![ALICE]).await;
    test.flow.set_draft(sample_draft());
    test.flow.draft_mut().legal_doc_url.clear();

    let outcome = test.flow.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Submitted { .. }));
    assert_eq!(test.factory.calls()[0].1.legal_doc_url, "");
}

#[tokio::test]
async fn test_malformed_amount_sends_nothing() {
    let mut test = TestFixture::mounted(vec![ALICE]).await;
    test.flow.set_draft(sample_draft());
    test.flow.draft_mut().minimum_contribution = "0.0.1".to_string();

    let outcome = test.flow.submit().await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Invalid(ValidationError::InvalidAmount(_))
    ));
    assert!(matches!(test.flow.notice(), Some(Notice::Error(_))));
    assert_eq!(test.factory.call_count(), 0);
    assert_eq!(test.flow.draft().name, "Clean Water");
}
