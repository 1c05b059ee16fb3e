use charity_chain_client::{SubmissionError, SubmissionState, SubmitOutcome, WalletEvent};
use charity_chain_testing::{sample_draft, TestFixture, ALICE, BOB};

#[tokio::test]
async fn test_result_after_network_change_is_discarded() {
    let mut test = TestFixture::mounted(vec![ALICE]).await;
    test.flow.set_draft(sample_draft());
    test.factory
        .emit_during_send(&test.wallet, WalletEvent::ChainChanged(1));

    let outcome = test.flow.submit().await;

    assert_eq!(outcome, SubmitOutcome::Stale);
    assert_eq!(test.factory.call_count(), 1);
    assert!(test.navigations().is_empty());
    assert!(test.flow.notice().is_none());
    assert_eq!(test.flow.state(), SubmissionState::Idle);
    assert_eq!(test.flow.session().epoch().value(), 1);
    assert_eq!(test.flow.session().chain_id(), Some(1));
}

#[tokio::test]
async fn test_failure_after_network_change_is_discarded() {
    let mut test = TestFixture::mounted(vec![ALICE]).await;
    test.flow.set_draft(sample_draft());
    test.factory
        .fail_with(SubmissionError::UserRejected("User denied transaction".to_string()));
    test.factory
        .emit_during_send(&test.wallet, WalletEvent::ChainChanged(1));

    let outcome = test.flow.submit().await;

    assert_eq!(outcome, SubmitOutcome::Stale);
    assert!(test.flow.notice().is_none());
}

#[tokio::test]
async fn test_account_change_during_send_is_not_stale() {
    let mut test = TestFixture::mounted(vec![ALICE]).await;
    test.flow.set_draft(sample_draft());
    test.factory
        .emit_during_send(&test.wallet, WalletEvent::AccountsChanged(vec![BOB]));

    let outcome = test.flow.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Submitted { .. }));
    assert_eq!(test.navigations().len(), 1);
    assert_eq!(test.factory.calls()[0].0, ALICE);
    assert_eq!(test.flow.session().session().account(), Some(BOB));
}

#[tokio::test]
async fn test_network_change_before_submit_reloads_first() {
    let mut test = TestFixture::mounted(vec![ALICE]).await;
    test.flow.set_draft(sample_draft());
    test.wallet.emit(WalletEvent::ChainChanged(1));

    // the reload empties the draft, so nothing is sent
    let outcome = test.flow.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
    assert_eq!(test.factory.call_count(), 0);
}
