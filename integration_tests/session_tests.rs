extern crate greenroom_integration_tests;

use ethers::types::U256;

use greenroom_core::types::{Address, Role};
use greenroom_integration_tests::harness::{WalletHarness, ACCOUNT, OTHER_ACCOUNT};
use greenroom_wallet::error::WalletError;
use greenroom_wallet::provider::WalletProvider;
use greenroom_wallet::watcher::SessionWatcher;

#[tokio::test]
async fn test_connect_and_disconnect_round_trip() {
    let harness = WalletHarness::mainnet();

    let session = harness.manager.connect(Role::Organization).await.unwrap();
    assert_eq!(session.address, Some(Address::new(ACCOUNT)));
    assert_eq!(session.role, Some(Role::Organization));
    assert_eq!(session.balance.as_deref(), Some("1.0000"));
    let network = session.network.unwrap();
    assert_eq!(network.name, "Ethereum Mainnet");
    assert!(network.supported);
    assert!(harness.session_file.exists());

    harness.manager.disconnect().await;
    let session = harness.manager.current();
    assert!(!session.is_connected());
    assert_eq!(session.role, None);
    assert_eq!(session.network, None);
    assert_eq!(session.balance, None);
    assert!(!harness.session_file.exists());
}

#[tokio::test]
async fn test_declined_connection_leaves_no_trace() {
    let harness = WalletHarness::mainnet();
    harness.provider.reject_next_request();

    let result = harness.manager.connect(Role::Individual).await;
    assert!(matches!(result, Err(WalletError::WalletRejected)));
    assert!(!harness.manager.current().is_connected());
    assert!(!harness.session_file.exists());
}

#[tokio::test]
async fn test_session_survives_a_process_restart() {
    let harness = WalletHarness::mainnet();
    harness.manager.connect(Role::Individual).await.unwrap();

    // The balance moves while the process is down.
    harness.provider.set_balance(ACCOUNT, U256::exp10(17) * 25u64);

    let manager = harness.reopened();
    let session = manager.restore().await.unwrap();
    assert_eq!(session.address, Some(Address::new(ACCOUNT)));
    assert_eq!(session.role, Some(Role::Individual));
    assert_eq!(session.balance.as_deref(), Some("2.5000"));
}

#[tokio::test]
async fn test_restore_without_a_persisted_session() {
    let harness = WalletHarness::mainnet();
    assert!(harness.manager.restore().await.is_none());
}

#[tokio::test]
async fn test_watcher_follows_the_wallet() {
    let harness = WalletHarness::mainnet();
    harness.provider.set_balance(OTHER_ACCOUNT, U256::exp10(17));
    harness.manager.connect(Role::Organization).await.unwrap();

    let watcher = SessionWatcher::spawn(harness.manager.clone()).unwrap();
    let mut rx = harness.manager.subscribe();

    // The user picks another account in the wallet.
    harness
        .provider
        .emit_accounts_changed(vec![Address::new(OTHER_ACCOUNT)]);
    rx.changed().await.unwrap();
    let session = rx.borrow_and_update().clone();
    assert_eq!(session.address, Some(Address::new(OTHER_ACCOUNT)));
    assert_eq!(session.balance.as_deref(), Some("0.1000"));
    assert_eq!(session.role, Some(Role::Organization));

    // Then moves to a testnet.
    harness.provider.emit_chain_changed(0x13881);
    rx.changed().await.unwrap();
    let network = rx.borrow_and_update().network.clone().unwrap();
    assert_eq!(network.name, "Polygon Mumbai");
    assert!(network.supported);

    // And finally locks the wallet.
    harness.provider.emit_accounts_changed(vec![]);
    rx.changed().await.unwrap();
    assert!(!rx.borrow_and_update().is_connected());
    assert!(!harness.session_file.exists());

    watcher.stop().await;
}

#[tokio::test]
async fn test_network_switching_against_the_allow_list() {
    let harness = WalletHarness::mainnet();
    harness.manager.connect(Role::Individual).await.unwrap();

    // Supported chain the wallet has never heard of: refused, not an error.
    let switched = harness.manager.switch_network(0x13881).await.unwrap();
    assert!(!switched);
    assert_eq!(harness.provider.chain_id().await.unwrap(), 0x1);

    // Once the wallet knows the chain, the switch goes through.
    harness.provider.add_known_chain(0x13881);
    let switched = harness.manager.switch_network(0x13881).await.unwrap();
    assert!(switched);
    assert_eq!(harness.provider.chain_id().await.unwrap(), 0x13881);

    // Chains outside the allow-list are never requested.
    assert!(matches!(
        harness.manager.switch_network(0x89).await,
        Err(WalletError::UnsupportedNetwork(0x89))
    ));
    assert_eq!(harness.provider.chain_id().await.unwrap(), 0x13881);
}
