//! Parameter shapes and result decoding of every wallet operation.

mod common;

use std::sync::Arc;

use common::RecordingTransport;
use serde_json::json;
use walletd_client::{
    BlockRange, CreateAddressParams, FusionParams, TransactionFilter, TransactionParams,
    Transfer, TransportError, WalletClient, DEFAULT_ANONYMITY, DEFAULT_FEE,
};

const HASH: &str = "8dea3a1b7c";

fn wallet(transport: RecordingTransport) -> (WalletClient, Arc<RecordingTransport>) {
    let transport = Arc::new(transport);
    (WalletClient::from_transport(transport.clone()), transport)
}

#[tokio::test]
async fn save_reset_export() {
    let (client, transport) = wallet(RecordingTransport::new());

    client.save().await.expect("save");
    client.reset(None).await.expect("reset");
    client.reset(Some("f669")).await.expect("reset with key");
    client.export("backup.wallet").await.expect("export");

    let calls = transport.calls();
    let methods: Vec<&str> = calls.iter().map(|(m, _)| m.as_str()).collect();
    assert_eq!(methods, ["save", "reset", "reset", "export"]);
    assert!(calls[0].1.is_empty());
    assert!(calls[1].1.is_empty());
    assert_eq!(calls[2].1["viewSecretKey"], json!("f669"));
    assert_eq!(calls[3].1["fileName"], json!("backup.wallet"));
}

#[tokio::test]
async fn get_balance_omits_missing_address() {
    let (client, transport) = wallet(RecordingTransport::new().reply(
        "getBalance",
        json!({"availableBalance": 10000000000u64, "lockedAmount": 0}),
    ));

    let balance = client.get_balance(None).await.expect("balance");

    assert_eq!(balance.available_balance, 10_000_000_000);
    assert_eq!(balance.locked_amount, 0);
    assert_eq!(transport.single_call("getBalance"), json!({}));
}

#[tokio::test]
async fn get_balance_for_one_address() {
    let (client, transport) = wallet(
        RecordingTransport::new()
            .reply("getBalance", json!({"availableBalance": 1, "lockedAmount": 2})),
    );

    client.get_balance(Some("dnx1a")).await.expect("balance");

    assert_eq!(transport.single_call("getBalance"), json!({"address": "dnx1a"}));
}

#[tokio::test]
async fn status_and_view_key() {
    let (client, _) = wallet(
        RecordingTransport::new()
            .reply(
                "getStatus",
                json!({"blockCount": 5, "knownBlockCount": 5, "lastBlockHash": "aa", "peerCount": 2}),
            )
            .reply("getViewKey", json!({"viewSecretKey": "f669"})),
    );

    let status = client.get_status().await.expect("status");
    assert!(status.is_synced());
    assert_eq!(status.peer_count, 2);
    assert_eq!(client.get_view_key().await.expect("view key"), "f669");
}

#[tokio::test]
async fn create_address_sends_only_given_keys() {
    let (client, transport) =
        wallet(RecordingTransport::new().reply("createAddress", json!({"address": "dnx1new"})));

    let address = client
        .create_address(&CreateAddressParams {
            spend_secret_key: Some("f669".to_string()),
            spend_public_key: None,
        })
        .await
        .expect("create address");

    assert_eq!(address, "dnx1new");
    assert_eq!(transport.single_call("createAddress"), json!({"spendSecretKey": "f669"}));
}

#[tokio::test]
async fn create_address_list_with_scan_height() {
    let (client, transport) = wallet(
        RecordingTransport::new()
            .reply("createAddressList", json!({"addresses": ["dnx1a", "dnx1b"]})),
    );

    let keys = vec!["k1".to_string(), "k2".to_string()];
    let addresses = client.create_address_list(&keys, Some(1200)).await.expect("address list");

    assert_eq!(addresses, ["dnx1a", "dnx1b"]);
    assert_eq!(
        transport.single_call("createAddressList"),
        json!({"spendSecretKeys": ["k1", "k2"], "scanHeights": 1200})
    );
}

#[tokio::test]
async fn address_lookups() {
    let (client, transport) = wallet(
        RecordingTransport::new()
            .reply("getAddresses", json!({"addresses": ["dnx1a"]}))
            .reply("getSpendKeys", json!({"spendPublicKey": "pub", "spendSecretKey": "sec"}))
            .reply("getMnemonicSeed", json!({"mnemonicSeed": "word word"}))
            .reply("createIntegratedAddress", json!({"integratedAddress": "dnxI1"}))
            .reply(
                "validateAddress",
                json!({"address": "dnx1a", "isvalid": true, "spendPublicKey": "p", "viewPublicKey": "v"}),
            ),
    );

    assert_eq!(client.get_addresses().await.expect("addresses"), ["dnx1a"]);
    assert_eq!(client.get_spend_keys("dnx1a").await.expect("keys").spend_secret_key, "sec");
    assert_eq!(client.get_mnemonic_seed("dnx1a").await.expect("seed"), "word word");
    assert_eq!(
        client.create_integrated_address("dnx1a", "pid").await.expect("integrated"),
        "dnxI1"
    );
    assert!(client.validate_address("dnx1a").await.expect("validate").isvalid);
    client.delete_address("dnx1a").await.expect("delete");

    let calls = transport.calls();
    assert_eq!(calls[0].1.len(), 0);
    assert_eq!(calls[3].1["paymentId"], json!("pid"));
    assert_eq!(calls[5].0, "deleteAddress");
    assert_eq!(calls[5].1["address"], json!("dnx1a"));
}

#[tokio::test]
async fn empty_address_list_is_still_sent() {
    let (client, transport) = wallet(
        RecordingTransport::new()
            .reply("getUnconfirmedTransactionHashes", json!({"transactionHashes": [HASH]})),
    );

    let hashes = client.get_unconfirmed_transaction_hashes(&[]).await.expect("hashes");

    assert_eq!(hashes, [HASH]);
    assert_eq!(transport.single_call("getUnconfirmedTransactionHashes"), json!({"addresses": []}));
}

#[tokio::test]
async fn block_hashes() {
    let (client, transport) =
        wallet(RecordingTransport::new().reply("getBlockHashes", json!({"blockHashes": ["b1"]})));

    assert_eq!(client.get_block_hashes(100, 1).await.expect("block hashes"), ["b1"]);
    assert_eq!(
        transport.single_call("getBlockHashes"),
        json!({"firstBlockIndex": 100, "blockCount": 1})
    );
}

#[tokio::test]
async fn get_transaction_unwraps_record() {
    let (client, transport) = wallet(RecordingTransport::new().reply(
        "getTransaction",
        json!({"transaction": {
            "transactionHash": HASH,
            "blockIndex": 7,
            "timestamp": 1700000000,
            "isBase": false,
            "unlockTime": 0,
            "amount": 500,
            "fee": 5000000,
            "extra": "",
            "paymentId": "",
            "state": 0,
            "transfers": [{"address": "dnx1a", "amount": 500, "type": 0}]
        }}),
    ));

    let record = client.get_transaction(HASH).await.expect("transaction");

    assert_eq!(record.transaction_hash, HASH);
    assert_eq!(record.block_index, 7);
    assert_eq!(record.transfers[0].address, "dnx1a");
    assert_eq!(transport.single_call("getTransaction"), json!({"transactionHash": HASH}));
}

#[tokio::test]
async fn get_transaction_hashes_by_filter() {
    let (client, transport) = wallet(RecordingTransport::new().reply(
        "getTransactionHashes",
        json!({"items": [{"blockHash": "b1", "transactionHashes": [HASH]}]}),
    ));

    let filter = TransactionFilter::new(BlockRange::FromIndex(10), 3)
        .with_addresses(vec!["dnx1a".to_string()]);
    let items = client.get_transaction_hashes(&filter).await.expect("hashes");

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].transaction_hashes, [HASH]);
    assert_eq!(
        transport.single_call("getTransactionHashes"),
        json!({"addresses": ["dnx1a"], "firstBlockIndex": 10, "blockCount": 3})
    );
}

#[tokio::test]
async fn get_transactions_by_block_hash() {
    let (client, transport) = wallet(
        RecordingTransport::new()
            .reply("getTransactions", json!({"items": [{"blockHash": "b1", "transactions": []}]})),
    );

    let filter =
        TransactionFilter::new(BlockRange::FromHash("b1".to_string()), 1).with_payment_id("pid");
    let items = client.get_transactions(&filter).await.expect("transactions");

    assert_eq!(items[0].block_hash, "b1");
    assert!(items[0].transactions.is_empty());
    assert_eq!(
        transport.single_call("getTransactions"),
        json!({"addresses": [], "blockHash": "b1", "blockCount": 1, "paymentId": "pid"})
    );
}

#[tokio::test]
async fn send_transaction_with_payment_id() {
    let (client, transport) = wallet(
        RecordingTransport::new().reply("sendTransaction", json!({"transactionHash": HASH})),
    );

    let params =
        TransactionParams::new(vec![Transfer::new("dnx1dest", 500)]).with_payment_id("pid");
    let hash = client.send_transaction(params).await.expect("send");

    assert_eq!(hash, HASH);
    assert_eq!(
        transport.single_call("sendTransaction"),
        json!({
            "transfers": [{"address": "dnx1dest", "amount": 500}],
            "anonymity": DEFAULT_ANONYMITY,
            "fee": DEFAULT_FEE,
            "unlockTime": 0,
            "paymentId": "pid"
        })
    );
}

#[tokio::test]
async fn send_transaction_hex_encodes_extra() {
    let (client, transport) = wallet(
        RecordingTransport::new().reply("sendTransaction", json!({"transactionHash": HASH})),
    );

    let params = TransactionParams::new(vec![Transfer::new("dnx1dest", 1)])
        .with_extra(b"hi".to_vec())
        .with_source_addresses(vec!["dnx1src".to_string()]);
    client.send_transaction(params).await.expect("send");

    let sent = transport.single_call("sendTransaction");
    assert_eq!(sent["extra"], json!("6869"));
    assert_eq!(sent["sourceAddresses"], json!(["dnx1src"]));
    assert!(sent.get("paymentId").is_none());
}

#[tokio::test]
async fn conflicting_payment_id_and_extra_never_reach_the_daemon() {
    let (client, transport) = wallet(RecordingTransport::new());
    let params = TransactionParams::new(vec![Transfer::new("dnx1dest", 1)])
        .with_payment_id("pid")
        .with_extra(vec![1u8, 2, 3]);

    match client.send_transaction(params.clone()).await {
        Err(TransportError::Validation(_)) => {}
        other => panic!("expected Validation error, got {:?}", other),
    }
    match client.create_delayed_transaction(params).await {
        Err(TransportError::Validation(_)) => {}
        other => panic!("expected Validation error, got {:?}", other),
    }
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn delayed_transaction_lifecycle() {
    let (client, transport) = wallet(
        RecordingTransport::new()
            .reply("createDelayedTransaction", json!({"transactionHash": HASH}))
            .reply("getDelayedTransactionHashes", json!({"transactionHashes": [HASH]})),
    );

    let params = TransactionParams::new(vec![Transfer::new("dnx1dest", 1)])
        .with_source_addresses(vec!["dnx1src".to_string()]);
    let hash = client.create_delayed_transaction(params).await.expect("create delayed");
    assert_eq!(client.get_delayed_transaction_hashes().await.expect("pending"), [hash.clone()]);
    client.send_delayed_transaction(&hash).await.expect("send delayed");
    client.delete_delayed_transaction(&hash).await.expect("delete delayed");

    let calls = transport.calls();
    assert_eq!(calls[0].1["addresses"], json!(["dnx1src"]));
    assert!(!calls[0].1.contains_key("sourceAddresses"));
    assert_eq!(calls[2].0, "sendDelayedTransaction");
    assert_eq!(calls[2].1["transactionHash"], json!(HASH));
    assert_eq!(calls[3].0, "deleteDelayedTransaction");
}

#[tokio::test]
async fn fusion() {
    let (client, transport) = wallet(
        RecordingTransport::new()
            .reply("estimateFusion", json!({"fusionReadyCount": 4, "totalOutputCount": 9}))
            .reply("sendFusionTransaction", json!({"transactionHash": HASH})),
    );

    let estimate = client.estimate_fusion(1000, &[]).await.expect("estimate");
    assert_eq!(estimate.fusion_ready_count, 4);
    assert_eq!(estimate.total_output_count, 9);

    let hash = client
        .send_fusion_transaction(&FusionParams {
            threshold: 1000,
            anonymity: 3,
            addresses: vec!["dnx1a".to_string()],
            destination_address: "dnx1a".to_string(),
        })
        .await
        .expect("fusion");
    assert_eq!(hash, HASH);

    let calls = transport.calls();
    assert_eq!(calls[0].1["addresses"], json!([]));
    assert_eq!(calls[0].1["threshold"], json!(1000));
    assert_eq!(
        serde_json::Value::Object(calls[1].1.clone()),
        json!({"threshold": 1000, "anonymity": 3, "addresses": ["dnx1a"], "destinationAddress": "dnx1a"})
    );
}

#[tokio::test]
async fn unexpected_result_shape_is_malformed() {
    let (client, _) = wallet(RecordingTransport::new().reply("getBalance", json!("not a balance")));

    match client.get_balance(None).await {
        Err(TransportError::MalformedResponse(msg)) => assert!(msg.contains("getBalance")),
        other => panic!("expected MalformedResponse, got {:?}", other),
    }
}

#[tokio::test]
async fn clones_share_one_transport() {
    let (client, transport) = wallet(RecordingTransport::new());
    let clone = client.clone();

    client.save().await.expect("save");
    clone.save().await.expect("save from clone");

    assert_eq!(transport.calls().len(), 2);
    assert_eq!(clone.transport().endpoint(), "memory://walletd");
}
