use clap::Parser;
use client::WalletClient;
use serde_json::json;
use walletd_cli::{run, Cli, CliError, Command, HexBytes};
use walletd_harness::{canned_walletd, MockDaemon, Reply};

fn command(line: &str) -> Command {
    Cli::try_parse_from(std::iter::once("walletd-cli").chain(line.split_whitespace()))
        .expect("arguments parse")
        .command
}

#[tokio::test]
async fn balance_prints_daemon_fields() {
    let daemon = MockDaemon::start(canned_walletd).await.expect("daemon");
    let client = WalletClient::connect(daemon.endpoint());

    let value = run(&client, &command("balance")).await.expect("balance");

    assert_eq!(value, json!({"availableBalance": 10000000000u64, "lockedAmount": 0}));
}

#[tokio::test]
async fn send_uses_cli_overrides() {
    let daemon = MockDaemon::start(canned_walletd).await.expect("daemon");
    let client = WalletClient::connect(daemon.endpoint());

    let value = run(&client, &command("send dnx1dest 700 --payment-id pid --fee 1"))
        .await
        .expect("send");

    assert!(value["transactionHash"].is_string());
    let params = daemon.requests()[0].params().cloned().expect("params");
    assert_eq!(params["paymentId"], json!("pid"));
    assert_eq!(params["fee"], json!(1));
    assert_eq!(params["anonymity"], json!(3));
    assert_eq!(params["transfers"], json!([{"address": "dnx1dest", "amount": 700}]));
}

#[tokio::test]
async fn extra_flag_is_sent_as_hex() {
    let daemon = MockDaemon::start(canned_walletd).await.expect("daemon");
    let client = WalletClient::connect(daemon.endpoint());

    run(&client, &command("send dnx1dest 700 --extra 01ff")).await.expect("send");

    let params = daemon.requests()[0].params().cloned().expect("params");
    assert_eq!(params["extra"], json!("01ff"));
    assert!(params.get("paymentId").is_none());
}

#[tokio::test]
async fn conflicting_send_options_fail_locally() {
    let daemon = MockDaemon::start(canned_walletd).await.expect("daemon");
    let client = WalletClient::connect(daemon.endpoint());

    let send = Command::Send {
        address: "dnx1dest".to_string(),
        amount: 700,
        payment_id: Some("pid".to_string()),
        extra: Some(HexBytes(vec![1])),
        fee: None,
        anonymity: None,
    };
    let err = run(&client, &send).await.expect_err("payment id and extra together");

    assert!(matches!(err, CliError::Wallet(ref e) if e.is_validation()));
    assert!(daemon.requests().is_empty());
}

#[tokio::test]
async fn daemon_error_is_reported() {
    let daemon =
        MockDaemon::replying(Reply::error(-32000, "Wrong address")).await.expect("daemon");
    let client = WalletClient::connect(daemon.endpoint());

    let err = run(&client, &command("delete-address dnx1gone")).await.expect_err("daemon error");

    assert!(err.to_string().contains("Wrong address"));
}
