//! Integration tests for `ChainVerifier` on Tokio's paused clock.

use std::time::Duration;

use medblock_chain::{Block, ChainConfig, ChainVerifier};
use medblock_clock::TokioDelay;
use tokio::time::Instant;

fn chain() -> Vec<Block> {
    vec![
        Block::new(0, "Genesis"),
        Block::new(1, "Lab results"),
        Block::new(2, "Prescription"),
        Block::new(3, "Imaging"),
    ]
}

#[tokio::test(start_paused = true)]
async fn test_verify_block_takes_single_block_delay() {
    let verifier = ChainVerifier::new(TokioDelay, ChainConfig::default());
    let start = Instant::now();

    let report = verifier.verify_block(&Block::new(1, "Lab results")).await;

    assert!(report.verified);
    assert_eq!(start.elapsed(), Duration::from_millis(1500));
}

#[tokio::test(start_paused = true)]
async fn test_verify_all_takes_n_times_per_block_delay() {
    let verifier = ChainVerifier::new(TokioDelay, ChainConfig::default());
    let start = Instant::now();

    let reports = verifier.verify_all(&chain()).await.unwrap();

    assert_eq!(reports.len(), 4);
    assert_eq!(start.elapsed(), Duration::from_millis(4 * 800));
}

#[tokio::test(start_paused = true)]
async fn test_verify_all_reports_in_chain_order() {
    let verifier = ChainVerifier::new(TokioDelay, ChainConfig::default());

    let reports = verifier.verify_all(&chain()).await.unwrap();

    let indices: Vec<u64> = reports.iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
    assert!(reports.iter().all(|r| r.verified));
}

#[tokio::test(start_paused = true)]
async fn test_verify_all_is_sequential() {
    // Halfway through the third block, only two could have finished; a
    // parallel implementation would already be done.
    let verifier = ChainVerifier::new(TokioDelay, ChainConfig::default());

    let partial = tokio::time::timeout(
        Duration::from_millis(2 * 800 + 400),
        verifier.verify_all(&chain()),
    )
    .await;

    assert!(partial.is_err(), "bulk verification finished too early");
}

#[tokio::test(start_paused = true)]
async fn test_custom_delays_are_honored() {
    let verifier = ChainVerifier::new(
        TokioDelay,
        ChainConfig {
            single_block_delay_ms: 10,
            per_block_delay_ms: 5,
            ..ChainConfig::default()
        },
    );
    let start = Instant::now();

    verifier.verify_block(&Block::new(0, "Genesis")).await;
    verifier.verify_all(&chain()).await.unwrap();

    assert_eq!(start.elapsed(), Duration::from_millis(10 + 4 * 5));
}
