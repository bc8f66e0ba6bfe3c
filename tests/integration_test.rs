use lottery_draw::clients::{ActorClient, LotteryClient};
use lottery_draw::config::{ConfigError, LotteryConfig};
use lottery_draw::cues::TracingCues;
use lottery_draw::driver::{LotteryError, PickOutcome};
use lottery_draw::lifecycle::LotterySystem;
use lottery_draw::model::{DrawPhase, Entry, EntryId, Notice};
use lottery_draw::pool::PoolStore;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn config() -> LotteryConfig {
    LotteryConfig {
        seed: Some(99),
        default_entries: Vec::new(),
        ..LotteryConfig::default()
    }
}

/// "A", "B", ... "Z", then "A1", "B1", ...
fn lettered_id(n: u32) -> EntryId {
    let letter = char::from(b'A' + (n % 26) as u8);
    match n / 26 {
        0 => EntryId::new(letter.to_string()),
        round => EntryId::new(format!("{letter}{round}")),
    }
}

/// A session whose entry ids are "A", "B", "C", ... in upload order.
fn lettered_system() -> LotterySystem {
    let counter = Arc::new(AtomicU32::new(0));
    let pool = PoolStore::with_id_generator(move || lettered_id(counter.fetch_add(1, Ordering::SeqCst)));
    LotterySystem::with_parts(&config(), pool, Arc::new(TracingCues)).expect("Invalid test config")
}

async fn upload(client: &LotteryClient, count: usize) -> Vec<Entry> {
    client
        .upload((0..count).map(|i| format!("blob:{i}")))
        .await
        .expect("Failed to upload")
}

fn ids(entries: &[Entry]) -> Vec<&str> {
    entries.iter().map(|e| e.id.as_str()).collect()
}

async fn assert_partition(client: &LotteryClient) {
    let entries = client.entries().await.unwrap();
    let available = client.available().await.unwrap();
    let snapshot = client.snapshot().await.unwrap();
    assert_eq!(available.len() + snapshot.selected_len, entries.len());
    assert!(available.iter().all(|e| entries.contains(e)));
}

/// Pool [A..E]; pick; three distinct winners from the pool, two left.
#[tokio::test(start_paused = true)]
async fn test_pick_from_five() {
    let system = lettered_system();
    let pool = upload(&system.client, 5).await;

    let PickOutcome::Settled(winners) = system.client.pick().await.expect("Pick failed") else {
        panic!("expected a settle");
    };

    let distinct: HashSet<_> = winners.iter().map(|e| e.id.clone()).collect();
    assert_eq!(distinct.len(), 3);
    assert!(winners.iter().all(|w| pool.contains(w)));
    assert_eq!(system.client.available().await.unwrap().len(), 2);
    assert_partition(&system.client).await;

    system.shutdown().await.expect("Failed to shutdown");
}

/// Pool [A,B]; pick is rejected and nothing changes.
#[tokio::test(start_paused = true)]
async fn test_pick_from_two_is_rejected() {
    let system = lettered_system();
    upload(&system.client, 2).await;

    let err = system.client.pick().await.unwrap_err();

    assert_eq!(
        err,
        LotteryError::InsufficientPool {
            available: 2,
            required: 3
        }
    );
    assert_eq!(err.notice(), Some(Notice::InsufficientPool));
    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.phase, DrawPhase::Previewing);
    assert_eq!(snapshot.pool_len, 2);
    assert_eq!(snapshot.selected_len, 0);
    assert_eq!(snapshot.notice, Some(Notice::InsufficientPool));

    system.shutdown().await.unwrap();
}

/// Pool [A,B,C]; pick takes everything; pick again reports depletion.
#[tokio::test(start_paused = true)]
async fn test_depleted_pool_after_full_draw() {
    let system = lettered_system();
    upload(&system.client, 3).await;

    system.client.pick().await.unwrap();
    assert!(system.client.available().await.unwrap().is_empty());

    let err = system.client.pick().await.unwrap_err();
    assert_eq!(err.notice(), Some(Notice::PoolDepleted));
    assert_eq!(
        err.notice().unwrap().message(),
        "Data pool depleted. Reset required."
    );
    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.phase, DrawPhase::Settled);
    assert!(!snapshot.can_pick_again);

    system.shutdown().await.unwrap();
}

/// Pool [A,B,C,D]; pick; reset; every entry is available again.
#[tokio::test(start_paused = true)]
async fn test_reset_restores_pool() {
    let system = lettered_system();
    upload(&system.client, 4).await;

    system.client.pick().await.unwrap();
    system.client.reset().await.unwrap();

    let available = system.client.available().await.unwrap();
    assert_eq!(ids(&available), vec!["A", "B", "C", "D"]);
    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.phase, DrawPhase::Previewing);
    assert_eq!(snapshot.notice, None);

    system.shutdown().await.unwrap();
}

/// Pool [A,B,C]; B removed before any pick; pick is rejected.
#[tokio::test(start_paused = true)]
async fn test_removal_shrinks_pool_below_draw_size() {
    let system = lettered_system();
    upload(&system.client, 3).await;

    assert!(system.client.remove(EntryId::from("B")).await.unwrap());
    assert!(!system.client.remove(EntryId::from("B")).await.unwrap());

    let available = system.client.available().await.unwrap();
    assert_eq!(ids(&available), vec!["A", "C"]);
    assert!(system.client.pick().await.is_err());

    system.shutdown().await.unwrap();
}

/// Removing a winner prunes it from the selection.
#[tokio::test(start_paused = true)]
async fn test_removing_a_winner_keeps_partition() {
    let system = lettered_system();
    upload(&system.client, 6).await;

    let PickOutcome::Settled(winners) = system.client.pick().await.unwrap() else {
        panic!("expected a settle");
    };
    system.client.remove(winners[0].id.clone()).await.unwrap();

    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.pool_len, 5);
    assert_eq!(snapshot.selected_len, 2);
    assert_partition(&system.client).await;

    system.shutdown().await.unwrap();
}

/// The default pool is uploaded on start.
#[tokio::test(start_paused = true)]
async fn test_start_seeds_default_entries() {
    let config = LotteryConfig {
        seed: Some(1),
        ..LotteryConfig::default()
    };
    let system = LotterySystem::start(&config).await.expect("Failed to start");

    let entries = system.client.entries().await.unwrap();
    assert_eq!(entries.len(), 10);
    assert_eq!(entries[0].resource_ref, "https://picsum.photos/400/500?random=1");
    let unique: HashSet<_> = entries.iter().map(|e| e.id.clone()).collect();
    assert_eq!(unique.len(), 10);

    system.shutdown().await.unwrap();
}

/// Draws across several rounds never repeat an entry until reset.
#[tokio::test(start_paused = true)]
async fn test_rounds_never_repeat_until_reset() {
    let system = lettered_system();
    upload(&system.client, 9).await;
    let mut snapshots = system.client.subscribe();
    let mut seen = HashSet::new();

    let PickOutcome::Settled(first) = system.client.pick().await.unwrap() else {
        panic!("expected a settle");
    };
    seen.extend(first.into_iter().map(|e| e.id));

    for _ in 0..2 {
        assert_eq!(system.client.pick().await.unwrap(), PickOutcome::Respinning);
        let settled = snapshots
            .wait_for(|s| s.phase == DrawPhase::Settled)
            .await
            .unwrap()
            .clone();
        for entry in settled.shown() {
            assert!(seen.insert(entry.id.clone()), "{} drawn twice", entry.id);
        }
    }

    assert_eq!(seen.len(), 9);
    assert!(system.client.available().await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

/// Ids stay unique once the alphabet wraps.
#[tokio::test(start_paused = true)]
async fn test_large_upload_mints_unique_ids() {
    let system = lettered_system();
    let created = upload(&system.client, 60).await;

    let unique: HashSet<_> = created.iter().map(|e| e.id.clone()).collect();
    assert_eq!(unique.len(), 60);
    assert_eq!(created[25].id.as_str(), "Z");
    assert_eq!(created[26].id.as_str(), "A1");
    assert_eq!(created[59].id.as_str(), "H2");

    system.shutdown().await.unwrap();
}

/// Zero timings are refused up front instead of killing the session task.
#[tokio::test]
async fn test_invalid_config_is_rejected_at_startup() {
    let zero_tick = LotteryConfig {
        tick_interval: Duration::ZERO,
        ..config()
    };
    let zero_capacity = LotteryConfig {
        channel_capacity: 0,
        ..config()
    };

    assert_eq!(
        LotterySystem::new(&zero_tick).err(),
        Some(ConfigError::Zero {
            name: "LOTTERY_TICK_MS"
        })
    );
    assert_eq!(
        LotterySystem::with_parts(&zero_capacity, PoolStore::new(), Arc::new(TracingCues)).err(),
        Some(ConfigError::Zero {
            name: "LOTTERY_CHANNEL_CAPACITY"
        })
    );

    let err = LotterySystem::start(&zero_tick).await.err();
    assert_eq!(
        err,
        Some(LotteryError::Config(ConfigError::Zero {
            name: "LOTTERY_TICK_MS"
        }))
    );
    assert_eq!(err.and_then(|e| e.notice()), None);
}
