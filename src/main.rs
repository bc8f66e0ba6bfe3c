//! Demo session: spin, pick, pick again, reset.
//!
//! Prints every settled snapshot as JSON so the output can be piped into a
//! renderer.

use lottery_draw::config::LotteryConfig;
use lottery_draw::driver::PickOutcome;
use lottery_draw::lifecycle::{setup_tracing, LotterySystem};
use lottery_draw::model::{DrawPhase, SessionSnapshot};
use tokio::sync::watch;
use tracing::{error, info, warn, Instrument};

fn print_snapshot(snapshot: &SessionSnapshot) -> Result<(), String> {
    let json = serde_json::to_string_pretty(snapshot).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

async fn wait_for_settle(snapshots: &mut watch::Receiver<SessionSnapshot>) -> Result<SessionSnapshot, String> {
    let snapshot = snapshots
        .wait_for(|s| s.phase == DrawPhase::Settled)
        .await
        .map_err(|e| e.to_string())?;
    Ok(snapshot.clone())
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = LotteryConfig::from_env().map_err(|e| e.to_string())?;
    info!(
        tick_ms = config.tick_interval.as_millis() as u64,
        respin_ms = config.respin_delay.as_millis() as u64,
        defaults = config.default_entries.len(),
        "Starting lottery session"
    );

    let system = LotterySystem::start(&config)
        .await
        .map_err(|e| e.to_string())?;
    let mut snapshots = system.client.subscribe();

    // Let the machine spin for a moment
    tokio::time::sleep(config.tick_interval * 10).await;

    let span = tracing::info_span!("first_pick");
    let first = async { system.client.pick().await }.instrument(span).await;
    match first {
        Ok(PickOutcome::Settled(_)) => print_snapshot(&snapshots.borrow_and_update())?,
        Ok(PickOutcome::Respinning) => warn!("Unexpected re-spin on first pick"),
        Err(e) => {
            let notice = e.notice().map(|n| n.message()).unwrap_or("unavailable");
            error!(error = %e, notice, "First pick rejected");
        }
    }

    // Pick again until the pool runs dry
    loop {
        let span = tracing::info_span!("pick_again");
        match async { system.client.pick().await }.instrument(span).await {
            Ok(PickOutcome::Respinning) => {
                let settled = wait_for_settle(&mut snapshots).await?;
                print_snapshot(&settled)?;
            }
            Ok(PickOutcome::Settled(_)) => print_snapshot(&snapshots.borrow_and_update())?,
            Err(e) => {
                let notice = e.notice().map(|n| n.message()).unwrap_or("unavailable");
                info!(notice, "Pick again rejected");
                break;
            }
        }
    }

    system.client.reset().await.map_err(|e| e.to_string())?;
    info!(
        available = snapshots.borrow().available_len,
        "Pool restored"
    );

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
