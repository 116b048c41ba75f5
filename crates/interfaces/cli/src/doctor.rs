use anyhow::Result;

use moodjournal_config::AppConfig;
use moodjournal_sentiment::{
    RemoteSentimentClient, SentimentAnalyzer, SentimentInput, SentimentSource, SourceError,
};

const PROBE_TEXT: &str = "今日はとても楽しい一日でした！";

/// Reference entries with the sign their composite score should have.
const REFERENCE_CASES: &[(&str, &str, i32, &str)] = &[
    ("今日は最高の一日でした！", "😊,😄", 5, "positive"),
    ("疲れたし、最悪の一日だった", "😢,😞", 1, "negative"),
    ("普通の一日でした", "😐", 3, "neutral"),
];

pub(crate) async fn run_doctor(config: &AppConfig) -> Result<()> {
    println!("moodjournal doctor");
    println!("- language: {}", config.journal.language);
    println!("- remote enabled: {}", config.remote.enabled);
    println!("- remote endpoint: {}", config.remote.endpoint);
    println!(
        "- api key: {}",
        if config.remote.api_key.trim().is_empty() { "missing" } else { "set" }
    );

    check_remote(config).await;

    println!();
    println!("── reference entries ────────────────────────────────");
    let analyzer = SentimentAnalyzer::from_config(config);
    for (text, emojis, mood, expected) in REFERENCE_CASES {
        let analysis = analyzer
            .analyze_detailed(&SentimentInput::new(*text, emojis, *mood))
            .await;
        println!(
            "  [{expected:<8}] score {:+.3}  magnitude {:.3}  ({})  {text}",
            analysis.result.score,
            analysis.result.magnitude,
            analysis.source.as_str(),
        );
    }

    Ok(())
}

async fn check_remote(config: &AppConfig) {
    let client = match RemoteSentimentClient::from_config(&config.remote, &config.journal.language) {
        Ok(client) => client,
        Err(SourceError::NotConfigured) => {
            println!("✗ remote analyzer not configured; entries are scored locally");
            println!("  set GOOGLE_API_KEY or [remote].api_key to enable it");
            return;
        }
        Err(error) => {
            println!("✗ remote client could not be built: {error}");
            return;
        }
    };

    let timeout = config.remote.timeout();
    println!("- probe: {PROBE_TEXT}");
    match tokio::time::timeout(timeout, client.analyze(PROBE_TEXT)).await {
        Ok(Ok(result)) => {
            println!("✓ remote analyzer is answering");
            println!("  score {:+.3}  magnitude {:.3}", result.score, result.magnitude);
        }
        Ok(Err(error)) => println!("✗ remote analyzer error: {error}"),
        Err(_) => println!("✗ remote analyzer timed out after {timeout:?}"),
    }
}
