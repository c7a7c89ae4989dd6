use eyre::Context;
use serde::Serialize;
use std::io::IsTerminal;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use youtube_aggregator::{
    Aggregator, ClientConfig, ReplyProgress, TraverseOptions, YouTubeClient, cancellation,
    parse_video_id,
};

const USAGE: &str = "\
usage: youtube-aggregator <command> [args]

commands:
  comments <video url or id>        every comment and reply on a video
  playlist <playlist id>            every video in a playlist
  uploads <channel id>              every video a channel has uploaded
  videos <video id>...              look up videos by id
  channel-id <@handle or username>  resolve a channel id
  playlist-id <channel id> <name>   resolve a playlist id by its title

environment:
  YOUTUBE_API_KEY         API key used for every request (required)
  YOUTUBE_API_BASE_URL    override the API endpoint root
  YOUTUBE_REPLY_PROGRESS  set to `cumulative` to count replies in progress output
  RUST_LOG                log filter (default: info)";

fn print_json(value: &impl Serialize) -> eyre::Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize result")?;
    println!("{json}");
    Ok(())
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, args)) = args.split_first() else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    let api_key = std::env::var("YOUTUBE_API_KEY").context("read YOUTUBE_API_KEY")?;
    let mut config = ClientConfig::new(api_key);
    if let Ok(base_url) = std::env::var("YOUTUBE_API_BASE_URL") {
        config = config.base_url(base_url);
    }
    let reply_progress = match std::env::var("YOUTUBE_REPLY_PROGRESS").as_deref() {
        Ok("cumulative") => ReplyProgress::Cumulative,
        _ => ReplyProgress::TopLevel,
    };
    let aggregator = Aggregator::new(YouTubeClient::new(config));

    let (handle, token) = cancellation();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, stopping after the current page");
            handle.cancel();
        }
    });

    let progress = |count: usize| eprintln!("fetched {count}");
    let options = TraverseOptions::default()
        .progress(&progress)
        .cancel(&token)
        .reply_progress(reply_progress);

    match (command.as_str(), args) {
        ("comments", [target]) => {
            let video_id = parse_video_id(target).unwrap_or_else(|| target.clone());
            let comments = aggregator
                .comments(&video_id, &options)
                .await
                .with_context(|| format!("fetch comments of {video_id}"))?;
            print_json(&comments)
        }
        ("playlist", [playlist_id]) => {
            let videos = aggregator
                .playlist_videos(playlist_id, &options)
                .await
                .with_context(|| format!("fetch playlist {playlist_id}"))?;
            print_json(&videos)
        }
        ("uploads", [channel_id]) => {
            let videos = aggregator
                .channel_uploads(channel_id, &options)
                .await
                .with_context(|| format!("fetch uploads of {channel_id}"))?;
            print_json(&videos)
        }
        ("videos", ids) if !ids.is_empty() => {
            let ids: Vec<String> = ids
                .iter()
                .map(|id| parse_video_id(id).unwrap_or_else(|| id.clone()))
                .collect();
            let videos = aggregator
                .videos(&ids, &options)
                .await
                .context("look up videos")?;
            print_json(&videos)
        }
        ("channel-id", [name]) => {
            let channel_id = aggregator.channel_id(name).await?;
            println!("{channel_id}");
            Ok(())
        }
        ("playlist-id", [channel_id, name]) => {
            let playlist_id = aggregator.playlist_id(channel_id, name).await?;
            println!("{playlist_id}");
            Ok(())
        }
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }
}
