use anchor_client::solana_sdk::pubkey::Pubkey;
use anyhow::Result;
use chrono::NaiveDateTime;
use console::style;
pub use indicatif::{ProgressBar, ProgressStyle};

use crate::{candy_machine::MachineConfig, errors::SetupError};

pub fn spinner_with_style() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(120);
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&[
                "▹▹▹▹▹",
                "▸▹▹▹▹",
                "▹▸▹▹▹",
                "▹▹▸▹▹",
                "▹▹▹▸▹",
                "▹▹▹▹▸",
                "▪▪▪▪▪",
            ])
            .template("{spinner:.dim} {msg}"),
    );
    pb
}

pub fn print_with_style(indent: &str, key: &str, value: String) {
    println!(
        " {} {}",
        style(format!("{}:.. {}:", indent, key)).dim(),
        value
    );
}

/// Step header, e.g. `[1/3] 🍬 Loading candy machine`.
pub fn print_step(step: usize, total: usize, emoji: impl std::fmt::Display, message: &str) {
    println!(
        "{} {}{}",
        style(format!("[{}/{}]", step, total)).bold().dim(),
        emoji,
        message
    );
}

pub fn format_timestamp(timestamp: i64) -> String {
    match NaiveDateTime::from_timestamp_opt(timestamp, 0) {
        Some(date) => date.format("%a %B %e %Y %H:%M:%S UTC").to_string(),
        None => timestamp.to_string(),
    }
}

pub fn assert_correct_authority(
    authority: &Pubkey,
    candy_machine: &Pubkey,
    machine: &MachineConfig,
) -> Result<()> {
    if machine.authority != *authority {
        return Err(SetupError::AuthorityMismatch(authority.to_string(), candy_machine.to_string()).into());
    }

    Ok(())
}
