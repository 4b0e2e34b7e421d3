use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{register_commands, CommandHandler, MyDialogue};
use crate::di::ServiceContainer;

pub struct HelpCommand;

/// Renders the command list as "/name - description" lines.
pub fn help_text(cluster: &str) -> String {
    let commands: Vec<String> = register_commands()
        .iter()
        .map(|(name, description)| format!("/{} - {}", name, description))
        .collect();

    format!(
        "Available commands:\n{}\n\nAmounts: \"2.5\" sends USDC, \"0.1 SOL\" sends SOL.\nNetwork: {}",
        commands.join("\n"),
        cluster
    )
}

impl CommandHandler for HelpCommand {
    fn command_name() -> &'static str {
        "help"
    }

    fn description() -> &'static str {
        "display this help message"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        _telegram_id: i64,
        _dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        let text = help_text(&services.config().explorer_cluster);
        bot.send_message(msg.chat.id, text).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_commands_and_network() {
        let text = help_text("devnet");

        assert!(text.contains("/request_sol - "));
        assert!(text.contains("/history - "));
        assert!(text.ends_with("Network: devnet"));
    }
}
