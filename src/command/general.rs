// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! General commands: `help`, `status` and `stop`.

use crate::mode::{Channel, ColorMode};
use crate::scheduler::DriverStatus;
use crate::types::LcdText;

use super::registry::print_fallback;
use super::{Arity, CommandContext, CommandNode};

/// Returns the general commands.
pub fn commands() -> Vec<CommandNode> {
    vec![
        CommandNode::builder("help")
            .args("[command...]")
            .description("List commands, or show help for one command")
            .handler(help)
            .build(),
        CommandNode::builder("status")
            .arity(Arity::Exact(0))
            .description("Show the active modes and current outputs")
            .handler(status)
            .build(),
        CommandNode::builder("stop")
            .arity(Arity::Exact(0))
            .description("Save state and exit")
            .handler(stop)
            .build(),
    ]
}

fn help(ctx: &mut CommandContext<'_>, args: &[String]) -> bool {
    let registry = ctx.registry();

    if args.is_empty() {
        ctx.say("Commands:");
        for command in registry.commands() {
            ctx.say(format!("  {}", command.summary()));
        }
        return true;
    }

    match registry.resolve(args) {
        Ok(resolved) => {
            let path = resolved.path();
            if resolved.command.has_children() {
                ctx.say(resolved.command.summary());
            }
            print_fallback(ctx, resolved.command, &path);
        }
        Err(_) => ctx.say(format!("No command named '{}'.", args[0])),
    }
    true
}

fn describe_driver(status: DriverStatus) -> String {
    match status {
        DriverStatus::Stopped => "stopped".to_string(),
        DriverStatus::Running { period } => format!("every {} ms", period.as_millis()),
    }
}

fn status(ctx: &mut CommandContext<'_>, _args: &[String]) -> bool {
    let (case_mode, lcd_mode, fade_len, fade_ticks, outputs) = ctx.state().read(|state| {
        (
            state.case_mode().name(),
            state.lcd_mode().name(),
            state.fade_colors().len(),
            state.fade_ticks(),
            state.outputs().clone(),
        )
    });
    let scheduler = ctx.scheduler();
    let case_driver = describe_driver(scheduler.status(Channel::Case));
    let lcd_driver = describe_driver(scheduler.status(Channel::Lcd));

    ctx.say(format!("Case mode: {case_mode} ({case_driver})"));
    ctx.say(format!("Case color: {}", outputs.case_color));
    ctx.say(format!("Fade: {fade_len} colors, {fade_ticks} ticks"));
    ctx.say(format!("LCD mode: {lcd_mode} ({lcd_driver})"));
    ctx.say(format!("LCD color: {}", outputs.lcd_color));
    let border = format!("+{}+", "-".repeat(LcdText::WIDTH));
    ctx.say(border.clone());
    for row in outputs.lcd_text.rows() {
        ctx.say(format!("|{row:<width$}|", width = LcdText::WIDTH));
    }
    ctx.say(border);
    true
}

fn stop(ctx: &mut CommandContext<'_>, _args: &[String]) -> bool {
    ctx.request_stop();
    ctx.say("Stopping.");
    true
}

#[cfg(test)]
mod tests {
    use crate::command::{CommandContext, default_registry};
    use crate::scheduler::ModeScheduler;
    use crate::state::SharedState;

    #[tokio::test]
    async fn help_lists_every_command() {
        let registry = default_registry();
        let state = SharedState::default();
        let scheduler = ModeScheduler::new(state.clone());
        let mut ctx = CommandContext::new(&registry, &state, &scheduler);

        ctx.execute("help").unwrap();
        let output = ctx.take_output();
        assert_eq!(output[0], "Commands:");
        assert_eq!(output.len(), 1 + registry.commands().count());
        assert!(output.contains(&"  casemode <off|static|fade> - Set the case LED mode".to_string()));
    }

    #[tokio::test]
    async fn help_for_nested_command() {
        let registry = default_registry();
        let state = SharedState::default();
        let scheduler = ModeScheduler::new(state.clone());
        let mut ctx = CommandContext::new(&registry, &state, &scheduler);

        ctx.execute("help fade remove").unwrap();
        assert_eq!(
            ctx.take_output(),
            ["Usage: fade remove <index>", "  Remove the fade color at an index"]
        );

        ctx.execute("help lcd").unwrap();
        let output = ctx.take_output();
        assert_eq!(output[0], "lcd - Control the LCD");
        assert_eq!(output[1], "Available subcommands:");

        ctx.execute("help nothing").unwrap();
        assert_eq!(ctx.take_output(), ["No command named 'nothing'."]);
    }

    #[tokio::test]
    async fn stop_requests_shutdown() {
        let registry = default_registry();
        let state = SharedState::default();
        let scheduler = ModeScheduler::new(state.clone());
        let mut ctx = CommandContext::new(&registry, &state, &scheduler);

        assert!(!ctx.stop_requested());
        assert!(ctx.execute("stop now").is_err());
        assert!(!ctx.stop_requested());
        ctx.execute("STOP").unwrap();
        assert!(ctx.stop_requested());
    }

    #[tokio::test]
    async fn status_shows_modes_and_lcd_frame() {
        let registry = default_registry();
        let state = SharedState::default();
        let scheduler = ModeScheduler::new(state.clone());
        let mut ctx = CommandContext::new(&registry, &state, &scheduler);

        ctx.execute("status").unwrap();
        let output = ctx.take_output();
        assert_eq!(output[0], "Case mode: off (stopped)");
        assert_eq!(output[1], "Case color: (0, 0, 0)");
        assert_eq!(output[2], "Fade: 0 colors, 10 ticks");
        assert_eq!(output[3], "LCD mode: off (stopped)");
        assert_eq!(output.len(), 5 + 6);
        assert!(output[6..10].iter().all(|row| row.chars().count() == 22));
    }
}
