// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Case LED commands: `casemode`, `casecolor`, `fadelist` and the `fade`
//! group.

use crate::mode::CaseMode;
use crate::types::{Color, FadeTicks};

use super::{Arity, CommandContext, CommandNode, parse_number, reject};

/// Returns the case LED commands.
pub fn commands() -> Vec<CommandNode> {
    vec![
        CommandNode::builder("casemode")
            .arity(Arity::Exact(1))
            .args("<off|static|fade>")
            .description("Set the case LED mode")
            .handler(casemode)
            .build(),
        CommandNode::builder("casecolor")
            .args("<color>")
            .description("Set the color shown by the static case mode")
            .handler(casecolor)
            .build(),
        CommandNode::builder("fadelist")
            .arity(Arity::Exact(0))
            .description("List the fade colors")
            .handler(fadelist)
            .build(),
        fade_group(),
    ]
}

fn fade_group() -> CommandNode {
    CommandNode::builder("fade")
        .description("Edit the fade colors and saved fades")
        .subcommand(
            CommandNode::builder("add")
                .args("<color>")
                .description("Append a color to the fade")
                .handler(fade_add)
                .build(),
        )
        .subcommand(
            CommandNode::builder("remove")
                .arity(Arity::Exact(1))
                .args("<index>")
                .description("Remove the fade color at an index")
                .handler(fade_remove)
                .build(),
        )
        .subcommand(
            CommandNode::builder("clear")
                .arity(Arity::Exact(0))
                .description("Remove every fade color")
                .handler(fade_clear)
                .build(),
        )
        .subcommand(
            CommandNode::builder("ticks")
                .args("[ticks]")
                .description(format!(
                    "Show or set the ticks per color transition ({}-{})",
                    FadeTicks::MIN,
                    FadeTicks::MAX
                ))
                .handler(fade_ticks)
                .build(),
        )
        .subcommand(
            CommandNode::builder("save")
                .arity(Arity::Exact(1))
                .args("<name>")
                .description("Save the fade colors under a name")
                .handler(fade_save)
                .build(),
        )
        .subcommand(
            CommandNode::builder("load")
                .arity(Arity::Exact(1))
                .args("<name>")
                .description("Replace the fade colors with a saved fade")
                .handler(fade_load)
                .build(),
        )
        .subcommand(
            CommandNode::builder("delete")
                .arity(Arity::Exact(1))
                .args("<name>")
                .description("Delete a saved fade")
                .handler(fade_delete)
                .build(),
        )
        .subcommand(
            CommandNode::builder("saved")
                .arity(Arity::Exact(0))
                .description("List the saved fades")
                .handler(fade_saved)
                .build(),
        )
        .build()
}

fn casemode(ctx: &mut CommandContext<'_>, args: &[String]) -> bool {
    let mode = match CaseMode::from_name(&args[0]) {
        Ok(mode) => mode,
        Err(e) => return reject(ctx, &e),
    };

    ctx.scheduler().restart_case(mode);
    ctx.say(format!("Case mode set to {}.", args[0].to_lowercase()));

    if matches!(mode, CaseMode::Fade(_)) && ctx.state().read(|s| s.fade_colors().is_empty()) {
        ctx.say("The fade list is empty; add colors with 'fade add <color>'.");
    }
    true
}

fn casecolor(ctx: &mut CommandContext<'_>, args: &[String]) -> bool {
    let color = match Color::from_args(args) {
        Ok(color) => color,
        Err(e) => return reject(ctx, &e),
    };
    ctx.state().update(|s| s.set_case_static_color(color));
    ctx.say(format!("Case color set to {color}."));
    true
}

fn fadelist(ctx: &mut CommandContext<'_>, _args: &[String]) -> bool {
    let colors = ctx.state().read(|s| s.fade_colors().to_vec());
    if colors.is_empty() {
        ctx.say("The fade list is empty.");
    }
    for (index, color) in colors.iter().enumerate() {
        ctx.say(format!("{index} - {color}"));
    }
    true
}

fn fade_add(ctx: &mut CommandContext<'_>, args: &[String]) -> bool {
    let color = match Color::from_args(args) {
        Ok(color) => color,
        Err(e) => return reject(ctx, &e),
    };
    let index = ctx.state().update(|s| s.add_fade_color(color));
    ctx.say(format!("Added {color} at index {index}."));
    true
}

fn fade_remove(ctx: &mut CommandContext<'_>, args: &[String]) -> bool {
    let removed = parse_number::<usize>(&args[0])
        .and_then(|index| ctx.state().update(|s| s.remove_fade_color(index)));
    match removed {
        Ok(color) => {
            ctx.say(format!("Removed {color}."));
            true
        }
        Err(e) => reject(ctx, &e),
    }
}

fn fade_clear(ctx: &mut CommandContext<'_>, _args: &[String]) -> bool {
    ctx.state().update(|s| s.clear_fade_colors());
    ctx.say("Cleared the fade list.");
    true
}

fn fade_ticks(ctx: &mut CommandContext<'_>, args: &[String]) -> bool {
    match args {
        [] => {
            let ticks = ctx.state().read(|s| s.fade_ticks());
            ctx.say(format!("Fade ticks: {ticks}"));
            true
        }
        [value] => {
            let requested = match parse_number::<u32>(value) {
                Ok(requested) => requested,
                Err(e) => return reject(ctx, &e),
            };
            let stored = ctx.state().update(|s| s.set_fade_ticks(requested));
            if stored.value() == requested {
                ctx.say(format!("Fade ticks set to {stored}."));
            } else {
                ctx.say(format!("Fade ticks set to {stored} (clamped from {requested})."));
            }
            true
        }
        _ => false,
    }
}

fn fade_save(ctx: &mut CommandContext<'_>, args: &[String]) -> bool {
    let name = &args[0];
    let (replaced, len) = ctx
        .state()
        .update(|s| (s.save_fade(name), s.fade_colors().len()));
    if replaced {
        ctx.say(format!("Replaced saved fade '{name}' ({len} colors)."));
    } else {
        ctx.say(format!("Saved fade '{name}' ({len} colors)."));
    }
    true
}

fn fade_load(ctx: &mut CommandContext<'_>, args: &[String]) -> bool {
    let name = &args[0];
    match ctx.state().update(|s| s.load_fade(name)) {
        Some(len) => ctx.say(format!("Loaded fade '{name}' ({len} colors).")),
        None => ctx.say(format!("No saved fade named '{name}'.")),
    }
    true
}

fn fade_delete(ctx: &mut CommandContext<'_>, args: &[String]) -> bool {
    let name = &args[0];
    if ctx.state().update(|s| s.delete_fade(name)) {
        ctx.say(format!("Deleted saved fade '{name}'."));
    } else {
        ctx.say(format!("No saved fade named '{name}'."));
    }
    true
}

fn fade_saved(ctx: &mut CommandContext<'_>, _args: &[String]) -> bool {
    let saved: Vec<(String, usize)> = ctx.state().read(|s| {
        s.saved_fades()
            .iter()
            .map(|(name, colors)| (name.to_string(), colors.len()))
            .collect()
    });
    if saved.is_empty() {
        ctx.say("No saved fades.");
    }
    for (name, len) in saved {
        ctx.say(format!("{name} ({len} colors)"));
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::command::{CommandContext, default_registry};
    use crate::error::CommandError;
    use crate::mode::CaseMode;
    use crate::scheduler::ModeScheduler;
    use crate::state::SharedState;
    use crate::types::Color;

    const RED: Color = Color::new(255, 0, 0);
    const BLUE: Color = Color::new(0, 0, 255);

    #[tokio::test]
    async fn fadelist_follows_insertion_order() {
        let registry = default_registry();
        let state = SharedState::default();
        let scheduler = ModeScheduler::new(state.clone());
        let mut ctx = CommandContext::new(&registry, &state, &scheduler);

        ctx.execute("fade add 255 0 0").unwrap();
        ctx.execute("fade add blue").unwrap();
        ctx.execute("fade add #00ff00").unwrap();
        ctx.take_output();

        ctx.execute("fadelist").unwrap();
        assert_eq!(
            ctx.take_output(),
            ["0 - (255, 0, 0)", "1 - (0, 0, 255)", "2 - (0, 255, 0)"]
        );

        ctx.execute("fade remove 0").unwrap();
        ctx.take_output();
        ctx.execute("fadelist").unwrap();
        assert_eq!(ctx.take_output(), ["0 - (0, 0, 255)", "1 - (0, 255, 0)"]);
    }

    #[tokio::test]
    async fn malformed_fade_commands_leave_state_unchanged() {
        let registry = default_registry();
        let state = SharedState::default();
        let scheduler = ModeScheduler::new(state.clone());
        let mut ctx = CommandContext::new(&registry, &state, &scheduler);
        ctx.execute("fade add red").unwrap();
        let before = state.read(Clone::clone);

        for line in [
            "fade add",
            "fade add 1 2",
            "fade add 1 2 300",
            "fade add nosuchcolor",
            "fade remove",
            "fade remove x",
            "fade remove 5",
            "fade ticks a",
            "fade ticks 1 2",
            "fade save",
            "fade",
            "casemode",
            "casemode rainbow",
            "casecolor",
        ] {
            assert!(
                matches!(
                    ctx.execute(line),
                    Err(CommandError::MalformedArguments { .. })
                ),
                "{line} should be rejected"
            );
            assert_eq!(state.read(Clone::clone), before, "{line} changed state");
        }
    }

    #[tokio::test]
    async fn casemode_restarts_case_driver() {
        let registry = default_registry();
        let state = SharedState::default();
        let scheduler = ModeScheduler::new(state.clone());
        let mut ctx = CommandContext::new(&registry, &state, &scheduler);

        ctx.execute("casecolor orange").unwrap();
        ctx.execute("CASEMODE Static").unwrap();
        assert_eq!(state.read(|s| s.case_mode()), CaseMode::Static);
        assert_eq!(state.snapshot().case_color, Color::new(255, 200, 0));

        ctx.execute("casemode fade").unwrap();
        let output = ctx.take_output();
        assert!(output.iter().any(|line| line.contains("fade list is empty")));
        assert_eq!(state.snapshot().case_color, Color::BLACK);

        scheduler.stop().await;
    }

    #[tokio::test]
    async fn fade_ticks_query_and_clamp() {
        let registry = default_registry();
        let state = SharedState::default();
        let scheduler = ModeScheduler::new(state.clone());
        let mut ctx = CommandContext::new(&registry, &state, &scheduler);

        ctx.execute("fade ticks").unwrap();
        assert_eq!(ctx.take_output(), ["Fade ticks: 10"]);

        ctx.execute("fade ticks 1000").unwrap();
        assert_eq!(
            ctx.take_output(),
            ["Fade ticks set to 200 (clamped from 1000)."]
        );
        assert_eq!(state.read(|s| s.fade_ticks().value()), 200);
    }

    #[tokio::test]
    async fn saved_fades_round_trip() {
        let registry = default_registry();
        let state = SharedState::default();
        let scheduler = ModeScheduler::new(state.clone());
        let mut ctx = CommandContext::new(&registry, &state, &scheduler);

        ctx.execute("fade add red").unwrap();
        ctx.execute("fade add blue").unwrap();
        ctx.execute("fade save Police").unwrap();
        ctx.execute("fade clear").unwrap();
        ctx.take_output();

        ctx.execute("fade saved").unwrap();
        assert_eq!(ctx.take_output(), ["Police (2 colors)"]);

        ctx.execute("fade load POLICE").unwrap();
        assert_eq!(state.read(|s| s.fade_colors().to_vec()), [RED, BLUE]);

        ctx.execute("fade delete police").unwrap();
        ctx.execute("fade load police").unwrap();
        assert_eq!(
            ctx.take_output().last().map(String::as_str),
            Some("No saved fade named 'police'.")
        );
    }
}
