// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LCD commands: the `lcd` group.

use crate::mode::LcdMode;
use crate::types::{Color, LcdText};

use super::{Arity, CommandContext, CommandNode, parse_number, reject};

/// Returns the LCD commands.
pub fn commands() -> Vec<CommandNode> {
    let text_args = format!("<0-{}> [text...]", LcdText::HEIGHT - 1);

    vec![
        CommandNode::builder("lcd")
            .description("Control the LCD")
            .subcommand(
                CommandNode::builder("mode")
                    .arity(Arity::Exact(1))
                    .args("<off|static|clock>")
                    .description("Set the LCD mode")
                    .handler(mode)
                    .build(),
            )
            .subcommand(
                CommandNode::builder("color")
                    .args("<color>")
                    .description("Set the LCD backlight color")
                    .handler(color)
                    .build(),
            )
            .subcommand(
                CommandNode::builder("text")
                    .args(text_args)
                    .description("Set one row of the static LCD text")
                    .handler(text)
                    .build(),
            )
            .subcommand(
                CommandNode::builder("clear")
                    .arity(Arity::Exact(0))
                    .description("Blank the static LCD text")
                    .handler(clear)
                    .build(),
            )
            .build(),
    ]
}

fn mode(ctx: &mut CommandContext<'_>, args: &[String]) -> bool {
    let mode = match LcdMode::from_name(&args[0]) {
        Ok(mode) => mode,
        Err(e) => return reject(ctx, &e),
    };
    ctx.scheduler().restart_lcd(mode);
    ctx.say(format!("LCD mode set to {}.", args[0].to_lowercase()));
    true
}

fn color(ctx: &mut CommandContext<'_>, args: &[String]) -> bool {
    let color = match Color::from_args(args) {
        Ok(color) => color,
        Err(e) => return reject(ctx, &e),
    };
    // The mode is left alone; an LCD that is off stays off.
    ctx.state().update(|s| s.set_lcd_color(color));
    ctx.say(format!("LCD color set to {color}."));
    true
}

fn text(ctx: &mut CommandContext<'_>, args: &[String]) -> bool {
    let Some((row, words)) = args.split_first() else {
        return false;
    };
    let line = words.join(" ");
    let updated = parse_number::<usize>(row)
        .and_then(|row| ctx.state().update(|s| s.set_lcd_row(row, &line)));
    match updated {
        Ok(()) => {
            ctx.say(format!("LCD row {row} set."));
            true
        }
        Err(e) => reject(ctx, &e),
    }
}

fn clear(ctx: &mut CommandContext<'_>, _args: &[String]) -> bool {
    ctx.state().update(|s| s.clear_lcd_text());
    ctx.say("Cleared the LCD text.");
    true
}
