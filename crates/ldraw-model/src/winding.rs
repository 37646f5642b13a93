// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Winding normalization
//!
//! `bake` resolves `BFC INVERTNEXT` directives into point-order reversals,
//! recursing into sub-parts. `invert` bakes and then reverses every line,
//! triangle and quad. Both return new parts; the input is never touched.
//!
//! Sub-file references are only inverted by `bake`, when an `INVERTNEXT`
//! precedes them. `invert` leaves them as they are.

use crate::{BfcDirective, Command, Part, Winding};

/// Resolve pending `INVERTNEXT` directives
pub fn bake(part: &Part) -> Part {
    let mut commands = Vec::with_capacity(part.commands().len());
    let mut pending_invert = false;

    for command in part.commands() {
        match command {
            Command::Comment { .. } if command.is_invert_next() => {
                log::debug!("consuming {}", BfcDirective::InvertNext);
                pending_invert = true;
            }
            // other directives leave a pending INVERTNEXT for the next command
            Command::Comment { bfc: Some(_), .. } => commands.push(command.clone()),
            Command::SubFile(sub) => {
                let baked = bake(&sub.part);
                let baked = if pending_invert {
                    invert(&baked)
                } else {
                    baked
                };
                commands.push(Command::SubFile(sub.with_part(baked)));
                pending_invert = false;
            }
            other => {
                if pending_invert {
                    commands.push(other.inverted());
                } else {
                    commands.push(other.clone());
                }
                pending_invert = false;
            }
        }
    }

    part.with_commands(commands)
}

/// Bake, then reverse the winding of every line, triangle and quad
pub fn invert(part: &Part) -> Part {
    let baked = bake(part);
    let commands = baked
        .into_commands()
        .into_iter()
        .map(|command| match command {
            Command::Comment { .. } | Command::SubFile(_) => command,
            primitive => primitive.inverted(),
        })
        .collect();
    part.with_commands(commands)
}

impl Part {
    /// See [`bake`]
    pub fn baked(&self) -> Part {
        bake(self)
    }

    /// See [`invert`]
    pub fn inverted(&self) -> Part {
        invert(self)
    }

    /// Bake, and invert if a certified part declares the other winding
    ///
    /// The result of an inversion records `winding` as its default winding.
    /// Parts that are not certified make no claim about their winding and
    /// are only baked.
    pub fn conformed_to(&self, winding: Winding) -> Part {
        if !self.is_certified() || self.default_winding() == winding {
            return bake(self);
        }

        let inverted = invert(self);
        let mut header = inverted.header().clone();
        header.default_winding = header.default_winding.reversed();
        Part::new(header, inverted.into_commands())
    }
}
