/*
 *  composer.rs
 *
 *  work-clock - it's about time, ish
 *  (c) 2020-26 Stuart Hunter
 *
 *  Turns a moment into words on the panel
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::fmt;

use log::{debug, info, warn};

use crate::clock::Clock;
use crate::display::color::InkColor;
use crate::display::layout::{FontSize, Fragment, HAnchor, RenderSpec, VAnchor};
use crate::display::text::TextRenderer;
use crate::display::traits::{check_rotation, InkPanel};
use crate::phrase::{phrase, TimePhrase, SUFFIX};
use crate::schedule::{classify, DisplayState, ScheduleConfig};
use crate::status::{token_for, StatusGate, StatusStore};

/// Maps a display state (and the phrase, when working) to fragments.
pub struct DisplayComposer;

impl DisplayComposer {
    pub fn compose(state: DisplayState, phrase: Option<&TimePhrase>) -> RenderSpec {
        use HAnchor::{Center, Left, Right};
        use VAnchor::{Bottom, Middle, Top};

        match state {
            DisplayState::Weekend => vec![
                Fragment::new("It's", Center, Top).font(FontSize::Big),
                Fragment::new("the", Center, Middle).font(FontSize::Big),
                Fragment::new("weekend!", Center, Bottom).font(FontSize::Big),
            ],
            DisplayState::OffHours => vec![
                Fragment::new("It's", Left, Top),
                Fragment::new("not", Center, Top).font(FontSize::Big).colour(InkColor::ACCENT),
                Fragment::new("work", Center, Middle),
                Fragment::new("time", Center, Bottom),
                Fragment::new("now", Right, Bottom),
            ],
            DisplayState::Working => {
                let mut spec = vec![Fragment::new("It's", Left, Top)];
                match phrase {
                    Some(p) => spec.extend([
                        Fragment::new(p.fragment1.as_str(), Center, Top),
                        Fragment::new(p.fragment2.as_str(), Center, Middle),
                        Fragment::new(p.fragment3.as_str(), Center, Bottom),
                    ]),
                    None => warn!("Working state composed without a phrase, drawing the frame words only"),
                }
                spec.push(Fragment::new(phrase.map_or(SUFFIX, |p| p.suffix), Right, Bottom));
                spec
            }
        }
    }
}

/// One-line description of a composed frame, as printed on stdout.
pub fn status_line(spec: &[Fragment]) -> String {
    spec.iter().map(|f| f.text.as_str()).collect::<Vec<_>>().join(" ")
}

/// Result of a single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Rendered { state: DisplayState, message: String },
    Skipped { state: DisplayState, token: &'static str },
}

impl Outcome {
    pub fn state(&self) -> DisplayState {
        match self {
            Outcome::Rendered { state, .. } | Outcome::Skipped { state, .. } => *state,
        }
    }

    pub fn rendered(&self) -> bool {
        matches!(self, Outcome::Rendered { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Rendered { message, .. } => write!(f, "{}", message),
            Outcome::Skipped { token, .. } => {
                write!(f, "No change ({}), display left untouched", token)
            }
        }
    }
}

/// Classify, gate, compose, render and commit, once.
pub struct WordClock<C: Clock> {
    clock: C,
    schedule: ScheduleConfig,
    rotation: u16,
    force: bool,
}

impl<C: Clock> WordClock<C> {
    pub fn new(clock: C, schedule: ScheduleConfig, rotation: u16) -> Self {
        Self { clock, schedule, rotation, force: false }
    }

    /// Builder: draw even when the gate would skip
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn run_once<S: StatusStore>(
        &self,
        gate: &mut StatusGate<S>,
        panel: &mut dyn InkPanel,
    ) -> crate::Result<Outcome> {
        let now = self.clock.now();
        let state = classify(now.weekday, now.hour, &self.schedule);
        debug!(
            "day {} {:02}:{:02} classified as {}, last rendered {:?}",
            now.weekday, now.hour, now.minute, state, gate.last_token()
        );

        // a rotation the panel refuses must fail before the token moves
        check_rotation(panel.capabilities(), self.rotation)?;

        // the token is persisted before the panel is touched
        let admitted = if self.force {
            gate.record(state)?;
            true
        } else {
            gate.admit(state)?
        };
        if !admitted {
            info!("State {} unchanged, skipping refresh", state);
            return Ok(Outcome::Skipped { state, token: token_for(state) });
        }

        let words = (state == DisplayState::Working).then(|| phrase(now.hour, now.minute));
        let spec = DisplayComposer::compose(state, words.as_ref());

        let caps = panel.capabilities();
        let renderer = TextRenderer::new(caps.width, caps.height, caps.palette);
        let frame = renderer.render(&spec)?;

        panel.set_border(InkColor::PAPER)?;
        panel.set_rotation(self.rotation)?;
        panel.set_image(&frame)?;
        panel.show()?;

        let message = status_line(&spec);
        info!("Rendered: {}", message);
        Ok(Outcome::Rendered { state, message })
    }
}
