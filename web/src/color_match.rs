use promoplay_core::{
    ColorMatch, ColorMatchConfig, LossReason, PlayOutcome, RewardGame, RewardOption, SessionStatus,
    TimerDriven, TimerId,
};
use yew::prelude::*;

use crate::timers::GlooTimers;
use crate::utils::validated_or_default;

fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct ColorMatchProps {
    pub config: ColorMatchConfig,
    pub seed: u64,
    pub on_win: Callback<RewardOption>,
    #[prop_or_default]
    pub on_back: Callback<()>,
}

#[derive(Debug)]
pub(crate) enum Msg {
    Flip(usize),
    Timer(TimerId),
    Restart,
    Back,
}

pub(crate) struct ColorMatchView {
    game: ColorMatch<GlooTimers>,
}

impl ColorMatchView {
    fn status_line(&self) -> String {
        match self.game.status() {
            SessionStatus::Won => "All pairs found!".to_string(),
            SessionStatus::Lost(LossReason::Expired) => "Time's up".to_string(),
            SessionStatus::Lost(LossReason::TooManyMoves) => format!(
                "Cleared in {} moves, finish within {} to win",
                self.game.moves(),
                self.game.max_moves()
            ),
            _ => format!("Moves {}/{}", self.game.moves(), self.game.max_moves()),
        }
    }
}

impl Component for ColorMatchView {
    type Message = Msg;
    type Properties = ColorMatchProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let timers = GlooTimers::new(ctx.link().callback(Msg::Timer));
        Self {
            game: ColorMatch::new_unchecked(
                validated_or_default(props.config.clone(), ColorMatchConfig::validate),
                props.seed,
                timers,
            ),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let outcome = match msg {
            Flip(index) => match self.game.flip(index) {
                Ok(outcome) => outcome,
                Err(err) => {
                    log::warn!("flip of tile {} rejected: {}", index, err);
                    PlayOutcome::NoChange
                }
            },
            Timer(id) => {
                self.game.timers_mut().acknowledge(id);
                self.game.on_timer(id)
            }
            Restart => {
                self.game.reset();
                PlayOutcome::Progressed
            }
            Back => {
                self.game.teardown();
                ctx.props().on_back.emit(());
                PlayOutcome::NoChange
            }
        };

        match &outcome {
            PlayOutcome::Won(reward) => {
                log::info!("color match won {} in {} moves", reward.code, self.game.moves());
                ctx.props().on_win.emit(reward.clone());
            }
            PlayOutcome::Lost(reason) => log::debug!("color match lost: {:?}", reason),
            _ => {}
        }
        outcome.has_update()
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let palette = self.game.palette();
        let accepting = self.game.is_accepting_input();
        let finished = self.game.status().is_finished();
        let on_restart = ctx.link().callback(|_: MouseEvent| Msg::Restart);
        let on_back = ctx.link().callback(|_: MouseEvent| Msg::Back);

        html! {
            <div class="color-match">
                <nav>
                    <aside>{format_clock(self.game.seconds_left())}</aside>
                    <span>{self.status_line()}</span>
                </nav>
                <div class={classes!("tiles", accepting.then_some("playable"))}>
                    {
                        for self.game.board().tiles().iter().enumerate().map(|(index, tile)| {
                            let onclick = ctx.link().callback(move |_: MouseEvent| Msg::Flip(index));
                            let style = tile
                                .is_face_up()
                                .then(|| format!("background: {}", palette[usize::from(tile.color)]));
                            html! {
                                <button
                                    class={classes!("tile", tile.matched.then_some("matched"), tile.flipped.then_some("flipped"))}
                                    {style}
                                    {onclick}
                                    disabled={!accepting || !tile.can_flip()}/>
                            }
                        })
                    }
                </div>
                <nav>
                    if finished {
                        <button onclick={on_restart}>{"Play again"}</button>
                    }
                    <button onclick={on_back}>{"Back"}</button>
                </nav>
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.game.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pads_seconds() {
        assert_eq!(format_clock(60), "1:00");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(0), "0:00");
    }
}
