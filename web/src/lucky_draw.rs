use promoplay_core::{
    CardFace, LossReason, LuckyDraw, LuckyDrawConfig, PlayOutcome, RewardGame, RewardOption,
    SessionStatus,
};
use yew::prelude::*;

use crate::utils::{format_discount, validated_or_default};

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct LuckyDrawProps {
    pub config: LuckyDrawConfig,
    pub seed: u64,
    pub on_win: Callback<RewardOption>,
    #[prop_or_default]
    pub on_back: Callback<()>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Pick(usize),
    TryAgain,
    Back,
}

pub(crate) struct LuckyDrawView {
    game: LuckyDraw,
}

impl Component for LuckyDrawView {
    type Message = Msg;
    type Properties = LuckyDrawProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        Self {
            game: LuckyDraw::new_unchecked(
                validated_or_default(props.config.clone(), LuckyDrawConfig::validate),
                props.seed,
            ),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Pick(card) => match self.game.pick(card) {
                Ok(PlayOutcome::Won(reward)) => {
                    log::info!("lucky draw won {}", reward.code);
                    ctx.props().on_win.emit(reward);
                    true
                }
                Ok(PlayOutcome::Lost(reason)) => {
                    log::debug!("lucky draw lost: {:?}", reason);
                    self.game.reveal_all();
                    true
                }
                Ok(outcome) => outcome.has_update(),
                Err(err) => {
                    log::warn!("pick of card {} rejected: {}", card, err);
                    false
                }
            },
            TryAgain => {
                self.game.reset();
                true
            }
            Back => {
                ctx.props().on_back.emit(());
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let status = self.game.status();
        let prize = self.game.selected().map_or_else(String::new, format_discount);
        let picked = self.game.picked_card();

        let message = match status {
            SessionStatus::Won => "You found the prize!",
            SessionStatus::Lost(LossReason::WrongPick) => "Not this time. The prize was here:",
            _ => "Pick a card",
        };
        let on_try_again = ctx.link().callback(|_: MouseEvent| Msg::TryAgain);
        let on_back = ctx.link().callback(|_: MouseEvent| Msg::Back);

        html! {
            <div class="lucky-draw">
                <p>{message}</p>
                <div class="cards">
                    {
                        for self.game.faces().iter().enumerate().map(|(card, &face)| {
                            let onclick = ctx.link().callback(move |_: MouseEvent| Msg::Pick(card));
                            let class = classes!(
                                "card",
                                match face {
                                    CardFace::FaceDown => classes!(),
                                    CardFace::Winner => classes!("open", "winner"),
                                    CardFace::Blank => classes!("open", "blank"),
                                },
                                (picked == Some(card)).then_some("picked")
                            );
                            html! {
                                <button {class} {onclick} disabled={status.is_finished()}>
                                    {
                                        match face {
                                            CardFace::Winner => html! { {prize.clone()} },
                                            CardFace::Blank => html! { {"No luck"} },
                                            CardFace::FaceDown => html! { {"?"} },
                                        }
                                    }
                                </button>
                            }
                        })
                    }
                </div>
                <nav>
                    if status.is_finished() {
                        <button onclick={on_try_again}>{"Try again"}</button>
                    }
                    <button onclick={on_back}>{"Back"}</button>
                </nav>
            </div>
        }
    }
}
