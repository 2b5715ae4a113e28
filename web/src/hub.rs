use clap::{Args, ValueEnum};
use promoplay_core::{PromoConfig, RewardOption};
use yew::prelude::*;

use crate::color_match::ColorMatchView;
use crate::lucky_draw::LuckyDrawView;
use crate::scratch_card::ScratchCardView;
use crate::settings;
use crate::spin_wheel::SpinWheelView;
use crate::utils::{format_discount, js_random_seed, parse_seed};

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum GameKind {
    SpinWheel,
    ScratchCard,
    LuckyDraw,
    ColorMatch,
}

impl GameKind {
    const ALL: [GameKind; 4] = [
        GameKind::SpinWheel,
        GameKind::ScratchCard,
        GameKind::LuckyDraw,
        GameKind::ColorMatch,
    ];

    const fn title(self) -> &'static str {
        use GameKind::*;
        match self {
            SpinWheel => "Spin the Wheel",
            ScratchCard => "Scratch Card",
            LuckyDraw => "Lucky Draw",
            ColorMatch => "Color Match",
        }
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct HubProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<String>,

    /// Open a game right away
    #[arg(short, long, value_enum)]
    game: Option<GameKind>,
}

#[derive(Debug)]
pub(crate) enum Msg {
    Open(GameKind),
    Back,
    CloseWheel,
    Won(RewardOption),
}

/// Landing page listing the games and collecting the reward won.
#[derive(Debug)]
pub(crate) struct RewardHub {
    config: PromoConfig,
    seed: u64,
    fixed_seed: bool,
    active: Option<GameKind>,
    reward: Option<RewardOption>,
}

impl RewardHub {
    fn next_seed(&mut self) {
        if !self.fixed_seed {
            self.seed = js_random_seed();
        }
    }

    fn view_game(&self, ctx: &Context<Self>, kind: GameKind) -> Html {
        let config = &self.config;
        let seed = self.seed;
        let on_win = ctx.link().callback(Msg::Won);
        let on_back = ctx.link().callback(|_| Msg::Back);

        match kind {
            GameKind::SpinWheel => {
                let on_close = ctx.link().callback(|_| Msg::CloseWheel);
                html! {
                    <SpinWheelView config={config.spin_wheel.clone()} {seed} is_open=true {on_close} {on_win} {on_back}/>
                }
            }
            GameKind::ScratchCard => html! {
                <ScratchCardView config={config.scratch_card.clone()} {seed} {on_win} {on_back}/>
            },
            GameKind::LuckyDraw => html! {
                <LuckyDrawView config={config.lucky_draw.clone()} {seed} {on_win} {on_back}/>
            },
            GameKind::ColorMatch => html! {
                <ColorMatchView config={config.color_match.clone()} {seed} {on_win} {on_back}/>
            },
        }
    }

    fn view_menu(&self, ctx: &Context<Self>) -> Html {
        html! {
            <ul class="menu">
                {
                    for GameKind::ALL.into_iter().map(|kind| {
                        let onclick = ctx.link().callback(move |_: MouseEvent| Msg::Open(kind));
                        html! {
                            <li><button {onclick}>{kind.title()}</button></li>
                        }
                    })
                }
            </ul>
        }
    }

    fn view_reward(&self) -> Html {
        match &self.reward {
            None => html! {},
            Some(reward) => html! {
                <aside class="reward">
                    <span>{"Your code"}</span>
                    <strong>{&reward.code}</strong>
                    <small>{format_discount(reward)}</small>
                </aside>
            },
        }
    }
}

impl Component for RewardHub {
    type Message = Msg;
    type Properties = HubProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        Self {
            config: settings::promo_config(),
            seed: props.seed.as_deref().map_or_else(js_random_seed, parse_seed),
            fixed_seed: props.seed.is_some(),
            active: props.game,
            reward: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Open(kind) => {
                log::debug!("opening {:?}", kind);
                self.next_seed();
                self.active.replace(kind) != Some(kind)
            }
            Back | CloseWheel => {
                log::debug!("back to the menu");
                self.active.take().is_some()
            }
            Won(reward) => {
                log::info!("reward won: {}", reward.code);
                self.reward = Some(reward);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="promoplay">
                <h1>{"Play for a discount"}</h1>
                {self.view_reward()}
                {
                    match self.active {
                        Some(kind) => self.view_game(ctx, kind),
                        None => self.view_menu(ctx),
                    }
                }
            </div>
        }
    }
}
