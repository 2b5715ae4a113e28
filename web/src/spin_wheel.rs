use promoplay_core::{
    PlayOutcome, RewardGame, RewardOption, SessionStatus, SpinWheel, SpinWheelConfig, TimerDriven,
    TimerId, segment_width,
};
use yew::prelude::*;

use crate::timers::GlooTimers;
use crate::utils::{Modal, format_discount, validated_or_default};

const SEGMENT_COLORS: [&str; 6] = [
    "#f97316", "#facc15", "#22c55e", "#0ea5e9", "#a855f7", "#f43f5e",
];

/// `conic-gradient` painting one slice per segment, clockwise from the pointer.
fn wheel_gradient(segment_count: usize) -> String {
    let width = segment_width(segment_count);
    let stops = (0..segment_count)
        .map(|segment| {
            let color = SEGMENT_COLORS[segment % SEGMENT_COLORS.len()];
            let from = segment as f64 * width;
            format!("{} {:.3}deg {:.3}deg", color, from, from + width)
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("conic-gradient({})", stops)
}

fn label_transform(segment: usize, segment_count: usize) -> String {
    let width = segment_width(segment_count);
    format!("rotate({:.3}deg)", segment as f64 * width + width / 2.0)
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct SpinWheelProps {
    pub config: SpinWheelConfig,
    pub seed: u64,
    #[prop_or(true)]
    pub is_open: bool,
    #[prop_or_default]
    pub on_close: Callback<()>,
    pub on_win: Callback<RewardOption>,
    #[prop_or_default]
    pub on_back: Callback<()>,
}

#[derive(Debug)]
pub(crate) enum Msg {
    Spin,
    Timer(TimerId),
    Close,
    Back,
}

pub(crate) struct SpinWheelView {
    game: SpinWheel<GlooTimers>,
}

impl SpinWheelView {
    fn view_wheel(&self) -> Html {
        let segments = self.game.segments();
        let count = segments.len();
        let style = match self.game.current_spin() {
            None => format!("background: {}", wheel_gradient(count)),
            Some(spin) => format!(
                "background: {}; transform: rotate({:.3}deg); transition: transform {}ms cubic-bezier(0.2, 0.8, 0.3, 1)",
                wheel_gradient(count),
                -spin.stop_angle,
                self.game.spin_duration_ms()
            ),
        };

        html! {
            <div class="wheel-frame">
                <div class="wheel-pointer"/>
                <div class="wheel" {style}>
                    {
                        for segments.iter().enumerate().map(|(segment, option)| html! {
                            <span class="wheel-label" style={format!("transform: {}", label_transform(segment, count))}>
                                {format_discount(option)}
                            </span>
                        })
                    }
                </div>
            </div>
        }
    }
}

impl Component for SpinWheelView {
    type Message = Msg;
    type Properties = SpinWheelProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let timers = GlooTimers::new(ctx.link().callback(Msg::Timer));
        Self {
            game: SpinWheel::new_unchecked(
                validated_or_default(props.config.clone(), SpinWheelConfig::validate),
                props.seed,
                timers,
            ),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let outcome = match msg {
            Spin => self.game.spin(),
            Timer(id) => {
                self.game.timers_mut().acknowledge(id);
                self.game.on_timer(id)
            }
            Close => {
                self.game.teardown();
                ctx.props().on_close.emit(());
                return false;
            }
            Back => {
                self.game.teardown();
                ctx.props().on_back.emit(());
                return false;
            }
        };

        if let PlayOutcome::Won(reward) = &outcome {
            log::info!("wheel stopped on {}", reward.code);
            ctx.props().on_win.emit(reward.clone());
        }
        outcome.has_update()
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if !ctx.props().is_open {
            return html! {};
        }

        let status = self.game.status();
        let on_spin = ctx.link().callback(|_: MouseEvent| Msg::Spin);
        let on_close = ctx.link().callback(|_: MouseEvent| Msg::Close);
        let on_back = ctx.link().callback(|_: MouseEvent| Msg::Back);
        let result = match (status, self.game.selected()) {
            (SessionStatus::Won, Some(reward)) => html! {
                <p class="result win">{format!("You won {}: {}", reward.code, reward.description)}</p>
            },
            _ => html! {},
        };

        html! {
            <Modal>
                <div class="modal-backdrop">
                    <div class="modal spin-wheel">
                        <button class="close" onclick={on_close}>{"×"}</button>
                        {self.view_wheel()}
                        <button class="primary" onclick={on_spin} disabled={!status.is_idle()}>
                            {if self.game.is_spinning() { "Spinning…" } else { "Spin" }}
                        </button>
                        {result}
                        <button onclick={on_back}>{"Back"}</button>
                    </div>
                </div>
            </Modal>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.game.teardown();
    }
}
