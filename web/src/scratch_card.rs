use promoplay_core::{
    Cell, PlayOutcome, RewardGame, RewardOption, ScratchCard, ScratchCardConfig, SessionStatus,
};
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::utils::{MouseButtons, format_discount, validated_or_default};

/// Coating cell under a point measured from the ticket's top-left corner.
fn cell_at((x, y): (f64, f64), (width, height): (f64, f64), (columns, rows): (u16, u16)) -> Option<Cell> {
    if columns == 0 || rows == 0 || !(width > 0.0 && height > 0.0) {
        return None;
    }
    if !(0.0..width).contains(&x) || !(0.0..height).contains(&y) {
        return None;
    }
    let column = (x / width * f64::from(columns)) as u16;
    let row = (y / height * f64::from(rows)) as u16;
    Some((column.min(columns - 1), row.min(rows - 1)))
}

/// Maps a pointer event to a cell using the ticket's box. Moves bubble up to the ticket even while a touch
/// is captured by the cell it started on.
fn pointer_cell(e: &PointerEvent, size: (u16, u16)) -> Option<Cell> {
    let ticket = e.current_target()?.dyn_into::<web_sys::Element>().ok()?;
    let rect = ticket.get_bounding_client_rect();
    let point = (
        f64::from(e.client_x()) - rect.left(),
        f64::from(e.client_y()) - rect.top(),
    );
    cell_at(point, (rect.width(), rect.height()), size)
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct ScratchCardProps {
    pub config: ScratchCardConfig,
    pub seed: u64,
    pub on_win: Callback<RewardOption>,
    #[prop_or_default]
    pub on_back: Callback<()>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Press(Cell),
    Drag(Cell, MouseButtons),
    Lift,
    Reset,
    Back,
}

pub(crate) struct ScratchCardView {
    game: ScratchCard,
    stroke: Option<Cell>,
}

impl ScratchCardView {
    fn scratch(&mut self, ctx: &Context<Self>, cell: Cell) -> bool {
        let result = match self.stroke.replace(cell) {
            Some(from) => self.game.scratch_line(from, cell),
            None => self.game.scratch(cell),
        };

        match result {
            Ok(PlayOutcome::Won(reward)) => {
                log::info!("scratch card revealed {}", reward.code);
                ctx.props().on_win.emit(reward);
                true
            }
            Ok(outcome) => outcome.has_update(),
            Err(err) => {
                log::warn!("scratch at {:?} rejected: {}", cell, err);
                false
            }
        }
    }
}

impl Component for ScratchCardView {
    type Message = Msg;
    type Properties = ScratchCardProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        Self {
            game: ScratchCard::new_unchecked(
                validated_or_default(props.config.clone(), ScratchCardConfig::validate),
                props.seed,
            ),
            stroke: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Press(cell) => {
                self.stroke = None;
                self.scratch(ctx, cell)
            }
            Drag(cell, _) if self.stroke == Some(cell) => false,
            Drag(cell, buttons) if buttons.contains(MouseButtons::PRIMARY) => {
                self.scratch(ctx, cell)
            }
            Drag(..) | Lift => {
                self.stroke = None;
                false
            }
            Reset => {
                self.stroke = None;
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
        let surface = self.game.surface();
        let (columns, rows) = surface.size();
        let finished = self.game.status() == SessionStatus::Won;
        let prize = self.game.prize().map_or_else(String::new, format_discount);
        let code = self
            .game
            .prize()
            .filter(|_| finished)
            .map(|reward| reward.code.clone());

        let size = (columns, rows);
        let on_lift = ctx.link().callback(|_: PointerEvent| Msg::Lift);
        let on_press = ctx.link().batch_callback(move |e: PointerEvent| {
            e.prevent_default();
            pointer_cell(&e, size).map(Msg::Press)
        });
        let on_move = ctx.link().batch_callback(move |e: PointerEvent| {
            pointer_cell(&e, size).map(|cell| Msg::Drag(cell, MouseButtons::of(&e)))
        });
        let on_reset = ctx.link().callback(|_: MouseEvent| Msg::Reset);
        let on_back = ctx.link().callback(|_: MouseEvent| Msg::Back);

        html! {
            <div class="scratch-card">
                <p>{"Scratch the card to reveal your discount"}</p>
                <div class={classes!("ticket", finished.then_some("revealed"))}
                    style={format!("grid-template-columns: repeat({}, 1fr); touch-action: none", columns)}
                    onpointerdown={on_press}
                    onpointermove={on_move}
                    onpointerup={on_lift.clone()}
                    onpointercancel={on_lift.clone()}
                    onpointerleave={on_lift}>
                    <div class="prize">
                        <strong>{prize}</strong>
                        {for code.map(|code| html! { <code>{code}</code> })}
                    </div>
                    {
                        for (0..rows).flat_map(|y| (0..columns).map(move |x| (x, y))).map(|cell| html! {
                            <div class={classes!("coating", surface.is_cleared(cell).then_some("cleared"))}/>
                        })
                    }
                </div>
                <progress max="1" value={self.game.progress().to_string()}/>
                <nav>
                    <button onclick={on_reset}>{"New card"}</button>
                    <button onclick={on_back}>{"Back"}</button>
                </nav>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_map_to_cells_across_the_ticket() {
        let size = (24, 12);
        let ticket = (240.0, 120.0);

        assert_eq!(cell_at((0.0, 0.0), ticket, size), Some((0, 0)));
        assert_eq!(cell_at((15.0, 25.0), ticket, size), Some((1, 2)));
        assert_eq!(cell_at((239.9, 119.9), ticket, size), Some((23, 11)));
    }

    #[test]
    fn points_off_the_ticket_are_ignored() {
        let size = (24, 12);
        let ticket = (240.0, 120.0);

        assert_eq!(cell_at((-1.0, 10.0), ticket, size), None);
        assert_eq!(cell_at((240.0, 10.0), ticket, size), None);
        assert_eq!(cell_at((10.0, 120.0), ticket, size), None);
        assert_eq!(cell_at((10.0, 10.0), (0.0, 0.0), size), None);
    }
}
