use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use yew::prelude::*;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub(crate) struct MouseButtons: u16 {
        const PRIMARY   = 1;
        const SECONDARY = 1 << 1;
        const MIDDLE    = 1 << 2;
    }
}

impl MouseButtons {
    /// Buttons held during a pointer event, touch and pen contact report as primary.
    pub(crate) fn of(e: &PointerEvent) -> Self {
        Self::from_bits_truncate(e.buttons())
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    #[prop_or_default]
    pub children: Html,
}

/// Renders its children under document.body so overlays escape the game's layout.
#[function_component]
pub(crate) fn Modal(props: &ModalProps) -> Html {
    let modal_host = gloo::utils::body();
    create_portal(props.children.clone(), modal_host.into())
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Seeds given on the URL are numbers or arbitrary words, words are hashed with FNV-1a.
pub(crate) fn parse_seed(seed: &str) -> u64 {
    let seed = seed.trim();
    seed.parse().unwrap_or_else(|_| {
        seed.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
        })
    })
}

/// Keeps a game config that passes `validate`, otherwise logs why and uses the built-in one.
pub(crate) fn validated_or_default<C: Default>(
    config: C,
    validate: impl FnOnce(&C) -> promoplay_core::Result<()>,
) -> C {
    match validate(&config) {
        Ok(()) => config,
        Err(err) => {
            log::error!("game config rejected, using defaults: {}", err);
            C::default()
        }
    }
}

pub(crate) fn format_discount(reward: &promoplay_core::RewardOption) -> String {
    match reward.discount_percent {
        0 => reward.description.clone(),
        percent => format!("{}% off", percent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_seeds_are_used_as_is() {
        assert_eq!(parse_seed("42"), 42);
        assert_eq!(parse_seed(" 7 "), 7);
    }

    #[test]
    fn word_seeds_are_stable() {
        assert_eq!(parse_seed("summer-sale"), parse_seed("summer-sale"));
        assert_ne!(parse_seed("summer-sale"), parse_seed("winter-sale"));
        assert_eq!(parse_seed(""), 0xcbf2_9ce4_8422_2325);
    }

    #[test]
    fn invalid_game_configs_fall_back_to_defaults() {
        use promoplay_core::LuckyDrawConfig;

        let broken = LuckyDrawConfig {
            card_count: 1,
            ..LuckyDrawConfig::default()
        };
        assert_eq!(
            validated_or_default(broken, LuckyDrawConfig::validate),
            LuckyDrawConfig::default()
        );

        let custom = LuckyDrawConfig {
            card_count: 4,
            ..LuckyDrawConfig::default()
        };
        assert_eq!(
            validated_or_default(custom.clone(), LuckyDrawConfig::validate),
            custom
        );
    }

    #[test]
    fn free_shipping_shows_its_description() {
        let reward = promoplay_core::RewardOption::new("FREESHIP", 0, "Free shipping");
        assert_eq!(format_discount(&reward), "Free shipping");

        let reward = promoplay_core::RewardOption::new("SPIN10", 10, "10% off your next order");
        assert_eq!(format_discount(&reward), "10% off");
    }
}
