use promoplay_core::PromoConfig;

const PROMO_TOML: &str = include_str!("../promo.toml");

fn parse(source: &str) -> Result<PromoConfig, String> {
    let config: PromoConfig = toml::from_str(source).map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    Ok(config)
}

/// Reward catalogs bundled with the page, falling back to the built-in ones if they don't load.
pub(crate) fn promo_config() -> PromoConfig {
    parse(PROMO_TOML).unwrap_or_else(|err| {
        log::error!("bundled promo.toml rejected, using defaults: {}", err);
        PromoConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_config_is_valid() {
        let config = parse(PROMO_TOML).unwrap();

        assert_eq!(config.spin_wheel.segments.len(), 6);
        assert_eq!(config.spin_wheel.segments[2].code, "FREESHIP");
        assert_eq!(config.color_match.max_moves, 10);
        assert_eq!(config.color_match.pair_count(), 6);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config = parse("[lucky_draw]\ncard_count = 3\n").unwrap();

        assert_eq!(config.lucky_draw.card_count, 3);
        assert_eq!(config.scratch_card, PromoConfig::default().scratch_card);
    }

    #[test]
    fn invalid_tuning_is_reported() {
        assert!(parse("[scratch_card]\nreveal_threshold = 0.0\n").is_err());
        assert!(parse("[spin_wheel]\nsegments = []\n").is_err());
    }
}
