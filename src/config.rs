use serde::Deserialize;
use sixel_reductor::{
    ColorMode, Diffusion, FinderMode, ReduceMode, ResizeAxis, Rgb, SixelConverter,
};
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "SIXELV_CONFIG";

/// What to write for each input.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Sixel,
    Bmp,
}

/// Conversion defaults loaded from YAML; command-line flags override them.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// 2, mono, 8, 16, 256, 256rgbi, gray, graymean or x68k
    #[serde(default = "default_color")]
    pub color: String,

    /// Number of gray tones (2..=256); takes precedence over `color`
    #[serde(default)]
    pub gray: Option<u16>,

    /// Hex colors of a custom palette; takes precedence over `color` and `gray`
    #[serde(default)]
    pub palette: Vec<String>,

    /// default (alias rgb) or hsv
    #[serde(default = "default_finder")]
    pub finder: String,

    #[serde(default)]
    pub color_factor: Option<f32>,

    /// none, simple, fast, high, or a diffusion name (implies high)
    #[serde(default = "default_reduce")]
    pub reduce: String,

    #[serde(default = "default_diffusion")]
    pub diffusion: String,

    #[serde(default = "default_resize_axis")]
    pub resize_axis: String,

    /// Requested width, 0 keeps the source width
    #[serde(default)]
    pub width: usize,

    /// Requested height, 0 keeps the source height
    #[serde(default)]
    pub height: usize,

    /// Output gain, 256 = unity
    #[serde(default = "default_gain")]
    pub gain: u16,

    #[serde(default)]
    pub noise: u16,

    #[serde(default)]
    pub seed: Option<u32>,

    #[serde(default)]
    pub ormode: bool,

    #[serde(default)]
    pub suppress_palette: bool,

    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_color() -> String {
    "256".to_string()
}

fn default_finder() -> String {
    "default".to_string()
}

fn default_reduce() -> String {
    "high".to_string()
}

fn default_diffusion() -> String {
    "fs".to_string()
}

fn default_resize_axis() -> String {
    "both".to_string()
}

fn default_gain() -> u16 {
    256
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: default_color(),
            gray: None,
            palette: Vec::new(),
            finder: default_finder(),
            color_factor: None,
            reduce: default_reduce(),
            diffusion: default_diffusion(),
            resize_axis: default_resize_axis(),
            width: 0,
            height: 0,
            gain: default_gain(),
            noise: 0,
            seed: None,
            ormode: false,
            suppress_palette: false,
            output_format: OutputFormat::default(),
        }
    }
}

/// `explicit` if given, otherwise the path in [`CONFIG_ENV`].
pub fn config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
}

/// Parse a color mode name. `2` is a two-tone gray, `gray` and
/// `graymean` use 256 tones.
pub fn parse_color_mode(s: &str) -> Result<ColorMode, CliError> {
    let mode = match s.trim().to_ascii_lowercase().as_str() {
        "2" => ColorMode::Gray(1),
        "mono" => ColorMode::Mono,
        "8" => ColorMode::Fixed8,
        "16" => ColorMode::FixedAnsi16,
        "256" => ColorMode::Fixed256,
        "256rgbi" => ColorMode::Fixed256Rgbi,
        "gray" => ColorMode::Gray(255),
        "graymean" => ColorMode::GrayMean(255),
        "x68k" => ColorMode::FixedX68k,
        _ => return Err(CliError::Config(format!("unknown color mode: {}", s))),
    };
    Ok(mode)
}

pub fn parse_finder(s: &str) -> Result<FinderMode, CliError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "default" | "rgb" => Ok(FinderMode::Default),
        "hsv" => Ok(FinderMode::Hsv),
        _ => Err(CliError::Config(format!("unknown finder: {}", s))),
    }
}

/// A reduce method, or a diffusion kernel name that selects HighQuality
/// with that kernel.
pub fn parse_method(s: &str) -> Result<(ReduceMode, Option<Diffusion>), CliError> {
    if let Ok(mode) = s.parse::<ReduceMode>() {
        return Ok((mode, None));
    }
    match s.parse::<Diffusion>() {
        Ok(diffusion) => Ok((ReduceMode::HighQuality, Some(diffusion))),
        Err(_) => Err(CliError::Config(format!("unknown method: {}", s))),
    }
}

impl Config {
    /// Parse YAML text; absent keys take their defaults.
    pub fn from_yaml(content: &str) -> Result<Self, CliError> {
        serde_yaml::from_str(content).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Load from `path`, or return defaults when there is none or it is
    /// unreadable.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded configuration");
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// The color mode these settings select.
    pub fn color_mode(&self) -> Result<ColorMode, CliError> {
        if !self.palette.is_empty() {
            return Ok(ColorMode::Custom);
        }
        match self.gray {
            Some(tones @ 2..=256) => Ok(ColorMode::Gray((tones - 1) as u8)),
            Some(tones) => Err(CliError::Config(format!(
                "gray tones must be 2..=256, got {}",
                tones
            ))),
            None => parse_color_mode(&self.color),
        }
    }

    /// Build the converter for these settings.
    ///
    /// Names are validated here; numeric ranges (gain, sizes) are checked
    /// by the converter itself when it runs.
    pub fn converter(&self) -> Result<SixelConverter, CliError> {
        let (reduce_mode, method_diffusion) = parse_method(&self.reduce)?;
        let diffusion = match method_diffusion {
            Some(d) => d,
            None => self
                .diffusion
                .parse::<Diffusion>()
                .map_err(|e| CliError::Config(e.to_string()))?,
        };
        let resize_axis = self
            .resize_axis
            .parse::<ResizeAxis>()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let mut converter = SixelConverter::new()
            .reduce_mode(reduce_mode)
            .diffusion(diffusion)
            .finder(parse_finder(&self.finder)?)
            .resize(self.width, self.height)
            .resize_axis(resize_axis)
            .gain(self.gain)
            .noise_level(self.noise)
            .ormode(self.ormode)
            .suppress_palette(self.suppress_palette);

        converter = match self.color_mode()? {
            ColorMode::Custom => {
                let colors = self
                    .palette
                    .iter()
                    .map(|s| s.parse::<Rgb>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| CliError::Config(format!("bad palette color: {}", e)))?;
                converter.custom_palette(&colors)
            }
            mode => converter.color_mode(mode),
        };
        if let Some(seed) = self.seed {
            converter = converter.seed(seed);
        }
        if let Some(factor) = self.color_factor {
            converter = converter.color_factor(factor);
        }
        Ok(converter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sixel_reductor::Image;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.color, "256");
        assert_eq!(config.reduce, "high");
        assert_eq!(config.diffusion, "fs");
        assert_eq!(config.resize_axis, "both");
        assert_eq!(config.gain, 256);
        assert_eq!(config.output_format, OutputFormat::Sixel);
        assert!(!config.ormode);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("color: \"16\"\nwidth: 80\normode: true\n").unwrap();
        assert_eq!(config.color, "16");
        assert_eq!(config.width, 80);
        assert!(config.ormode);
        assert_eq!(config.gain, 256, "absent key should take its default");
        assert_eq!(config.diffusion, "fs");
    }

    #[test]
    fn test_empty_mapping_is_default() {
        assert_eq!(Config::from_yaml("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_output_format_yaml() {
        let config = Config::from_yaml("output_format: bmp").unwrap();
        assert_eq!(config.output_format, OutputFormat::Bmp);
        assert!(Config::from_yaml("output_format: gif").is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = Config::load(Some(Path::new("/nonexistent/sixelv.yaml")));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_without_path() {
        assert_eq!(Config::load(None), Config::default());
    }

    #[test]
    fn test_parse_color_mode() {
        assert_eq!(parse_color_mode("2").unwrap(), ColorMode::Gray(1));
        assert_eq!(parse_color_mode("mono").unwrap(), ColorMode::Mono);
        assert_eq!(parse_color_mode("16").unwrap(), ColorMode::FixedAnsi16);
        assert_eq!(parse_color_mode("256RGBI").unwrap(), ColorMode::Fixed256Rgbi);
        assert_eq!(parse_color_mode("graymean").unwrap(), ColorMode::GrayMean(255));
        assert!(parse_color_mode("7").is_err());
    }

    #[test]
    fn test_gray_tones() {
        let config = Config {
            gray: Some(4),
            ..Config::default()
        };
        assert_eq!(config.color_mode().unwrap(), ColorMode::Gray(3));

        let too_few = Config {
            gray: Some(1),
            ..Config::default()
        };
        assert!(matches!(too_few.color_mode(), Err(CliError::Config(_))));
    }

    #[test]
    fn test_palette_overrides_color() {
        let config = Config {
            gray: Some(4),
            palette: vec!["#000000".to_string(), "#ff0000".to_string()],
            ..Config::default()
        };
        assert_eq!(config.color_mode().unwrap(), ColorMode::Custom);
        let palette = config.converter().unwrap().palette().unwrap();
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn test_bad_palette_color() {
        let config = Config {
            palette: vec!["#zz0000".to_string()],
            ..Config::default()
        };
        assert!(matches!(config.converter(), Err(CliError::Config(_))));
    }

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("none").unwrap(), (ReduceMode::Simple, None));
        assert_eq!(parse_method("fast").unwrap(), (ReduceMode::Fast, None));
        assert_eq!(parse_method("auto").unwrap(), (ReduceMode::HighQuality, None));
        assert_eq!(
            parse_method("atkinson").unwrap(),
            (ReduceMode::HighQuality, Some(Diffusion::Atkinson))
        );
        assert!(parse_method("sharpen").is_err());
    }

    #[test]
    fn test_unknown_names_rejected() {
        for config in [
            Config {
                diffusion: "sierra".to_string(),
                ..Config::default()
            },
            Config {
                resize_axis: "diagonal".to_string(),
                ..Config::default()
            },
            Config {
                finder: "lab".to_string(),
                ..Config::default()
            },
        ] {
            assert!(
                matches!(config.converter(), Err(CliError::Config(_))),
                "{:?} should be rejected",
                config
            );
        }
    }

    #[test]
    fn test_converter_applies_size() {
        let config = Config {
            width: 4,
            ..Config::default()
        };
        let image = Image::from_rgb(vec![0; 8 * 2 * 3], 8, 2).unwrap();
        assert_eq!(config.converter().unwrap().target_size(&image), (4, 1));
    }
}
